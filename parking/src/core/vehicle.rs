//! Parked vehicle records.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::core::error::InputError;
use crate::core::tariff::Category;

/// Licence plate, the identity key of a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Plate(String);

impl Plate {
    /// Build a plate from raw text, trimming surrounding whitespace.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InputError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InputError::EmptyPlate);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Plate {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A vehicle handed to the ledger at check-in.
///
/// Two vehicles are equal when their plates are equal; the remaining fields
/// describe the stay and do not take part in identity.
#[derive(Debug, Clone)]
pub struct Vehicle {
    pub plate: Plate,
    pub category: Category,
    pub check_in: DateTime<Utc>,
    pub discount_card: Option<String>,
}

impl Vehicle {
    pub fn new(plate: Plate, category: Category, check_in: DateTime<Utc>) -> Self {
        Self {
            plate,
            category,
            check_in,
            discount_card: None,
        }
    }

    pub fn with_discount_card(mut self, card: impl Into<String>) -> Self {
        self.discount_card = Some(card.into());
        self
    }

    pub fn has_discount_card(&self) -> bool {
        self.discount_card.is_some()
    }

    /// Whole minutes parked as of `now`, truncated.
    ///
    /// A check-in stamped after `now` counts as zero minutes.
    pub fn parked_minutes(&self, now: DateTime<Utc>) -> u64 {
        let minutes = now.signed_duration_since(self.check_in).num_minutes();
        u64::try_from(minutes).unwrap_or(0)
    }
}

impl PartialEq for Vehicle {
    fn eq(&self, other: &Self) -> bool {
        self.plate == other.plate
    }
}

impl Eq for Vehicle {}

impl Hash for Vehicle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.plate.hash(state);
    }
}
