//! In-memory parking ledger.
//!
//! Holds the parked vehicles keyed by plate, the lot capacity, and the income
//! counters. All mutation goes through `&mut Ledger`, so a release updates the
//! vehicle set and both counters together.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::core::error::{InputError, LedgerError};
use crate::core::tariff::{self, Category};
use crate::core::vehicle::{Plate, Vehicle};

/// Checked-out vehicle count and cumulative fees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncomeReport {
    pub vehicles_checked_out: u64,
    pub total_earnings: u64,
}

/// Result of a successful release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub plate: Plate,
    pub category: Category,
    pub parked_minutes: u64,
    pub fee: u64,
}

/// Current occupants of the lot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Occupancy {
    Empty,
    /// Plates in ascending order.
    Parked(Vec<Plate>),
}

#[derive(Debug, Clone)]
pub struct Ledger {
    vehicles: HashMap<Plate, Vehicle>,
    capacity: usize,
    income: IncomeReport,
}

impl Ledger {
    pub fn new(capacity: usize) -> Result<Self, InputError> {
        if capacity == 0 {
            return Err(InputError::InvalidCapacity);
        }
        Ok(Self {
            vehicles: HashMap::with_capacity(capacity),
            capacity,
            income: IncomeReport::default(),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn contains(&self, plate: &str) -> bool {
        self.vehicles.contains_key(plate)
    }

    pub fn get(&self, plate: &str) -> Option<&Vehicle> {
        self.vehicles.get(plate)
    }

    /// Check a vehicle in.
    ///
    /// Capacity is checked before uniqueness, so a full lot reports `Full`
    /// even for a plate that is already inside.
    pub fn admit(&mut self, vehicle: Vehicle) -> Result<(), LedgerError> {
        if self.vehicles.len() >= self.capacity {
            debug!(plate = %vehicle.plate, capacity = self.capacity, "admit rejected: full");
            return Err(LedgerError::Full {
                capacity: self.capacity,
            });
        }
        if self.vehicles.contains_key(&vehicle.plate) {
            debug!(plate = %vehicle.plate, "admit rejected: duplicate");
            return Err(LedgerError::Duplicate {
                plate: vehicle.plate.to_string(),
            });
        }
        debug!(plate = %vehicle.plate, category = %vehicle.category, "vehicle admitted");
        self.vehicles.insert(vehicle.plate.clone(), vehicle);
        Ok(())
    }

    /// Check a vehicle out, charging for the time parked as of `now`.
    pub fn release(&mut self, plate: &str, now: DateTime<Utc>) -> Result<Receipt, LedgerError> {
        let not_found = || LedgerError::NotFound {
            plate: plate.to_string(),
        };
        let vehicle = self.vehicles.get(plate).ok_or_else(not_found)?;

        let parked_minutes = vehicle.parked_minutes(now);
        let fee = tariff::fee(
            vehicle.category,
            parked_minutes,
            vehicle.has_discount_card(),
        );
        let total_earnings = self.income.total_earnings.checked_add(fee).ok_or_else(|| {
            LedgerError::IncomeOverflow {
                plate: plate.to_string(),
                fee,
            }
        })?;

        let vehicle = self.vehicles.remove(plate).ok_or_else(not_found)?;
        self.income.vehicles_checked_out += 1;
        self.income.total_earnings = total_earnings;
        debug!(plate, parked_minutes, fee, "vehicle released");

        Ok(Receipt {
            plate: vehicle.plate,
            category: vehicle.category,
            parked_minutes,
            fee,
        })
    }

    pub fn occupants(&self) -> Occupancy {
        if self.vehicles.is_empty() {
            return Occupancy::Empty;
        }
        let mut plates: Vec<Plate> = self.vehicles.keys().cloned().collect();
        plates.sort();
        Occupancy::Parked(plates)
    }

    pub fn income(&self) -> IncomeReport {
        self.income
    }
}
