//! Vehicle categories and fee calculation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::InputError;

/// Minutes covered by the base tariff.
pub const FREE_MINUTES: u64 = 120;
/// Length of one surcharge block once the free window is exceeded.
pub const BLOCK_MINUTES: u64 = 15;
/// Price of one started surcharge block.
pub const BLOCK_PRICE: u64 = 5;
/// Percentage taken off the total for discount card holders.
pub const DISCOUNT_PERCENT: u64 = 15;

/// Fixed set of vehicle categories accepted by the lot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Car,
    Moto,
    MiniBus,
    Bus,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Car,
        Category::Moto,
        Category::MiniBus,
        Category::Bus,
    ];

    /// Base fee for this category, in whole currency units.
    pub fn tariff(self) -> u64 {
        match self {
            Category::Car => 20,
            Category::Moto => 15,
            Category::MiniBus => 25,
            Category::Bus => 30,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Car => "car",
            Category::Moto => "moto",
            Category::MiniBus => "minibus",
            Category::Bus => "bus",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(Category::Car),
            "moto" | "motorcycle" => Ok(Category::Moto),
            "minibus" | "mini-bus" => Ok(Category::MiniBus),
            "bus" => Ok(Category::Bus),
            _ => Err(InputError::UnknownCategory(s.to_string())),
        }
    }
}

/// Compute the fee owed for a stay.
///
/// The base tariff covers the first [`FREE_MINUTES`]. Every started
/// [`BLOCK_MINUTES`] block past that adds [`BLOCK_PRICE`]. Card holders get
/// [`DISCOUNT_PERCENT`] off the total including the surcharge, truncated.
pub fn fee(category: Category, parked_minutes: u64, has_discount_card: bool) -> u64 {
    let mut total = category.tariff();

    if parked_minutes > FREE_MINUTES {
        let exceeded = parked_minutes - FREE_MINUTES;
        // At most u64::MAX / 3 plus the tariff.
        total += exceeded.div_ceil(BLOCK_MINUTES) * BLOCK_PRICE;
    }

    if has_discount_card {
        // Same truncation as `total * DISCOUNT_PERCENT / 100` without the
        // intermediate product.
        total -= total / 100 * DISCOUNT_PERCENT + total % 100 * DISCOUNT_PERCENT / 100;
    }

    total
}
