//! Test-only helpers for building vehicles and controlling time.

use std::cell::Cell;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::core::tariff::Category;
use crate::core::vehicle::{Plate, Vehicle};
use crate::io::clock::Clock;

/// Fixed reference instant used as the check-in time of test vehicles.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0)
        .single()
        .expect("valid base time")
}

/// Instant `minutes` after [`base_time`].
pub fn at(minutes: i64) -> DateTime<Utc> {
    base_time() + Duration::minutes(minutes)
}

/// Create a vehicle checked in at [`base_time`].
pub fn vehicle(plate: &str, category: Category, discount_card: Option<&str>) -> Vehicle {
    let vehicle = Vehicle::new(Plate::new(plate).expect("valid plate"), category, base_time());
    match discount_card {
        Some(card) => vehicle.with_discount_card(card),
        None => vehicle,
    }
}

/// Create a car without a discount card, checked in at [`base_time`].
pub fn car(plate: &str) -> Vehicle {
    vehicle(plate, Category::Car, None)
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct FixedClock {
    now: Cell<DateTime<Utc>>,
}

impl FixedClock {
    /// Clock stopped at [`base_time`].
    pub fn new() -> Self {
        Self::starting_at(base_time())
    }

    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance_minutes(&self, minutes: i64) {
        self.now.set(self.now.get() + Duration::minutes(minutes));
    }
}

impl Default for FixedClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }
}
