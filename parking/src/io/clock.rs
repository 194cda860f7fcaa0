//! Wall-clock abstraction.
//!
//! The [`Clock`] trait keeps the ledger and session free of direct
//! `Utc::now()` calls. Tests use a manually advanced clock instead.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
