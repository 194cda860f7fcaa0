//! In-memory parking lot ledger.
//!
//! Vehicles check in, accrue parked time, and check out with a computed fee
//! while the ledger keeps a running income report. The crate keeps a strict
//! split:
//!
//! - **[`core`]**: Pure, deterministic logic (tariffs, fees, the ledger).
//!   No I/O, no wall-clock reads, fully testable in isolation.
//! - **[`io`]**: Side-effecting helpers (config file, system clock).
//!
//! Orchestration modules ([`session`], [`demo`]) bind core logic to I/O and
//! implement CLI commands.

pub mod core;
pub mod demo;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
