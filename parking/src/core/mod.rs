//! Deterministic, pure logic for the parking ledger.
//!
//! Core modules must be free of I/O side effects, including reading the wall
//! clock. Callers pass the current time in explicitly.

pub mod error;
pub mod ledger;
pub mod tariff;
pub mod vehicle;
