//! I/O helpers for parking commands.

pub mod clock;
pub mod config;
