//! Error taxonomy for the parking ledger.
//!
//! [`LedgerError`] covers the expected, recoverable outcomes of ledger
//! operations. [`InputError`] covers malformed caller input; a CLI run treats
//! these as unrecoverable.

use thiserror::Error;

/// Recoverable failures reported by [`crate::core::ledger::Ledger`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Every slot is taken.
    #[error("parking is full (capacity {capacity})")]
    Full { capacity: usize },

    /// A vehicle with the same plate is already parked.
    #[error("vehicle {plate} is already parked")]
    Duplicate { plate: String },

    /// No parked vehicle carries this plate.
    #[error("vehicle {plate} is not parked")]
    NotFound { plate: String },

    /// Charging this fee would overflow the earnings counter.
    #[error("total earnings would overflow charging {fee} for {plate}")]
    IncomeOverflow { plate: String, fee: u64 },
}

/// Malformed input supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("unknown vehicle category '{0}' (expected car, moto, minibus or bus)")]
    UnknownCategory(String),

    #[error("plate must not be empty")]
    EmptyPlate,

    #[error("capacity must be > 0")]
    InvalidCapacity,

    #[error("unknown command '{0}' (expected admit, release, list or report)")]
    UnknownCommand(String),

    #[error("{command}: missing argument <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{command}: unexpected argument '{argument}'")]
    UnexpectedArgument {
        command: &'static str,
        argument: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ledger_errors_name_the_plate() {
        let err = LedgerError::NotFound {
            plate: "AA111AA".to_string(),
        };
        assert_eq!(err.to_string(), "vehicle AA111AA is not parked");
    }

    #[test]
    fn missing_argument_names_command_and_argument() {
        let err = InputError::MissingArgument {
            command: "release",
            argument: "plate",
        };
        assert_eq!(err.to_string(), "release: missing argument <plate>");
    }
}
