//! CLI-specific error types with exit codes.
//!
//! This module wraps library errors and maps them to process exit codes so
//! scripts can distinguish a taken slot from a retryable wait or a missing
//! record.

use std::fmt;

use slotbook::Error as LibError;

/// CLI-specific error type with exit code mapping.
#[derive(Debug)]
pub enum CliError {
    /// Library error (wrapped).
    Library(LibError),

    /// I/O error.
    Io(std::io::Error),

    /// Configuration error.
    Config(String),
}

impl CliError {
    /// Get the appropriate exit code for this error.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: Slot conflict, forbidden action or unavailable resource
    /// - 2: Temporarily unavailable (safe to retry with backoff)
    /// - 3: Resource or reservation not found
    /// - 4: Invalid arguments or validation failure
    /// - 5: I/O error
    /// - 6: Other library error
    /// - 7: Configuration error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Library(lib_err) => match lib_err {
                LibError::SlotConflict { .. }
                | LibError::Forbidden { .. }
                | LibError::ResourceUnavailable { .. } => 1,
                LibError::TemporarilyUnavailable { .. } => 2,
                LibError::ResourceNotFound { .. } | LibError::ReservationNotFound { .. } => 3,
                LibError::Validation { .. } => 4,
                _ => 6,
            },
            CliError::Io(_) => 5,
            CliError::Config(_) => 7,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Library(e) => write!(f, "{e}"),
            CliError::Io(e) => write!(f, "I/O error: {e}"),
            CliError::Config(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Library(e) => Some(e),
            CliError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<LibError> for CliError {
    fn from(e: LibError) -> Self {
        CliError::Library(e)
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_maps_to_exit_1() {
        let err = CliError::from(LibError::SlotConflict {
            details: "taken".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_retryable_maps_to_exit_2() {
        let err = CliError::from(LibError::TemporarilyUnavailable {
            details: "busy".to_string(),
        });
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_not_found_maps_to_exit_3() {
        let err = CliError::from(LibError::ResourceNotFound {
            id: slotbook::ResourceId::new(7),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_validation_maps_to_exit_4() {
        let err = CliError::from(LibError::Validation {
            field: "timeslot".to_string(),
            message: "past".to_string(),
        });
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_config_maps_to_exit_7() {
        let err = CliError::Config("bad yaml".to_string());
        assert_eq!(err.exit_code(), 7);
    }
}
