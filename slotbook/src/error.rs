//! Error types for the slotbook library.
//!
//! This module provides the error hierarchy for all operations in the
//! slotbook library, using `thiserror` for ergonomic error handling.
//!
//! The booking path maps every storage-layer failure into this taxonomy at
//! the operation boundary; raw storage errors never reach callers of the
//! booking operations. The three conflict-detection layers (locked read,
//! versioned write, uniqueness index) all surface as [`Error::SlotConflict`],
//! so call sites cannot tell which layer fired.

use std::path::PathBuf;

use thiserror::Error;

use crate::reservation::ReservationId;
use crate::resource::ResourceId;

/// Result type alias for operations that may fail with a slotbook error.
///
/// # Examples
///
/// ```
/// use slotbook::{Error, Result};
///
/// fn example_operation() -> Result<u32> {
///     Ok(42)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the slotbook library.
///
/// The first seven variants form the caller-facing outcome taxonomy of the
/// booking operations; the remaining variants cover storage, configuration
/// and I/O failures below that boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// A request was malformed and rejected before any lock was taken.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },

    /// The referenced resource does not exist.
    #[error("resource {id} not found")]
    ResourceNotFound {
        /// The resource that was looked up.
        id: ResourceId,
    },

    /// The resource exists but is not accepting new reservations.
    #[error("resource {id} is not currently accepting reservations")]
    ResourceUnavailable {
        /// The resource that was looked up.
        id: ResourceId,
    },

    /// The referenced reservation does not exist.
    #[error("reservation {id} not found")]
    ReservationNotFound {
        /// The reservation that was looked up.
        id: ReservationId,
    },

    /// Another reservation holds the requested (resource, timeslot) pair.
    ///
    /// This outcome unifies the locked-read hit, the stale-version write and
    /// the uniqueness-constraint violation. The slot is genuinely taken, so
    /// retrying without picking a different timeslot will fail again.
    #[error("slot conflict: {details}")]
    SlotConflict {
        /// Details about the conflict, for logs and operators.
        details: String,
    },

    /// The requester does not own the reservation they tried to change.
    #[error("forbidden: {details}")]
    Forbidden {
        /// Details about the refused action.
        details: String,
    },

    /// A bounded wait (admission gate or storage lock) exceeded its limit.
    ///
    /// Safe to retry with backoff.
    #[error("temporarily unavailable: {details}")]
    TemporarilyUnavailable {
        /// Details about which wait timed out.
        details: String,
    },

    /// An unclassified storage error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A configuration error occurred.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The data directory was not found and auto-initialization is disabled.
    #[error("data directory not found: {}", path.display())]
    DataDirectoryNotFound {
        /// The expected path to the data directory.
        path: PathBuf,
    },

    /// Database corruption was detected.
    #[error("database corruption detected: {details}")]
    DatabaseCorruption {
        /// Details about the corruption.
        details: String,
    },

    /// An unsupported schema version was encountered.
    #[error("unsupported schema version: expected {expected}, found {found}")]
    UnsupportedSchemaVersion {
        /// The expected schema version.
        expected: i32,
        /// The schema version found in the database.
        found: i32,
    },
}

impl From<crate::reservation::ValidationError> for Error {
    fn from(err: crate::reservation::ValidationError) -> Self {
        Self::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

impl Error {
    /// Classifies a storage error at the booking boundary.
    ///
    /// Uniqueness-constraint violations become [`Error::SlotConflict`] and
    /// lock waits that exhausted the busy timeout become
    /// [`Error::TemporarilyUnavailable`]. Anything else stays in the
    /// unclassified [`Error::Database`] bucket.
    pub(crate) fn from_storage(err: rusqlite::Error, context: &str) -> Self {
        if let rusqlite::Error::SqliteFailure(cause, _) = &err {
            match cause.code {
                rusqlite::ErrorCode::ConstraintViolation => {
                    return Self::SlotConflict {
                        details: format!("{context}: the slot is already held"),
                    };
                }
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked => {
                    return Self::TemporarilyUnavailable {
                        details: format!("{context}: storage lock wait exceeded its bound"),
                    };
                }
                _ => {}
            }
        }
        Self::Database(err)
    }

    /// Check if the error is the unified slot-conflict outcome.
    ///
    /// # Examples
    ///
    /// ```
    /// use slotbook::Error;
    ///
    /// let err = Error::SlotConflict { details: "slot taken".to_string() };
    /// assert!(err.is_conflict());
    /// ```
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::SlotConflict { .. })
    }

    /// Check if a client may retry the request.
    ///
    /// Only [`Error::SlotConflict`] and [`Error::TemporarilyUnavailable`]
    /// are retryable; the latter with backoff, the former typically only
    /// after picking a different timeslot.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::SlotConflict { .. } | Self::TemporarilyUnavailable { .. }
        )
    }
}
