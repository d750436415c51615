//! Reservation types and the reservation lifecycle state machine.
//!
//! This module provides the core domain types for slot bookings: requester
//! and reservation identifiers, the [`Timeslot`] instant, the
//! [`ReservationStatus`] state machine and the [`Reservation`] record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::ResourceId;

/// A unique identifier for a reservation, assigned by the store.
///
/// # Examples
///
/// ```
/// use slotbook::ReservationId;
///
/// let id = ReservationId::new(12);
/// assert_eq!(id.value(), 12);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ReservationId(i64);

impl ReservationId {
    /// Creates a reservation identifier from its raw value.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ReservationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque requester identity.
///
/// The booking core performs no authentication; it only compares this value
/// for equality against the stored owner on cancellation and confirmation.
///
/// # Examples
///
/// ```
/// use slotbook::RequesterId;
///
/// let requester = RequesterId::new("alice").unwrap();
/// assert_eq!(requester.as_str(), "alice");
///
/// // Whitespace is trimmed; an empty identity is rejected.
/// assert!(RequesterId::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequesterId(String);

impl RequesterId {
    /// Creates a requester identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the identity is empty after trimming whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let trimmed = value.into().trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError {
                field: "requester_id".into(),
                message: "requester identity must be non-empty after trimming whitespace".into(),
            });
        }
        Ok(Self(trimmed))
    }

    /// Returns the identity as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequesterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A discrete bookable instant for a resource.
///
/// Timeslots denote a fixed-duration booking unit starting at the given
/// instant; the unit's length is the calling application's convention. Two
/// timeslots are the same slot exactly when their second-truncated UTC
/// instants are equal.
///
/// # Examples
///
/// ```
/// use slotbook::Timeslot;
///
/// let slot = Timeslot::from_rfc3339("2026-02-07T10:00:00Z").unwrap();
/// assert_eq!(format!("{slot}"), "2026-02-07T10:00:00Z");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timeslot(DateTime<Utc>);

impl Timeslot {
    /// Creates a timeslot at the given instant, truncated to whole seconds.
    #[must_use]
    pub fn new(instant: DateTime<Utc>) -> Self {
        let secs = instant.timestamp();
        Self(DateTime::from_timestamp(secs, 0).unwrap_or(instant))
    }

    /// Parses a timeslot from an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a well-formed RFC 3339
    /// timestamp.
    pub fn from_rfc3339(value: &str) -> Result<Self, ValidationError> {
        DateTime::parse_from_rfc3339(value)
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
            .map_err(|e| ValidationError {
                field: "timeslot".into(),
                message: format!("not a valid RFC 3339 timestamp: {e}"),
            })
    }

    /// Reconstructs a timeslot from stored unix seconds.
    pub(crate) fn from_unix_secs(secs: i64) -> Self {
        Self(DateTime::from_timestamp(secs, 0).unwrap_or_default())
    }

    /// Returns the timeslot as unix seconds for storage.
    pub(crate) fn unix_secs(self) -> i64 {
        self.0.timestamp()
    }

    /// Returns the underlying UTC instant.
    #[must_use]
    pub fn instant(self) -> DateTime<Utc> {
        self.0
    }

    /// Checks whether the slot starts at or before the given instant.
    ///
    /// Past-dated slots are rejected by the booking operation before any
    /// lock is taken.
    #[must_use]
    pub fn is_past(self, now: DateTime<Utc>) -> bool {
        self.0 <= now
    }
}

impl std::fmt::Display for Timeslot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(SecondsFormat::Secs, true))
    }
}

/// The lifecycle status of a reservation.
///
/// A reservation is created `Scheduled`, may be confirmed by its owner, and
/// ends in exactly one of the three terminal states. Rows are never deleted;
/// cancellation is a terminal status, not a removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Created by a successful booking; the initial state.
    Scheduled,
    /// Confirmed by the owning requester.
    Confirmed,
    /// Cancelled by the owning requester. Terminal; frees the slot.
    Cancelled,
    /// The slot took place. Terminal; the slot stays occupied.
    Completed,
    /// The requester did not show up. Terminal; the slot stays occupied.
    NoShow,
}

impl ReservationStatus {
    /// Checks whether the status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Cancelled | Self::Completed | Self::NoShow)
    }

    /// Checks whether a reservation in this status occupies its slot.
    ///
    /// Every status except `Cancelled` counts toward the slot-uniqueness
    /// invariant: a completed or no-show reservation represents a slot that
    /// already occurred and cannot be rebooked.
    #[must_use]
    pub const fn occupies_slot(self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Checks whether the owning requester may still cancel.
    #[must_use]
    pub const fn can_cancel(self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }

    /// Returns the stored string form of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
            Self::NoShow => "no_show",
        }
    }

    /// Parses a status from its stored string form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a known status.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "scheduled" => Ok(Self::Scheduled),
            "confirmed" => Ok(Self::Confirmed),
            "cancelled" => Ok(Self::Cancelled),
            "completed" => Ok(Self::Completed),
            "no_show" => Ok(Self::NoShow),
            other => Err(ValidationError {
                field: "status".into(),
                message: format!("unknown reservation status '{other}'"),
            }),
        }
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reservation record linking a requester to a (resource, timeslot) pair.
///
/// Records are created by the booking operation and mutated only through
/// versioned writes: the store increments `version` on every successful
/// update, and a write carrying a stale version is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    id: ReservationId,
    resource_id: ResourceId,
    requester_id: RequesterId,
    timeslot: Timeslot,
    status: ReservationStatus,
    version: i64,
    created_at: DateTime<Utc>,
    note: Option<String>,
}

impl Reservation {
    /// Assembles a reservation from stored parts.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        id: ReservationId,
        resource_id: ResourceId,
        requester_id: RequesterId,
        timeslot: Timeslot,
        status: ReservationStatus,
        version: i64,
        created_at: DateTime<Utc>,
        note: Option<String>,
    ) -> Self {
        Self {
            id,
            resource_id,
            requester_id,
            timeslot,
            status,
            version,
            created_at,
            note,
        }
    }

    /// Returns the reservation identifier.
    #[must_use]
    pub const fn id(&self) -> ReservationId {
        self.id
    }

    /// Returns the booked resource.
    #[must_use]
    pub const fn resource_id(&self) -> ResourceId {
        self.resource_id
    }

    /// Returns the owning requester.
    #[must_use]
    pub const fn requester_id(&self) -> &RequesterId {
        &self.requester_id
    }

    /// Returns the booked timeslot.
    #[must_use]
    pub const fn timeslot(&self) -> Timeslot {
        self.timeslot
    }

    /// Returns the current lifecycle status.
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        self.status
    }

    /// Returns the monotonic version counter.
    #[must_use]
    pub const fn version(&self) -> i64 {
        self.version
    }

    /// Returns the immutable creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the optional free-text note.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }
}

/// Error type for validation failures on domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// A description of the validation failure.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error for '{}': {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}
