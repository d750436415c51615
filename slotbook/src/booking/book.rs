//! The booking operation: the reservation-admission path.

use std::time::Duration;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::gate::AdmissionGate;
use crate::reservation::{Reservation, RequesterId, Timeslot};
use crate::resource::ResourceId;
use crate::store::Store;

/// Maximum length of the free-text note, in characters.
const MAX_NOTE_CHARS: usize = 500;

/// Options for a booking attempt.
///
/// # Examples
///
/// ```
/// use slotbook::booking::BookOptions;
/// use slotbook::{RequesterId, ResourceId, Timeslot};
/// use std::time::Duration;
///
/// let options = BookOptions::new(
///     ResourceId::new(7),
///     RequesterId::new("alice").unwrap(),
///     Timeslot::from_rfc3339("2027-02-07T10:00:00Z").unwrap(),
/// )
/// .with_note(Some("first visit".to_string()))
/// .with_wait_timeout(Some(Duration::from_millis(250)));
///
/// assert_eq!(options.note.as_deref(), Some("first visit"));
/// ```
#[derive(Debug, Clone)]
pub struct BookOptions {
    /// The resource to book.
    pub resource_id: ResourceId,

    /// The requester making the booking.
    pub requester_id: RequesterId,

    /// The slot being requested.
    pub timeslot: Timeslot,

    /// Optional free-text note attached to the reservation.
    pub note: Option<String>,

    /// Bound on the admission-gate wait.
    ///
    /// `None` (the default) blocks until the gate is granted. With a bound,
    /// an exceeded wait returns the retryable outcome instead of blocking.
    pub wait_timeout: Option<Duration>,
}

impl BookOptions {
    /// Creates booking options with default settings (no note, unbounded
    /// gate wait).
    #[must_use]
    pub fn new(resource_id: ResourceId, requester_id: RequesterId, timeslot: Timeslot) -> Self {
        Self {
            resource_id,
            requester_id,
            timeslot,
            note: None,
            wait_timeout: None,
        }
    }

    /// Sets the note field.
    ///
    /// The note will be trimmed of leading/trailing whitespace.
    #[must_use]
    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.map(|n| n.trim().to_string());
        self
    }

    /// Sets the bound on the admission-gate wait.
    #[must_use]
    pub const fn with_wait_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.wait_timeout = timeout;
        self
    }

    /// Validates the request before any lock is taken.
    fn validate(&self, now: chrono::DateTime<Utc>) -> Result<()> {
        if self.timeslot.is_past(now) {
            return Err(Error::Validation {
                field: "timeslot".into(),
                message: format!("timeslot {} is not in the future", self.timeslot),
            });
        }

        if let Some(ref note) = self.note {
            if note.is_empty() {
                return Err(Error::Validation {
                    field: "note".into(),
                    message: "note must be non-empty after trimming whitespace".into(),
                });
            }
            if note.chars().count() > MAX_NOTE_CHARS {
                return Err(Error::Validation {
                    field: "note".into(),
                    message: format!("note exceeds {MAX_NOTE_CHARS} characters"),
                });
            }
        }

        Ok(())
    }
}

/// Attempts to book a reservation.
///
/// The admission path runs the four safety layers in order: request
/// validation (before any lock), the per-resource admission gate, the
/// locked existence read inside an `IMMEDIATE` transaction, and the
/// versioned insert arbitrated by the slot-uniqueness index. The gate is
/// released on every exit path via the permit's `Drop`, after the
/// transaction has committed or rolled back.
///
/// # Errors
///
/// - [`Error::Validation`] for a past-dated slot or malformed note
/// - [`Error::ResourceNotFound`] / [`Error::ResourceUnavailable`] from the
///   directory check
/// - [`Error::SlotConflict`] if any conflict layer fires
/// - [`Error::TemporarilyUnavailable`] if a bounded gate or storage lock
///   wait exceeded its limit
pub fn execute(store: &mut Store, gate: &AdmissionGate, options: &BookOptions) -> Result<Reservation> {
    let now = Utc::now();
    options.validate(now)?;

    log::debug!(
        "booking resource {} at {} for {}",
        options.resource_id,
        options.timeslot,
        options.requester_id
    );

    // Serialize same-resource attempts in this process before spending a
    // transaction on them. Declared before the transaction so the permit
    // drops after commit/rollback.
    let _permit = match options.wait_timeout {
        Some(timeout) => gate.acquire_for(options.resource_id, timeout)?,
        None => gate.acquire(options.resource_id),
    };

    let tx = store.begin_immediate()?;

    let resource = Store::get_resource(&tx, options.resource_id)?.ok_or(
        Error::ResourceNotFound {
            id: options.resource_id,
        },
    )?;
    if !resource.available() {
        return Err(Error::ResourceUnavailable {
            id: options.resource_id,
        });
    }

    if let Some(existing) = Store::find_active_for_slot(&tx, options.resource_id, options.timeslot)?
    {
        log::debug!(
            "slot {} on resource {} already held by reservation {}",
            options.timeslot,
            options.resource_id,
            existing.id()
        );
        return Err(Error::SlotConflict {
            details: format!(
                "resource {} already has an active reservation at {}",
                options.resource_id, options.timeslot
            ),
        });
    }

    let reservation = Store::insert_reservation(
        &tx,
        options.resource_id,
        &options.requester_id,
        options.timeslot,
        options.note.as_deref(),
        now,
    )?;

    tx.commit()
        .map_err(|e| Error::from_storage(e, "commit booking"))?;

    log::debug!(
        "booked reservation {} on resource {} at {}",
        reservation.id(),
        options.resource_id,
        options.timeslot
    );
    Ok(reservation)
}
