//! The cancel operation.
//!
//! Cancellation is a soft delete: the row stays behind with status
//! `cancelled` and its slot becomes bookable again.

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus, RequesterId};
use crate::store::Store;

/// Options for a cancellation.
#[derive(Debug, Clone)]
pub struct CancelOptions {
    /// The reservation to cancel.
    pub reservation_id: ReservationId,

    /// The requester asking for the cancellation. Must equal the
    /// reservation's owner.
    pub requester_id: RequesterId,

    /// The version the caller last observed, if it read the reservation
    /// earlier. When unset, the version read inside this operation's
    /// transaction is used.
    pub expected_version: Option<i64>,
}

impl CancelOptions {
    /// Creates cancellation options.
    #[must_use]
    pub fn new(reservation_id: ReservationId, requester_id: RequesterId) -> Self {
        Self {
            reservation_id,
            requester_id,
            expected_version: None,
        }
    }

    /// Supplies the version the caller last observed.
    #[must_use]
    pub const fn with_expected_version(mut self, version: Option<i64>) -> Self {
        self.expected_version = version;
        self
    }
}

/// Cancels a reservation on behalf of its owner.
///
/// Only the owning requester may cancel, and only while the reservation is
/// still in a non-terminal state. The write carries the observed version;
/// a concurrent mutation since that observation surfaces as the conflict
/// outcome and nothing is applied.
///
/// # Errors
///
/// - [`Error::ReservationNotFound`] if the reservation does not exist
/// - [`Error::Forbidden`] if the requester is not the owner
/// - [`Error::SlotConflict`] if the reservation is already terminal or the
///   supplied version is stale
pub fn execute(store: &mut Store, options: &CancelOptions) -> Result<Reservation> {
    log::debug!(
        "cancelling reservation {} for {}",
        options.reservation_id,
        options.requester_id
    );

    let tx = store.begin_immediate()?;

    let reservation = Store::get_reservation(&tx, options.reservation_id)?.ok_or(
        Error::ReservationNotFound {
            id: options.reservation_id,
        },
    )?;

    if reservation.requester_id() != &options.requester_id {
        return Err(Error::Forbidden {
            details: format!(
                "reservation {} belongs to a different requester",
                options.reservation_id
            ),
        });
    }

    if !reservation.status().can_cancel() {
        return Err(Error::SlotConflict {
            details: format!(
                "reservation {} is {} and cannot be cancelled",
                options.reservation_id,
                reservation.status()
            ),
        });
    }

    let expected = options.expected_version.unwrap_or_else(|| reservation.version());
    let cancelled = Store::update_status_versioned(
        &tx,
        options.reservation_id,
        expected,
        ReservationStatus::Cancelled,
    )?
    .ok_or_else(|| Error::SlotConflict {
        details: format!(
            "reservation {} was modified concurrently (stale version {expected})",
            options.reservation_id
        ),
    })?;

    tx.commit()
        .map_err(|e| Error::from_storage(e, "commit cancellation"))?;

    log::debug!("cancelled reservation {}", options.reservation_id);
    Ok(cancelled)
}
