//! The confirm operation.

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus, RequesterId};
use crate::store::Store;

/// Options for confirming a reservation.
#[derive(Debug, Clone)]
pub struct ConfirmOptions {
    /// The reservation to confirm.
    pub reservation_id: ReservationId,

    /// The requester confirming. Must equal the reservation's owner.
    pub requester_id: RequesterId,

    /// The version the caller last observed, if any.
    pub expected_version: Option<i64>,
}

impl ConfirmOptions {
    /// Creates confirmation options.
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

/// Confirms a scheduled reservation on behalf of its owner.
///
/// # Errors
///
/// - [`Error::ReservationNotFound`] if the reservation does not exist
/// - [`Error::Forbidden`] if the requester is not the owner
/// - [`Error::SlotConflict`] if the reservation is not awaiting
///   confirmation or the supplied version is stale
pub fn execute(store: &mut Store, options: &ConfirmOptions) -> Result<Reservation> {
    log::debug!(
        "confirming reservation {} for {}",
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

    if reservation.status() != ReservationStatus::Scheduled {
        return Err(Error::SlotConflict {
            details: format!(
                "reservation {} is {} and is not awaiting confirmation",
                options.reservation_id,
                reservation.status()
            ),
        });
    }

    let expected = options.expected_version.unwrap_or(reservation.version());
    let confirmed = Store::update_status_versioned(
        &tx,
        options.reservation_id,
        expected,
        ReservationStatus::Confirmed,
    )?
    .ok_or_else(|| Error::SlotConflict {
        details: format!(
            "reservation {} was modified concurrently (stale version {expected})",
            options.reservation_id
        ),
    })?;

    tx.commit()
        .map_err(|e| Error::from_storage(e, "commit confirmation"))?;

    Ok(confirmed)
}
