//! Outcome recording for slots that have taken place.
//!
//! Completion and no-show transitions are driven by collaborators outside
//! the booking core (a scheduling or attendance process), not by the
//! requester, so there is no ownership check. Either outcome is terminal
//! and the slot stays occupied: it already happened and cannot be rebooked.

use crate::error::{Error, Result};
use crate::reservation::{Reservation, ReservationId, ReservationStatus};
use crate::store::Store;

/// How an elapsed slot turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOutcome {
    /// The slot took place.
    Completed,
    /// The requester did not show up.
    NoShow,
}

impl SlotOutcome {
    /// Returns the terminal status this outcome maps to.
    #[must_use]
    pub const fn as_status(self) -> ReservationStatus {
        match self {
            Self::Completed => ReservationStatus::Completed,
            Self::NoShow => ReservationStatus::NoShow,
        }
    }
}

/// Options for recording a slot outcome.
#[derive(Debug, Clone)]
pub struct OutcomeOptions {
    /// The reservation the outcome applies to.
    pub reservation_id: ReservationId,

    /// The recorded outcome.
    pub outcome: SlotOutcome,

    /// The version the caller last observed, if any.
    pub expected_version: Option<i64>,
}

impl OutcomeOptions {
    /// Creates outcome-recording options.
    #[must_use]
    pub const fn new(reservation_id: ReservationId, outcome: SlotOutcome) -> Self {
        Self {
            reservation_id,
            outcome,
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

/// Records the outcome of an elapsed slot.
///
/// # Errors
///
/// - [`Error::ReservationNotFound`] if the reservation does not exist
/// - [`Error::SlotConflict`] if the reservation is already terminal or the
///   supplied version is stale
pub fn execute(store: &mut Store, options: &OutcomeOptions) -> Result<Reservation> {
    log::debug!(
        "recording {:?} for reservation {}",
        options.outcome,
        options.reservation_id
    );

    let tx = store.begin_immediate()?;

    let reservation = Store::get_reservation(&tx, options.reservation_id)?.ok_or(
        Error::ReservationNotFound {
            id: options.reservation_id,
        },
    )?;

    if reservation.status().is_terminal() {
        return Err(Error::SlotConflict {
            details: format!(
                "reservation {} is already {}",
                options.reservation_id,
                reservation.status()
            ),
        });
    }

    let expected = options.expected_version.unwrap_or(reservation.version());
    let updated = Store::update_status_versioned(
        &tx,
        options.reservation_id,
        expected,
        options.outcome.as_status(),
    )?
    .ok_or_else(|| Error::SlotConflict {
        details: format!(
            "reservation {} was modified concurrently (stale version {expected})",
            options.reservation_id
        ),
    })?;

    tx.commit()
        .map_err(|e| Error::from_storage(e, "commit outcome"))?;

    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{book, BookOptions};
    use crate::gate::AdmissionGate;
    use crate::reservation::{RequesterId, Timeslot};
    use crate::store::test_util::{create_test_store, seed_resource};
    use chrono::{Duration as ChronoDuration, Utc};

    fn booked(store: &mut Store) -> Reservation {
        let gate = AdmissionGate::new();
        let resource = seed_resource(store, "Room A");
        let ts = Timeslot::new(Utc::now() + ChronoDuration::days(7));
        let requester = RequesterId::new("alice").unwrap();
        book::execute(store, &gate, &BookOptions::new(resource, requester, ts)).unwrap()
    }

    #[test]
    fn test_record_completed() {
        let mut store = create_test_store();
        let reservation = booked(&mut store);

        let updated = execute(
            &mut store,
            &OutcomeOptions::new(reservation.id(), SlotOutcome::Completed),
        )
        .unwrap();

        assert_eq!(updated.status(), ReservationStatus::Completed);
        assert_eq!(updated.version(), 2);
    }

    #[test]
    fn test_record_no_show() {
        let mut store = create_test_store();
        let reservation = booked(&mut store);

        let updated = execute(
            &mut store,
            &OutcomeOptions::new(reservation.id(), SlotOutcome::NoShow),
        )
        .unwrap();

        assert_eq!(updated.status(), ReservationStatus::NoShow);
    }

    #[test]
    fn test_record_outcome_twice_is_conflict() {
        let mut store = create_test_store();
        let reservation = booked(&mut store);
        let options = OutcomeOptions::new(reservation.id(), SlotOutcome::Completed);

        execute(&mut store, &options).unwrap();
        let result = execute(&mut store, &options);
        assert!(matches!(result, Err(Error::SlotConflict { .. })));
    }

    #[test]
    fn test_record_outcome_missing_reservation() {
        let mut store = create_test_store();
        let result = execute(
            &mut store,
            &OutcomeOptions::new(ReservationId::new(404), SlotOutcome::Completed),
        );
        assert!(matches!(result, Err(Error::ReservationNotFound { .. })));
    }
}
