//! The listing operation.

use chrono::Utc;

use crate::error::Result;
use crate::reservation::{Reservation, RequesterId};
use crate::store::Store;

/// Options for listing a requester's reservations.
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// The requester whose reservations are listed.
    pub requester_id: RequesterId,

    /// When set, only still-active reservations with a future slot are
    /// returned, earliest first. Otherwise everything is returned, newest
    /// slot first.
    pub upcoming: bool,
}

impl ListOptions {
    /// Creates listing options returning the full history.
    #[must_use]
    pub fn new(requester_id: RequesterId) -> Self {
        Self {
            requester_id,
            upcoming: false,
        }
    }

    /// Restricts the listing to upcoming active reservations.
    #[must_use]
    pub const fn with_upcoming(mut self, upcoming: bool) -> Self {
        self.upcoming = upcoming;
        self
    }
}

/// Lists reservations for a requester.
///
/// A plain read outside the locking protocol; it reflects whatever state
/// was committed when the query ran.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn execute(store: &Store, options: &ListOptions) -> Result<Vec<Reservation>> {
    let after = options.upcoming.then(Utc::now);
    Store::list_for_requester(store.connection(), &options.requester_id, after)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{book, cancel, BookOptions, CancelOptions};
    use crate::gate::AdmissionGate;
    use crate::reservation::Timeslot;
    use crate::store::test_util::{create_test_store, seed_resource};
    use chrono::{Duration as ChronoDuration, Utc};

    fn requester(name: &str) -> RequesterId {
        RequesterId::new(name).unwrap()
    }

    #[test]
    fn test_list_empty() {
        let store = create_test_store();
        let listed = execute(&store, &ListOptions::new(requester("alice"))).unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_list_only_own_reservations() {
        let mut store = create_test_store();
        let gate = AdmissionGate::new();
        let resource = seed_resource(&mut store, "Room A");

        let ts_a = Timeslot::new(Utc::now() + ChronoDuration::days(1));
        let ts_b = Timeslot::new(Utc::now() + ChronoDuration::days(2));
        book::execute(&mut store, &gate, &BookOptions::new(resource, requester("alice"), ts_a))
            .unwrap();
        book::execute(&mut store, &gate, &BookOptions::new(resource, requester("bob"), ts_b))
            .unwrap();

        let listed = execute(&store, &ListOptions::new(requester("alice"))).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].requester_id().as_str(), "alice");
    }

    #[test]
    fn test_list_upcoming_skips_cancelled() {
        let mut store = create_test_store();
        let gate = AdmissionGate::new();
        let resource = seed_resource(&mut store, "Room A");
        let alice = requester("alice");

        let kept = book::execute(
            &mut store,
            &gate,
            &BookOptions::new(
                resource,
                alice.clone(),
                Timeslot::new(Utc::now() + ChronoDuration::days(1)),
            ),
        )
        .unwrap();
        let dropped = book::execute(
            &mut store,
            &gate,
            &BookOptions::new(
                resource,
                alice.clone(),
                Timeslot::new(Utc::now() + ChronoDuration::days(2)),
            ),
        )
        .unwrap();
        cancel::execute(&mut store, &CancelOptions::new(dropped.id(), alice.clone())).unwrap();

        let upcoming = execute(&store, &ListOptions::new(alice).with_upcoming(true)).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id(), kept.id());
    }
}
