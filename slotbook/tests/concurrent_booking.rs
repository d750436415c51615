//! Concurrency tests for the admission path.
//!
//! These tests open one store connection per thread against a shared
//! database file, the deployment shape the safety layers are designed for.
//! They verify the exclusivity guarantee under simulated concurrent load
//! and that the bounded-wait paths surface the retryable outcome.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use common::{future_slot, seed_resource, TestDb};
use slotbook::booking::{book, cancel};
use slotbook::{
    AdmissionGate, BookOptions, CancelOptions, Error, RequesterId, ReservationStatus, Store,
};

fn requester(name: &str) -> RequesterId {
    RequesterId::new(name).unwrap()
}

/// Runs `n` simultaneous booking attempts for one (resource, timeslot) and
/// returns the per-thread outcomes.
fn race_for_slot(n: usize) -> (TestDb, slotbook::ResourceId, Vec<Result<slotbook::Reservation, Error>>) {
    let db = TestDb::new();
    let mut seed_store = db.open();
    let resource = seed_resource(&mut seed_store, "Room A");
    drop(seed_store);

    let ts = future_slot(7);
    let gate = Arc::new(AdmissionGate::new());
    let barrier = Arc::new(Barrier::new(n));

    // Open every connection before the race starts so the attempts
    // themselves run back to back.
    let stores: Vec<Store> = (0..n).map(|_| db.open()).collect();

    let handles: Vec<_> = stores
        .into_iter()
        .enumerate()
        .map(|(i, mut store)| {
            let gate = Arc::clone(&gate);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let options = BookOptions::new(resource, requester(&format!("requester-{i}")), ts);
                barrier.wait();
                book::execute(&mut store, &gate, &options)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    (db, resource, results)
}

#[test]
fn exactly_one_of_ten_concurrent_bookings_wins() {
    let (db, resource, results) = race_for_slot(10);

    let winners: Vec<_> = results.iter().filter(|r| r.is_ok()).collect();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::SlotConflict { .. })))
        .count();

    assert_eq!(winners.len(), 1, "exactly one booking must win: {results:?}");
    assert_eq!(conflicts, 9, "all losers must see the conflict outcome");

    let winner = results
        .iter()
        .find_map(|r| r.as_ref().ok())
        .expect("one winner");
    assert_eq!(winner.status(), ReservationStatus::Scheduled);
    assert_eq!(winner.version(), 1);

    // The storage invariant holds: one active row for the slot.
    let store = db.open();
    assert_eq!(
        Store::count_active_for_slot(store.connection(), resource, winner.timeslot()).unwrap(),
        1
    );
}

#[test]
fn exactly_one_of_fifty_concurrent_bookings_wins() {
    let (db, resource, results) = race_for_slot(50);

    let winners = results.iter().filter(|r| r.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|r| matches!(r, Err(Error::SlotConflict { .. })))
        .count();

    assert_eq!(winners, 1);
    assert_eq!(conflicts, 49);

    let winner = results.iter().find_map(|r| r.as_ref().ok()).unwrap();
    let store = db.open();
    assert_eq!(
        Store::count_active_for_slot(store.connection(), resource, winner.timeslot()).unwrap(),
        1
    );
}

#[test]
fn concurrent_bookings_on_distinct_slots_all_succeed() {
    let db = TestDb::new();
    let mut seed_store = db.open();
    let resource = seed_resource(&mut seed_store, "Room A");
    drop(seed_store);

    let gate = Arc::new(AdmissionGate::new());
    let barrier = Arc::new(Barrier::new(8));
    let stores: Vec<Store> = (0..8).map(|_| db.open()).collect();

    let handles: Vec<_> = stores
        .into_iter()
        .enumerate()
        .map(|(i, mut store)| {
            let gate = Arc::clone(&gate);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                // Distinct days, so no two attempts contend for a slot.
                let options = BookOptions::new(
                    resource,
                    requester(&format!("requester-{i}")),
                    future_slot(i64::try_from(i).unwrap() + 1),
                );
                barrier.wait();
                book::execute(&mut store, &gate, &options)
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_ok());
    }
}

#[test]
fn cancel_and_rebook_race_converges_to_one_active_reservation() {
    let db = TestDb::new();
    let mut seed_store = db.open();
    let resource = seed_resource(&mut seed_store, "Room A");
    let ts = future_slot(7);
    let gate = Arc::new(AdmissionGate::new());
    let alice = requester("alice");

    let booked = book::execute(
        &mut seed_store,
        &gate,
        &BookOptions::new(resource, alice.clone(), ts),
    )
    .unwrap();
    drop(seed_store);

    // Alice cancels while four other requesters hammer the freed slot.
    let barrier = Arc::new(Barrier::new(5));
    let mut handles = Vec::new();

    {
        let barrier = Arc::clone(&barrier);
        let mut store = db.open();
        let options = CancelOptions::new(booked.id(), alice);
        handles.push(thread::spawn(move || {
            barrier.wait();
            cancel::execute(&mut store, &options).map(|_| ())
        }));
    }
    for i in 0..4 {
        let gate = Arc::clone(&gate);
        let barrier = Arc::clone(&barrier);
        let mut store = db.open();
        let options = BookOptions::new(resource, requester(&format!("rival-{i}")), ts);
        handles.push(thread::spawn(move || {
            barrier.wait();
            // Rebooking only succeeds once the cancellation has landed;
            // before that the slot is simply in conflict.
            book::execute(&mut store, &gate, &options).map(|_| ())
        }));
    }

    let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for outcome in &outcomes {
        if let Err(e) = outcome {
            assert!(e.is_conflict(), "unexpected failure: {e}");
        }
    }

    // Whatever interleaving happened, the invariant holds.
    let store = db.open();
    let active = Store::count_active_for_slot(store.connection(), resource, ts).unwrap();
    assert!(active <= 1, "at most one active reservation, found {active}");
}

#[test]
fn bounded_gate_wait_surfaces_retryable_outcome() {
    let db = TestDb::new();
    let mut store = db.open();
    let resource = seed_resource(&mut store, "Room A");
    let gate = AdmissionGate::new();

    // Another booking attempt holds the gate for this resource.
    let held = gate.acquire(resource);

    let options = BookOptions::new(resource, requester("alice"), future_slot(7))
        .with_wait_timeout(Some(Duration::from_millis(50)));
    let result = book::execute(&mut store, &gate, &options);
    assert!(matches!(result, Err(Error::TemporarilyUnavailable { .. })));

    // Once the holder releases, the bounded wait succeeds.
    drop(held);
    book::execute(&mut store, &gate, &options).unwrap();
}
