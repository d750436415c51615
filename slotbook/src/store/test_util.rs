//! Shared test utilities for store unit tests.

use tempfile::tempdir;

use crate::reservation::Timeslot;
use crate::resource::ResourceId;
use crate::store::{Store, StoreConfig};

/// Creates a temporary test store that will be cleaned up automatically.
///
/// # Panics
///
/// Panics if the temporary directory or database cannot be created.
/// This is acceptable in test code where we want to fail fast.
#[must_use]
pub fn create_test_store() -> Store {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.db");
    let config = StoreConfig::new(path);
    let store = Store::open(config).unwrap();

    // Prevent the TempDir from being dropped immediately
    std::mem::forget(dir);

    store
}

/// Inserts a resource and returns its identifier.
///
/// # Panics
///
/// Panics if the insert fails.
pub fn seed_resource(store: &mut Store, name: &str) -> ResourceId {
    store.insert_resource(name, None).unwrap().id()
}

/// Parses an RFC 3339 timeslot.
///
/// # Panics
///
/// Panics if the string is malformed.
#[must_use]
pub fn slot(value: &str) -> Timeslot {
    Timeslot::from_rfc3339(value).unwrap()
}
