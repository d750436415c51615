//! Shared fixtures for integration tests.

use std::path::PathBuf;

use chrono::{Duration, Utc};
use tempfile::TempDir;

use slotbook::{ResourceId, Store, StoreConfig, Timeslot};

/// A temporary database shared by every connection a test opens.
pub struct TestDb {
    /// Keeps the directory alive for the duration of the test.
    _dir: TempDir,
    path: PathBuf,
}

impl TestDb {
    /// Creates the database file and initializes the schema.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slotbook.db");
        // First open initializes the schema.
        drop(Store::open(StoreConfig::new(&path)).unwrap());
        Self { _dir: dir, path }
    }

    /// Opens a fresh connection to the shared database.
    pub fn open(&self) -> Store {
        Store::open(StoreConfig::new(&self.path)).unwrap()
    }
}

/// Seeds a resource and returns its identifier.
pub fn seed_resource(store: &mut Store, name: &str) -> ResourceId {
    store.insert_resource(name, None).unwrap().id()
}

/// A timeslot a given number of days in the future.
pub fn future_slot(days: i64) -> Timeslot {
    Timeslot::new(Utc::now() + Duration::days(days))
}
