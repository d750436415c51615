//! Database schema definitions and SQL constants.
//!
//! This module contains all table definitions, indices and constants
//! related to the schema for the slotbook reservation store.

/// Current schema version for the store.
///
/// This version is stored in the metadata table and is used to ensure
/// compatibility between the database and the application.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the metadata table.
pub const CREATE_METADATA_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS metadata (
        key TEXT PRIMARY KEY NOT NULL,
        value TEXT NOT NULL
    )";

/// SQL statement to create the resources table.
///
/// Rows are owned by the resource-directory collaborator; the booking core
/// only reads the `available` flag.
pub const CREATE_RESOURCES_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS resources (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        detail TEXT,
        available INTEGER NOT NULL DEFAULT 1
    )";

/// SQL statement to create the reservations table.
///
/// `version` starts at 1 and is incremented by every successful update;
/// `status` holds the lifecycle state as text. Rows are never deleted,
/// cancellation is a status change.
pub const CREATE_RESERVATIONS_TABLE: &str = r"
    CREATE TABLE IF NOT EXISTS reservations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        resource_id INTEGER NOT NULL REFERENCES resources(id),
        requester_id TEXT NOT NULL,
        slot_at INTEGER NOT NULL,
        status TEXT NOT NULL,
        version INTEGER NOT NULL DEFAULT 1,
        created_at INTEGER NOT NULL,
        note TEXT
    )";

/// SQL statement to create the slot-uniqueness index.
///
/// This partial unique index is the storage-level last line of defense for
/// the booking invariant: at most one non-cancelled reservation may exist
/// per (resource, slot). Cancelled rows are excluded so a freed slot can be
/// rebooked while the cancelled row remains for audit.
pub const CREATE_ACTIVE_SLOT_INDEX: &str = r"
    CREATE UNIQUE INDEX IF NOT EXISTS idx_reservations_active_slot
    ON reservations(resource_id, slot_at)
    WHERE status != 'cancelled'";

/// SQL statement to create an index on the requester column.
///
/// This index speeds up per-requester listings.
pub const CREATE_REQUESTER_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_reservations_requester ON reservations(requester_id)";

/// SQL statement to select the schema version from the metadata table.
pub const SELECT_SCHEMA_VERSION: &str = "SELECT value FROM metadata WHERE key = 'schema_version'";

/// SQL statement to insert or update the schema version in the metadata table.
pub const INSERT_SCHEMA_VERSION: &str =
    "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)";
