//! Reservation storage operations.
//!
//! This module implements the store operations the admission path composes:
//! the locked existence read, the versioned insert and the versioned status
//! update, plus the read-only queries.
//!
//! All functions take a plain [`Connection`] so they run equally inside a
//! booking transaction (pass the transaction, it derefs to a connection) or
//! against the bare store for read-only paths.

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::error::{Error, Result};
use crate::reservation::{
    Reservation, ReservationId, ReservationStatus, RequesterId, Timeslot,
};
use crate::resource::ResourceId;

use super::connection::Store;

/// Converts stored unix seconds into a UTC instant.
pub(super) fn unix_secs_to_datetime(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_default()
}

/// Helper to deserialize a reservation from a database row.
///
/// Expects row fields in this order: id, `resource_id`, `requester_id`,
/// `slot_at`, status, version, `created_at`, note.
fn row_to_reservation(row: &rusqlite::Row<'_>) -> rusqlite::Result<Reservation> {
    let id: i64 = row.get(0)?;
    let resource_id: i64 = row.get(1)?;
    let requester_raw: String = row.get(2)?;
    let slot_secs: i64 = row.get(3)?;
    let status_raw: String = row.get(4)?;
    let version: i64 = row.get(5)?;
    let created_secs: i64 = row.get(6)?;
    let note: Option<String> = row.get(7)?;

    let requester_id = RequesterId::new(requester_raw)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
    let status = ReservationStatus::parse(&status_raw)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    Ok(Reservation::from_parts(
        ReservationId::new(id),
        ResourceId::new(resource_id),
        requester_id,
        Timeslot::from_unix_secs(slot_secs),
        status,
        version,
        unix_secs_to_datetime(created_secs),
        note,
    ))
}

const SELECT_ACTIVE_FOR_SLOT: &str = r"
    SELECT id, resource_id, requester_id, slot_at, status, version, created_at, note
    FROM reservations
    WHERE resource_id = ? AND slot_at = ? AND status != 'cancelled'
    LIMIT 1
";

const INSERT_RESERVATION: &str = r"
    INSERT INTO reservations
    (resource_id, requester_id, slot_at, status, version, created_at, note)
    VALUES (?, ?, ?, 'scheduled', 1, ?, ?)
";

const UPDATE_STATUS_VERSIONED: &str = r"
    UPDATE reservations
    SET status = ?, version = version + 1
    WHERE id = ? AND version = ?
";

const SELECT_RESERVATION: &str = r"
    SELECT id, resource_id, requester_id, slot_at, status, version, created_at, note
    FROM reservations
    WHERE id = ?
";

const LIST_FOR_REQUESTER: &str = r"
    SELECT id, resource_id, requester_id, slot_at, status, version, created_at, note
    FROM reservations
    WHERE requester_id = ?
    ORDER BY slot_at DESC, id DESC
";

const LIST_UPCOMING_FOR_REQUESTER: &str = r"
    SELECT id, resource_id, requester_id, slot_at, status, version, created_at, note
    FROM reservations
    WHERE requester_id = ? AND slot_at > ? AND status IN ('scheduled', 'confirmed')
    ORDER BY slot_at ASC, id ASC
";

const COUNT_ACTIVE_FOR_SLOT: &str = r"
    SELECT COUNT(*) FROM reservations
    WHERE resource_id = ? AND slot_at = ? AND status != 'cancelled'
";

impl Store {
    /// Reads the active reservation holding a (resource, timeslot) pair.
    ///
    /// This is the locked-read gate when called inside a transaction opened
    /// with [`Store::begin_immediate`]: the write lock taken at begin holds
    /// off every concurrent admission transaction until this one finishes,
    /// so "check existing, then insert" is atomic across connections and
    /// processes. Returning `Some` means the caller must reject the attempt
    /// as a conflict; `None` means the caller may proceed to insert.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_active_for_slot(
        conn: &Connection,
        resource_id: ResourceId,
        timeslot: Timeslot,
    ) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare_cached(SELECT_ACTIVE_FOR_SLOT)?;
        match stmt.query_row(
            params![resource_id.value(), timeslot.unix_secs()],
            row_to_reservation,
        ) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Inserts a new `scheduled` reservation at version 1.
    ///
    /// The partial unique index on (`resource_id`, `slot_at`) arbitrates any
    /// residual race: if another writer slipped in between the locked read
    /// and this insert, the violation is caught right here and mapped to
    /// the conflict outcome, never surfaced as a raw storage error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SlotConflict`] if the slot is already held, or
    /// another error if the insert fails for unrelated reasons.
    pub fn insert_reservation(
        conn: &Connection,
        resource_id: ResourceId,
        requester_id: &RequesterId,
        timeslot: Timeslot,
        note: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Reservation> {
        let created_secs = now.timestamp();
        conn.execute(
            INSERT_RESERVATION,
            params![
                resource_id.value(),
                requester_id.as_str(),
                timeslot.unix_secs(),
                created_secs,
                note,
            ],
        )
        .map_err(|e| Error::from_storage(e, "insert reservation"))?;

        let id = conn.last_insert_rowid();
        Ok(Reservation::from_parts(
            ReservationId::new(id),
            resource_id,
            requester_id.clone(),
            timeslot,
            ReservationStatus::Scheduled,
            1,
            unix_secs_to_datetime(created_secs),
            note.map(str::to_string),
        ))
    }

    /// Applies a status change carrying the version the caller observed.
    ///
    /// The store compares the supplied version against the stored one inside
    /// the same statement as the write and increments it on success, so a
    /// stale write can never be applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the update or the re-read fails.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` with the updated row on success
    /// - `Ok(None)` if no row matched, either because the reservation does
    ///   not exist or because the supplied version is stale; the caller
    ///   distinguishes the two
    pub fn update_status_versioned(
        conn: &Connection,
        id: ReservationId,
        expected_version: i64,
        next: ReservationStatus,
    ) -> Result<Option<Reservation>> {
        let rows = conn
            .execute(
                UPDATE_STATUS_VERSIONED,
                params![next.as_str(), id.value(), expected_version],
            )
            .map_err(|e| Error::from_storage(e, "update reservation status"))?;

        if rows == 0 {
            return Ok(None);
        }

        match Self::get_reservation(conn, id)? {
            Some(reservation) => Ok(Some(reservation)),
            None => Err(Error::DatabaseCorruption {
                details: format!("reservation {id} vanished during a status update"),
            }),
        }
    }

    /// Retrieves a reservation by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reservation))` if the reservation exists
    /// - `Ok(None)` if it doesn't
    pub fn get_reservation(conn: &Connection, id: ReservationId) -> Result<Option<Reservation>> {
        let mut stmt = conn.prepare_cached(SELECT_RESERVATION)?;
        match stmt.query_row(params![id.value()], row_to_reservation) {
            Ok(reservation) => Ok(Some(reservation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists a requester's reservations, newest slot first.
    ///
    /// When `upcoming_after` is set, only still-active reservations with a
    /// slot after that instant are returned, earliest first.
    ///
    /// This is a plain read: listings take no part in the locking protocol.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a row cannot be deserialized.
    pub fn list_for_requester(
        conn: &Connection,
        requester_id: &RequesterId,
        upcoming_after: Option<DateTime<Utc>>,
    ) -> Result<Vec<Reservation>> {
        let reservations = match upcoming_after {
            Some(after) => {
                let mut stmt = conn.prepare_cached(LIST_UPCOMING_FOR_REQUESTER)?;
                let rows = stmt.query_map(
                    params![requester_id.as_str(), after.timestamp()],
                    row_to_reservation,
                )?;
                rows.collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?
            }
            None => {
                let mut stmt = conn.prepare_cached(LIST_FOR_REQUESTER)?;
                let rows = stmt.query_map(params![requester_id.as_str()], row_to_reservation)?;
                rows.collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?
            }
        };

        Ok(reservations)
    }

    /// Counts non-cancelled reservations holding a (resource, timeslot) pair.
    ///
    /// Under the booking invariant this is always 0 or 1.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count_active_for_slot(
        conn: &Connection,
        resource_id: ResourceId,
        timeslot: Timeslot,
    ) -> Result<i64> {
        let count: i64 = conn.query_row(
            COUNT_ACTIVE_FOR_SLOT,
            params![resource_id.value(), timeslot.unix_secs()],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
