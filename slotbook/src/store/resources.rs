//! Resource directory storage operations.
//!
//! The booking core consumes this surface read-only: it looks a resource up
//! inside the booking transaction and checks the availability flag at that
//! point in time. The mutating operations exist for the directory
//! collaborator (and the CLI and tests standing in for it).

use rusqlite::{params, Connection, TransactionBehavior};

use crate::error::Result;
use crate::resource::{Resource, ResourceId};

use super::connection::Store;

const INSERT_RESOURCE: &str = r"
    INSERT INTO resources (name, detail, available)
    VALUES (?, ?, 1)
";

const SELECT_RESOURCE: &str = r"
    SELECT id, name, detail, available
    FROM resources
    WHERE id = ?
";

const LIST_RESOURCES: &str = r"
    SELECT id, name, detail, available
    FROM resources
    ORDER BY id
";

const LIST_AVAILABLE_RESOURCES: &str = r"
    SELECT id, name, detail, available
    FROM resources
    WHERE available = 1
    ORDER BY id
";

const UPDATE_RESOURCE_AVAILABILITY: &str = r"
    UPDATE resources
    SET available = ?
    WHERE id = ?
";

fn row_to_resource(row: &rusqlite::Row<'_>) -> rusqlite::Result<Resource> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let detail: Option<String> = row.get(2)?;
    let available: bool = row.get(3)?;
    Ok(Resource::from_parts(
        ResourceId::new(id),
        name,
        detail,
        available,
    ))
}

impl Store {
    /// Registers a new resource, accepting reservations from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or insert fails.
    pub fn insert_resource(&mut self, name: &str, detail: Option<&str>) -> Result<Resource> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        tx.execute(INSERT_RESOURCE, params![name, detail])?;
        let id = tx.last_insert_rowid();

        tx.commit()?;
        Ok(Resource::from_parts(
            ResourceId::new(id),
            name.to_string(),
            detail.map(str::to_string),
            true,
        ))
    }

    /// Looks a resource up by identifier.
    ///
    /// The booking path calls this inside its transaction, making the
    /// availability flag a point-in-time check as of the admission decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails (other than "not found").
    ///
    /// # Returns
    ///
    /// - `Ok(Some(resource))` if the resource exists
    /// - `Ok(None)` if it doesn't
    pub fn get_resource(conn: &Connection, id: ResourceId) -> Result<Option<Resource>> {
        let mut stmt = conn.prepare_cached(SELECT_RESOURCE)?;
        match stmt.query_row(params![id.value()], row_to_resource) {
            Ok(resource) => Ok(Some(resource)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lists resources, optionally only those accepting reservations.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_resources(conn: &Connection, only_available: bool) -> Result<Vec<Resource>> {
        let sql = if only_available {
            LIST_AVAILABLE_RESOURCES
        } else {
            LIST_RESOURCES
        };
        let mut stmt = conn.prepare(sql)?;
        let resources = stmt
            .query_map([], row_to_resource)?
            .collect::<std::result::Result<Vec<_>, rusqlite::Error>>()?;
        Ok(resources)
    }

    /// Flips a resource's availability flag.
    ///
    /// Existing reservations are untouched; the flag only governs new
    /// admissions from this point on.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction or update fails.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the resource was found and updated
    /// - `Ok(false)` if the resource was not found
    pub fn set_resource_availability(&mut self, id: ResourceId, available: bool) -> Result<bool> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let rows = tx.execute(UPDATE_RESOURCE_AVAILABILITY, params![available, id.value()])?;

        tx.commit()?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_util::create_test_store;

    #[test]
    fn test_insert_and_get_resource() {
        let mut store = create_test_store();
        let created = store.insert_resource("Room A", Some("ground floor")).unwrap();

        assert!(created.available());
        assert_eq!(created.name(), "Room A");

        let loaded = Store::get_resource(store.connection(), created.id())
            .unwrap()
            .unwrap();
        assert_eq!(loaded, created);
    }

    #[test]
    fn test_get_resource_not_found() {
        let store = create_test_store();
        let result = Store::get_resource(store.connection(), ResourceId::new(404)).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_list_resources() {
        let mut store = create_test_store();
        store.insert_resource("Room A", None).unwrap();
        store.insert_resource("Room B", None).unwrap();

        let all = Store::list_resources(store.connection(), false).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name(), "Room A");
        assert_eq!(all[1].name(), "Room B");
    }

    #[test]
    fn test_list_only_available_resources() {
        let mut store = create_test_store();
        let room_a = store.insert_resource("Room A", None).unwrap();
        store.insert_resource("Room B", None).unwrap();

        store.set_resource_availability(room_a.id(), false).unwrap();

        let available = Store::list_resources(store.connection(), true).unwrap();
        assert_eq!(available.len(), 1);
        assert_eq!(available[0].name(), "Room B");
    }

    #[test]
    fn test_set_availability_round_trip() {
        let mut store = create_test_store();
        let resource = store.insert_resource("Room A", None).unwrap();

        assert!(store.set_resource_availability(resource.id(), false).unwrap());
        let reloaded = Store::get_resource(store.connection(), resource.id())
            .unwrap()
            .unwrap();
        assert!(!reloaded.available());

        assert!(store.set_resource_availability(resource.id(), true).unwrap());
        let reloaded = Store::get_resource(store.connection(), resource.id())
            .unwrap()
            .unwrap();
        assert!(reloaded.available());
    }

    #[test]
    fn test_set_availability_missing_resource() {
        let mut store = create_test_store();
        assert!(!store
            .set_resource_availability(ResourceId::new(404), false)
            .unwrap());
    }
}
