//! SQLite persistence for places and items
//!
//! Two flat tables, `places (id, name, location, type)` and
//! `items (id, name, place_id, details, amount)`, each row a direct field
//! dump of a record. Columns are untyped and carry no primary key: the
//! layout is shared with existing storeman database files and must not
//! change. There is no schema versioning, no foreign-key enforcement and
//! no index.
//!
//! Every write is a single autocommitted statement; there is no transaction
//! boundary spanning multiple logical edits and no retry. Any SQLite error
//! propagates to the caller as an unrecoverable fault.

use std::path::Path;

use miette::{IntoDiagnostic, Result};
use rusqlite::{params, Connection, OptionalExtension};

use crate::core::identity::{RecordId, UNASSIGNED_PLACE_ID};
use crate::entities::{Item, StoragePlace};

/// The database handle, opened once at startup and held for the lifetime
/// of the process. Single-threaded; no pooling.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the database at `path`, creating both tables if absent
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).into_diagnostic()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory database, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().into_diagnostic()?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<()> {
        self.conn
            .execute_batch(
                r#"
            CREATE TABLE IF NOT EXISTS `places` (id, name, location, type);
            CREATE TABLE IF NOT EXISTS `items` (id, name, place_id, details, amount);
            "#,
            )
            .into_diagnostic()?;
        Ok(())
    }

    // =========================================================================
    // Places
    // =========================================================================

    pub fn insert_place(&self, place: &StoragePlace) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO `places` (id, name, location, type) VALUES (?1, ?2, ?3, ?4)",
                params![place.id.as_str(), place.name, place.location, place.kind],
            )
            .into_diagnostic()?;
        Ok(())
    }

    /// Full-row update by id; a missing row updates nothing
    pub fn update_place(&self, place: &StoragePlace) -> Result<()> {
        self.conn
            .execute(
                "UPDATE `places` SET `name` = ?1, `location` = ?2, `type` = ?3 WHERE `id` = ?4",
                params![place.name, place.location, place.kind, place.id.as_str()],
            )
            .into_diagnostic()?;
        Ok(())
    }

    pub fn delete_place(&self, id: &RecordId) -> Result<()> {
        self.conn
            .execute("DELETE FROM `places` WHERE `id` = ?1", params![id.as_str()])
            .into_diagnostic()?;
        Ok(())
    }

    /// Full-table scan of the `places` table
    pub fn load_places(&self) -> Result<Vec<StoragePlace>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, location, type FROM `places`")
            .into_diagnostic()?;

        let rows = stmt
            .query_map([], |row| {
                Ok(StoragePlace {
                    id: RecordId::from_stored(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    location: row.get(2)?,
                    kind: row.get(3)?,
                })
            })
            .into_diagnostic()?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .into_diagnostic()
    }

    /// Single-row lookup by id, used when explicitly re-resolving an item's
    /// place. Returns `None` when no row matches.
    pub fn fetch_place(&self, id: &RecordId) -> Result<Option<StoragePlace>> {
        self.conn
            .query_row(
                "SELECT id, name, location, type FROM `places` WHERE `id` = ?1",
                params![id.as_str()],
                |row| {
                    Ok(StoragePlace {
                        id: RecordId::from_stored(row.get::<_, String>(0)?),
                        name: row.get(1)?,
                        location: row.get(2)?,
                        kind: row.get(3)?,
                    })
                },
            )
            .optional()
            .into_diagnostic()
    }

    // =========================================================================
    // Items
    // =========================================================================

    pub fn insert_item(&self, item: &Item) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO `items` (id, name, place_id, details, amount) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    item.id.as_str(),
                    item.name,
                    stored_place_id(item),
                    item.details,
                    item.amount
                ],
            )
            .into_diagnostic()?;
        Ok(())
    }

    /// Full-row update by id; a missing row updates nothing
    pub fn update_item(&self, item: &Item) -> Result<()> {
        self.conn
            .execute(
                "UPDATE `items` SET `name` = ?1, `place_id` = ?2, `details` = ?3, `amount` = ?4 WHERE `id` = ?5",
                params![
                    item.name,
                    stored_place_id(item),
                    item.details,
                    item.amount,
                    item.id.as_str()
                ],
            )
            .into_diagnostic()?;
        Ok(())
    }

    pub fn delete_item(&self, id: &RecordId) -> Result<()> {
        self.conn
            .execute("DELETE FROM `items` WHERE `id` = ?1", params![id.as_str()])
            .into_diagnostic()?;
        Ok(())
    }

    /// Full-table scan of the `items` table.
    ///
    /// Does NOT join against `places`: a stored place id other than the
    /// unassigned sentinel comes back as `Some(id)` with nothing known about
    /// the place itself. Display names are filled in by a separate lookup
    /// pass over the already-loaded place collection.
    pub fn load_items(&self) -> Result<Vec<Item>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, place_id, details, amount FROM `items`")
            .into_diagnostic()?;

        let rows = stmt
            .query_map([], |row| {
                let place_id: String = row.get(2)?;
                Ok(Item {
                    id: RecordId::from_stored(row.get::<_, String>(0)?),
                    name: row.get(1)?,
                    place_id: loaded_place_id(place_id),
                    details: row.get(3)?,
                    amount: row.get(4)?,
                })
            })
            .into_diagnostic()?;

        rows.collect::<std::result::Result<Vec<_>, _>>()
            .into_diagnostic()
    }
}

/// Wire encoding of the place association: `None` is stored as the legacy
/// sentinel value so old databases keep working.
fn stored_place_id(item: &Item) -> &str {
    item.place_id
        .as_ref()
        .map(RecordId::as_str)
        .unwrap_or(UNASSIGNED_PLACE_ID)
}

fn loaded_place_id(stored: String) -> Option<RecordId> {
    if stored == UNASSIGNED_PLACE_ID {
        None
    } else {
        Some(RecordId::from_stored(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_round_trip() {
        let store = Store::open_in_memory().unwrap();
        let place = StoragePlace::new("Toolbox", "Workbench", "Box");
        store.insert_place(&place).unwrap();

        let loaded = store.load_places().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, place.id);
        assert_eq!(loaded[0].name, "Toolbox");
        assert_eq!(loaded[0].location, "Workbench");
        assert_eq!(loaded[0].kind, "Box");
    }

    #[test]
    fn test_item_round_trip_with_place() {
        let store = Store::open_in_memory().unwrap();
        let place = StoragePlace::new("Shelf", "Garage", "Shelf");
        let item = Item::new("Hammer", "claw hammer", 2, Some(place.id.clone()));
        store.insert_place(&place).unwrap();
        store.insert_item(&item).unwrap();

        let loaded = store.load_items().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, item.id);
        assert_eq!(loaded[0].place_id, Some(place.id));
        assert_eq!(loaded[0].amount, 2);
    }

    #[test]
    fn test_unassigned_item_stored_as_sentinel() {
        let store = Store::open_in_memory().unwrap();
        let item = Item::placeholder();
        store.insert_item(&item).unwrap();

        let stored: String = store
            .conn
            .query_row("SELECT place_id FROM `items`", [], |row| row.get(0))
            .unwrap();
        assert_eq!(stored, UNASSIGNED_PLACE_ID);

        let loaded = store.load_items().unwrap();
        assert!(loaded[0].place_id.is_none());
    }

    #[test]
    fn test_update_place_is_full_row() {
        let store = Store::open_in_memory().unwrap();
        let mut place = StoragePlace::new("Box", "Attic", "Box");
        store.insert_place(&place).unwrap();

        place.name = "Big Box".to_string();
        place.location = "Cellar".to_string();
        store.update_place(&place).unwrap();

        let loaded = store.load_places().unwrap();
        assert_eq!(loaded[0].name, "Big Box");
        assert_eq!(loaded[0].location, "Cellar");
    }

    #[test]
    fn test_delete_place_leaves_items_untouched() {
        let store = Store::open_in_memory().unwrap();
        let place = StoragePlace::new("Shelf", "Garage", "Shelf");
        let item = Item::new("Drill", "", 1, Some(place.id.clone()));
        store.insert_place(&place).unwrap();
        store.insert_item(&item).unwrap();

        store.delete_place(&place.id).unwrap();

        assert!(store.load_places().unwrap().is_empty());
        let items = store.load_items().unwrap();
        assert_eq!(items.len(), 1);
        // No cascade: the stored place_id keeps pointing at the deleted row.
        assert_eq!(items[0].place_id, Some(place.id));
    }

    #[test]
    fn test_fetch_place_missing_is_none() {
        let store = Store::open_in_memory().unwrap();
        let missing = RecordId::from_stored("nope");
        assert!(store.fetch_place(&missing).unwrap().is_none());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let store = Store::open_in_memory().unwrap();
        store.delete_item(&RecordId::from_stored("ghost")).unwrap();
        store.delete_place(&RecordId::from_stored("ghost")).unwrap();
    }
}
