//! In-memory row collections mirrored to the database on every edit
//!
//! The [`Catalog`] holds everything the interface displays: the full place
//! collection and the full item collection, the latter carrying a cached
//! place-name display column. Each field edit mutates the visible row and
//! immediately writes the full persisted row back by id. Filter views are
//! plain predicate re-evaluations over the whole item collection; nothing
//! is incremental at this scale.

use std::collections::HashMap;

use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use thiserror::Error;

use crate::core::identity::RecordId;
use crate::core::store::Store;
use crate::entities::{Item, StoragePlace};

/// Cached display name for an item whose place row no longer exists
pub const UNKNOWN_PLACE_NAME: &str = "UNKNOWN";

/// Cached display name for an item with no assigned place
pub const NO_PLACE_NAME: &str = "-";

/// Hard failures raised by catalog operations
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no place found with id {0}")]
    PlaceNotFound(RecordId),

    #[error("no item found with id {0}")]
    ItemNotFound(RecordId),

    #[error("item {0} has no assigned place")]
    ItemUnassigned(RecordId),
}

/// What happened to a requested edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The row was mutated and persisted
    Applied,
    /// The edit was silently discarded (malformed numeric input)
    Ignored,
    /// No row matches the given id
    NotFound,
}

/// An item plus its cached place-name display column
#[derive(Debug, Clone, Serialize)]
pub struct ItemRow {
    #[serde(flatten)]
    pub item: Item,
    pub place_name: String,
}

/// The observable row collections behind both interface tabs
#[derive(Debug, Default)]
pub struct Catalog {
    places: Vec<StoragePlace>,
    items: Vec<ItemRow>,
}

impl Catalog {
    /// Load both tables and fill in the place-name column.
    ///
    /// Items are reconstructed without joining against `places`; the name
    /// lookup runs as a separate pass once both collections are in memory.
    pub fn load(store: &Store) -> Result<Self> {
        let places = store.load_places()?;
        let items = store
            .load_items()?
            .into_iter()
            .map(|item| ItemRow {
                item,
                place_name: String::new(),
            })
            .collect();

        let mut catalog = Self { places, items };
        catalog.reload_place_names();
        Ok(catalog)
    }

    pub fn places(&self) -> &[StoragePlace] {
        &self.places
    }

    pub fn items(&self) -> &[ItemRow] {
        &self.items
    }

    pub fn place(&self, id: &RecordId) -> Option<&StoragePlace> {
        self.places.iter().find(|p| &p.id == id)
    }

    pub fn item(&self, id: &RecordId) -> Option<&ItemRow> {
        self.items.iter().find(|r| &r.item.id == id)
    }

    // =========================================================================
    // Creation and deletion
    // =========================================================================

    /// Insert the place and append it to the visible collection
    pub fn add_place(&mut self, store: &Store, place: StoragePlace) -> Result<()> {
        store.insert_place(&place)?;
        self.places.push(place);
        Ok(())
    }

    /// Insert the item and append it to the visible collection
    pub fn add_item(&mut self, store: &Store, item: Item) -> Result<()> {
        store.insert_item(&item)?;
        let place_name = self.resolve_name(item.place_id.as_ref());
        self.items.push(ItemRow { item, place_name });
        Ok(())
    }

    /// Delete a place row and drop the record.
    ///
    /// An id matching nothing is silently ignored. No cascade: items that
    /// reference the deleted place keep their stored place_id and show
    /// "UNKNOWN" on the next full reload.
    pub fn remove_place(&mut self, store: &Store, id: &RecordId) -> Result<bool> {
        let Some(pos) = self.places.iter().position(|p| &p.id == id) else {
            return Ok(false);
        };
        self.places.remove(pos);
        store.delete_place(id)?;
        Ok(true)
    }

    /// Delete an item row and drop the record; an id matching nothing is
    /// silently ignored
    pub fn remove_item(&mut self, store: &Store, id: &RecordId) -> Result<bool> {
        let Some(pos) = self.items.iter().position(|r| &r.item.id == id) else {
            return Ok(false);
        };
        self.items.remove(pos);
        store.delete_item(id)?;
        Ok(true)
    }

    // =========================================================================
    // Field edits (each immediately persisted)
    // =========================================================================

    /// Rename a place and recompute the cached place-name column for every
    /// item (full rescan, not incremental)
    pub fn rename_place(&mut self, store: &Store, id: &RecordId, name: &str) -> Result<EditOutcome> {
        let Some(place) = self.places.iter_mut().find(|p| &p.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        place.name = name.to_string();
        store.update_place(place)?;
        self.reload_place_names();
        Ok(EditOutcome::Applied)
    }

    pub fn set_place_location(
        &mut self,
        store: &Store,
        id: &RecordId,
        location: &str,
    ) -> Result<EditOutcome> {
        let Some(place) = self.places.iter_mut().find(|p| &p.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        place.location = location.to_string();
        store.update_place(place)?;
        Ok(EditOutcome::Applied)
    }

    pub fn set_place_kind(
        &mut self,
        store: &Store,
        id: &RecordId,
        kind: &str,
    ) -> Result<EditOutcome> {
        let Some(place) = self.places.iter_mut().find(|p| &p.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        place.kind = kind.to_string();
        store.update_place(place)?;
        Ok(EditOutcome::Applied)
    }

    pub fn rename_item(&mut self, store: &Store, id: &RecordId, name: &str) -> Result<EditOutcome> {
        let Some(row) = self.items.iter_mut().find(|r| &r.item.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        row.item.name = name.to_string();
        store.update_item(&row.item)?;
        Ok(EditOutcome::Applied)
    }

    pub fn set_item_details(
        &mut self,
        store: &Store,
        id: &RecordId,
        details: &str,
    ) -> Result<EditOutcome> {
        let Some(row) = self.items.iter_mut().find(|r| &r.item.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        row.item.details = details.to_string();
        store.update_item(&row.item)?;
        Ok(EditOutcome::Applied)
    }

    pub fn set_item_amount(
        &mut self,
        store: &Store,
        id: &RecordId,
        amount: i64,
    ) -> Result<EditOutcome> {
        let Some(row) = self.items.iter_mut().find(|r| &r.item.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        row.item.amount = amount;
        store.update_item(&row.item)?;
        Ok(EditOutcome::Applied)
    }

    /// Amount edit coming from free-text input.
    ///
    /// A value that does not parse as an integer is silently discarded: the
    /// row stays as it was and nothing is persisted.
    pub fn set_item_amount_text(
        &mut self,
        store: &Store,
        id: &RecordId,
        text: &str,
    ) -> Result<EditOutcome> {
        match text.trim().parse::<i64>() {
            Ok(amount) => self.set_item_amount(store, id, amount),
            Err(_) => Ok(EditOutcome::Ignored),
        }
    }

    /// Move an item into a place (or out of any, with `None`) and refresh
    /// that row's cached place name
    pub fn assign_item_place(
        &mut self,
        store: &Store,
        id: &RecordId,
        place_id: Option<RecordId>,
    ) -> Result<EditOutcome> {
        let place_name = self.resolve_name(place_id.as_ref());
        let Some(row) = self.items.iter_mut().find(|r| &r.item.id == id) else {
            return Ok(EditOutcome::NotFound);
        };
        row.item.place_id = place_id;
        row.place_name = place_name;
        store.update_item(&row.item)?;
        Ok(EditOutcome::Applied)
    }

    // =========================================================================
    // Place resolution and the name-lookup pass
    // =========================================================================

    /// Re-resolve an item's place against the `places` table.
    ///
    /// A referenced id with no matching row is a hard failure, as is calling
    /// this for an item with no place assigned.
    pub fn resolve_place(&self, store: &Store, item_id: &RecordId) -> Result<StoragePlace> {
        let row = self
            .item(item_id)
            .ok_or_else(|| CatalogError::ItemNotFound(item_id.clone()))
            .into_diagnostic()?;

        let place_id = row
            .item
            .place_id
            .as_ref()
            .ok_or_else(|| CatalogError::ItemUnassigned(item_id.clone()))
            .into_diagnostic()?;

        match store.fetch_place(place_id)? {
            Some(place) => Ok(place),
            None => Err(CatalogError::PlaceNotFound(place_id.clone())).into_diagnostic(),
        }
    }

    /// Recompute the cached place-name column for every item from the
    /// in-memory place collection
    pub fn reload_place_names(&mut self) {
        let names: HashMap<&str, &str> = self
            .places
            .iter()
            .map(|p| (p.id.as_str(), p.name.as_str()))
            .collect();

        for row in &mut self.items {
            row.place_name = match row.item.place_id.as_ref() {
                None => NO_PLACE_NAME.to_string(),
                Some(id) => names
                    .get(id.as_str())
                    .map(|n| n.to_string())
                    .unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_string()),
            };
        }
    }

    fn resolve_name(&self, place_id: Option<&RecordId>) -> String {
        match place_id {
            None => NO_PLACE_NAME.to_string(),
            Some(id) => self
                .place(id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_string()),
        }
    }

    // =========================================================================
    // Filter views
    // =========================================================================

    /// Place filter: no selection shows everything, a selected place shows
    /// exactly the items whose place id equals it.
    ///
    /// The predicate runs over the full collection on every call.
    pub fn items_in_place(&self, selected: Option<&RecordId>) -> Vec<&ItemRow> {
        self.items
            .iter()
            .filter(|r| match selected {
                None => true,
                Some(id) => r.item.place_id.as_ref() == Some(id),
            })
            .collect()
    }

    /// Search filter: case-insensitive substring match against the item
    /// name; the empty query matches everything
    pub fn search(&self, query: &str) -> Vec<&ItemRow> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|r| r.item.name.to_lowercase().contains(&needle))
            .collect()
    }
}
