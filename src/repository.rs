//! Data access for the portfolio document
//!
//! Every operation works against the one document at the configured path.
//! List mutations go through the store's per-field atomic primitives, so
//! an update or removal is a single transaction rather than a fetch
//! followed by a separate write.

use crate::id::IdGenerator;
use crate::model::{HeroData, ListItem, PortfolioRecord};
use crate::storage::SqliteStore;
use crate::{Error, Result};

/// Default path of the portfolio document
pub const DEFAULT_DOCUMENT: &str = "portfolio/data";

/// Key identifying list elements inside the stored arrays
const ID_KEY: &str = "id";

/// Reads and mutates the portfolio document
pub struct Portfolio {
    store: SqliteStore,
    ids: IdGenerator,
    document: String,
}

impl Portfolio {
    pub fn new(store: SqliteStore, document: impl Into<String>) -> Self {
        let portfolio = Self {
            store,
            ids: IdGenerator::new(),
            document: document.into(),
        };
        match portfolio.fetch_record() {
            Ok(Some(record)) => portfolio.observe_ids(&record),
            Ok(None) => {}
            Err(e) => tracing::warn!("Could not read stored ids from {}: {}", portfolio.document, e),
        }
        portfolio
    }

    /// In-memory portfolio at the default path (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(SqliteStore::open_in_memory()?, DEFAULT_DOCUMENT))
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    // ========== Record Operations ==========

    /// Fetch the whole record; `None` when it has not been created
    pub fn fetch_record(&self) -> Result<Option<PortfolioRecord>> {
        match self.store.get_document(&self.document)? {
            Some(body) => Ok(Some(serde_json::from_value(body)?)),
            None => Ok(None),
        }
    }

    /// Create the record; fails if it already exists
    pub fn create_record(&self, record: &PortfolioRecord) -> Result<()> {
        self.store
            .create_document(&self.document, &serde_json::to_value(record)?)?;
        self.observe_ids(record);
        tracing::info!("Created portfolio record at {}", self.document);
        Ok(())
    }

    /// Overwrite the whole record
    pub fn replace_record(&self, record: &PortfolioRecord) -> Result<()> {
        self.store
            .set_document(&self.document, &serde_json::to_value(record)?)?;
        self.observe_ids(record);
        tracing::info!("Replaced portfolio record at {}", self.document);
        Ok(())
    }

    /// blake3 digest of the stored record, hex encoded
    pub fn record_digest(&self) -> Result<Option<String>> {
        match self.store.get_document(&self.document)? {
            Some(body) => {
                let bytes = serde_json::to_vec(&body)?;
                Ok(Some(blake3::hash(&bytes).to_hex().to_string()))
            }
            None => Ok(None),
        }
    }

    // ========== Hero ==========

    /// Overwrite the hero field entirely
    pub fn save_hero(&self, hero: &HeroData) -> Result<()> {
        self.store
            .update_field(&self.document, "hero", serde_json::to_value(hero)?)?;
        tracing::info!("Saved hero for {}", self.document);
        Ok(())
    }

    // ========== List Operations ==========

    /// Append a new item built from `draft` with a freshly generated id
    pub fn add_item<T: ListItem>(&self, draft: T::Draft) -> Result<T> {
        let item = T::from_draft(self.ids.next_id(), draft);
        self.store.array_union(
            &self.document,
            T::LIST.field(),
            vec![serde_json::to_value(&item)?],
        )?;
        tracing::info!("Added {} {}", T::LIST.noun(), item.id());
        Ok(item)
    }

    /// Replace the item with the same id.
    ///
    /// Returns `false` without writing when no item matches or the record
    /// does not exist.
    pub fn update_item<T: ListItem>(&self, item: &T) -> Result<bool> {
        let element = serde_json::to_value(item)?;
        let result = self.store.replace_array_element(
            &self.document,
            T::LIST.field(),
            ID_KEY,
            item.id(),
            element,
        );
        let replaced = absent_record_is_noop(result)?;
        if replaced {
            tracing::info!("Updated {} {}", T::LIST.noun(), item.id());
        } else {
            tracing::debug!("No {} with id {} to update", T::LIST.noun(), item.id());
        }
        Ok(replaced)
    }

    /// Remove the item with the given id.
    ///
    /// Returns `false` and leaves the list unchanged when the id is unknown.
    pub fn remove_item<T: ListItem>(&self, id: &str) -> Result<bool> {
        let result = self
            .store
            .remove_array_element(&self.document, T::LIST.field(), ID_KEY, id);
        let removed = absent_record_is_noop(result)?;
        if removed {
            tracing::info!("Removed {} {}", T::LIST.noun(), id);
        } else {
            tracing::debug!("No {} with id {} to remove", T::LIST.noun(), id);
        }
        Ok(removed)
    }

    /// Fetch one list of the record, empty when the record is absent
    pub fn list<T: ListItem>(&self) -> Result<Vec<T>> {
        Ok(self
            .fetch_record()?
            .map(|record| T::list_of(&record).to_vec())
            .unwrap_or_default())
    }

    /// Keep new ids above any numeric id already stored
    fn observe_ids(&self, record: &PortfolioRecord) {
        if let Some(max) = record.max_numeric_id() {
            self.ids.observe(max);
        }
    }
}

fn absent_record_is_noop(result: Result<bool>) -> Result<bool> {
    match result {
        Err(Error::DocumentNotFound(_)) => Ok(false),
        other => other,
    }
}
