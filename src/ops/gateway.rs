use crate::io::store_io::{Store, StoreError};
use crate::model::collection::Collection;
use crate::ops::store;

/// Error type for looking up an item by id prefix
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no item matches id \"{0}\"")]
    NotFound(String),
    #[error("id \"{prefix}\" is ambiguous ({count} items match)")]
    Ambiguous { prefix: String, count: usize },
}

/// Entry point for user triggers.
///
/// Holds the only live collection. Each trigger computes the next collection,
/// swaps it in, then persists it. Rendering is left to the caller, which reads
/// `collection()` afterwards.
#[derive(Debug)]
pub struct Gateway {
    store: Store,
    collection: Collection,
}

impl Gateway {
    /// Load the collection from `store` (fail-soft) and take ownership of it.
    pub fn open(store: Store) -> Self {
        let collection = store.load();
        Gateway { store, collection }
    }

    pub fn with_collection(store: Store, collection: Collection) -> Self {
        Gateway { store, collection }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Add requested with raw input text. Blank input is ignored and yields
    /// `Ok(None)`; otherwise returns the new item's id.
    pub fn add_requested(&mut self, raw: &str) -> Result<Option<String>, StoreError> {
        let title = raw.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let item = store::new_item(title);
        let id = item.id.clone();
        self.commit(store::add_item(&self.collection, item))?;
        Ok(Some(id))
    }

    /// Toggle requested: `done` is the control's new checked value.
    pub fn toggle_requested(&mut self, id: &str, done: bool) -> Result<(), StoreError> {
        self.commit(store::set_status(&self.collection, id, done))
    }

    /// Flip the current status of `id`. Unknown ids are a no-op.
    pub fn toggle(&mut self, id: &str) -> Result<(), StoreError> {
        let done = match self.collection.get(id) {
            Some(item) => !item.status.is_done(),
            None => return Ok(()),
        };
        self.toggle_requested(id, done)
    }

    pub fn remove_requested(&mut self, id: &str) -> Result<(), StoreError> {
        self.commit(store::remove(&self.collection, id))
    }

    /// Resolve a full id or a unique id prefix to the item's full id.
    pub fn resolve(&self, prefix: &str) -> Result<String, ResolveError> {
        if let Some(item) = self.collection.get(prefix) {
            return Ok(item.id.clone());
        }
        let matches: Vec<&str> = if prefix.is_empty() {
            Vec::new()
        } else {
            self.collection
                .iter()
                .filter(|it| it.id.starts_with(prefix))
                .map(|it| it.id.as_str())
                .collect()
        };
        match matches.as_slice() {
            [] => Err(ResolveError::NotFound(prefix.to_string())),
            [id] => Ok(id.to_string()),
            _ => Err(ResolveError::Ambiguous {
                prefix: prefix.to_string(),
                count: matches.len(),
            }),
        }
    }

    fn commit(&mut self, next: Collection) -> Result<(), StoreError> {
        self.collection = next;
        self.store.persist(&self.collection)
    }
}
