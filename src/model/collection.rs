use serde::{Deserialize, Serialize};

use super::item::Item;

/// All checklist items, newest first. Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection {
    items: Vec<Item>,
}

impl Collection {
    pub fn new() -> Self {
        Collection { items: Vec::new() }
    }

    pub fn from_items(items: Vec<Item>) -> Self {
        Collection { items }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// Find an item by exact id
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|it| it.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|it| it.id == id)
    }

    /// Count of (open, done) items
    pub fn counts(&self) -> (usize, usize) {
        let done = self.items.iter().filter(|it| it.status.is_done()).count();
        (self.items.len() - done, done)
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
