//! Item catalog lookup — the seam through which display names reach queries.

use std::collections::HashMap;

use crate::types::ItemId;

/// Resolves an item id to a display name.
pub trait ItemCatalog {
    /// The display name for `item`, or `None` if the catalog has no entry.
    fn name(&self, item: ItemId) -> Option<&str>;
}

/// In-memory catalog backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    names: HashMap<ItemId, String>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, item: ItemId, name: impl Into<String>) {
        self.names.insert(item, name.into());
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// True if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(ItemId, String)> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = (ItemId, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl ItemCatalog for MemoryCatalog {
    fn name(&self, item: ItemId) -> Option<&str> {
        self.names.get(&item).map(String::as_str)
    }
}
