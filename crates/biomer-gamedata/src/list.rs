//! Display list of a `.biom` biome table with names resolved from a catalog.

use std::fmt;

use crate::catalog::BiomeCatalog;

/// One row of the biome list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomeListItem {
    /// Position in the biome table (the value grid cells refer to).
    pub index: usize,
    /// Form id stored at that position.
    pub form_id: u32,
    /// Editor id from the catalog, or the hex form id when unknown.
    pub name: String,
    /// Whether the catalog knows this form id.
    pub known: bool,
}

impl fmt::Display for BiomeListItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>3}  {:#010x}  {}", self.index, self.form_id, self.name)
    }
}

/// Ordered, named view of a biome id table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BiomeList {
    items: Vec<BiomeListItem>,
}

impl BiomeList {
    /// Builds the list for `ids`, naming entries through `catalog` when given.
    pub fn from_ids(ids: &[u32], catalog: Option<&dyn BiomeCatalog>) -> Self {
        let items = ids
            .iter()
            .enumerate()
            .map(|(index, &form_id)| {
                let entry = catalog.and_then(|c| c.by_form_id(form_id));
                BiomeListItem {
                    index,
                    form_id,
                    name: entry
                        .map(|e| e.editor_id.clone())
                        .unwrap_or_else(|| format!("{form_id:#010x}")),
                    known: entry.is_some(),
                }
            })
            .collect();
        Self { items }
    }

    /// All rows in table order.
    pub fn items(&self) -> &[BiomeListItem] {
        &self.items
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Name shown for the table position `index`.
    pub fn name_of(&self, index: usize) -> Option<&str> {
        self.items.get(index).map(|item| item.name.as_str())
    }

    /// Rows whose form id the catalog does not know.
    pub fn unknown(&self) -> impl Iterator<Item = &BiomeListItem> {
        self.items.iter().filter(|item| !item.known)
    }
}
