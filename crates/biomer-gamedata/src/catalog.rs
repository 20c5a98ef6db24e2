//! Biome catalogs: the source of candidate biome ids for a `.biom` table.
//!
//! A catalog maps the game's biome form ids to their editor ids. The real
//! game data lives in plugin files; [`RonCatalog`] reads an exported list of
//! entries from a RON file instead.

use std::path::{Path, PathBuf};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// One biome record known to the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BiomeEntry {
    /// Form id stored in `.biom` biome tables.
    pub form_id: u32,
    /// Human-readable editor id (e.g., "FrozenMountains").
    pub editor_id: String,
}

/// Errors that can occur when loading or building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        /// Catalog path.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The catalog is not valid RON.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] ron::error::SpannedError),
    /// Two entries share an editor id.
    #[error("duplicate editor id in catalog: {0}")]
    DuplicateEditorId(String),
}

/// Supplies biome entries to editing front ends.
pub trait BiomeCatalog {
    /// All entries in catalog order.
    fn entries(&self) -> &[BiomeEntry];

    /// Looks up an entry by editor id (case-insensitive).
    fn by_editor_id(&self, editor_id: &str) -> Option<&BiomeEntry> {
        self.entries()
            .iter()
            .find(|e| e.editor_id.eq_ignore_ascii_case(editor_id))
    }

    /// Looks up an entry by form id.
    fn by_form_id(&self, form_id: u32) -> Option<&BiomeEntry> {
        self.entries().iter().find(|e| e.form_id == form_id)
    }

    /// Resolves user input to a form id.
    ///
    /// Accepts an editor id, a `0x`-prefixed hexadecimal form id, or a
    /// decimal form id. Numeric ids need not be in the catalog.
    fn resolve(&self, input: &str) -> Option<u32> {
        if let Some(entry) = self.by_editor_id(input) {
            return Some(entry.form_id);
        }
        parse_form_id(input)
    }
}

/// Parses a `0x`-prefixed hexadecimal or plain decimal form id.
pub(crate) fn parse_form_id(input: &str) -> Option<u32> {
    let input = input.trim();
    match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => input.parse().ok(),
    }
}

/// Catalog read from a RON list of [`BiomeEntry`] records.
///
/// ```ron
/// [
///     (form_id: 0x0002A1B3, editor_id: "FrozenMountains"),
///     (form_id: 0x0002A1B4, editor_id: "Wetlands"),
/// ]
/// ```
#[derive(Clone, Debug, Default)]
pub struct RonCatalog {
    entries: Vec<BiomeEntry>,
    name_to_index: HashMap<String, usize>,
    form_to_index: HashMap<u32, usize>,
}

impl RonCatalog {
    /// Builds a catalog from entries, rejecting duplicate editor ids.
    ///
    /// Duplicate form ids are allowed; lookups by form id return the first.
    pub fn from_entries(entries: Vec<BiomeEntry>) -> Result<Self, CatalogError> {
        let mut name_to_index = HashMap::with_capacity(entries.len());
        let mut form_to_index = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let key = entry.editor_id.to_ascii_lowercase();
            if name_to_index.insert(key, index).is_some() {
                return Err(CatalogError::DuplicateEditorId(entry.editor_id.clone()));
            }
            form_to_index.entry(entry.form_id).or_insert(index);
        }
        Ok(Self {
            entries,
            name_to_index,
            form_to_index,
        })
    }

    /// Parses a catalog from RON text.
    pub fn from_ron_str(text: &str) -> Result<Self, CatalogError> {
        let entries: Vec<BiomeEntry> = ron::from_str(text)?;
        Self::from_entries(entries)
    }

    /// Loads a catalog from a RON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_ron_str(&text)?;
        tracing::info!(
            path = %path.display(),
            entries = catalog.len(),
            "loaded biome catalog"
        );
        Ok(catalog)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BiomeCatalog for RonCatalog {
    fn entries(&self) -> &[BiomeEntry] {
        &self.entries
    }

    fn by_editor_id(&self, editor_id: &str) -> Option<&BiomeEntry> {
        self.name_to_index
            .get(&editor_id.to_ascii_lowercase())
            .map(|&i| &self.entries[i])
    }

    fn by_form_id(&self, form_id: u32) -> Option<&BiomeEntry> {
        self.form_to_index.get(&form_id).map(|&i| &self.entries[i])
    }
}
