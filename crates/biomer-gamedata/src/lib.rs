//! Game-data access for biome editing: the protected plugin policy, biome
//! catalogs that map editor ids to form ids, and the editable biome list
//! shown to users.

mod catalog;
mod list;
mod protected;

pub use catalog::{BiomeCatalog, BiomeEntry, CatalogError, RonCatalog};
pub use list::{BiomeList, BiomeListItem};
pub use protected::{GameDataError, PROTECTED_PLUGINS, ensure_editable, is_protected_plugin};
