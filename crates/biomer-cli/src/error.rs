//! Error type collecting every failure a subcommand can report.

use std::path::PathBuf;

use biomer_format::{BiomIoError, EditError};
use biomer_gamedata::{CatalogError, GameDataError};
use biomer_palette::PaletteError;

/// Errors surfaced by `biomer` subcommands.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading, decoding or writing a `.biom` file failed.
    #[error(transparent)]
    Biom(#[from] BiomIoError),

    /// An edit was rejected; the file was not written.
    #[error("edit rejected: {0}")]
    Edit(#[from] EditError),

    /// Rendering or importing an image failed.
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// The biome catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The edit target is a protected plugin.
    #[error(transparent)]
    GameData(#[from] GameDataError),

    /// A biome argument is neither a catalog editor id nor a number.
    #[error("unknown biome {0:?}: not in the catalog and not a form id")]
    UnknownBiome(String),

    /// A subcommand needs a catalog but none is configured.
    #[error("no biome catalog configured (use --catalog or paths.catalog)")]
    NoCatalog,

    /// An auxiliary file (image, backup) could not be read or written.
    #[error("failed to access {}: {source}", path.display())]
    File {
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub(crate) fn file(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| CliError::File { path, source }
    }
}
