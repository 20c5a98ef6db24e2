//! In-memory model of a complete `.biom` file.

use std::path::{Path, PathBuf};

use crate::decode::{DecodeError, decode};
use crate::edit::Hemisphere;
use crate::encode::encode;
use crate::grid::HemisphereGrid;

/// Magic number at the start of every supported `.biom` file.
pub const MAGIC: u16 = 0x0105;

/// Decoded contents of a `.biom` file.
///
/// The biome count and every grid size field of the on-disk format are
/// derived when encoding, so the model only keeps the sequences themselves.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BiomFile {
    pub(crate) biome_ids: Vec<u32>,
    pub(crate) north: HemisphereGrid,
    pub(crate) south: HemisphereGrid,
}

/// Errors from reading or writing a `.biom` file on disk.
#[derive(Debug, thiserror::Error)]
pub enum BiomIoError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file contents are not a valid `.biom` stream.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl BiomFile {
    /// Creates a file with the given biome table and two zeroed hemispheres.
    pub fn new(biome_ids: Vec<u32>) -> Self {
        Self::from_parts(biome_ids, HemisphereGrid::new(), HemisphereGrid::new())
    }

    /// Assembles a file from a biome table and both hemispheres.
    pub fn from_parts(biome_ids: Vec<u32>, north: HemisphereGrid, south: HemisphereGrid) -> Self {
        Self {
            biome_ids,
            north,
            south,
        }
    }

    /// The biome id table in file order.
    pub fn biome_ids(&self) -> &[u32] {
        &self.biome_ids
    }

    /// Number of entries in the biome id table.
    pub fn biome_count(&self) -> usize {
        self.biome_ids.len()
    }

    /// The north (first) hemisphere.
    pub fn north(&self) -> &HemisphereGrid {
        &self.north
    }

    /// The south (second) hemisphere.
    pub fn south(&self) -> &HemisphereGrid {
        &self.south
    }

    /// Returns the grid for `hemisphere`.
    pub fn grid(&self, hemisphere: Hemisphere) -> &HemisphereGrid {
        match hemisphere {
            Hemisphere::North => &self.north,
            Hemisphere::South => &self.south,
        }
    }

    /// Parses a file from a complete in-memory buffer.
    pub fn from_bytes(data: &[u8]) -> Result<Self, DecodeError> {
        decode(data)
    }

    /// Serializes the file into a new buffer.
    pub fn to_bytes(&self) -> Vec<u8> {
        encode(self)
    }

    /// Reads and decodes the file at `path`.
    ///
    /// The whole file is read into memory before decoding starts; the handle
    /// is closed before this function returns, whether decoding succeeds or not.
    pub fn load(path: &Path) -> Result<Self, BiomIoError> {
        let data = std::fs::read(path).map_err(|source| BiomIoError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let file = decode(&data)?;
        tracing::info!(
            path = %path.display(),
            biomes = file.biome_count(),
            "loaded biom file"
        );
        Ok(file)
    }

    /// Encodes the file and writes it to `path`, replacing any existing file.
    pub fn save(&self, path: &Path) -> Result<(), BiomIoError> {
        let data = encode(self);
        std::fs::write(path, &data).map_err(|source| BiomIoError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), bytes = data.len(), "saved biom file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Side;
    use crate::grid::GRID_FLAT_SIZE;

    #[test]
    fn test_new_file_has_zeroed_hemispheres() {
        let file = BiomFile::new(vec![8, 88]);
        assert_eq!(file.biome_count(), 2);
        assert_eq!(file.north(), &HemisphereGrid::new());
        assert_eq!(file.grid(Hemisphere::South), &HemisphereGrid::new());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planet.biom");

        let mut file = BiomFile::new(vec![0x0001_2345, 7]);
        file.replace_resource_grid(vec![81; GRID_FLAT_SIZE], Side::North)
            .unwrap();
        file.save(&path).unwrap();

        let loaded = BiomFile::load(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = BiomFile::load(&dir.path().join("missing.biom"));
        assert!(
            matches!(result, Err(BiomIoError::Read { .. })),
            "expected Read error, got {result:?}"
        );
    }

    #[test]
    fn test_load_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.biom");
        std::fs::write(&path, [0xFF, 0xFF, 0, 0]).unwrap();
        let result = BiomFile::load(&path);
        assert!(
            matches!(
                result,
                Err(BiomIoError::Decode(DecodeError::InvalidMagic { found: 0xFFFF }))
            ),
            "expected InvalidMagic, got {result:?}"
        );
    }
}
