//! Transactional edits on a [`BiomFile`].
//!
//! Every operation validates its input before touching the model, so a
//! rejected edit leaves the file exactly as it was.

use serde::{Deserialize, Serialize};

use crate::file::BiomFile;
use crate::grid::HemisphereGrid;

/// One of the two grid blocks stored in a `.biom` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    /// The first grid block in the file.
    North,
    /// The second grid block in the file.
    South,
}

impl Hemisphere {
    /// Both hemispheres in file order.
    pub const ALL: [Hemisphere; 2] = [Hemisphere::North, Hemisphere::South];

    /// Lowercase name used in logs and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        }
    }
}

/// Target selector for grid replacement.
///
/// `None` is an explicit no-op target for callers that only sometimes address
/// a hemisphere.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Replace data in the north hemisphere.
    North,
    /// Replace data in the south hemisphere.
    South,
    /// Replace nothing.
    None,
}

impl Side {
    /// The hemisphere this selector addresses, if any.
    pub fn hemisphere(self) -> Option<Hemisphere> {
        match self {
            Side::North => Some(Hemisphere::North),
            Side::South => Some(Hemisphere::South),
            Side::None => None,
        }
    }
}

impl From<Hemisphere> for Side {
    fn from(hemisphere: Hemisphere) -> Self {
        match hemisphere {
            Hemisphere::North => Side::North,
            Hemisphere::South => Side::South,
        }
    }
}

/// Errors returned by rejected edits. The model is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Replacement grid data does not have one value per cell.
    #[error("grid data has {actual} cells, expected {expected}")]
    GridLength {
        /// Required number of cells.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A biome table index is past the end of the table.
    #[error("biome index {index} out of range (table has {len} entries)")]
    BiomeIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Table length at the time of the request.
        len: usize,
    },
}

impl BiomFile {
    /// Appends a biome id to the end of the table.
    pub fn add_biome(&mut self, id: u32) {
        self.biome_ids.push(id);
        tracing::debug!(id, count = self.biome_ids.len(), "added biome id");
    }

    /// Removes and returns the biome id at `index`.
    ///
    /// Grid cells that referenced the removed position are left as they are;
    /// reindexing them is the caller's business.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::BiomeIndexOutOfRange`] if `index` is not a valid
    /// table position.
    pub fn remove_biome(&mut self, index: usize) -> Result<u32, EditError> {
        let len = self.biome_ids.len();
        if index >= len {
            return Err(EditError::BiomeIndexOutOfRange { index, len });
        }
        let id = self.biome_ids.remove(index);
        tracing::debug!(index, id, count = self.biome_ids.len(), "removed biome id");
        Ok(id)
    }

    /// Replaces the biome layer of the hemisphere selected by `side`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GridLength`] if `values` does not hold exactly one
    /// value per cell. [`Side::None`] is accepted and changes nothing.
    pub fn replace_biome_grid(&mut self, values: Vec<u32>, side: Side) -> Result<(), EditError> {
        let Some(hemisphere) = side.hemisphere() else {
            return Ok(());
        };
        self.grid_mut(hemisphere).swap_biome_values(values)?;
        tracing::debug!(hemisphere = hemisphere.name(), "replaced biome grid");
        Ok(())
    }

    /// Replaces the resource layer of the hemisphere selected by `side`.
    ///
    /// # Errors
    ///
    /// Same rules as [`BiomFile::replace_biome_grid`].
    pub fn replace_resource_grid(&mut self, values: Vec<u8>, side: Side) -> Result<(), EditError> {
        let Some(hemisphere) = side.hemisphere() else {
            return Ok(());
        };
        self.grid_mut(hemisphere).swap_resource_values(values)?;
        tracing::debug!(hemisphere = hemisphere.name(), "replaced resource grid");
        Ok(())
    }

    fn grid_mut(&mut self, hemisphere: Hemisphere) -> &mut HemisphereGrid {
        match hemisphere {
            Hemisphere::North => &mut self.north,
            Hemisphere::South => &mut self.south,
        }
    }
}
