//! Flat storage for one hemisphere of a `.biom` file.
//!
//! A hemisphere is a 256×256 grid of cells. Every cell carries a biome value
//! (an index into the file's biome id table) and a resource byte. Both layers
//! are stored as contiguous row-major buffers that mirror the on-disk layout.

use crate::edit::EditError;

/// Width of a hemisphere grid in cells.
pub const GRID_WIDTH: usize = 256;

/// Height of a hemisphere grid in cells.
pub const GRID_HEIGHT: usize = 256;

/// Total number of cells in a hemisphere grid (256²).
pub const GRID_FLAT_SIZE: usize = GRID_WIDTH * GRID_HEIGHT;

/// Biome and resource layers for one hemisphere.
///
/// Both layers always hold exactly [`GRID_FLAT_SIZE`] cells. The fields are
/// private so that no caller can observe a grid with mismatched lengths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HemisphereGrid {
    biome_values: Vec<u32>,
    resource_values: Vec<u8>,
}

impl HemisphereGrid {
    /// Creates a grid with every biome value and resource byte set to zero.
    pub fn new() -> Self {
        Self::filled(0, 0)
    }

    /// Creates a grid with every cell set to the given biome and resource.
    pub fn filled(biome: u32, resource: u8) -> Self {
        Self {
            biome_values: vec![biome; GRID_FLAT_SIZE],
            resource_values: vec![resource; GRID_FLAT_SIZE],
        }
    }

    /// Builds a grid from existing layers.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::GridLength`] if either layer is not exactly
    /// [`GRID_FLAT_SIZE`] long. The biome layer is checked first.
    pub fn from_parts(
        biome_values: Vec<u32>,
        resource_values: Vec<u8>,
    ) -> Result<Self, EditError> {
        check_len(biome_values.len())?;
        check_len(resource_values.len())?;
        Ok(Self {
            biome_values,
            resource_values,
        })
    }

    /// Builds a grid from layers whose lengths the caller has already checked.
    pub(crate) fn from_raw_parts(biome_values: Vec<u32>, resource_values: Vec<u8>) -> Self {
        debug_assert_eq!(biome_values.len(), GRID_FLAT_SIZE);
        debug_assert_eq!(resource_values.len(), GRID_FLAT_SIZE);
        Self {
            biome_values,
            resource_values,
        }
    }

    /// Converts `(x, y)` into a flat row-major index.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in `0..256`.
    #[inline]
    pub fn linear_index(x: usize, y: usize) -> usize {
        assert!(x < GRID_WIDTH && y < GRID_HEIGHT, "cell ({x}, {y}) out of range");
        y * GRID_WIDTH + x
    }

    /// Returns the biome value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in `0..256`.
    pub fn biome_at(&self, x: usize, y: usize) -> u32 {
        self.biome_values[Self::linear_index(x, y)]
    }

    /// Returns the resource byte at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in `0..256`.
    pub fn resource_at(&self, x: usize, y: usize) -> u8 {
        self.resource_values[Self::linear_index(x, y)]
    }

    /// Sets the biome value at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in `0..256`.
    pub fn set_biome(&mut self, x: usize, y: usize, value: u32) {
        self.biome_values[Self::linear_index(x, y)] = value;
    }

    /// Sets the resource byte at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x` or `y` is not in `0..256`.
    pub fn set_resource(&mut self, x: usize, y: usize, value: u8) {
        self.resource_values[Self::linear_index(x, y)] = value;
    }

    /// The biome layer in row-major order.
    pub fn biome_values(&self) -> &[u32] {
        &self.biome_values
    }

    /// The resource layer in row-major order.
    pub fn resource_values(&self) -> &[u8] {
        &self.resource_values
    }

    /// Swaps in a new biome layer, returning the previous one.
    ///
    /// The model is untouched when the length check fails.
    pub(crate) fn swap_biome_values(&mut self, values: Vec<u32>) -> Result<Vec<u32>, EditError> {
        check_len(values.len())?;
        Ok(std::mem::replace(&mut self.biome_values, values))
    }

    /// Swaps in a new resource layer, returning the previous one.
    pub(crate) fn swap_resource_values(&mut self, values: Vec<u8>) -> Result<Vec<u8>, EditError> {
        check_len(values.len())?;
        Ok(std::mem::replace(&mut self.resource_values, values))
    }

    /// Counts how many cells reference each biome value, sorted by value.
    pub fn biome_histogram(&self) -> Vec<(u32, usize)> {
        let mut counts = std::collections::BTreeMap::new();
        for &value in &self.biome_values {
            *counts.entry(value).or_insert(0usize) += 1;
        }
        counts.into_iter().collect()
    }

    /// Counts cells whose resource byte is not in the known resource table.
    pub fn unknown_resource_count(&self) -> usize {
        self.resource_values
            .iter()
            .filter(|&&r| !crate::resource::is_known_resource(r))
            .count()
    }

    /// Splits the grid into its two layers.
    pub fn into_parts(self) -> (Vec<u32>, Vec<u8>) {
        (self.biome_values, self.resource_values)
    }
}

impl Default for HemisphereGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn check_len(actual: usize) -> Result<(), EditError> {
    if actual != GRID_FLAT_SIZE {
        return Err(EditError::GridLength {
            expected: GRID_FLAT_SIZE,
            actual,
        });
    }
    Ok(())
}
