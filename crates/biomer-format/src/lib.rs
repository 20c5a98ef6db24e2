//! Reader, writer and editor for `.biom` planet surface files.
//!
//! A `.biom` file assigns a biome and a resource to every cell of two 256×256
//! hemisphere grids. [`decode`] turns a complete byte buffer into a
//! [`BiomFile`], the edit methods on [`BiomFile`] mutate it transactionally,
//! and [`encode`] produces a byte-compatible buffer again.

pub mod decode;
pub mod edit;
pub mod encode;
pub mod file;
pub mod grid;
pub mod resource;

pub use decode::{ByteReader, DecodeError, decode};
pub use edit::{EditError, Hemisphere, Side};
pub use encode::{BLOCK_MARKER, encode, encoded_len};
pub use file::{BiomFile, BiomIoError, MAGIC};
pub use grid::{GRID_FLAT_SIZE, GRID_HEIGHT, GRID_WIDTH, HemisphereGrid};
pub use resource::{KNOWN_RESOURCE_IDS, is_known_resource, known_resource_index};
