//! Decoding of `.biom` byte streams into a [`BiomFile`].
//!
//! ## Binary Layout
//!
//! All integers are little-endian.
//!
//! | Size | Field |
//! |------|-------|
//! | 2 | Magic (`u16`, `0x0105`) |
//! | 4 | Biome count N (`u32`) |
//! | N×4 | Biome ids (`u32`) |
//! | 4 | Block marker (`u32`, observed 2) |
//! | 12 | North header: width, height, flat size (`u32` ×3) |
//! | 65536×4 | North biome grid (`u32`) |
//! | 4 | Flat size again (`u32`) |
//! | 65536 | North resource grid (`u8`) |
//! | 12 | South header |
//! | 65536×4 | South biome grid |
//! | 4 | Flat size again |
//! | 65536 | South resource grid |
//!
//! The block marker and every size field are consumed but not checked: the
//! grid dimensions are fixed, so the stored copies carry no information.

use crate::file::{BiomFile, MAGIC};
use crate::grid::{GRID_FLAT_SIZE, HemisphereGrid};

/// Errors that can occur while decoding a `.biom` stream.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// The stream does not start with the `.biom` magic number.
    #[error("invalid biom file: magic number {found:#06x}, expected {:#06x}", MAGIC)]
    InvalidMagic {
        /// The value found in place of the magic number.
        found: u16,
    },
    /// The stream ended before a field could be read in full.
    #[error(
        "unexpected end of data reading {field} at offset {offset}: \
         needed {needed} bytes, {remaining} remaining"
    )]
    Truncated {
        /// Name of the field being read.
        field: &'static str,
        /// Byte offset at which the read started.
        offset: usize,
        /// Number of bytes the field requires.
        needed: usize,
        /// Number of bytes left in the stream.
        remaining: usize,
    },
}

/// Sequential little-endian reader over a byte slice.
///
/// Every read either consumes exactly the bytes it asked for or fails with
/// [`DecodeError::Truncated`] and leaves the position unchanged.
pub struct ByteReader<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Current byte offset from the start of the stream.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unread bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.offset
    }

    /// Consumes `len` bytes and returns them.
    pub fn read_bytes(
        &mut self,
        field: &'static str,
        len: usize,
    ) -> Result<&'a [u8], DecodeError> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(DecodeError::Truncated {
                field,
                offset: self.offset,
                needed: len,
                remaining,
            });
        }
        let bytes = &self.data[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Reads a little-endian `u16`.
    pub fn read_u16(&mut self, field: &'static str) -> Result<u16, DecodeError> {
        let b = self.read_bytes(field, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Reads a little-endian `u32`.
    pub fn read_u32(&mut self, field: &'static str) -> Result<u32, DecodeError> {
        let b = self.read_bytes(field, 4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Reads `count` little-endian `u32` values.
    ///
    /// The length check happens before anything is allocated, so a bogus count
    /// cannot trigger a huge allocation.
    pub fn read_u32_array(
        &mut self,
        field: &'static str,
        count: usize,
    ) -> Result<Vec<u32>, DecodeError> {
        let needed = count.saturating_mul(4);
        let bytes = self.read_bytes(field, needed)?;
        Ok(bytes
            .chunks_exact(4)
            .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
            .collect())
    }
}

/// Decodes a complete `.biom` stream.
///
/// # Errors
///
/// Returns [`DecodeError::InvalidMagic`] if the first two bytes are not the
/// `.biom` magic number (nothing further is read), or
/// [`DecodeError::Truncated`] if the stream ends early. No partially decoded
/// model is ever returned.
pub fn decode(data: &[u8]) -> Result<BiomFile, DecodeError> {
    let mut reader = ByteReader::new(data);

    let magic = reader.read_u16("magic")?;
    if magic != MAGIC {
        return Err(DecodeError::InvalidMagic { found: magic });
    }

    let biome_count = reader.read_u32("biome count")? as usize;
    let biome_ids = reader.read_u32_array("biome ids", biome_count)?;

    // Block marker, observed as 2 in every shipped file.
    let marker = reader.read_u32("block marker")?;
    tracing::trace!(marker, "block marker");

    let north = decode_hemisphere(&mut reader)?;
    let south = decode_hemisphere(&mut reader)?;

    if reader.remaining() > 0 {
        tracing::debug!(
            trailing = reader.remaining(),
            "ignoring trailing bytes after south resource grid"
        );
    }
    tracing::debug!(biomes = biome_ids.len(), bytes = data.len(), "decoded biom file");

    Ok(BiomFile::from_parts(biome_ids, north, south))
}

fn decode_hemisphere(reader: &mut ByteReader<'_>) -> Result<HemisphereGrid, DecodeError> {
    // Width, height and flat size. The grid is always 256×256.
    reader.read_u32("grid width")?;
    reader.read_u32("grid height")?;
    reader.read_u32("grid flat size")?;

    let biome_values = reader.read_u32_array("biome grid", GRID_FLAT_SIZE)?;

    reader.read_u32("resource grid flat size")?;
    let resource_values = reader
        .read_bytes("resource grid", GRID_FLAT_SIZE)?
        .to_vec();

    Ok(HemisphereGrid::from_raw_parts(biome_values, resource_values))
}
