//! Encoding of a [`BiomFile`] into the on-disk `.biom` layout.
//!
//! The layout is documented in [`crate::decode`]. Every count and size field
//! is derived here from the model and the fixed grid dimensions; nothing is
//! copied from a previously decoded stream.

use crate::file::{BiomFile, MAGIC};
use crate::grid::{GRID_FLAT_SIZE, GRID_HEIGHT, GRID_WIDTH, HemisphereGrid};

/// Value written between the biome table and the first hemisphere.
pub const BLOCK_MARKER: u32 = 2;

/// Size in bytes of one encoded hemisphere (header, both layers, repeated size).
pub const HEMISPHERE_ENCODED_LEN: usize = 3 * 4 + GRID_FLAT_SIZE * 4 + 4 + GRID_FLAT_SIZE;

/// Returns the exact number of bytes [`encode`] produces for `file`.
pub fn encoded_len(file: &BiomFile) -> usize {
    2 + 4 + file.biome_count() * 4 + 4 + 2 * HEMISPHERE_ENCODED_LEN
}

/// Serializes `file` into a newly allocated buffer.
pub fn encode(file: &BiomFile) -> Vec<u8> {
    let total = encoded_len(file);
    let mut buf = Vec::with_capacity(total);

    buf.extend_from_slice(&MAGIC.to_le_bytes());

    // Biome table
    put_u32(&mut buf, file.biome_count() as u32);
    for &id in file.biome_ids() {
        put_u32(&mut buf, id);
    }
    put_u32(&mut buf, BLOCK_MARKER);

    encode_hemisphere(&mut buf, file.north());
    encode_hemisphere(&mut buf, file.south());

    debug_assert_eq!(buf.len(), total);
    tracing::debug!(biomes = file.biome_count(), bytes = buf.len(), "encoded biom file");
    buf
}

fn encode_hemisphere(buf: &mut Vec<u8>, grid: &HemisphereGrid) {
    let flat_size = (GRID_WIDTH * GRID_HEIGHT) as u32;

    put_u32(buf, GRID_WIDTH as u32);
    put_u32(buf, GRID_HEIGHT as u32);
    put_u32(buf, flat_size);
    for &value in grid.biome_values() {
        put_u32(buf, value);
    }

    put_u32(buf, flat_size);
    buf.extend_from_slice(grid.resource_values());
}

#[inline]
fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::Side;

    fn read_u32_at(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    #[test]
    fn test_header_fields() {
        let file = BiomFile::new(vec![8, 88]);
        let bytes = encode(&file);

        assert_eq!(&bytes[0..2], &[0x05, 0x01]);
        assert_eq!(read_u32_at(&bytes, 2), 2);
        assert_eq!(read_u32_at(&bytes, 6), 8);
        assert_eq!(read_u32_at(&bytes, 10), 88);
        assert_eq!(read_u32_at(&bytes, 14), BLOCK_MARKER);
        assert_eq!(read_u32_at(&bytes, 18), 256);
        assert_eq!(read_u32_at(&bytes, 22), 256);
        assert_eq!(read_u32_at(&bytes, 26), 65_536);
    }

    #[test]
    fn test_encoded_length() {
        let file = BiomFile::new(vec![8, 88]);
        let bytes = encode(&file);
        assert_eq!(bytes.len(), encoded_len(&file));
        assert_eq!(bytes.len(), 2 + 4 + 8 + 4 + 2 * (12 + 65_536 * 4 + 4 + 65_536));
    }

    #[test]
    fn test_duplicate_flat_size_fields() {
        let file = BiomFile::new(Vec::new());
        let bytes = encode(&file);
        let north = 2 + 4 + 4;
        let dup = north + 12 + GRID_FLAT_SIZE * 4;
        assert_eq!(read_u32_at(&bytes, dup), GRID_FLAT_SIZE as u32);

        let south = north + HEMISPHERE_ENCODED_LEN;
        assert_eq!(read_u32_at(&bytes, south), 256);
        assert_eq!(read_u32_at(&bytes, south + 4), 256);
        assert_eq!(read_u32_at(&bytes, south + 8), GRID_FLAT_SIZE as u32);
        assert_eq!(
            read_u32_at(&bytes, south + 12 + GRID_FLAT_SIZE * 4),
            GRID_FLAT_SIZE as u32
        );
    }

    #[test]
    fn test_count_follows_table_after_edits() {
        let mut file = BiomFile::new(vec![1, 2, 3]);
        file.add_biome(4);
        file.add_biome(5);
        file.remove_biome(0).unwrap();
        let bytes = encode(&file);
        assert_eq!(read_u32_at(&bytes, 2), 4);
        assert_eq!(bytes.len(), encoded_len(&file));
    }

    #[test]
    fn test_cell_placement() {
        let mut file = BiomFile::new(vec![9]);
        let mut biomes = vec![0u32; GRID_FLAT_SIZE];
        biomes[HemisphereGrid::linear_index(1, 0)] = 0xAABB_CCDD;
        file.replace_biome_grid(biomes, Side::South).unwrap();
        let mut resources = vec![0u8; GRID_FLAT_SIZE];
        resources[GRID_FLAT_SIZE - 1] = 84;
        file.replace_resource_grid(resources, Side::North).unwrap();

        let bytes = encode(&file);
        let north = 2 + 4 + 4 + 4;
        let north_resources = north + 12 + GRID_FLAT_SIZE * 4 + 4;
        assert_eq!(bytes[north_resources + GRID_FLAT_SIZE - 1], 84);

        let south_biomes = north + HEMISPHERE_ENCODED_LEN + 12;
        assert_eq!(read_u32_at(&bytes, south_biomes + 4), 0xAABB_CCDD);
        assert_eq!(read_u32_at(&bytes, south_biomes), 0);
    }
}
