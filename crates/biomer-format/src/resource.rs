//! Table of resource bytes recognized by downstream consumers.
//!
//! The codec stores resource bytes verbatim and never checks them against this
//! table. Renderers and inspectors use it to tell meaningful cells from noise.

/// Resource byte values with a known meaning, in file-observed order.
pub const KNOWN_RESOURCE_IDS: [u8; 12] = [8, 88, 0, 80, 1, 81, 2, 82, 3, 83, 4, 84];

/// Returns `true` if `value` is one of the [`KNOWN_RESOURCE_IDS`].
pub fn is_known_resource(value: u8) -> bool {
    KNOWN_RESOURCE_IDS.contains(&value)
}

/// Position of `value` inside [`KNOWN_RESOURCE_IDS`], if present.
pub fn known_resource_index(value: u8) -> Option<usize> {
    KNOWN_RESOURCE_IDS.iter().position(|&id| id == value)
}
