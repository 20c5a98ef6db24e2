//! Two-way mapping between grid values and colors.

use std::collections::HashMap;
use std::hash::Hash;

use biomer_format::KNOWN_RESOURCE_IDS;

use crate::color::Rgba;

/// A grid value paired with the color that represents it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaletteEntry<T> {
    /// Display color.
    pub color: Rgba,
    /// Grid value.
    pub data: T,
}

impl<T> PaletteEntry<T> {
    /// Pairs `color` with `data`.
    pub fn new(color: Rgba, data: T) -> Self {
        Self { color, data }
    }
}

/// Ordered palette with O(1) lookup in both directions.
///
/// When two entries share a value or a color, lookups return the first one.
#[derive(Clone, Debug)]
pub struct Palette<T> {
    entries: Vec<PaletteEntry<T>>,
    by_data: HashMap<T, usize>,
    by_color: HashMap<Rgba, usize>,
    fallback: Option<Rgba>,
}

impl<T: Copy + Eq + Hash> Palette<T> {
    /// Creates an empty palette.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            by_data: HashMap::new(),
            by_color: HashMap::new(),
            fallback: None,
        }
    }

    /// Builds a palette from entries in order.
    pub fn from_entries(entries: impl IntoIterator<Item = PaletteEntry<T>>) -> Self {
        let mut palette = Self::new();
        for entry in entries {
            palette.push(entry);
        }
        palette
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: PaletteEntry<T>) {
        let index = self.entries.len();
        self.by_data.entry(entry.data).or_insert(index);
        self.by_color.entry(entry.color).or_insert(index);
        self.entries.push(entry);
    }

    /// Sets the color used for values that have no entry.
    ///
    /// Without a fallback, rendering an unmapped value is an error.
    pub fn with_fallback(mut self, color: Rgba) -> Self {
        self.fallback = Some(color);
        self
    }

    /// Color for `data`, falling back to the fallback color if one is set.
    pub fn color_of(&self, data: T) -> Option<Rgba> {
        self.by_data
            .get(&data)
            .map(|&i| self.entries[i].color)
            .or(self.fallback)
    }

    /// Value represented by `color`, if any entry uses it.
    pub fn data_of(&self, color: Rgba) -> Option<T> {
        self.by_color.get(&color).map(|&i| self.entries[i].data)
    }

    /// All entries in order.
    pub fn entries(&self) -> &[PaletteEntry<T>] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the palette has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if some entry already uses `color`.
    pub fn contains_color(&self, color: Rgba) -> bool {
        self.by_color.contains_key(&color)
    }

    /// Number of entries whose color an earlier entry already uses.
    ///
    /// Colors of such entries read back as the earlier entry's value.
    pub fn shared_colors(&self) -> usize {
        self.entries.len() - self.by_color.len()
    }
}

impl<T: Copy + Eq + Hash> Default for Palette<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Palette for biome layers with one color per biome table position.
///
/// Hues are spread by the golden angle so neighbouring indices stay distinct.
/// A hue that rounds to a color already in use is nudged to the next free
/// RGB value, so every color maps back to a single index for tables of up to
/// 2²⁴ entries.
pub fn biome_palette(biome_count: usize) -> Palette<u32> {
    const GOLDEN_ANGLE: f32 = 137.507_77;
    const RGB_COLORS: usize = 1 << 24;

    let mut palette = Palette::new();
    for i in 0..biome_count {
        let hue = i as f32 * GOLDEN_ANGLE;
        let value = if i % 2 == 0 { 0.9 } else { 0.7 };
        let mut color = Rgba::from_hsv(hue, 0.65, value);
        if palette.len() < RGB_COLORS {
            while palette.contains_color(color) {
                color = next_rgb(color);
            }
        }
        palette.push(PaletteEntry::new(color, i as u32));
    }
    palette
}

/// The opaque color after `color` when RGB is read as one 24-bit number.
fn next_rgb(color: Rgba) -> Rgba {
    let packed = (u32::from(color.r) << 16 | u32::from(color.g) << 8 | u32::from(color.b)) + 1;
    Rgba::rgb((packed >> 16) as u8, (packed >> 8) as u8, packed as u8)
}

/// Palette for resource layers covering every known resource byte.
pub fn resource_palette() -> Palette<u8> {
    const COLORS: [Rgba; 12] = [
        Rgba::rgb(0, 0, 0),
        Rgba::rgb(255, 255, 255),
        Rgba::rgb(40, 40, 40),
        Rgba::rgb(128, 128, 128),
        Rgba::rgb(200, 60, 60),
        Rgba::rgb(255, 150, 150),
        Rgba::rgb(60, 170, 60),
        Rgba::rgb(150, 230, 150),
        Rgba::rgb(60, 90, 200),
        Rgba::rgb(150, 180, 255),
        Rgba::rgb(210, 180, 40),
        Rgba::rgb(255, 235, 140),
    ];
    Palette::from_entries(
        KNOWN_RESOURCE_IDS
            .iter()
            .zip(COLORS)
            .map(|(&id, color)| PaletteEntry::new(color, id)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let palette = Palette::from_entries([
            PaletteEntry::new(Rgba::rgb(1, 0, 0), 10u32),
            PaletteEntry::new(Rgba::rgb(0, 1, 0), 20u32),
        ]);
        assert_eq!(palette.color_of(20), Some(Rgba::rgb(0, 1, 0)));
        assert_eq!(palette.data_of(Rgba::rgb(1, 0, 0)), Some(10));
        assert_eq!(palette.color_of(30), None);
        assert_eq!(palette.data_of(Rgba::rgb(9, 9, 9)), None);
    }

    #[test]
    fn test_first_entry_wins() {
        let palette = Palette::from_entries([
            PaletteEntry::new(Rgba::rgb(5, 5, 5), 1u8),
            PaletteEntry::new(Rgba::rgb(5, 5, 5), 2u8),
            PaletteEntry::new(Rgba::rgb(6, 6, 6), 1u8),
        ]);
        assert_eq!(palette.data_of(Rgba::rgb(5, 5, 5)), Some(1));
        assert_eq!(palette.color_of(1), Some(Rgba::rgb(5, 5, 5)));
        assert_eq!(palette.len(), 3);
    }

    #[test]
    fn test_fallback_color() {
        let palette: Palette<u8> = Palette::new().with_fallback(Rgba::rgb(255, 0, 255));
        assert_eq!(palette.color_of(7), Some(Rgba::rgb(255, 0, 255)));
        assert!(palette.is_empty());
    }

    #[test]
    fn test_biome_palette_colors_distinct() {
        let palette = biome_palette(24);
        assert_eq!(palette.len(), 24);
        for i in 0..24u32 {
            let color = palette.color_of(i).unwrap();
            assert_eq!(palette.data_of(color), Some(i), "color of {i} collides");
        }
    }

    #[test]
    fn test_large_biome_palette_stays_unambiguous() {
        let palette = biome_palette(2000);
        assert_eq!(palette.shared_colors(), 0);
        for i in [1u32, 611, 1999] {
            let color = palette.color_of(i).unwrap();
            assert_eq!(palette.data_of(color), Some(i), "color of {i} collides");
        }
    }

    #[test]
    fn test_next_rgb_carries_and_wraps() {
        assert_eq!(next_rgb(Rgba::rgb(0, 0, 255)), Rgba::rgb(0, 1, 0));
        assert_eq!(next_rgb(Rgba::rgb(0, 255, 255)), Rgba::rgb(1, 0, 0));
        assert_eq!(next_rgb(Rgba::rgb(255, 255, 255)), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn test_shared_colors_counted() {
        let palette = Palette::from_entries([
            PaletteEntry::new(Rgba::rgb(5, 5, 5), 1u8),
            PaletteEntry::new(Rgba::rgb(5, 5, 5), 2u8),
        ]);
        assert!(palette.contains_color(Rgba::rgb(5, 5, 5)));
        assert_eq!(palette.shared_colors(), 1);
        assert_eq!(resource_palette().shared_colors(), 0);
    }

    #[test]
    fn test_resource_palette_covers_known_ids() {
        let palette = resource_palette();
        assert_eq!(palette.len(), KNOWN_RESOURCE_IDS.len());
        for id in KNOWN_RESOURCE_IDS {
            let color = palette.color_of(id).unwrap();
            assert_eq!(palette.data_of(color), Some(id));
        }
        assert_eq!(palette.color_of(5), None);
    }
}
