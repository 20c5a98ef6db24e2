//! Conversion between grid layers and images.

use std::hash::Hash;

use biomer_format::{GRID_FLAT_SIZE, GRID_HEIGHT, GRID_WIDTH};

use crate::color::Rgba;
use crate::image::GridImage;
use crate::palette::Palette;

/// Errors from rendering, importing, or PNG I/O.
#[derive(Debug, thiserror::Error)]
pub enum PaletteError {
    /// A grid value has no palette entry and the palette has no fallback.
    #[error("no palette color for value {value} at cell ({x}, {y})")]
    UnmappedValue {
        /// Offending value, widened for display.
        value: u64,
        /// Cell column.
        x: u32,
        /// Cell row.
        y: u32,
    },
    /// An image pixel does not match any palette color.
    #[error("pixel ({x}, {y}) has color {color} which is not in the palette")]
    UnmappedColor {
        /// Offending color.
        color: Rgba,
        /// Pixel column in the grid-sized image.
        x: u32,
        /// Pixel row in the grid-sized image.
        y: u32,
    },
    /// The image is not the grid size or a whole multiple of it.
    #[error("image is {}x{}, expected {}x{} or a multiple", actual.0, actual.1, expected.0, expected.1)]
    Dimensions {
        /// Required size.
        expected: (u32, u32),
        /// Size of the image.
        actual: (u32, u32),
    },
    /// An upscale factor would make the image too large to hold in memory.
    #[error("scale factor {scale} is too large for the grid image")]
    ScaleTooLarge {
        /// Requested factor.
        scale: u32,
    },
    /// The palette maps one color to several values, so an image painted
    /// with it cannot be read back unambiguously.
    #[error("palette has {duplicates} colors shared by more than one value")]
    AmbiguousPalette {
        /// Number of entries whose color an earlier entry already uses.
        duplicates: usize,
    },
    /// The layer does not hold one value per grid cell.
    #[error("layer has {0} values, expected one per cell")]
    LayerLength(usize),
    /// PNG encoding failed.
    #[error("failed to encode PNG: {0}")]
    PngEncode(#[from] png::EncodingError),
    /// PNG decoding failed.
    #[error("failed to decode PNG: {0}")]
    PngDecode(#[from] png::DecodingError),
    /// The PNG uses a pixel format that could not be converted to RGBA.
    #[error("unsupported PNG format: {0}")]
    UnsupportedPng(&'static str),
}

/// Renders one grid layer into a 256×256 image.
///
/// `values` is a hemisphere layer in row-major order, e.g.
/// [`HemisphereGrid::biome_values`](biomer_format::HemisphereGrid::biome_values).
pub fn render_layer<T>(values: &[T], palette: &Palette<T>) -> Result<GridImage, PaletteError>
where
    T: Copy + Eq + Hash + Into<u64>,
{
    if values.len() != GRID_FLAT_SIZE {
        return Err(PaletteError::LayerLength(values.len()));
    }
    let mut image = GridImage::new(GRID_WIDTH as u32, GRID_HEIGHT as u32);
    for (index, &value) in values.iter().enumerate() {
        let x = (index % GRID_WIDTH) as u32;
        let y = (index / GRID_WIDTH) as u32;
        let color = palette
            .color_of(value)
            .ok_or_else(|| PaletteError::UnmappedValue {
                value: value.into(),
                x,
                y,
            })?;
        image.set_pixel(x, y, color);
    }
    tracing::debug!(entries = palette.len(), "rendered grid layer");
    Ok(image)
}

/// Reads a grid layer back out of an image painted with `palette`.
///
/// Images that are a whole multiple of the grid size (e.g. exports made with
/// a scale factor) are sampled down first. Palettes that give one color to
/// several values are rejected.
pub fn import_layer<T>(image: &GridImage, palette: &Palette<T>) -> Result<Vec<T>, PaletteError>
where
    T: Copy + Eq + Hash,
{
    let duplicates = palette.shared_colors();
    if duplicates > 0 {
        return Err(PaletteError::AmbiguousPalette { duplicates });
    }
    let image = image.downscale_to(GRID_WIDTH as u32, GRID_HEIGHT as u32)?;
    let mut values = Vec::with_capacity(GRID_FLAT_SIZE);
    for y in 0..image.height {
        for x in 0..image.width {
            let color = image.get_pixel(x, y);
            let value = palette
                .data_of(color)
                .ok_or(PaletteError::UnmappedColor { color, x, y })?;
            values.push(value);
        }
    }
    tracing::debug!(cells = values.len(), "imported grid layer");
    Ok(values)
}
