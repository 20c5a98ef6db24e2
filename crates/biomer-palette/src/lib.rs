//! Color palettes and bitmap conversion for `.biom` grid layers.
//!
//! A [`Palette`] maps grid values to colors and back. Layers render into a
//! [`GridImage`], which can be written to and read from PNG, so a hemisphere
//! can be painted in an image editor and imported again.

mod color;
mod image;
mod palette;
mod render;

pub use color::Rgba;
pub use image::GridImage;
pub use palette::{Palette, PaletteEntry, biome_palette, resource_palette};
pub use render::{PaletteError, import_layer, render_layer};
