//! A 2D image stored as a flat array of RGBA pixels, with PNG I/O.

use crate::color::Rgba;
use crate::render::PaletteError;

/// Row-major RGBA image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data in row-major RGBA format. Length = `width * height * 4`.
    pub pixels: Vec<u8>,
}

impl GridImage {
    /// Create a new transparent black image with the given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize * 4],
        }
    }

    /// Set a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) {
        let idx = self.byte_index(x, y);
        self.pixels[idx..idx + 4].copy_from_slice(&color.to_array());
    }

    /// Get a single pixel.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn get_pixel(&self, x: u32, y: u32) -> Rgba {
        let idx = self.byte_index(x, y);
        Rgba::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        )
    }

    /// Returns `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Enlarges the image by an integer factor using nearest-neighbor sampling.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::ScaleTooLarge`] if the enlarged image would need
    /// more than `u32::MAX` bytes of pixel data.
    pub fn upscale(&self, factor: u32) -> Result<Self, PaletteError> {
        if factor <= 1 {
            return Ok(self.clone());
        }
        let width = self.width.checked_mul(factor);
        let height = self.height.checked_mul(factor);
        let (Some(width), Some(height)) = (width, height) else {
            return Err(PaletteError::ScaleTooLarge { scale: factor });
        };
        if width.checked_mul(height).and_then(|n| n.checked_mul(4)).is_none() {
            return Err(PaletteError::ScaleTooLarge { scale: factor });
        }
        let mut out = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                out.set_pixel(x, y, self.get_pixel(x / factor, y / factor));
            }
        }
        Ok(out)
    }

    /// Shrinks the image to `width × height` by sampling the top-left pixel of
    /// each block.
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::Dimensions`] unless both image dimensions are
    /// the same positive multiple of the target dimensions.
    pub fn downscale_to(&self, width: u32, height: u32) -> Result<Self, PaletteError> {
        let mismatch = || PaletteError::Dimensions {
            expected: (width, height),
            actual: (self.width, self.height),
        };
        if width == 0 || height == 0 || self.width % width != 0 || self.height % height != 0 {
            return Err(mismatch());
        }
        let factor = self.width / width;
        if factor == 0 || self.height / height != factor {
            return Err(mismatch());
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let mut out = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                out.set_pixel(x, y, self.get_pixel(x * factor, y * factor));
            }
        }
        Ok(out)
    }

    /// Encodes the image as an 8-bit RGBA PNG.
    pub fn to_png(&self) -> Result<Vec<u8>, PaletteError> {
        let mut png_buf = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(std::io::Cursor::new(&mut png_buf), self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(png_buf)
    }

    /// Decodes a PNG into RGBA pixels.
    ///
    /// Palette, grayscale and 16-bit images are expanded to 8-bit RGBA.
    pub fn from_png(data: &[u8]) -> Result<Self, PaletteError> {
        let mut decoder = png::Decoder::new(std::io::Cursor::new(data));
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info()?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf)?;
        let raw = &buf[..info.buffer_size()];

        let pixels = match info.color_type {
            png::ColorType::Rgba => raw.to_vec(),
            png::ColorType::Rgb => raw
                .chunks_exact(3)
                .flat_map(|p| [p[0], p[1], p[2], 255])
                .collect(),
            png::ColorType::GrayscaleAlpha => raw
                .chunks_exact(2)
                .flat_map(|p| [p[0], p[0], p[0], p[1]])
                .collect(),
            png::ColorType::Grayscale => raw.iter().flat_map(|&v| [v, v, v, 255]).collect(),
            png::ColorType::Indexed => {
                return Err(PaletteError::UnsupportedPng("indexed color was not expanded"));
            }
        };

        Ok(Self {
            width: info.width,
            height: info.height,
            pixels,
        })
    }

    fn byte_index(&self, x: u32, y: u32) -> usize {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of range");
        (y as usize * self.width as usize + x as usize) * 4
    }
}
