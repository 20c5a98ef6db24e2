//! 8-bit RGBA color.

use std::fmt;

/// An 8-bit-per-channel RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Opaque color from red, green and blue.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Color with explicit alpha.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color from hue (degrees), saturation and value in `[0, 1]`.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let c = value * saturation;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let m = value - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let to_u8 = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Self::rgb(to_u8(r), to_u8(g), to_u8(b))
    }

    /// The four channels in RGBA order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsv_primaries() {
        assert_eq!(Rgba::from_hsv(0.0, 1.0, 1.0), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_hsv(120.0, 1.0, 1.0), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::from_hsv(240.0, 1.0, 1.0), Rgba::rgb(0, 0, 255));
        assert_eq!(Rgba::from_hsv(360.0, 1.0, 1.0), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::from_hsv(42.0, 0.0, 0.0), Rgba::rgb(0, 0, 0));
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgba::new(255, 0, 16, 128).to_string(), "#ff001080");
    }

    #[test]
    fn test_array_conversion() {
        let color = Rgba::from([1, 2, 3, 4]);
        assert_eq!(color.to_array(), [1, 2, 3, 4]);
    }
}
