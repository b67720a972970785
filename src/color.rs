//! Color types and RGB565 encoding
//!
//! This module defines [`ColorSample`], an 8-bit-per-channel color as it comes
//! out of an image decoder, and [`EncodedPixel`], the 16-bit RGB565 word the
//! ST7789V stores per pixel.
//!
//! ## Color Representation
//!
//! RGB565 packs a pixel into two bytes, sent high byte first:
//!
//! | Bits   | 15..11 | 10..5  | 4..0  |
//! |--------|--------|--------|-------|
//! | Field  | red    | green  | blue  |
//! | Source | r >> 3 | g >> 2 | b >> 3|
//!
//! The low 3 bits of red and blue and the low 2 bits of green are dropped.
//! Encoding is lossy on purpose; it matches the panel's native depth.
//!
//! ## Example
//!
//! ```
//! use st7789v::{ColorSample, EncodedPixel};
//!
//! let white = ColorSample::new(255, 255, 255);
//! assert_eq!(white.encode(), EncodedPixel(0xFFFF));
//! assert_eq!(white.encode().to_be_bytes(), [0xFF, 0xFF]);
//!
//! let red = ColorSample::new(255, 0, 0);
//! assert_eq!(red.encode().to_be_bytes(), [0xF8, 0x00]);
//! ```

/// 24-bit color sample (8 bits per channel)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ColorSample {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl ColorSample {
    /// Black
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// White
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Create a color sample from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Quantize to the panel's RGB565 format
    pub const fn encode(self) -> EncodedPixel {
        encode(self)
    }
}

/// Pixel in the panel's native RGB565 format
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EncodedPixel(pub u16);

impl EncodedPixel {
    /// Wire order: high byte first
    pub const fn to_be_bytes(self) -> [u8; 2] {
        self.0.to_be_bytes()
    }

    /// Red field (5 bits)
    pub const fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// Green field (6 bits)
    pub const fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// Blue field (5 bits)
    pub const fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }
}

/// Convert a color sample to RGB565
///
/// `value = (red >> 3) << 11 | (green >> 2) << 5 | (blue >> 3)`
pub const fn encode(sample: ColorSample) -> EncodedPixel {
    let red = ((sample.red as u16) >> 3) << 11;
    let green = ((sample.green as u16) >> 2) << 5;
    let blue = (sample.blue as u16) >> 3;
    EncodedPixel(red | green | blue)
}

impl From<ColorSample> for EncodedPixel {
    fn from(sample: ColorSample) -> Self {
        encode(sample)
    }
}
