//! Frame sources
//!
//! Image decoding lives outside this crate. Decoders hand over either packed
//! RGB bytes or palette indices plus a color table; both are wrapped in a
//! [`ColorSource`] and validated once by [`Frame::new`]. The renderer only sees
//! [`Frame::samples`], which yields exactly `width * height` colors in
//! row-major order whatever the source.
//!
//! ## Example
//!
//! ```
//! use st7789v::{ColorSample, ColorSource, Frame, Palette};
//!
//! // 2x1 packed RGB (as produced by most decoders with 3 channels)
//! let rgb = [255, 0, 0, 0, 0, 255];
//! let frame = Frame::new(2, 1, ColorSource::Rgb(&rgb)).unwrap();
//! assert_eq!(frame.samples().len(), 2);
//!
//! // 2x1 indexed
//! let colors = [ColorSample::BLACK, ColorSample::WHITE];
//! let palette = Palette::new(&colors).unwrap();
//! let indices = [1, 0];
//! let frame = Frame::new(2, 1, ColorSource::Indexed { indices: &indices, palette }).unwrap();
//! assert_eq!(frame.samples().next(), Some(ColorSample::WHITE));
//! ```

use core::slice::{ChunksExact, Iter};

use crate::color::ColorSample;
use crate::error::{FrameError, MAX_ROWS};

/// Largest palette addressable by a `u8` index
pub const MAX_PALETTE_LEN: usize = 256;

/// Bytes per pixel of a packed RGB source
pub const RGB_BYTES_PER_PIXEL: usize = 3;

/// Longest side a frame may have: the panel's long axis, in either orientation
pub const MAX_FRAME_SIDE: u16 = MAX_ROWS;

/// Pixel count of a `width x height` frame, after bounds checks
///
/// Capping each side keeps `width * height * 3` far below `u32::MAX`, so the
/// size arithmetic cannot wrap on 32-bit targets.
pub(crate) fn checked_pixel_count(width: u16, height: u16) -> Result<usize, FrameError> {
    if width == 0 || height == 0 {
        return Err(FrameError::EmptyFrame);
    }
    if width > MAX_FRAME_SIDE || height > MAX_FRAME_SIDE {
        return Err(FrameError::DimensionsTooLarge { width, height });
    }
    Ok(width as usize * height as usize)
}

/// Color table for indexed frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette<'a> {
    entries: &'a [ColorSample],
}

impl<'a> Palette<'a> {
    /// Wrap a color table
    ///
    /// # Errors
    ///
    /// Returns `FrameError::InvalidPalette` if the table is empty or has more
    /// than [`MAX_PALETTE_LEN`] entries.
    pub fn new(entries: &'a [ColorSample]) -> Result<Self, FrameError> {
        if entries.is_empty() || entries.len() > MAX_PALETTE_LEN {
            return Err(FrameError::InvalidPalette { len: entries.len() });
        }
        Ok(Self { entries })
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; empty palettes are rejected by [`Palette::new`]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry
    pub fn get(&self, index: u8) -> Option<ColorSample> {
        self.entries.get(index as usize).copied()
    }
}

/// Where a frame's colors come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorSource<'a> {
    /// Packed `R, G, B` bytes, 3 per pixel
    Rgb(&'a [u8]),
    /// One palette index per pixel
    Indexed {
        /// Palette index of each pixel
        indices: &'a [u8],
        /// Color table the indices refer to
        palette: Palette<'a>,
    },
}

/// A validated raster of `width * height` colors, row-major, top-left origin
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame<'a> {
    width: u16,
    height: u16,
    source: ColorSource<'a>,
}

impl<'a> Frame<'a> {
    /// Create a frame over decoded image data
    ///
    /// # Errors
    ///
    /// - `FrameError::EmptyFrame` if width or height is zero
    /// - `FrameError::DimensionsTooLarge` if a side exceeds [`MAX_FRAME_SIDE`]
    /// - `FrameError::SizeMismatch` if the source does not hold exactly
    ///   `width * height` pixels
    /// - `FrameError::PaletteIndexOutOfRange` if an index has no palette entry
    pub fn new(width: u16, height: u16, source: ColorSource<'a>) -> Result<Self, FrameError> {
        let pixels = checked_pixel_count(width, height)?;

        match source {
            ColorSource::Rgb(bytes) => {
                let expected = pixels * RGB_BYTES_PER_PIXEL;
                if bytes.len() != expected {
                    return Err(FrameError::SizeMismatch {
                        expected,
                        provided: bytes.len(),
                    });
                }
            }
            ColorSource::Indexed { indices, palette } => {
                if indices.len() != pixels {
                    return Err(FrameError::SizeMismatch {
                        expected: pixels,
                        provided: indices.len(),
                    });
                }
                if let Some(&index) = indices.iter().find(|&&i| i as usize >= palette.len()) {
                    return Err(FrameError::PaletteIndexOutOfRange {
                        index,
                        palette_len: palette.len(),
                    });
                }
            }
        }

        Ok(Self {
            width,
            height,
            source,
        })
    }

    /// Frame over packed RGB bytes
    ///
    /// # Errors
    ///
    /// See [`Frame::new`].
    pub fn from_rgb(width: u16, height: u16, bytes: &'a [u8]) -> Result<Self, FrameError> {
        Self::new(width, height, ColorSource::Rgb(bytes))
    }

    /// Frame over palette indices
    ///
    /// # Errors
    ///
    /// See [`Frame::new`].
    pub fn from_indexed(
        width: u16,
        height: u16,
        indices: &'a [u8],
        palette: Palette<'a>,
    ) -> Result<Self, FrameError> {
        Self::new(width, height, ColorSource::Indexed { indices, palette })
    }

    /// Width in pixels
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Underlying color source
    pub fn source(&self) -> ColorSource<'a> {
        self.source
    }

    /// Colors in row-major order
    pub fn samples(&self) -> Samples<'a> {
        let inner = match self.source {
            ColorSource::Rgb(bytes) => SamplesInner::Rgb(bytes.chunks_exact(RGB_BYTES_PER_PIXEL)),
            ColorSource::Indexed { indices, palette } => SamplesInner::Indexed {
                indices: indices.iter(),
                palette,
            },
        };
        Samples { inner }
    }
}

/// Iterator over the colors of a [`Frame`]
#[derive(Clone, Debug)]
pub struct Samples<'a> {
    inner: SamplesInner<'a>,
}

#[derive(Clone, Debug)]
enum SamplesInner<'a> {
    Rgb(ChunksExact<'a, u8>),
    Indexed {
        indices: Iter<'a, u8>,
        palette: Palette<'a>,
    },
}

impl Iterator for Samples<'_> {
    type Item = ColorSample;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            SamplesInner::Rgb(chunks) => chunks
                .next()
                .map(|px| ColorSample::new(px[0], px[1], px[2])),
            // Indices were range-checked in Frame::new
            SamplesInner::Indexed { indices, palette } => indices
                .next()
                .map(|&index| palette.get(index).unwrap_or_default()),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            SamplesInner::Rgb(chunks) => chunks.size_hint(),
            SamplesInner::Indexed { indices, .. } => indices.size_hint(),
        }
    }
}

impl ExactSizeIterator for Samples<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_rgb_frame_samples_row_major() {
        let bytes = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let frame = Frame::from_rgb(2, 2, &bytes).unwrap();
        let samples: Vec<_> = frame.samples().collect();
        assert_eq!(
            samples,
            [
                ColorSample::new(1, 2, 3),
                ColorSample::new(4, 5, 6),
                ColorSample::new(7, 8, 9),
                ColorSample::new(10, 11, 12),
            ]
        );
    }

    #[test]
    fn test_rgb_frame_size_mismatch() {
        let bytes = [0u8; 11];
        assert_eq!(
            Frame::from_rgb(2, 2, &bytes),
            Err(FrameError::SizeMismatch {
                expected: 12,
                provided: 11
            })
        );
        let bytes = [0u8; 13];
        assert!(Frame::from_rgb(2, 2, &bytes).is_err());
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert_eq!(Frame::from_rgb(0, 2, &[]), Err(FrameError::EmptyFrame));
        assert_eq!(Frame::from_rgb(2, 0, &[]), Err(FrameError::EmptyFrame));
    }

    #[test]
    fn test_oversized_side_rejected_before_length_check() {
        // 65535 x 21846 pixels would wrap the RGB byte count to 2 on 32-bit
        assert_eq!(
            Frame::from_rgb(u16::MAX, 21846, &[0, 0]),
            Err(FrameError::DimensionsTooLarge {
                width: u16::MAX,
                height: 21846
            })
        );
        assert_eq!(
            Frame::from_rgb(MAX_FRAME_SIDE + 1, 1, &[0; 321 * 3]),
            Err(FrameError::DimensionsTooLarge {
                width: 321,
                height: 1
            })
        );
        let colors = [ColorSample::BLACK];
        let palette = Palette::new(&colors).unwrap();
        assert!(matches!(
            Frame::from_indexed(1, 400, &[0; 400], palette),
            Err(FrameError::DimensionsTooLarge { .. })
        ));
    }

    #[test]
    fn test_largest_frame_accepted_in_both_orientations() {
        let bytes = alloc::vec![0u8; 320 * 240 * 3];
        assert!(Frame::from_rgb(320, 240, &bytes).is_ok());
        assert!(Frame::from_rgb(240, 320, &bytes).is_ok());
    }

    #[test]
    fn test_indexed_frame_resolves_palette() {
        let colors = [
            ColorSample::new(10, 20, 30),
            ColorSample::new(40, 50, 60),
        ];
        let palette = Palette::new(&colors).unwrap();
        let indices = [1, 1, 0];
        let frame = Frame::from_indexed(3, 1, &indices, palette).unwrap();
        let samples: Vec<_> = frame.samples().collect();
        assert_eq!(samples, [colors[1], colors[1], colors[0]]);
    }

    #[test]
    fn test_indexed_frame_rejects_out_of_range_index() {
        let colors = [ColorSample::BLACK, ColorSample::WHITE];
        let palette = Palette::new(&colors).unwrap();
        let indices = [0, 2];
        assert_eq!(
            Frame::from_indexed(2, 1, &indices, palette),
            Err(FrameError::PaletteIndexOutOfRange {
                index: 2,
                palette_len: 2
            })
        );
    }

    #[test]
    fn test_indexed_frame_size_mismatch() {
        let colors = [ColorSample::BLACK];
        let palette = Palette::new(&colors).unwrap();
        assert_eq!(
            Frame::from_indexed(2, 2, &[0, 0, 0], palette),
            Err(FrameError::SizeMismatch {
                expected: 4,
                provided: 3
            })
        );
    }

    #[test]
    fn test_palette_bounds() {
        assert_eq!(Palette::new(&[]), Err(FrameError::InvalidPalette { len: 0 }));
        let full = [ColorSample::BLACK; MAX_PALETTE_LEN];
        assert_eq!(Palette::new(&full).map(|p| p.len()), Ok(256));
        let too_many = [ColorSample::BLACK; MAX_PALETTE_LEN + 1];
        assert!(Palette::new(&too_many).is_err());
    }

    #[test]
    fn test_samples_exact_size() {
        let bytes = [0u8; 3 * 6];
        let frame = Frame::from_rgb(3, 2, &bytes).unwrap();
        let mut samples = frame.samples();
        assert_eq!(samples.len(), 6);
        samples.next();
        assert_eq!(samples.len(), 5);
    }
}
