//! embedded-graphics interop
//!
//! This module connects the driver to the embedded-graphics ecosystem:
//!
//! - [`ColorSample`] and [`EncodedPixel`] convert to and from
//!   [`Rgb888`] and [`Rgb565`].
//! - [`RgbFrameBuffer`] implements
//!   [`DrawTarget`](embedded_graphics_core::draw_target::DrawTarget) over a
//!   caller-owned packed RGB buffer. Whatever is drawn into it can be handed to
//!   [`Display::draw_frame`](crate::Display::draw_frame) through
//!   [`RgbFrameBuffer::frame`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_graphics::{
//!     pixelcolor::Rgb888,
//!     prelude::*,
//!     primitives::{Circle, PrimitiveStyle, Rectangle},
//! };
//! use st7789v::RgbFrameBuffer;
//! # use core::convert::Infallible;
//! # use embedded_hal::delay::DelayNs;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
//! # use st7789v::{Builder, Dimensions, Display, Interface};
//! # struct MockSpi;
//! # impl embedded_hal::spi::ErrorType for MockSpi { type Error = Infallible; }
//! # impl SpiDevice for MockSpi {
//! #     fn transaction(
//! #         &mut self,
//! #         _operations: &mut [Operation<'_, u8>],
//! #     ) -> Result<(), Self::Error> {
//! #         Ok(())
//! #     }
//! # }
//! # struct MockPin;
//! # impl embedded_hal::digital::ErrorType for MockPin { type Error = Infallible; }
//! # impl OutputPin for MockPin {
//! #     fn set_low(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! # }
//! # struct MockDelay;
//! # impl DelayNs for MockDelay { fn delay_ns(&mut self, _ns: u32) {} }
//! # let mut delay = MockDelay;
//! # let dims = match Dimensions::new(240, 240) {
//! #     Ok(dims) => dims,
//! #     Err(_) => return,
//! # };
//! # let config = match Builder::new().dimensions(dims).build() {
//! #     Ok(config) => config,
//! #     Err(_) => return,
//! # };
//! # let mut display = Display::new(Interface::new(MockSpi, MockPin, MockPin), config);
//! # let _ = display.init(&mut delay);
//! let mut buffer = RgbFrameBuffer::new(vec![0u8; 64 * 64 * 3], 64, 64).unwrap();
//!
//! let _ = Rectangle::new(Point::new(4, 4), Size::new(20, 10))
//!     .into_styled(PrimitiveStyle::with_fill(Rgb888::RED))
//!     .draw(&mut buffer);
//! let _ = Circle::new(Point::new(30, 30), 20)
//!     .into_styled(PrimitiveStyle::with_stroke(Rgb888::WHITE, 2))
//!     .draw(&mut buffer);
//!
//! if let Ok(frame) = buffer.frame() {
//!     let _ = display.draw_frame(&frame);
//! }
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::{IntoStorage, Rgb565, Rgb888, RgbColor, raw::RawU16},
    prelude::Pixel,
};

use crate::color::{ColorSample, EncodedPixel};
use crate::error::FrameError;
use crate::frame::{Frame, RGB_BYTES_PER_PIXEL, checked_pixel_count};

impl From<Rgb888> for ColorSample {
    fn from(color: Rgb888) -> Self {
        Self::new(color.r(), color.g(), color.b())
    }
}

impl From<ColorSample> for Rgb888 {
    fn from(sample: ColorSample) -> Self {
        Self::new(sample.red, sample.green, sample.blue)
    }
}

impl From<Rgb565> for EncodedPixel {
    fn from(color: Rgb565) -> Self {
        Self(color.into_storage())
    }
}

impl From<EncodedPixel> for Rgb565 {
    fn from(pixel: EncodedPixel) -> Self {
        Self::from(RawU16::new(pixel.0))
    }
}

/// Packed RGB drawing surface
///
/// Wraps a buffer of `width * height * 3` bytes laid out as [`Frame`]
/// expects, row-major from the top-left corner.
///
/// ## Type Parameters
///
/// * `B` - Buffer type implementing `AsRef<[u8]>` and `AsMut<[u8]>`
pub struct RgbFrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    buffer: B,
    width: u16,
    height: u16,
}

impl<B> RgbFrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    /// Wrap a buffer
    ///
    /// # Errors
    ///
    /// - `FrameError::EmptyFrame` if width or height is zero
    /// - `FrameError::DimensionsTooLarge` if a side exceeds
    ///   [`MAX_FRAME_SIDE`](crate::frame::MAX_FRAME_SIDE)
    /// - `FrameError::SizeMismatch` if the buffer is not exactly
    ///   `width * height * 3` bytes
    pub fn new(buffer: B, width: u16, height: u16) -> Result<Self, FrameError> {
        let expected = checked_pixel_count(width, height)? * RGB_BYTES_PER_PIXEL;
        let provided = buffer.as_ref().len();
        if provided != expected {
            return Err(FrameError::SizeMismatch { expected, provided });
        }
        Ok(Self {
            buffer,
            width,
            height,
        })
    }

    /// View the current contents as a frame
    ///
    /// # Errors
    ///
    /// Never fails for a buffer built by [`RgbFrameBuffer::new`]; the result
    /// mirrors [`Frame::new`].
    pub fn frame(&self) -> Result<Frame<'_>, FrameError> {
        Frame::from_rgb(self.width, self.height, self.buffer.as_ref())
    }

    /// Give the buffer back
    pub fn into_inner(self) -> B {
        self.buffer
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb888) {
        let index = (y as usize * self.width as usize + x as usize) * RGB_BYTES_PER_PIXEL;
        if let Some(px) = self
            .buffer
            .as_mut()
            .get_mut(index..index + RGB_BYTES_PER_PIXEL)
        {
            px.copy_from_slice(&[color.r(), color.g(), color.b()]);
        }
    }
}

#[cfg(feature = "alloc")]
impl RgbFrameBuffer<alloc::vec::Vec<u8>> {
    /// Allocate a zeroed (black) buffer on the heap
    ///
    /// # Errors
    ///
    /// - `FrameError::EmptyFrame` if width or height is zero
    /// - `FrameError::DimensionsTooLarge` if a side exceeds
    ///   [`MAX_FRAME_SIDE`](crate::frame::MAX_FRAME_SIDE)
    pub fn allocate(width: u16, height: u16) -> Result<Self, FrameError> {
        let len = checked_pixel_count(width, height)? * RGB_BYTES_PER_PIXEL;
        Self::new(alloc::vec![0u8; len], width, height)
    }
}

impl<B> DrawTarget for RgbFrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let sz = self.size();

        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }

            let x = x as u32;
            let y = y as u32;

            if x >= sz.width || y >= sz.height {
                continue;
            }

            self.set_pixel(x, y, color);
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let rgb = [color.r(), color.g(), color.b()];
        for px in self.buffer.as_mut().chunks_exact_mut(RGB_BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgb);
        }
        Ok(())
    }
}

impl<B> OriginDimensions for RgbFrameBuffer<B>
where
    B: AsRef<[u8]> + AsMut<[u8]>,
{
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::encode;
    use alloc::vec;
    use alloc::vec::Vec;
    use embedded_graphics::{
        prelude::*,
        primitives::{PrimitiveStyle, Rectangle},
    };

    #[test]
    fn test_rgb888_conversions() {
        let sample = ColorSample::from(Rgb888::new(10, 20, 30));
        assert_eq!(sample, ColorSample::new(10, 20, 30));
        assert_eq!(Rgb888::from(sample), Rgb888::new(10, 20, 30));
    }

    #[test]
    fn test_rgb565_storage_matches_encoding() {
        let pixel = encode(ColorSample::new(255, 0, 0));
        assert_eq!(Rgb565::from(pixel), Rgb565::RED);
        assert_eq!(EncodedPixel::from(Rgb565::BLUE), EncodedPixel(0x001F));
        assert_eq!(EncodedPixel::from(Rgb565::WHITE), EncodedPixel(0xFFFF));
    }

    #[test]
    fn test_new_rejects_wrong_size() {
        assert!(matches!(
            RgbFrameBuffer::new(vec![0u8; 11], 2, 2),
            Err(FrameError::SizeMismatch {
                expected: 12,
                provided: 11
            })
        ));
        assert!(matches!(
            RgbFrameBuffer::new(vec![0u8; 0], 0, 2),
            Err(FrameError::EmptyFrame)
        ));
    }

    #[test]
    fn test_new_rejects_oversized_side() {
        // Would wrap to a 2-byte expectation on a 32-bit usize
        assert!(matches!(
            RgbFrameBuffer::new([0u8; 2], u16::MAX, 21846),
            Err(FrameError::DimensionsTooLarge {
                width: u16::MAX,
                height: 21846
            })
        ));
    }

    #[test]
    fn test_draw_rectangle_into_frame() {
        let mut buffer = RgbFrameBuffer::new(vec![0u8; 4 * 3 * 3], 4, 3).unwrap();
        assert_eq!(buffer.size(), Size::new(4, 3));

        Rectangle::new(Point::new(1, 1), Size::new(2, 1))
            .into_styled(PrimitiveStyle::with_fill(Rgb888::GREEN))
            .draw(&mut buffer)
            .unwrap();

        let frame = buffer.frame().unwrap();
        let samples: Vec<_> = frame.samples().collect();
        assert_eq!(samples.len(), 12);
        assert_eq!(samples[5], ColorSample::new(0, 255, 0));
        assert_eq!(samples[6], ColorSample::new(0, 255, 0));
        assert_eq!(samples[4], ColorSample::BLACK);
        assert_eq!(samples[7], ColorSample::BLACK);
    }

    #[test]
    fn test_out_of_bounds_pixels_ignored() {
        let mut buffer = RgbFrameBuffer::new(vec![0u8; 2 * 2 * 3], 2, 2).unwrap();
        Pixel(Point::new(-1, 0), Rgb888::WHITE)
            .draw(&mut buffer)
            .unwrap();
        Pixel(Point::new(2, 0), Rgb888::WHITE)
            .draw(&mut buffer)
            .unwrap();
        assert!(buffer.into_inner().iter().all(|&b| b == 0));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_allocate_zeroed_buffer() {
        let buffer = RgbFrameBuffer::allocate(4, 2).unwrap();
        assert_eq!(buffer.size(), Size::new(4, 2));
        let frame = buffer.frame().unwrap();
        assert!(frame.samples().all(|s| s == ColorSample::BLACK));
        assert_eq!(buffer.into_inner().len(), 4 * 2 * 3);
        assert!(matches!(
            RgbFrameBuffer::allocate(0, 2),
            Err(FrameError::EmptyFrame)
        ));
    }

    #[test]
    fn test_clear_fills_every_pixel() {
        let mut buffer = RgbFrameBuffer::new(vec![0u8; 3 * 2 * 3], 3, 2).unwrap();
        buffer.clear(Rgb888::new(1, 2, 3)).unwrap();
        let frame = buffer.frame().unwrap();
        assert!(frame.samples().all(|s| s == ColorSample::new(1, 2, 3)));
    }
}
