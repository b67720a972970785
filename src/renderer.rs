//! Full-frame pixel streaming
//!
//! A draw is always: address window covering the whole frame, RAMWR, then
//! one RGB565 word per pixel, high byte first. The controller's write cursor
//! advances once per byte pair with no way to resynchronize, so the pixel
//! count comes from the frame's own samples and never from a separate counter.

use log::debug;

use crate::color::{ColorSample, encode};
use crate::command::RAMWR;
use crate::display::{Display, DisplayResult};
use crate::error::Error;
use crate::frame::Frame;
use crate::interface::DisplayInterface;
use crate::window::AddressWindow;

/// Pixels staged per SPI write
const CHUNK_PIXELS: usize = 64;

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Stream a whole frame to panel memory
    ///
    /// Sets the window to `(0, width - 1, 0, height - 1)`, sends RAMWR and
    /// writes exactly `2 * width * height` data bytes.
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before [`init`](Display::init) has completed
    /// - `Error::FrameTooLarge` if the frame exceeds the panel in the
    ///   configured orientation (nothing is sent)
    /// - `Error::Interface` if a transfer fails
    pub fn draw_frame(&mut self, frame: &Frame<'_>) -> DisplayResult<I> {
        let window = self.frame_window(frame.width(), frame.height())?;
        debug!("drawing {}x{} frame", frame.width(), frame.height());
        self.set_window(window)?;
        self.write_pixels(frame.samples())
    }

    /// Fill the whole panel with one color
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before [`init`](Display::init) has completed
    /// - `Error::Interface` if a transfer fails
    pub fn fill(&mut self, color: ColorSample) -> DisplayResult<I> {
        let dims = self.config().logical_dimensions();
        let window = self.frame_window(dims.width, dims.height)?;
        debug!("filling panel with {:?}", color);
        self.set_window(window)?;
        // Bounded by the panel size, so the count fits any usize
        let pixels = window.pixel_count() as usize;
        self.write_pixels(core::iter::repeat_n(color, pixels))
    }

    fn frame_window(&self, width: u16, height: u16) -> Result<AddressWindow, Error<I>> {
        self.ensure_on()?;
        let logical = self.config().logical_dimensions();
        match AddressWindow::full_frame(width, height) {
            Some(window) if window.fits(logical) => Ok(window),
            _ => Err(Error::FrameTooLarge { width, height }),
        }
    }

    /// Send RAMWR followed by every sample, encoded, in order
    fn write_pixels<S>(&mut self, samples: S) -> DisplayResult<I>
    where
        S: Iterator<Item = ColorSample>,
    {
        self.send_command(RAMWR)?;

        let mut chunk = [0u8; CHUNK_PIXELS * 2];
        let mut len = 0;
        for sample in samples {
            let [high, low] = encode(sample).to_be_bytes();
            chunk[len] = high;
            chunk[len + 1] = low;
            len += 2;
            if len == chunk.len() {
                self.send_data(&chunk)?;
                len = 0;
            }
        }
        if len > 0 {
            self.send_data(&chunk[..len])?;
        }
        Ok(())
    }
}
