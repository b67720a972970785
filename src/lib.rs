//! ST7789V TFT Display Driver
//!
//! A driver for the ST7789V display controller in 16-bit RGB565 mode,
//! supporting panels up to 240x320 pixels over a 4-wire SPI bus.
//!
//! ## Features
//!
//! - `no_std` compatible
//! - `embedded-hal` v1.0 support
//! - `embedded-graphics` integration (with `graphics` feature)
//! - Power-on sequence with configurable settle times
//! - Full-frame streaming from packed RGB or palette-indexed sources
//! - Frame-sequence animation with a cooperative stop signal
//!
//! ## Usage
//!
//! ```rust,no_run
//! use core::convert::Infallible;
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7789v::{Builder, ColorSample, Dimensions, Display, Frame, Interface, Orientation};
//!
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
//! # let spi = MockSpi;
//! # let dc = MockPin;
//! # let rst = MockPin;
//! # let mut delay = MockDelay;
//! let interface = Interface::new(spi, dc, rst);
//! let dims = match Dimensions::new(240, 320) {
//!     Ok(dims) => dims,
//!     Err(_) => return,
//! };
//! let config = match Builder::new()
//!     .dimensions(dims)
//!     .orientation(Orientation::Rotate0)
//!     .build()
//! {
//!     Ok(config) => config,
//!     Err(_) => return,
//! };
//!
//! let mut display = Display::new(interface, config);
//! if display.init(&mut delay).is_err() {
//!     return;
//! }
//! let _ = display.fill(ColorSample::BLACK);
//!
//! let pixels = [255u8; 2 * 2 * 3];
//! if let Ok(frame) = Frame::from_rgb(2, 2, &pixels) {
//!     let _ = display.draw_frame(&frame);
//! }
//!
//! let (_spi, _dc, _rst) = display.release().release();
//! ```

#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[cfg(test)]
extern crate std;

/// Frame sequencing and playback
pub mod animation;
/// RGB565 color encoding
pub mod color;
/// ST7789V command definitions
pub mod command;
/// Panel size, orientation, timing and the config builder
pub mod config;
/// Core display operations
pub mod display;
/// Error types for the driver
pub mod error;
/// Frame sources
pub mod frame;
/// SPI bus and control pins
pub mod interface;
/// Frame streaming
pub mod renderer;
/// Address windows
pub mod window;

/// embedded-graphics interop (`graphics` feature)
#[cfg(feature = "graphics")]
pub mod graphics;

pub use animation::{
    AnimationFrame, AnimationOutcome, AnimationScheduler, LoopPolicy, NeverStop, StopSignal,
};
pub use color::{ColorSample, EncodedPixel, encode};
pub use config::{
    Builder, Config, Dimensions, MAX_COLUMNS, MAX_ROWS, MIN_DISPLAY_ON_MS, MIN_RESET_HIGH_MS,
    MIN_RESET_LOW_MS, MIN_SLEEP_OUT_MS, MIN_SOFTWARE_RESET_MS, Orientation, Timing,
};
pub use display::{Display, PowerState};
pub use error::{BuilderError, Error, FrameError};
pub use frame::{ColorSource, Frame, MAX_FRAME_SIDE, MAX_PALETTE_LEN, Palette, Samples};
pub use interface::{ControlLine, DisplayInterface, Interface, InterfaceError};
pub use window::AddressWindow;

#[cfg(feature = "graphics")]
pub use graphics::RgbFrameBuffer;
