//! Error types for the driver
//!
//! This module defines error types for configuration building ([`BuilderError`]),
//! frame construction ([`FrameError`]) and display operations ([`Error`]).
//!
//! Every error is fatal: the driver never retries a transfer and never tries
//! to repair a half-written frame. Callers release the bus (by dropping or
//! [`release`](crate::Display::release)-ing the display) and stop.
//!
//! ## Error Types
//!
//! - [`BuilderError`] - Rejected dimensions or timing in the builder
//! - [`FrameError`] - Frame source data that does not describe a valid raster
//! - [`Error`] - Failures while talking to the controller
//! - [`InterfaceError`](crate::interface::InterfaceError) - SPI or pin failures from [`Interface`](crate::Interface)
//!
//! ## Example
//!
//! ```
//! use st7789v::{Builder, BuilderError, Dimensions};
//!
//! // Missing dimensions
//! let result = Builder::new().build();
//! assert!(matches!(result, Err(BuilderError::MissingDimensions)));
//!
//! // Invalid dimensions
//! let result = Dimensions::new(480, 320); // Too wide
//! assert!(result.is_err());
//! ```

use crate::display::PowerState;
use crate::interface::DisplayInterface;

/// Maximum columns supported by the ST7789V frame memory
pub const MAX_COLUMNS: u16 = 240;

/// Maximum rows supported by the ST7789V frame memory
pub const MAX_ROWS: u16 = 320;

/// Display operation failure
///
/// Carries the interface's own error type so HAL errors reach the caller intact.
pub enum Error<I: DisplayInterface> {
    /// Interface error (SPI/GPIO)
    ///
    /// The bus or a pin failed; the payload is whatever the [`DisplayInterface`] returned.
    Interface(I::Error),
    /// Pixel operation attempted before the power-on sequence completed
    NotInitialized {
        /// State the controller was in
        state: PowerState,
    },
    /// Address window is inverted or outside the panel
    InvalidWindow {
        /// First column
        col_start: u16,
        /// Last column (inclusive)
        col_end: u16,
        /// First row
        row_start: u16,
        /// Last row (inclusive)
        row_end: u16,
    },
    /// Frame is larger than the panel in the configured orientation
    FrameTooLarge {
        /// Frame width in pixels
        width: u16,
        /// Frame height in pixels
        height: u16,
    },
    /// Payload length does not match the opcode's fixed length
    PayloadLength {
        /// Command opcode
        opcode: u8,
        /// Payload length the opcode requires
        expected: usize,
        /// Payload length provided
        provided: usize,
    },
    /// Opcode cannot be issued as a raw command
    ///
    /// Memory writes go through [`draw_frame`](crate::Display::draw_frame)
    /// so the pixel count always matches the address window.
    UnsupportedCommand {
        /// Command opcode
        opcode: u8,
    },
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Bus error: {e:?}"),
            Self::NotInitialized { state } => {
                write!(f, "Display not initialized (state: {state:?})")
            }
            Self::InvalidWindow {
                col_start,
                col_end,
                row_start,
                row_end,
            } => write!(
                f,
                "Invalid address window: cols {col_start}..={col_end}, rows {row_start}..={row_end}"
            ),
            Self::FrameTooLarge { width, height } => {
                write!(f, "Frame {width}x{height} does not fit the panel")
            }
            Self::PayloadLength {
                opcode,
                expected,
                provided,
            } => write!(
                f,
                "Command {opcode:#04x} takes {expected} payload bytes, provided {provided}"
            ),
            Self::UnsupportedCommand { opcode } => {
                write!(f, "Command {opcode:#04x} cannot be sent raw")
            }
        }
    }
}

// Manual impl: only the interface's error type needs to be Debug, not the
// interface itself.
impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
            Self::NotInitialized { state } => f
                .debug_struct("NotInitialized")
                .field("state", state)
                .finish(),
            Self::InvalidWindow {
                col_start,
                col_end,
                row_start,
                row_end,
            } => f
                .debug_struct("InvalidWindow")
                .field("col_start", col_start)
                .field("col_end", col_end)
                .field("row_start", row_start)
                .field("row_end", row_end)
                .finish(),
            Self::FrameTooLarge { width, height } => f
                .debug_struct("FrameTooLarge")
                .field("width", width)
                .field("height", height)
                .finish(),
            Self::PayloadLength {
                opcode,
                expected,
                provided,
            } => f
                .debug_struct("PayloadLength")
                .field("opcode", opcode)
                .field("expected", expected)
                .field("provided", provided)
                .finish(),
            Self::UnsupportedCommand { opcode } => f
                .debug_struct("UnsupportedCommand")
                .field("opcode", opcode)
                .finish(),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}

/// Configuration rejected by [`Builder::build`](crate::config::Builder::build) or
/// [`Dimensions::new`](crate::config::Dimensions::new)
#[derive(Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// No panel size given
    ///
    /// Call [`Builder::dimensions()`](crate::config::Builder::dimensions) first.
    MissingDimensions,
    /// Panel size outside the controller's frame memory
    ///
    /// Width must be `1..=MAX_COLUMNS` and height `1..=MAX_ROWS`.
    InvalidDimensions {
        /// Number of columns requested
        width: u16,
        /// Number of rows requested
        height: u16,
    },
    /// A power-on delay is shorter than the panel's minimum
    TimingBelowMinimum {
        /// Name of the [`Timing`](crate::config::Timing) field
        name: &'static str,
        /// Requested delay in milliseconds
        value: u32,
        /// Minimum delay in milliseconds
        minimum: u32,
    },
}

impl core::fmt::Display for BuilderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingDimensions => write!(f, "Panel dimensions not set"),
            Self::InvalidDimensions { width, height } => write!(
                f,
                "Invalid dimensions {width}x{height} (max {MAX_COLUMNS}x{MAX_ROWS})"
            ),
            Self::TimingBelowMinimum {
                name,
                value,
                minimum,
            } => write!(f, "{name} = {value}ms is below the {minimum}ms minimum"),
        }
    }
}

impl core::error::Error for BuilderError {}

/// Errors raised while assembling a frame from decoded image data
///
/// Frames are validated once on construction, so a frame that exists can
/// always be streamed in full.
#[derive(Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Width or height is zero
    EmptyFrame,
    /// Source data does not hold `width * height` pixels
    SizeMismatch {
        /// Bytes required by the frame dimensions
        expected: usize,
        /// Bytes provided by the source
        provided: usize,
    },
    /// A side is longer than any ST7789V panel can show
    ///
    /// Both sides are capped at [`MAX_FRAME_SIDE`](crate::frame::MAX_FRAME_SIDE)
    /// so a rotated frame still fits.
    DimensionsTooLarge {
        /// Frame width in pixels
        width: u16,
        /// Frame height in pixels
        height: u16,
    },
    /// Palette has no entries or more than 256
    InvalidPalette {
        /// Number of palette entries provided
        len: usize,
    },
    /// Pixel refers to a palette entry that does not exist
    PaletteIndexOutOfRange {
        /// Offending index
        index: u8,
        /// Number of palette entries
        palette_len: usize,
    },
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyFrame => write!(f, "Frame has zero width or height"),
            Self::SizeMismatch { expected, provided } => write!(
                f,
                "Frame source size mismatch: expected {expected} bytes, provided {provided}"
            ),
            Self::DimensionsTooLarge { width, height } => write!(
                f,
                "Frame {width}x{height} exceeds the {MAX_ROWS} pixel side limit"
            ),
            Self::InvalidPalette { len } => {
                write!(f, "Palette must have 1 to 256 entries, got {len}")
            }
            Self::PaletteIndexOutOfRange { index, palette_len } => write!(
                f,
                "Palette index {index} out of range for {palette_len} entries"
            ),
        }
    }
}

impl core::error::Error for FrameError {}
