//! ST7789V command definitions
//!
//! This module defines the command opcodes used to drive the ST7789V controller
//! and the fixed payload length of each one. Commands are sent over SPI with the
//! DC pin low for the opcode and high for the payload bytes.
//!
//! ## Command Structure
//!
//! 1. Set DC low (command mode)
//! 2. Send the opcode byte
//! 3. Set DC high (data mode)
//! 4. Send exactly [`payload_len`] payload bytes (if any)
//!
//! ## Example
//!
//! ```rust,no_run
//! use st7789v::{command, DisplayInterface, Interface};
//! # use core::convert::Infallible;
//! # use embedded_hal::digital::OutputPin;
//! # use embedded_hal::spi::{Operation, SpiDevice};
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
//! # let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//! // Select 16-bit/565 pixels
//! let _ = interface.send_command(command::COLMOD);
//! let _ = interface.send_data(&[command::COLMOD_RGB565]);
//! ```

// System control commands

/// Software reset command (0x01)
///
/// Resets registers to their default values. The panel needs at least
/// 120ms before it accepts the next command; the driver waits 150ms.
pub const SWRESET: u8 = 0x01;

/// Sleep out command (0x11)
///
/// Leaves sleep mode and starts the booster and oscillator. The panel needs
/// the longest settle time of the sequence after this command.
pub const SLPOUT: u8 = 0x11;

/// Display on command (0x29)
///
/// Enables output from frame memory to the panel.
pub const DISPON: u8 = 0x29;

/// Display inversion off command (0x20)
pub const INVOFF: u8 = 0x20;

/// Display inversion on command (0x21)
///
/// Most IPS modules need this to show true colors.
pub const INVON: u8 = 0x21;

/// Gamma curve select command (0x26)
///
/// Requires 1 byte: one of 0x01, 0x02, 0x04, 0x08.
pub const GAMSET: u8 = 0x26;

// Format and orientation

/// Interface pixel format command (0x3A)
///
/// Requires 1 byte selecting the color depth, see [`COLMOD_RGB565`].
pub const COLMOD: u8 = 0x3A;

/// COLMOD payload selecting 65K colors, 16 bits per pixel (RGB565)
pub const COLMOD_RGB565: u8 = 0x55;

/// Memory data access control command (0x36)
///
/// Requires 1 byte of orientation flags:
/// - 0x80 (MY): row address order
/// - 0x40 (MX): column address order
/// - 0x20 (MV): row/column exchange
/// - 0x10 (ML): vertical refresh order
/// - 0x08 (RGB): BGR subpixel order
pub const MADCTL: u8 = 0x36;

// Addressing and memory

/// Column address set command (0x2A)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const CASET: u8 = 0x2A;

/// Row address set command (0x2B)
///
/// Requires 4 bytes: [start_MSB, start_LSB, end_MSB, end_LSB]
pub const RASET: u8 = 0x2B;

/// Memory write command (0x2C)
///
/// Starts a pixel stream into the current address window. Takes no fixed
/// payload; every following byte pair is one RGB565 pixel, high byte first.
pub const RAMWR: u8 = 0x2C;

/// Fixed payload length for an opcode
///
/// Returns `None` for opcodes this driver does not know and for [`RAMWR`],
/// whose pixel stream length is set by the address window instead.
pub const fn payload_len(opcode: u8) -> Option<usize> {
    match opcode {
        SWRESET | SLPOUT | DISPON | INVOFF | INVON => Some(0),
        COLMOD | MADCTL | GAMSET => Some(1),
        CASET | RASET => Some(4),
        _ => None,
    }
}
