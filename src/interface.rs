//! Bus and pin layer
//!
//! [`DisplayInterface`] is the seam between the protocol logic and the
//! hardware. [`Interface`] implements it for a 4-wire SPI bus with separate DC
//! and RST lines.
//!
//! ## Hardware Requirements
//!
//! The ST7789V requires:
//! - SPI bus (MOSI + SCK, MSB first, mode 0). Chip select is handled by the
//!   [`SpiDevice`] implementation.
//! - 2 GPIO pins:
//!   - **DC**: Data/Command select (output, low = command, high = data)
//!   - **RST**: hardware reset, pulled low to reset
//!
//! ## Example
//!
//! ```rust,no_run
//! use embedded_hal::delay::DelayNs;
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::spi::{Operation, SpiDevice};
//! use st7789v::{DisplayInterface, Interface};
//! # use core::convert::Infallible;
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
//! // Take ownership of the bus and both pins
//! let mut interface = Interface::new(MockSpi, MockPin, MockPin);
//!
//! // Pulse the reset line: 100ms low, 100ms high
//! let _ = interface.reset(&mut delay, 100, 100);
//!
//! // Software reset, then a one-byte command
//! let _ = interface.send_command(0x01);
//! let _ = interface.send_command(0x3A);
//! let _ = interface.send_data(&[0x55]);
//!
//! // Hand the bus and pins back
//! let (_spi, _dc, _rst) = interface.release();
//! ```

use core::fmt::Debug;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

type InterfaceResult<T, E> = core::result::Result<T, E>;

/// State of the Data/Command line
///
/// Reflects the meaning of the byte about to be transferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlLine {
    /// DC low: the next byte is an opcode
    Command,
    /// DC high: the next bytes are payload or pixel data
    Data,
}

/// Trait for hardware interface to the ST7789V controller
///
/// [`Display`](crate::display::Display) only talks to the controller through
/// these three operations, so any transport (or a recording mock) can stand in
/// for the SPI bus.
pub trait DisplayInterface {
    /// Transport error, surfaced unchanged in [`Error::Interface`](crate::Error::Interface)
    type Error: Debug;

    /// Send a command opcode to the controller
    ///
    /// The implementation must:
    /// 1. Set DC low (command mode)
    /// 2. Send the opcode byte over SPI
    ///
    /// # Errors
    ///
    /// Returns the transport error if the pin or bus write fails.
    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error>;

    /// Send payload bytes to the controller
    ///
    /// The implementation must:
    /// 1. Set DC high (data mode)
    /// 2. Send the data bytes over SPI without touching DC in between
    ///
    /// # Errors
    ///
    /// Returns the transport error if the pin or bus write fails.
    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error>;

    /// Pulse the reset line
    ///
    /// The implementation must:
    /// 1. Set RST low
    /// 2. Wait at least `low_ms`
    /// 3. Set RST high
    /// 4. Wait at least `high_ms`
    ///
    /// # Errors
    ///
    /// Returns an error if driving the reset line fails.
    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        low_ms: u32,
        high_ms: u32,
    ) -> InterfaceResult<(), Self::Error>;
}

/// Failure on the SPI bus or one of the control pins
#[derive(Debug)]
pub enum InterfaceError<SpiErr, PinErr> {
    /// SPI transfer failed
    Spi(SpiErr),
    /// Driving DC or RST failed
    Pin(PinErr),
}

impl<SpiErr: Debug, PinErr: Debug> core::fmt::Display for InterfaceError<SpiErr, PinErr> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Spi(e) => write!(f, "SPI error: {e:?}"),
            Self::Pin(e) => write!(f, "Pin error: {e:?}"),
        }
    }
}

impl<SpiErr: Debug, PinErr: Debug> core::error::Error for InterfaceError<SpiErr, PinErr> {}

/// Hardware interface implementation for the ST7789V
///
/// Speaks the ST7789V 4-wire serial protocol over embedded-hal v1.0 traits.
/// The interface owns the bus and pins for its whole lifetime; use
/// [`Interface::release`] to get them back.
///
/// ## Type Parameters
///
/// * `SPI` - SPI device implementing [`SpiDevice`]
/// * `DC` - Data/Command pin implementing [`OutputPin`]
/// * `RST` - Reset pin implementing [`OutputPin`]
pub struct Interface<SPI, DC, RST> {
    /// Bus carrying opcodes and payloads
    spi: SPI,
    /// DC line
    dc: DC,
    /// RST line
    rst: RST,
    /// Last level driven on DC, if any
    control_line: Option<ControlLine>,
}

impl<SPI, DC, RST> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    /// Take ownership of the bus and pins
    ///
    /// Nothing is driven until the first transfer or reset.
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self {
            spi,
            dc,
            rst,
            control_line: None,
        }
    }

    /// Last state driven on the DC line
    ///
    /// `None` until the first command or data transfer.
    pub fn control_line(&self) -> Option<ControlLine> {
        self.control_line
    }

    /// Release the SPI device and pins
    pub fn release(self) -> (SPI, DC, RST) {
        (self.spi, self.dc, self.rst)
    }
}

impl<SPI, DC, RST, PinErr> Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
{
    fn set_control_line(
        &mut self,
        line: ControlLine,
    ) -> InterfaceResult<(), InterfaceError<SPI::Error, PinErr>> {
        let level = match line {
            ControlLine::Command => self.dc.set_low(),
            ControlLine::Data => self.dc.set_high(),
        };
        level.map_err(InterfaceError::Pin)?;
        self.control_line = Some(line);
        Ok(())
    }
}

impl<SPI, DC, RST, PinErr> DisplayInterface for Interface<SPI, DC, RST>
where
    SPI: SpiDevice,
    SPI::Error: Debug,
    DC: OutputPin<Error = PinErr>,
    RST: OutputPin<Error = PinErr>,
    PinErr: Debug,
{
    type Error = InterfaceError<SPI::Error, PinErr>;

    fn send_command(&mut self, command: u8) -> InterfaceResult<(), Self::Error> {
        self.set_control_line(ControlLine::Command)?;
        self.spi.write(&[command]).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn send_data(&mut self, data: &[u8]) -> InterfaceResult<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }
        self.set_control_line(ControlLine::Data)?;
        self.spi.write(data).map_err(InterfaceError::Spi)?;
        Ok(())
    }

    fn reset<D: DelayNs>(
        &mut self,
        delay: &mut D,
        low_ms: u32,
        high_ms: u32,
    ) -> InterfaceResult<(), Self::Error> {
        self.rst.set_low().map_err(InterfaceError::Pin)?;
        delay.delay_ms(low_ms);
        self.rst.set_high().map_err(InterfaceError::Pin)?;
        delay.delay_ms(high_ms);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use embedded_hal::spi::Operation;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        DcLow,
        DcHigh,
        RstLow,
        RstHigh,
        Write(Vec<u8>),
    }

    struct Log(RefCell<Vec<Event>>);

    struct MockSpi<'a>(&'a Log);
    struct MockDc<'a>(&'a Log);
    struct MockRst<'a>(&'a Log);

    impl embedded_hal::spi::ErrorType for MockSpi<'_> {
        type Error = core::convert::Infallible;
    }

    impl SpiDevice for MockSpi<'_> {
        fn transaction(
            &mut self,
            operations: &mut [Operation<'_, u8>],
        ) -> Result<(), Self::Error> {
            for op in operations {
                if let Operation::Write(bytes) = op {
                    self.0.0.borrow_mut().push(Event::Write(bytes.to_vec()));
                }
            }
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for MockDc<'_> {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockDc<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.0.borrow_mut().push(Event::DcLow);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.0.borrow_mut().push(Event::DcHigh);
            Ok(())
        }
    }

    impl embedded_hal::digital::ErrorType for MockRst<'_> {
        type Error = core::convert::Infallible;
    }

    impl OutputPin for MockRst<'_> {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.0.0.borrow_mut().push(Event::RstLow);
            Ok(())
        }
        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.0.0.borrow_mut().push(Event::RstHigh);
            Ok(())
        }
    }

    struct MockDelay(u32);
    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
        fn delay_ms(&mut self, ms: u32) {
            self.0 += ms;
        }
    }

    #[test]
    fn test_send_command_sets_dc_low_first() {
        let log = Log(RefCell::new(Vec::new()));
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        interface.send_command(0x2A).unwrap();
        assert_eq!(
            log.0.borrow().as_slice(),
            &[Event::DcLow, Event::Write(alloc::vec![0x2A])]
        );
        assert_eq!(interface.control_line(), Some(ControlLine::Command));
    }

    #[test]
    fn test_send_data_sets_dc_high_first() {
        let log = Log(RefCell::new(Vec::new()));
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        interface.send_data(&[0x00, 0x01]).unwrap();
        assert_eq!(
            log.0.borrow().as_slice(),
            &[Event::DcHigh, Event::Write(alloc::vec![0x00, 0x01])]
        );
        assert_eq!(interface.control_line(), Some(ControlLine::Data));
    }

    #[test]
    fn test_send_empty_data_touches_nothing() {
        let log = Log(RefCell::new(Vec::new()));
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        interface.send_data(&[]).unwrap();
        assert!(log.0.borrow().is_empty());
        assert_eq!(interface.control_line(), None);
    }

    #[test]
    fn test_reset_pulses_low_then_high() {
        let log = Log(RefCell::new(Vec::new()));
        let mut interface = Interface::new(MockSpi(&log), MockDc(&log), MockRst(&log));
        let mut delay = MockDelay(0);
        interface.reset(&mut delay, 100, 100).unwrap();
        assert_eq!(log.0.borrow().as_slice(), &[Event::RstLow, Event::RstHigh]);
        assert_eq!(delay.0, 200);
    }
}
