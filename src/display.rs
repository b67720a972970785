//! Core display operations

use embedded_hal::delay::DelayNs;
use log::{debug, trace};

use crate::command::{self, CASET, COLMOD, DISPON, MADCTL, RAMWR, RASET, SLPOUT, SWRESET};
use crate::config::{Config, Dimensions};
use crate::error::Error;
use crate::interface::DisplayInterface;
use crate::window::AddressWindow;

pub(crate) type DisplayResult<I> = core::result::Result<(), Error<I>>;

/// Power-on state of the controller
///
/// The sequence only moves forward, one state at a time:
/// `Unpowered -> Resetting -> SoftwareReset -> WakingUp -> ConfiguringFormat
/// -> ConfiguringOrientation -> On`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerState {
    /// Nothing sent yet, or the last power-on attempt failed
    #[default]
    Unpowered,
    /// Reset line pulsed
    Resetting,
    /// SWRESET sent and settled
    SoftwareReset,
    /// SLPOUT sent and settled
    WakingUp,
    /// Pixel format set to RGB565
    ConfiguringFormat,
    /// Orientation (MADCTL) set
    ConfiguringOrientation,
    /// Display on; pixel writes allowed
    On,
}

impl PowerState {
    /// The state after this one completes
    pub const fn next(self) -> Self {
        match self {
            Self::Unpowered => Self::Resetting,
            Self::Resetting => Self::SoftwareReset,
            Self::SoftwareReset => Self::WakingUp,
            Self::WakingUp => Self::ConfiguringFormat,
            Self::ConfiguringFormat => Self::ConfiguringOrientation,
            Self::ConfiguringOrientation | Self::On => Self::On,
        }
    }
}

/// Core display driver for the ST7789V
///
/// Owns the hardware interface for its whole lifetime. Frame streaming lives in
/// [`draw_frame`](Display::draw_frame) and [`fill`](Display::fill).
pub struct Display<I>
where
    I: DisplayInterface,
{
    /// Hardware interface
    interface: I,
    /// Display configuration
    config: Config,
    /// Power-on progress
    state: PowerState,
}

impl<I> Display<I>
where
    I: DisplayInterface,
{
    /// Wrap an interface
    ///
    /// Nothing is sent until [`init`](Display::init) is called.
    pub fn new(interface: I, config: Config) -> Self {
        debug!("creating new st7789v instance");
        Self {
            interface,
            config,
            state: PowerState::Unpowered,
        }
    }

    /// Run the full power-on sequence
    ///
    /// Always starts over from [`PowerState::Unpowered`], so calling it again
    /// re-initializes the panel. On error the state is left at `Unpowered`.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        debug!("powering up st7789v");
        self.state = PowerState::Unpowered;
        while self.state != PowerState::On {
            if let Err(e) = self.step(delay) {
                debug!("power-on failed in state {:?}", self.state);
                self.state = PowerState::Unpowered;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Perform the transition out of the current state
    fn step<D: DelayNs>(&mut self, delay: &mut D) -> DisplayResult<I> {
        let timing = self.config.timing;
        match self.state {
            PowerState::Unpowered => {
                self.interface
                    .reset(delay, timing.reset_low_ms, timing.reset_high_ms)
                    .map_err(Error::Interface)?;
            }
            PowerState::Resetting => {
                self.send_command(SWRESET)?;
                delay.delay_ms(timing.software_reset_ms);
            }
            PowerState::SoftwareReset => {
                self.send_command(SLPOUT)?;
                delay.delay_ms(timing.sleep_out_ms);
            }
            PowerState::WakingUp => {
                self.send_command(COLMOD)?;
                self.send_data(&[Config::PIXEL_FORMAT])?;
            }
            PowerState::ConfiguringFormat => {
                self.send_command(MADCTL)?;
                self.send_data(&[self.config.orientation.madctl()])?;
            }
            PowerState::ConfiguringOrientation => {
                self.send_command(DISPON)?;
                delay.delay_ms(timing.display_on_ms);
            }
            PowerState::On => return Ok(()),
        }

        let next = self.state.next();
        debug!("power state {:?} -> {:?}", self.state, next);
        self.state = next;
        Ok(())
    }

    /// Set the rectangle the next memory write fills
    ///
    /// Sends CASET then RASET, each with `[start_hi, start_lo, end_hi, end_lo]`.
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before [`init`](Display::init) has completed
    /// - `Error::InvalidWindow` if the window does not fit the panel in the
    ///   configured orientation
    pub fn set_window(&mut self, window: AddressWindow) -> DisplayResult<I> {
        self.ensure_on()?;
        if !window.fits(self.config.logical_dimensions()) {
            return Err(Error::InvalidWindow {
                col_start: window.col_start(),
                col_end: window.col_end(),
                row_start: window.row_start(),
                row_end: window.row_end(),
            });
        }
        trace!("address window {:?}", window);

        self.send_command(CASET)?;
        self.send_data(&window.column_payload())?;
        self.send_command(RASET)?;
        self.send_data(&window.row_payload())?;
        Ok(())
    }

    /// Send a raw command with its payload
    ///
    /// For panel-specific registers the driver does not manage itself (display
    /// inversion, porch and gamma settings). Only allowed once the display is
    /// on. Known opcodes must carry their fixed payload length.
    ///
    /// # Errors
    ///
    /// - `Error::NotInitialized` before [`init`](Display::init) has completed
    /// - `Error::UnsupportedCommand` for the commands the driver owns: the
    ///   power-on sequence (SWRESET, SLPOUT, COLMOD, MADCTL, DISPON) and
    ///   addressing (CASET, RASET, RAMWR)
    /// - `Error::PayloadLength` if a known opcode gets the wrong payload size
    pub fn write_command(&mut self, opcode: u8, payload: &[u8]) -> DisplayResult<I> {
        self.ensure_on()?;
        if is_managed(opcode) {
            return Err(Error::UnsupportedCommand { opcode });
        }
        if let Some(expected) = command::payload_len(opcode) {
            if payload.len() != expected {
                return Err(Error::PayloadLength {
                    opcode,
                    expected,
                    provided: payload.len(),
                });
            }
        }
        self.send_command(opcode)?;
        if !payload.is_empty() {
            self.send_data(payload)?;
        }
        Ok(())
    }

    /// Current power-on state
    pub fn state(&self) -> PowerState {
        self.state
    }

    /// Whether the power-on sequence has completed
    pub fn is_on(&self) -> bool {
        self.state == PowerState::On
    }

    /// Get native panel dimensions
    pub fn dimensions(&self) -> &Dimensions {
        &self.config.dimensions
    }

    /// Configuration the display was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Give the hardware interface back
    ///
    /// Consumes the display; drop or release the interface to free the bus.
    pub fn release(self) -> I {
        debug!("releasing st7789v interface");
        self.interface
    }

    #[cfg(test)]
    pub(crate) fn interface(&self) -> &I {
        &self.interface
    }

    pub(crate) fn ensure_on(&self) -> DisplayResult<I> {
        if self.state != PowerState::On {
            return Err(Error::NotInitialized { state: self.state });
        }
        Ok(())
    }

    /// Send one opcode, DC low
    pub(crate) fn send_command(&mut self, cmd: u8) -> DisplayResult<I> {
        self.interface.send_command(cmd).map_err(Error::Interface)
    }

    /// Send payload bytes, DC high
    pub(crate) fn send_data(&mut self, data: &[u8]) -> DisplayResult<I> {
        self.interface.send_data(data).map_err(Error::Interface)
    }
}

/// Opcodes only [`Display::init`], [`Display::set_window`] and the renderer
/// may send
const fn is_managed(opcode: u8) -> bool {
    matches!(
        opcode,
        SWRESET | SLPOUT | COLMOD | MADCTL | DISPON | CASET | RASET | RAMWR
    )
}
