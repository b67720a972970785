//! Display configuration types and builder

use crate::command;
pub use crate::error::{BuilderError, MAX_COLUMNS, MAX_ROWS};

/// Minimum time RST is held low during hardware reset
pub const MIN_RESET_LOW_MS: u32 = 100;
/// Minimum settle time after RST is released
pub const MIN_RESET_HIGH_MS: u32 = 100;
/// Minimum wait after software reset (SWRESET)
pub const MIN_SOFTWARE_RESET_MS: u32 = 150;
/// Minimum wait after sleep out (SLPOUT), the longest settle of the sequence
pub const MIN_SLEEP_OUT_MS: u32 = 255;
/// Minimum wait after display on (DISPON) before the first pixel write
pub const MIN_DISPLAY_ON_MS: u32 = 100;

/// Display dimensions in the panel's native (unrotated) orientation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dimensions {
    /// Number of columns (width in pixels)
    pub width: u16,
    /// Number of rows (height in pixels)
    pub height: u16,
}

impl Dimensions {
    /// Create new dimensions with validation
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::InvalidDimensions` if:
    /// - width is 0 or greater than MAX_COLUMNS
    /// - height is 0 or greater than MAX_ROWS
    pub fn new(width: u16, height: u16) -> Result<Self, BuilderError> {
        if width == 0 || width > MAX_COLUMNS || height == 0 || height > MAX_ROWS {
            return Err(BuilderError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    /// Number of pixels covered by these dimensions
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Number of bytes in one full RGB565 frame
    pub fn frame_bytes(&self) -> usize {
        self.pixel_count() * 2
    }
}

/// Panel orientation, sent as the MADCTL payload byte
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    /// Native orientation, no rotation or mirroring
    #[default]
    Rotate0,
    /// Rotate 90 degrees clockwise (MX | MV)
    Rotate90,
    /// Rotate 180 degrees (MY | MX)
    Rotate180,
    /// Rotate 270 degrees clockwise (MY | MV)
    Rotate270,
    /// Raw MADCTL byte for panel variants (BGR order, mirrored modules)
    Raw(u8),
}

impl Orientation {
    /// MADCTL payload byte for this orientation
    pub const fn madctl(self) -> u8 {
        match self {
            Self::Rotate0 => 0x00,
            Self::Rotate90 => 0x60,
            Self::Rotate180 => 0xC0,
            Self::Rotate270 => 0xA0,
            Self::Raw(value) => value,
        }
    }

    /// Whether rows and columns are exchanged (MV bit set)
    pub const fn swaps_axes(self) -> bool {
        self.madctl() & 0x20 != 0
    }
}

/// Settle delays for the power-on sequence, in milliseconds
///
/// These are minimums: waiting longer is always safe, waiting less risks
/// garbage on screen. [`Builder::build`] rejects values below the `MIN_*`
/// constants of this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    /// RST held low
    pub reset_low_ms: u32,
    /// Wait after RST is released
    pub reset_high_ms: u32,
    /// Wait after SWRESET
    pub software_reset_ms: u32,
    /// Wait after SLPOUT
    pub sleep_out_ms: u32,
    /// Wait after DISPON
    pub display_on_ms: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            reset_low_ms: MIN_RESET_LOW_MS,
            reset_high_ms: MIN_RESET_HIGH_MS,
            software_reset_ms: MIN_SOFTWARE_RESET_MS,
            sleep_out_ms: MIN_SLEEP_OUT_MS,
            display_on_ms: MIN_DISPLAY_ON_MS,
        }
    }
}

impl Timing {
    fn validate(&self) -> Result<(), BuilderError> {
        let checks = [
            ("reset_low_ms", self.reset_low_ms, MIN_RESET_LOW_MS),
            ("reset_high_ms", self.reset_high_ms, MIN_RESET_HIGH_MS),
            ("software_reset_ms", self.software_reset_ms, MIN_SOFTWARE_RESET_MS),
            ("sleep_out_ms", self.sleep_out_ms, MIN_SLEEP_OUT_MS),
            ("display_on_ms", self.display_on_ms, MIN_DISPLAY_ON_MS),
        ];
        for (name, value, minimum) in checks {
            if value < minimum {
                return Err(BuilderError::TimingBelowMinimum {
                    name,
                    value,
                    minimum,
                });
            }
        }
        Ok(())
    }
}

/// Display configuration
///
/// Fixed for the lifetime of a [`Display`](crate::Display). Use `Builder` to
/// create a Config.
#[derive(Clone, Debug)]
pub struct Config {
    /// Native panel dimensions
    pub dimensions: Dimensions,
    /// Panel orientation (MADCTL)
    pub orientation: Orientation,
    /// Power-on settle delays
    pub timing: Timing,
}

impl Config {
    /// COLMOD payload; the driver only speaks RGB565
    pub const PIXEL_FORMAT: u8 = command::COLMOD_RGB565;

    /// Dimensions as seen through the configured orientation
    ///
    /// Width and height swap when the orientation exchanges rows and columns.
    pub fn logical_dimensions(&self) -> Dimensions {
        if self.orientation.swaps_axes() {
            Dimensions {
                width: self.dimensions.height,
                height: self.dimensions.width,
            }
        } else {
            self.dimensions
        }
    }
}

/// Builder for constructing display configuration
///
/// # Example
///
/// ```rust,no_run
/// use st7789v::{Builder, Dimensions, Orientation};
///
/// let dims = match Dimensions::new(240, 320) {
///     Ok(dims) => dims,
///     Err(_) => return,
/// };
/// let config = match Builder::new().dimensions(dims).orientation(Orientation::Rotate90).build() {
///     Ok(config) => config,
///     Err(_) => return,
/// };
/// assert_eq!(config.logical_dimensions().width, 320);
/// ```
#[must_use]
#[derive(Default)]
pub struct Builder {
    /// Display dimensions (required)
    dimensions: Option<Dimensions>,
    /// Panel orientation
    orientation: Orientation,
    /// Power-on settle delays
    timing: Timing,
}

impl Builder {
    /// Create a new Builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set display dimensions (required)
    pub fn dimensions(mut self, dims: Dimensions) -> Self {
        self.dimensions = Some(dims);
        self
    }

    /// Set panel orientation
    pub fn orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set power-on settle delays
    pub fn timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    /// Build the configuration
    ///
    /// # Errors
    ///
    /// Returns `BuilderError::MissingDimensions` if dimensions were not set,
    /// or `BuilderError::TimingBelowMinimum` if any delay is shorter than the
    /// panel tolerates.
    pub fn build(self) -> Result<Config, BuilderError> {
        self.timing.validate()?;
        Ok(Config {
            dimensions: self.dimensions.ok_or(BuilderError::MissingDimensions)?,
            orientation: self.orientation,
            timing: self.timing,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_bounds() {
        assert!(Dimensions::new(240, 320).is_ok());
        assert!(Dimensions::new(1, 1).is_ok());
        assert!(matches!(
            Dimensions::new(0, 10),
            Err(BuilderError::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(Dimensions::new(241, 320).is_err());
        assert!(Dimensions::new(240, 321).is_err());
    }

    #[test]
    fn test_frame_bytes() {
        let dims = Dimensions::new(2, 3).unwrap();
        assert_eq!(dims.pixel_count(), 6);
        assert_eq!(dims.frame_bytes(), 12);
    }

    #[test]
    fn test_orientation_madctl() {
        assert_eq!(Orientation::default().madctl(), 0x00);
        assert_eq!(Orientation::Rotate90.madctl(), 0x60);
        assert_eq!(Orientation::Rotate180.madctl(), 0xC0);
        assert_eq!(Orientation::Rotate270.madctl(), 0xA0);
        assert_eq!(Orientation::Raw(0x08).madctl(), 0x08);
        assert!(Orientation::Rotate90.swaps_axes());
        assert!(!Orientation::Rotate180.swaps_axes());
    }

    #[test]
    fn test_build_requires_dimensions() {
        assert!(matches!(
            Builder::new().build(),
            Err(BuilderError::MissingDimensions)
        ));
    }

    #[test]
    fn test_default_timing_is_minimum() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 240).unwrap())
            .build()
            .unwrap();
        assert_eq!(config.timing.sleep_out_ms, 255);
        assert_eq!(config.timing.software_reset_ms, 150);
        assert_eq!(Config::PIXEL_FORMAT, 0x55);
    }

    #[test]
    fn test_timing_below_minimum_rejected() {
        let timing = Timing {
            sleep_out_ms: 120,
            ..Timing::default()
        };
        let result = Builder::new()
            .dimensions(Dimensions::new(240, 240).unwrap())
            .timing(timing)
            .build();
        assert!(matches!(
            result,
            Err(BuilderError::TimingBelowMinimum {
                name: "sleep_out_ms",
                value: 120,
                minimum: 255
            })
        ));
    }

    #[test]
    fn test_longer_timing_accepted() {
        let timing = Timing {
            display_on_ms: 500,
            ..Timing::default()
        };
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 240).unwrap())
            .timing(timing)
            .build()
            .unwrap();
        assert_eq!(config.timing.display_on_ms, 500);
    }

    #[test]
    fn test_logical_dimensions_swap() {
        let config = Builder::new()
            .dimensions(Dimensions::new(240, 320).unwrap())
            .orientation(Orientation::Rotate270)
            .build()
            .unwrap();
        assert_eq!(
            config.logical_dimensions(),
            Dimensions {
                width: 320,
                height: 240
            }
        );
    }
}
