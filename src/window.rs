//! Pixel address windows
//!
//! An [`AddressWindow`] is the rectangle the next RAMWR fills. The controller
//! auto-increments its write cursor across the window, column first, so the
//! window and the number of pixels streamed into it must agree exactly.

use crate::config::Dimensions;

/// Inclusive column and row ranges of a memory write
///
/// Invariant: `col_end >= col_start` and `row_end >= row_start`. Only the
/// checked constructors below build a window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddressWindow {
    col_start: u16,
    col_end: u16,
    row_start: u16,
    row_end: u16,
}

impl AddressWindow {
    /// Create a window from inclusive ranges
    ///
    /// Returns `None` if either range is inverted.
    pub const fn new(col_start: u16, col_end: u16, row_start: u16, row_end: u16) -> Option<Self> {
        if col_end < col_start || row_end < row_start {
            return None;
        }
        Some(Self {
            col_start,
            col_end,
            row_start,
            row_end,
        })
    }

    /// Window covering `(0, width - 1, 0, height - 1)`
    ///
    /// Returns `None` if either dimension is zero.
    pub const fn full_frame(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Self::new(0, width - 1, 0, height - 1)
    }

    /// First column
    pub const fn col_start(&self) -> u16 {
        self.col_start
    }

    /// Last column (inclusive)
    pub const fn col_end(&self) -> u16 {
        self.col_end
    }

    /// First row
    pub const fn row_start(&self) -> u16 {
        self.row_start
    }

    /// Last row (inclusive)
    pub const fn row_end(&self) -> u16 {
        self.row_end
    }

    /// Width in pixels
    pub const fn width(&self) -> u32 {
        (self.col_end - self.col_start) as u32 + 1
    }

    /// Height in pixels
    pub const fn height(&self) -> u32 {
        (self.row_end - self.row_start) as u32 + 1
    }

    /// Number of pixels a memory write into this window must carry
    ///
    /// `u64` because a full 65536x65536 range does not fit a 32-bit `usize`.
    pub const fn pixel_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether the window lies inside a panel of the given size
    pub const fn fits(&self, dims: Dimensions) -> bool {
        self.col_end < dims.width && self.row_end < dims.height
    }

    /// CASET payload: `[start_hi, start_lo, end_hi, end_lo]`
    pub const fn column_payload(&self) -> [u8; 4] {
        range_payload(self.col_start, self.col_end)
    }

    /// RASET payload: `[start_hi, start_lo, end_hi, end_lo]`
    pub const fn row_payload(&self) -> [u8; 4] {
        range_payload(self.row_start, self.row_end)
    }
}

const fn range_payload(start: u16, end: u16) -> [u8; 4] {
    let [start_hi, start_lo] = start.to_be_bytes();
    let [end_hi, end_lo] = end.to_be_bytes();
    [start_hi, start_lo, end_hi, end_lo]
}
