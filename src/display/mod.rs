//! Display content: the status line on the character LCD and the two-frame
//! fan animation on the bitmap panel.
//!
//! Only layout lives here.  Glyphs and bitmap assets belong to whichever
//! [`TextDisplay`] / [`BitmapDisplay`] adapter is plugged in.

pub mod status_line;

use crate::app::ports::BitmapDisplay;

/// Top-left corner of the fan bitmap on the panel.
pub const BITMAP_CURSOR: (u8, u8) = (18, 0);

/// One frame of the blade animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanFrame {
    /// Blades upright (frame index 0).  Also the boot frame.
    Upright,
    /// Blades rotated 45° (frame index 1).
    Angled,
}

impl FanFrame {
    pub fn from_index(index: u8) -> Self {
        if index & 1 == 0 {
            Self::Upright
        } else {
            Self::Angled
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Self::Upright => 0,
            Self::Angled => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Upright => "upright",
            Self::Angled => "angled",
        }
    }
}

/// Replace the panel contents with `frame`.
pub fn draw_frame(display: &mut impl BitmapDisplay, frame: FanFrame) {
    let (x, y) = BITMAP_CURSOR;
    display.clear();
    display.set_cursor(x, y);
    display.write_bitmap(frame);
    display.render();
}
