//! Log-backed displays.
//!
//! [`LogDisplay`] mirrors both front-panel displays in memory and logs
//! what they would show: the 2×16 character LCD as one 32-cell line, and
//! the bitmap panel as the last rendered [`FanFrame`].  It stands in for
//! real LCD drivers, which live outside this crate.

use log::debug;

use crate::app::ports::{BitmapDisplay, TextDisplay};
use crate::display::FanFrame;

/// Character cells on the LCD (2 rows × 16 columns).
pub const LCD_CELLS: usize = 32;

pub struct LogDisplay {
    cells: [char; LCD_CELLS],
    /// 1-based position of the next write; 0 when parked.
    cursor: u8,
    /// Cells written since the cursor was last parked.
    dirty: bool,
    bitmap_cursor: (u8, u8),
    staged: Option<FanFrame>,
    shown: Option<FanFrame>,
    renders: u32,
}

impl Default for LogDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl LogDisplay {
    pub fn new() -> Self {
        Self {
            cells: [' '; LCD_CELLS],
            cursor: 0,
            dirty: false,
            bitmap_cursor: (0, 0),
            staged: None,
            shown: None,
            renders: 0,
        }
    }

    /// Current LCD contents, row 1 followed by row 2.
    pub fn text(&self) -> String {
        self.cells.iter().collect()
    }

    /// Frame on the panel after the last render.
    pub fn frame(&self) -> Option<FanFrame> {
        self.shown
    }

    pub fn renders(&self) -> u32 {
        self.renders
    }
}

impl TextDisplay for LogDisplay {
    fn set_cursor(&mut self, pos: u8) {
        if pos == 0 && self.dirty {
            debug!("lcd: \"{}\"", self.text().trim_end());
            self.dirty = false;
        }
        self.cursor = pos;
    }

    fn write_char(&mut self, c: char) {
        if self.cursor == 0 {
            return;
        }
        let cell = usize::from(self.cursor - 1);
        if let Some(slot) = self.cells.get_mut(cell) {
            *slot = c;
            self.dirty = true;
        }
        self.cursor = self.cursor.saturating_add(1);
    }
}

impl BitmapDisplay for LogDisplay {
    fn clear(&mut self) {
        self.staged = None;
    }

    fn set_cursor(&mut self, x: u8, y: u8) {
        self.bitmap_cursor = (x, y);
    }

    fn write_bitmap(&mut self, frame: FanFrame) {
        self.staged = Some(frame);
    }

    fn render(&mut self) {
        self.shown = self.staged;
        self.renders += 1;
        let (x, y) = self.bitmap_cursor;
        match self.shown {
            Some(frame) => debug!("panel: {} fan at ({}, {})", frame.name(), x, y),
            None => debug!("panel: blank"),
        }
    }
}
