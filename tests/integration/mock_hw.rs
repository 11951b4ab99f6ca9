//! Mock hardware for integration tests.
//!
//! Records every output word, display call and event so tests can assert
//! on the full history without touching real GPIO.

use oscifan::app::events::AppEvent;
use oscifan::app::ports::{BitmapDisplay, EventSink, InputPort, OutputPort, TextDisplay};
use oscifan::display::FanFrame;
use oscifan::error::{Error, GpioError};
use oscifan::fsm::output::OutputWord;

// ── Button codes (pressed = bit set) ──────────────────────────

pub const POWER: u8 = 0x08;
pub const SPEED: u8 = 0x04;
pub const OSCILLATE: u8 = 0x02;
pub const TEMPERATURE: u8 = 0x01;

// ── MockHardware ──────────────────────────────────────────────

pub struct MockHardware {
    /// Active-low pin levels as the bank would report them.
    levels: u8,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub reads: u32,
    /// Every word the port accepted, in order.
    pub writes: Vec<OutputWord>,
}

#[allow(dead_code)]
impl MockHardware {
    pub fn new() -> Self {
        Self {
            levels: 0xFF,
            fail_reads: false,
            fail_writes: false,
            reads: 0,
            writes: Vec::new(),
        }
    }

    /// Hold down the buttons in `code` and release all others.
    pub fn hold(&mut self, code: u8) {
        self.levels = !code;
    }

    pub fn release(&mut self) {
        self.levels = 0xFF;
    }

    pub fn last_word(&self) -> Option<OutputWord> {
        self.writes.last().copied()
    }
}

impl Default for MockHardware {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPort for MockHardware {
    fn read_levels(&mut self) -> Result<u8, Error> {
        self.reads += 1;
        if self.fail_reads {
            return Err(GpioError::InputRead { bit: 0 }.into());
        }
        Ok(self.levels)
    }
}

impl OutputPort for MockHardware {
    fn write_word(&mut self, word: OutputWord) -> Result<(), Error> {
        if self.fail_writes {
            return Err(GpioError::OutputWrite { bit: 3 }.into());
        }
        self.writes.push(word);
        Ok(())
    }
}

// ── MockDisplay ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCall {
    TextCursor(u8),
    Char(char),
    Clear,
    BitmapCursor(u8, u8),
    Bitmap(FanFrame),
    Render,
}

/// Both displays in one, with a 32-cell LCD mirror.
pub struct MockDisplay {
    pub calls: Vec<DisplayCall>,
    cells: [char; 32],
    cursor: u8,
}

#[allow(dead_code)]
impl MockDisplay {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            cells: [' '; 32],
            cursor: 0,
        }
    }

    pub fn text(&self) -> String {
        self.cells.iter().collect()
    }

    /// `len` characters starting at 1-based `pos`.
    pub fn slot(&self, pos: u8, len: usize) -> String {
        let start = usize::from(pos) - 1;
        self.cells[start..start + len].iter().collect()
    }

    /// Frames written to the panel, in order.
    pub fn frames(&self) -> Vec<FanFrame> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DisplayCall::Bitmap(f) => Some(*f),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TextDisplay for MockDisplay {
    fn set_cursor(&mut self, pos: u8) {
        self.calls.push(DisplayCall::TextCursor(pos));
        self.cursor = pos;
    }

    fn write_char(&mut self, c: char) {
        self.calls.push(DisplayCall::Char(c));
        if self.cursor > 0 {
            if let Some(cell) = self.cells.get_mut(usize::from(self.cursor) - 1) {
                *cell = c;
            }
            self.cursor += 1;
        }
    }
}

impl BitmapDisplay for MockDisplay {
    fn clear(&mut self) {
        self.calls.push(DisplayCall::Clear);
    }

    fn set_cursor(&mut self, x: u8, y: u8) {
        self.calls.push(DisplayCall::BitmapCursor(x, y));
    }

    fn write_bitmap(&mut self, frame: FanFrame) {
        self.calls.push(DisplayCall::Bitmap(frame));
    }

    fn render(&mut self) {
        self.calls.push(DisplayCall::Render);
    }
}

// ── RecordingSink ─────────────────────────────────────────────

pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
