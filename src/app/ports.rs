//! Port traits: the hexagonal boundary between the controller and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ FanController (domain)
//! ```
//!
//! Drivers and adapters implement these traits.  The
//! [`FanController`](super::service::FanController) consumes them via
//! generics, so the FSM core never touches hardware directly and runs
//! unchanged against the mocks in the integration tests.

use crate::display::FanFrame;
use crate::error::Error;
use crate::fsm::output::OutputWord;

// ───────────────────────────────────────────────────────────────
// Tick source (driven adapter: timer → main loop)
// ───────────────────────────────────────────────────────────────

/// Recurring "one unit of time elapsed" signal.
///
/// Ticks raised while the consumer is still busy coalesce: `wait()`
/// returns once for any number of ticks signalled since the last return.
pub trait TickSource {
    /// Set the tick period.  Takes effect on the next [`start`](Self::start).
    fn configure(&mut self, period_ms: u32);

    /// Begin ticking.
    fn start(&mut self) -> Result<(), Error>;

    /// Block until the next tick.
    fn wait(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Input port (driven adapter: buttons → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port for the button bank.
pub trait InputPort {
    /// Raw port levels, active-low: a pressed button reads 0.
    /// Bit 3 power, bit 2 speed, bit 1 oscillate, bit 0 temperature mode.
    fn read_levels(&mut self) -> Result<u8, Error>;
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → indicator / drive lines)
// ───────────────────────────────────────────────────────────────

/// Write-side port for the packed output word.
pub trait OutputPort {
    fn write_word(&mut self, word: OutputWord) -> Result<(), Error>;
}

// ───────────────────────────────────────────────────────────────
// Displays
// ───────────────────────────────────────────────────────────────

/// Character LCD.  Positions are 1-based; 0 parks the cursor.
pub trait TextDisplay {
    fn set_cursor(&mut self, pos: u8);
    fn write_char(&mut self, c: char);
}

/// Monochrome bitmap panel holding the fan animation.
pub trait BitmapDisplay {
    fn clear(&mut self);
    fn set_cursor(&mut self, x: u8, y: u8);
    fn write_bitmap(&mut self, frame: FanFrame);
    /// Push the frame buffer to the panel.
    fn render(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The controller emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
