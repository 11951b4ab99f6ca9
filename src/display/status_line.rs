//! Status line layout on the character LCD.
//!
//! ```text
//!  pos  1        9       17
//!       Pwr:Off Osc:Off Spd:1
//!           ▲       ▲       ▲
//!           5      13      21
//! ```
//!
//! Positions are 1-based; position 0 parks the cursor off-screen.  Every
//! field update rewrites its fixed-width slot and parks the cursor again.

use core::fmt::Write;

use heapless::String;

use crate::app::ports::TextDisplay;
use crate::fsm::registers::{ModeStatus, SpeedSelection};

/// Text written from position 1 at boot.
pub const INITIAL_TEXT: &str = "Pwr:Off Osc:Off Spd:1          ";
/// First position of the boot text.
pub const INITIAL_POS: u8 = 1;
/// Cursor parking position.
pub const PARK_POS: u8 = 0;

pub const POWER_POS: u8 = 5;
pub const OSCILLATION_POS: u8 = 13;
/// Shared by the speed digit and the temperature-mode marker.
pub const SPEED_POS: u8 = 21;

/// Widest slot on the line.
pub const SLOT_WIDTH: usize = 4;

/// A status-line slot that an input action asks to redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusField {
    Power,
    Oscillation,
    Speed,
    TemperatureMode,
}

impl StatusField {
    pub fn position(self) -> u8 {
        match self {
            Self::Power => POWER_POS,
            Self::Oscillation => OSCILLATION_POS,
            Self::Speed | Self::TemperatureMode => SPEED_POS,
        }
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag { "On " } else { "Off" }
}

/// Slot contents for `field` given the current registers.
pub fn field_text(
    field: StatusField,
    mode: ModeStatus,
    speed: SpeedSelection,
) -> String<SLOT_WIDTH> {
    let mut text = String::new();
    let fits = match field {
        StatusField::Power => text.push_str(on_off(mode.power)).is_ok(),
        StatusField::Oscillation => text.push_str(on_off(mode.oscillating)).is_ok(),
        StatusField::Speed | StatusField::TemperatureMode if mode.temperature_mode => {
            text.push_str("Temp").is_ok()
        }
        StatusField::Speed | StatusField::TemperatureMode => {
            write!(text, "{:<width$}", speed.level(), width = SLOT_WIDTH).is_ok()
        }
    };
    debug_assert!(fits, "{field:?} overflows its slot");
    text
}

/// Redraw one slot.
pub fn draw_field(
    display: &mut impl TextDisplay,
    field: StatusField,
    mode: ModeStatus,
    speed: SpeedSelection,
) {
    write_at(display, field.position(), &field_text(field, mode, speed));
}

/// Write the boot text.
pub fn draw_initial(display: &mut impl TextDisplay) {
    write_at(display, INITIAL_POS, INITIAL_TEXT);
}

fn write_at(display: &mut impl TextDisplay, pos: u8, text: &str) {
    display.set_cursor(pos);
    for c in text.chars() {
        display.write_char(c);
    }
    display.set_cursor(PARK_POS);
}
