//! Fuzz target: arbitrary front-panel button sequences
//!
//! Each input byte is a raw pin-level snapshot held for a few ticks.
//! Drives the full controller and verifies after every tick:
//! - No panics under arbitrary button chords or glitches
//! - Speed level stays in 1–4
//! - Servo pulse counter stays inside its 20-step frame
//! - Motor enable and its output line are low whenever power is off
//!
//! cargo fuzz run fuzz_button_sequence

#![no_main]

use libfuzzer_sys::fuzz_target;
use oscifan::app::events::AppEvent;
use oscifan::app::ports::{BitmapDisplay, EventSink, InputPort, OutputPort, TextDisplay};
use oscifan::app::service::FanController;
use oscifan::config::FanConfig;
use oscifan::display::FanFrame;
use oscifan::fsm::output::OutputWord;
use oscifan::Error;

// ── In-memory ports for fuzz testing ──────────────────────────

struct Panel {
    levels: u8,
    word: Option<OutputWord>,
}

impl InputPort for Panel {
    fn read_levels(&mut self) -> Result<u8, Error> {
        Ok(self.levels)
    }
}

impl OutputPort for Panel {
    fn write_word(&mut self, word: OutputWord) -> Result<(), Error> {
        self.word = Some(word);
        Ok(())
    }
}

struct NullDisplay;

impl TextDisplay for NullDisplay {
    fn set_cursor(&mut self, _pos: u8) {}
    fn write_char(&mut self, _c: char) {}
}

impl BitmapDisplay for NullDisplay {
    fn clear(&mut self) {}
    fn set_cursor(&mut self, _x: u8, _y: u8) {}
    fn write_bitmap(&mut self, _frame: FanFrame) {}
    fn render(&mut self) {}
}

struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(mut app) = FanController::new(FanConfig::default()) else {
        return;
    };
    let mut panel = Panel {
        levels: 0xFF,
        word: None,
    };
    let mut display = NullDisplay;
    let mut sink = NullSink;
    app.start(&mut display, &mut sink);

    // First byte of each pair is the snapshot, second is how long it is held.
    for pair in data.chunks(2) {
        panel.levels = pair[0];
        let hold = pair.get(1).map_or(10, |&b| usize::from(b % 64) + 1);

        for _ in 0..hold {
            app.tick(&mut panel, &mut display, &mut sink);

            let regs = app.registers();
            assert!((1..=4).contains(&regs.speed().level()));
            assert!(regs.servo().pulse_counter < 20);
            if !regs.mode().power {
                assert!(!regs.motor().enabled, "motor enabled while off");
                if let Some(word) = panel.word {
                    assert!(!word.motor_enabled(), "motor line high while off");
                }
            }
        }
    }
});
