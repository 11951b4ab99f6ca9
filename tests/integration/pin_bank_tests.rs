//! Integration tests for the HardwareAdapter over embedded-hal pins.
//!
//! The fake pins share their level with the test through `Rc<Cell<_>>`,
//! standing in for a finger on a button and a probe on an output line.

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::mock_hw::{MockDisplay, RecordingSink};

use oscifan::adapters::hardware::HardwareAdapter;
use oscifan::app::events::AppEvent;
use oscifan::app::ports::{InputPort, OutputPort};
use oscifan::app::service::FanController;
use oscifan::config::FanConfig;
use oscifan::drivers::buttons::{BUTTON_COUNT, ButtonBank};
use oscifan::drivers::output_latch::{LINE_COUNT, OutputLatch};
use oscifan::fsm::output::OutputWord;

#[derive(Clone, Default)]
struct Line(Rc<Cell<bool>>);

impl ErrorType for Line {
    type Error = Infallible;
}

impl InputPin for Line {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.get())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.get())
    }
}

impl OutputPin for Line {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.set(true);
        Ok(())
    }
}

struct Board {
    buttons: [Line; BUTTON_COUNT],
    outputs: [Line; LINE_COUNT],
    adapter: HardwareAdapter<Line, Line>,
}

impl Board {
    fn new() -> Self {
        let buttons: [Line; BUTTON_COUNT] = core::array::from_fn(|_| Line::default());
        for b in &buttons {
            b.0.set(true); // pulled up
        }
        let outputs: [Line; LINE_COUNT] = core::array::from_fn(|_| Line::default());
        let adapter = HardwareAdapter::new(
            ButtonBank::new(buttons.clone()),
            OutputLatch::new(outputs.clone()),
        );
        Self {
            buttons,
            outputs,
            adapter,
        }
    }

    fn output_levels(&self) -> [bool; LINE_COUNT] {
        core::array::from_fn(|i| self.outputs[i].0.get())
    }
}

#[test]
fn pressed_button_reads_low_through_the_adapter() {
    let mut board = Board::new();
    assert_eq!(board.adapter.read_levels(), Ok(0xFF));
    board.buttons[3].0.set(false);
    assert_eq!(board.adapter.read_levels(), Ok(0xF7));
}

#[test]
fn written_word_appears_on_the_lines() {
    let mut board = Board::new();
    board
        .adapter
        .write_word(OutputWord::from_bits(0b10_0011))
        .expect("infallible pins");
    assert_eq!(board.output_levels(), [true, true, false, false, false, true]);
    assert_eq!(board.adapter.latched(), Some(OutputWord::from_bits(0b10_0011)));
}

#[test]
fn power_button_lights_power_line() {
    let mut board = Board::new();
    let mut app = FanController::new(FanConfig::default()).expect("valid config");
    let mut display = MockDisplay::new();
    let mut sink = RecordingSink::new();
    app.start(&mut display, &mut sink);

    // Power button is input bit 3.
    board.buttons[3].0.set(false);
    for _ in 0..20 {
        app.tick(&mut board.adapter, &mut display, &mut sink);
    }
    board.buttons[3].0.set(true);

    assert!(sink.events.contains(&AppEvent::PowerChanged(true)));
    let levels = board.output_levels();
    assert!(levels[0], "power indicator");
    assert!(!levels[1], "oscillation indicator");
    // Reverse: line 5 high, line 4 low.
    assert!(!levels[4] && levels[5]);
}
