//! Hardware adapter: bridges the pin banks to the domain port traits.
//!
//! Owns the [`ButtonBank`] and the [`OutputLatch`], exposing them through
//! [`InputPort`] and [`OutputPort`].  Generic over the pin types, so the
//! same adapter runs on `esp-idf-hal` pin drivers and on host test pins.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::app::ports::{InputPort, OutputPort};
use crate::drivers::buttons::ButtonBank;
use crate::drivers::output_latch::OutputLatch;
use crate::error::Error;
use crate::fsm::output::OutputWord;

/// Concrete adapter that combines both pin banks behind port traits.
pub struct HardwareAdapter<I: InputPin, O: OutputPin> {
    buttons: ButtonBank<I>,
    latch: OutputLatch<O>,
}

impl<I: InputPin, O: OutputPin> HardwareAdapter<I, O> {
    pub fn new(buttons: ButtonBank<I>, latch: OutputLatch<O>) -> Self {
        Self { buttons, latch }
    }

    /// Word currently driven on the latch, if the last write succeeded.
    pub fn latched(&self) -> Option<OutputWord> {
        self.latch.latched()
    }
}

// ── InputPort implementation ──────────────────────────────────

impl<I: InputPin, O: OutputPin> InputPort for HardwareAdapter<I, O> {
    fn read_levels(&mut self) -> Result<u8, Error> {
        self.buttons.read_levels()
    }
}

// ── OutputPort implementation ─────────────────────────────────

impl<I: InputPin, O: OutputPin> OutputPort for HardwareAdapter<I, O> {
    fn write_word(&mut self, word: OutputWord) -> Result<(), Error> {
        self.latch.write(word)
    }
}
