//! Output latch: six push-pull lines driven from an [`OutputWord`].
//!
//! The word is rewritten every millisecond but rarely changes, so only
//! lines whose level differs from the last accepted word are touched.
//! After a failed write the cache is dropped and the next word is driven
//! in full.

use embedded_hal::digital::{OutputPin, PinState};

use crate::error::{Error, GpioError};
use crate::fsm::output::OutputWord;

/// Number of driven lines (bits 0–5 of the word).
pub const LINE_COUNT: usize = 6;

pub struct OutputLatch<P: OutputPin> {
    /// Indexed by word bit.
    pins: [P; LINE_COUNT],
    /// Last word fully applied to the pins.
    latched: Option<OutputWord>,
}

impl<P: OutputPin> OutputLatch<P> {
    /// `pins[n]` follows word bit `n`.
    pub fn new(pins: [P; LINE_COUNT]) -> Self {
        Self {
            pins,
            latched: None,
        }
    }

    pub fn write(&mut self, word: OutputWord) -> Result<(), Error> {
        let previous = self.latched.take();
        for (bit, pin) in (0u8..).zip(self.pins.iter_mut()) {
            let level = word.line(bit);
            if previous.is_some_and(|p| p.line(bit) == level) {
                continue;
            }
            pin.set_state(PinState::from(level))
                .map_err(|_| Error::from(GpioError::OutputWrite { bit }))?;
        }
        self.latched = Some(word);
        Ok(())
    }

    /// The word currently on the pins, if the last write succeeded.
    pub fn latched(&self) -> Option<OutputWord> {
        self.latched
    }
}
