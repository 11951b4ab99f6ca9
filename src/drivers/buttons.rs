//! Front-panel button bank.
//!
//! Four momentary switches to ground with pull-ups, so a pressed button
//! reads low.  The bank packs the raw pin levels into one byte without
//! inverting them; decoding to a press code happens in
//! [`RawInput::from_levels`](crate::fsm::registers::RawInput::from_levels).
//!
//! | Bit | Button           |
//! |-----|------------------|
//! | 3   | Power            |
//! | 2   | Speed            |
//! | 1   | Oscillate        |
//! | 0   | Temperature mode |

use embedded_hal::digital::InputPin;

use crate::error::{Error, GpioError};

/// Number of buttons on the panel.
pub const BUTTON_COUNT: usize = 4;

/// Level of the unused upper bits: released.
const UNUSED_BITS: u8 = 0xF0;

pub struct ButtonBank<P: InputPin> {
    /// Indexed by input bit.
    pins: [P; BUTTON_COUNT],
}

impl<P: InputPin> ButtonBank<P> {
    /// `pins[n]` drives input bit `n`.
    pub fn new(pins: [P; BUTTON_COUNT]) -> Self {
        Self { pins }
    }

    /// Sample every pin.  Fails on the first pin that cannot be read.
    pub fn read_levels(&mut self) -> Result<u8, Error> {
        let mut levels = UNUSED_BITS;
        for (bit, pin) in (0u8..).zip(self.pins.iter_mut()) {
            let high = pin
                .is_high()
                .map_err(|_| Error::from(GpioError::InputRead { bit }))?;
            if high {
                levels |= 1 << bit;
            }
        }
        Ok(levels)
    }
}
