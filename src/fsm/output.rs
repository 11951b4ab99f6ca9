//! Output Composer: serializes the registers onto the output port.
//!
//! ```text
//!   bit   7  6 │ 5  4      │ 3     │ 2     │ 1    │ 0
//!         ─  ─ │ direction │ motor │ servo │ osc  │ power
//! ```
//!
//! The word is rebuilt from scratch every step, so the port always mirrors
//! the registers as they stand after the other four tasks have run.

use super::registers::OutputView;
use super::{Effect, StateMachine, Step};
use crate::config::MotorDirection;

/// Packed output port value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputWord(u8);

impl OutputWord {
    pub const POWER: u8 = 1 << 0;
    pub const OSCILLATING: u8 = 1 << 1;
    pub const SERVO_PULSE: u8 = 1 << 2;
    pub const MOTOR_ENABLE: u8 = 1 << 3;
    pub const DIRECTION_SHIFT: u8 = 4;
    pub const DIRECTION_MASK: u8 = 0b11 << Self::DIRECTION_SHIFT;

    /// Pack the indicator and drive bits.
    pub fn compose(
        power: bool,
        oscillating: bool,
        servo_pulse: bool,
        motor_enabled: bool,
        direction: MotorDirection,
    ) -> Self {
        let mut bits = direction.code() << Self::DIRECTION_SHIFT;
        for (set, bit) in [
            (power, Self::POWER),
            (oscillating, Self::OSCILLATING),
            (servo_pulse, Self::SERVO_PULSE),
            (motor_enabled, Self::MOTOR_ENABLE),
        ] {
            if set {
                bits |= bit;
            }
        }
        Self(bits)
    }

    pub fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Level of output line `line` (0 = LSB).
    pub fn line(self, line: u8) -> bool {
        self.0 & (1 << line) != 0
    }

    pub fn power(self) -> bool {
        self.0 & Self::POWER != 0
    }

    pub fn oscillating(self) -> bool {
        self.0 & Self::OSCILLATING != 0
    }

    pub fn servo_pulse(self) -> bool {
        self.0 & Self::SERVO_PULSE != 0
    }

    pub fn motor_enabled(self) -> bool {
        self.0 & Self::MOTOR_ENABLE != 0
    }

    pub fn direction_code(self) -> u8 {
        (self.0 & Self::DIRECTION_MASK) >> Self::DIRECTION_SHIFT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerState {
    Start,
    Output,
}

/// The Output Composer machine.
#[derive(Debug, Clone)]
pub struct OutputComposer {
    direction: MotorDirection,
}

impl OutputComposer {
    pub fn new(direction: MotorDirection) -> Self {
        Self { direction }
    }

    pub fn compose(&self, view: OutputView<'_>) -> OutputWord {
        OutputWord::compose(
            view.mode.power,
            view.mode.oscillating,
            view.servo.pulse_level,
            view.drive.enabled,
            self.direction,
        )
    }
}

impl StateMachine for OutputComposer {
    type State = ComposerState;
    type View<'a> = OutputView<'a>;

    const NAME: &'static str = "output";
    const INITIAL: ComposerState = ComposerState::Start;

    fn step(&self, _state: ComposerState, view: OutputView<'_>) -> Step<ComposerState> {
        Step::with(
            ComposerState::Output,
            Effect::WriteOutput(self.compose(view)),
        )
    }
}
