//! Input Interpreter: decodes button snapshots into mode changes.
//!
//! ```text
//!  START ──▶ WAIT ──[power, fan off]──▶ POWER_ON ──────────┐
//!             ▲  ├──[power, fan on]───▶ POWER_OFF ─────────┤
//!             │  ├──[speed]───────────▶ SET_SPEED ─────────┤
//!             │  ├──[oscillate]───────▶ TOGGLE_OSC ────────┤
//!             │  └──[temperature]─────▶ TOGGLE_TEMP ───────┤
//!             │                                            ▼
//!             └───────────────[input idle]─────────────── PRESS ⟲ (held)
//! ```
//!
//! `PRESS` is the debounce: it holds until every button is released, so a
//! press fires exactly one action however long it is held.

use super::registers::{InputView, RawInput};
use super::{Effect, StateMachine, Step};
use crate::display::status_line::StatusField;

/// One decoded button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Power,
    Speed,
    Oscillate,
    TemperatureMode,
}

impl Button {
    /// Button codes in decode priority order.
    pub const PRIORITY: [(u8, Button); 4] = [
        (0x08, Button::Power),
        (0x04, Button::Speed),
        (0x02, Button::Oscillate),
        (0x01, Button::TemperatureMode),
    ];

    /// Decode a snapshot.  Only a single button matches; chords and the
    /// idle code decode to `None`.
    pub fn decode(raw: RawInput) -> Option<Self> {
        Self::PRIORITY
            .iter()
            .find(|(code, _)| raw.code() == *code)
            .map(|&(_, button)| button)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Start,
    Wait,
    PowerOff,
    PowerOn,
    SetSpeed,
    ToggleTemperature,
    ToggleOscillation,
    Press,
}

/// The Input Interpreter machine.  Stateless apart from its `InputState`.
#[derive(Debug, Default)]
pub struct InputInterpreter;

impl StateMachine for InputInterpreter {
    type State = InputState;
    type View<'a> = InputView<'a>;

    const NAME: &'static str = "input";
    const INITIAL: InputState = InputState::Start;

    fn step(&self, state: InputState, view: InputView<'_>) -> Step<InputState> {
        let InputView { raw, mode, speed } = view;

        let next = match state {
            InputState::Start => InputState::Wait,
            InputState::Wait => match Button::decode(raw) {
                Some(Button::Power) if mode.power => InputState::PowerOff,
                Some(Button::Power) => InputState::PowerOn,
                Some(Button::Speed) => InputState::SetSpeed,
                Some(Button::Oscillate) => InputState::ToggleOscillation,
                Some(Button::TemperatureMode) => InputState::ToggleTemperature,
                None => InputState::Wait,
            },
            InputState::PowerOff
            | InputState::PowerOn
            | InputState::SetSpeed
            | InputState::ToggleTemperature
            | InputState::ToggleOscillation => InputState::Press,
            InputState::Press if raw.is_idle() => InputState::Wait,
            InputState::Press => InputState::Press,
        };

        match next {
            InputState::PowerOff => {
                mode.power = false;
                Step::with(next, Effect::StatusText(StatusField::Power))
            }
            InputState::PowerOn => {
                mode.power = true;
                Step::with(next, Effect::StatusText(StatusField::Power))
            }
            // Speed is frozen while the temperature mode owns the fan.
            InputState::SetSpeed if !mode.temperature_mode => {
                speed.advance();
                Step::with(next, Effect::StatusText(StatusField::Speed))
            }
            InputState::ToggleTemperature => {
                mode.temperature_mode = !mode.temperature_mode;
                Step::with(next, Effect::StatusText(StatusField::TemperatureMode))
            }
            InputState::ToggleOscillation => {
                mode.oscillating = !mode.oscillating;
                Step::with(next, Effect::StatusText(StatusField::Oscillation))
            }
            _ => Step::to(next),
        }
    }
}
