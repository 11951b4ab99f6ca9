//! Oscillator: sweeps the fan head with a synthesized servo pulse.
//!
//! Two clocks run inside one step and must stay independent:
//!
//! * the **phase clock** (`phase_elapsed`) counts the whole
//!   sweep/dwell cycle against absolute boundaries;
//! * the **pulse clock** (`pulse_counter`) wraps every `pulse_period`
//!   steps and shapes the servo pulse, but only while sweeping.
//!
//! ```text
//!  START ─▶ OFF ─[oscillating]─▶ SWEEP_LEFT ─[elapsed > left_end]─▶ DWELL
//!            ▲                      ▲                                 │
//!            │                      │                     [elapsed > dwell_end]
//!            │                  [return dwell]                        ▼
//!            │                    DWELL ◀──[elapsed > right_end]── SWEEP_RIGHT
//!            │                          (elapsed = 0)
//!            └──────── any state ──[!oscillating]
//! ```
//!
//! A dwell entered with `phase_elapsed <= 1` is the return dwell: it lasts
//! one step and hands back to the left sweep.

use super::registers::{ServoState, ServoView};
use super::{StateMachine, Step};
use crate::config::ServoTiming;

/// `phase_elapsed` at or below this marks the dwell after a right sweep.
const RETURN_DWELL_MAX_ELAPSED: u16 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OscillatorPhase {
    Start,
    Off,
    SweepLeft,
    Dwell,
    SweepRight,
}

impl OscillatorPhase {
    /// Phases that advance the phase clock.
    pub fn is_active(self) -> bool {
        matches!(self, Self::SweepLeft | Self::Dwell | Self::SweepRight)
    }
}

/// The Oscillator machine and its servo timing.
#[derive(Debug, Clone)]
pub struct Oscillator {
    timing: ServoTiming,
}

impl Oscillator {
    pub fn new(timing: ServoTiming) -> Self {
        Self { timing }
    }

    /// One pulse-clock step: high while within `width`, then wrap.
    fn pulse(&self, servo: &mut ServoState, width: u8) {
        servo.pulse_level = servo.pulse_counter <= width;
        servo.pulse_counter = (servo.pulse_counter + 1) % self.timing.pulse_period;
    }
}

impl StateMachine for Oscillator {
    type State = OscillatorPhase;
    type View<'a> = ServoView<'a>;

    const NAME: &'static str = "oscillator";
    const INITIAL: OscillatorPhase = OscillatorPhase::Start;

    fn step(&self, phase: OscillatorPhase, view: ServoView<'_>) -> Step<OscillatorPhase> {
        use OscillatorPhase::{Dwell, Off, Start, SweepLeft, SweepRight};

        let ServoView { mode, servo } = view;
        let t = &self.timing;
        let elapsed = servo.phase_elapsed;
        let mut cycle_complete = false;

        let next = match phase {
            Start => Off,
            _ if !mode.oscillating => Off,
            Off => SweepLeft,
            SweepLeft if elapsed > t.sweep_left_end => Dwell,
            SweepLeft => SweepLeft,
            Dwell if elapsed <= RETURN_DWELL_MAX_ELAPSED => SweepLeft,
            Dwell if elapsed > t.dwell_end => SweepRight,
            Dwell => Dwell,
            SweepRight if elapsed > t.sweep_right_end => {
                cycle_complete = true;
                Dwell
            }
            SweepRight => SweepRight,
        };

        if cycle_complete {
            servo.phase_elapsed = 0;
        } else if next.is_active() {
            servo.phase_elapsed = servo.phase_elapsed.saturating_add(1);
        }

        match next {
            SweepLeft => self.pulse(servo, t.left_pulse_width),
            SweepRight => self.pulse(servo, t.right_pulse_width),
            Start | Off | Dwell => servo.pulse_level = false,
        }

        Step::to(next)
    }
}
