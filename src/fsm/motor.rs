//! Motor Duty: software PWM on the DC motor enable line.
//!
//! While powered, a free-running counter walks `1..=duty+1`:
//!
//! ```text
//!  counter:  1 … min_off │ min_off+1 … duty │ duty+1
//!  enable :  low         │ high             │ low, counter = 0
//! ```
//!
//! The first `min_off` steps of every period are always low, so even the
//! lowest speed leaves the motor a guaranteed off window.

use super::registers::MotorView;
use super::{StateMachine, Step};
use crate::config::{FanConfig, SPEED_LEVELS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorState {
    Start,
    Off,
    On,
}

/// The Motor Duty machine and its duty profile.
#[derive(Debug, Clone)]
pub struct MotorDuty {
    duty_table: [u8; SPEED_LEVELS],
    min_off_steps: u8,
}

impl MotorDuty {
    pub fn new(duty_table: [u8; SPEED_LEVELS], min_off_steps: u8) -> Self {
        Self {
            duty_table,
            min_off_steps,
        }
    }

    pub fn from_config(config: &FanConfig) -> Self {
        Self::new(config.speed_duty_table, config.motor_min_off_steps)
    }

    /// Duty value for the given speed index.
    pub fn duty(&self, speed_index: u8) -> u8 {
        self.duty_table[speed_index as usize % SPEED_LEVELS]
    }
}

impl StateMachine for MotorDuty {
    type State = MotorState;
    type View<'a> = MotorView<'a>;

    const NAME: &'static str = "motor";
    const INITIAL: MotorState = MotorState::Start;

    fn step(&self, state: MotorState, view: MotorView<'_>) -> Step<MotorState> {
        let MotorView { mode, speed, drive } = view;

        let next = match state {
            MotorState::Start => MotorState::Off,
            MotorState::Off | MotorState::On if mode.power => MotorState::On,
            MotorState::Off | MotorState::On => MotorState::Off,
        };

        match next {
            MotorState::On => {
                drive.duty_counter += 1;
                let duty = u16::from(self.duty(speed.index()));
                if drive.duty_counter <= u16::from(self.min_off_steps) {
                    drive.enabled = false;
                } else if drive.duty_counter <= duty {
                    drive.enabled = true;
                } else {
                    drive.duty_counter = 0;
                    drive.enabled = false;
                }
            }
            MotorState::Off | MotorState::Start => drive.enabled = false,
        }

        Step::to(next)
    }
}
