//! System configuration parameters
//!
//! All tunable parameters for the OsciFan controller.  Task periods are in
//! scheduler ticks; servo phase boundaries are in oscillator steps.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of selectable fan speeds.
pub const SPEED_LEVELS: usize = 4;

/// Motor direction code driven on output bits 4–5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotorDirection {
    Forward,
    Reverse,
}

impl MotorDirection {
    /// Two-bit code as wired to the H-bridge inputs.
    pub const fn code(self) -> u8 {
        match self {
            Self::Forward => 0b01,
            Self::Reverse => 0b10,
        }
    }
}

/// Per-task scheduling periods, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPeriods {
    pub input: u32,
    pub motor: u32,
    pub oscillator: u32,
    pub animation: u32,
    pub output: u32,
}

impl Default for TaskPeriods {
    fn default() -> Self {
        Self {
            input: 10,     // button sampling / debounce cadence
            motor: 1,
            oscillator: 1,
            animation: 250, // ~4 fps blade animation
            output: 1,
        }
    }
}

/// Servo pulse shape and sweep/dwell phase boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServoTiming {
    /// Steps per servo pulse frame.
    pub pulse_period: u8,
    /// Pulse high while `pulse_counter <= width` during a left sweep.
    pub left_pulse_width: u8,
    /// Pulse high while `pulse_counter <= width` during a right sweep.
    pub right_pulse_width: u8,
    /// Left sweep ends once `phase_elapsed` exceeds this.
    pub sweep_left_end: u16,
    /// Outbound dwell ends once `phase_elapsed` exceeds this.
    pub dwell_end: u16,
    /// Right sweep ends once `phase_elapsed` exceeds this.
    pub sweep_right_end: u16,
}

impl Default for ServoTiming {
    fn default() -> Self {
        Self {
            pulse_period: 20,
            left_pulse_width: 1,
            right_pulse_width: 2,
            sweep_left_end: 100,
            dwell_end: 1000,
            sweep_right_end: 1100,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanConfig {
    // --- Timing ---
    /// Scheduler tick period (milliseconds)
    pub tick_period_ms: u32,
    /// Telemetry report interval (ticks)
    pub telemetry_interval_ticks: u32,
    /// Task periods (ticks)
    pub periods: TaskPeriods,

    // --- Motor ---
    /// Software-PWM duty value per speed level, strictly increasing
    pub speed_duty_table: [u8; SPEED_LEVELS],
    /// Counter values at or below this keep the motor off every PWM period
    pub motor_min_off_steps: u8,
    /// Fixed H-bridge direction
    pub motor_direction: MotorDirection,

    // --- Oscillator ---
    pub servo: ServoTiming,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            // Timing
            tick_period_ms: 1,
            telemetry_interval_ticks: 1000, // 1/s
            periods: TaskPeriods::default(),

            // Motor
            speed_duty_table: [11, 20, 40, 100],
            motor_min_off_steps: 10,
            motor_direction: MotorDirection::Reverse,

            // Oscillator
            servo: ServoTiming::default(),
        }
    }
}

impl FanConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|_| ConfigError::Malformed)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the FSMs cannot run with.  Nothing is clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg| Err(ConfigError::ValidationFailed(msg));

        if self.tick_period_ms == 0 {
            return fail("tick_period_ms must be > 0");
        }
        let p = &self.periods;
        if p.input == 0 || p.motor == 0 || p.oscillator == 0 || p.animation == 0 || p.output == 0 {
            return fail("task periods must be > 0");
        }

        if !self.speed_duty_table.windows(2).all(|w| w[0] < w[1]) {
            return fail("speed_duty_table must be strictly increasing");
        }
        if self.motor_min_off_steps >= self.speed_duty_table[0] {
            return fail("motor_min_off_steps must be below the lowest duty value");
        }
        if self.speed_duty_table[SPEED_LEVELS - 1] == u8::MAX {
            return fail("duty values must leave room for the counter wrap");
        }

        let s = &self.servo;
        if s.pulse_period == 0 {
            return fail("servo.pulse_period must be > 0");
        }
        if s.left_pulse_width >= s.pulse_period || s.right_pulse_width >= s.pulse_period {
            return fail("servo pulse widths must be below pulse_period");
        }
        // phase_elapsed <= 1 marks the return dwell, so the first sweep must
        // run past it.
        if s.sweep_left_end <= 1 {
            return fail("servo.sweep_left_end must be > 1");
        }
        if !(s.sweep_left_end < s.dwell_end && s.dwell_end < s.sweep_right_end) {
            return fail("servo phase ends must be strictly increasing");
        }
        if s.sweep_right_end == u16::MAX {
            return fail("servo.sweep_right_end must leave room for the phase counter");
        }

        Ok(())
    }
}
