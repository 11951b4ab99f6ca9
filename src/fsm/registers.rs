//! Shared status registers and the per-task views onto them.
//!
//! `StatusRegisters` is the single blackboard every FSM reads from.  Each
//! field group has exactly one writer; the views below encode that by
//! handing out `&mut` only to the owning task:
//!
//! | Group            | Writer            | Readers                       |
//! |------------------|-------------------|-------------------------------|
//! | `ModeStatus`     | Input Interpreter | Motor, Oscillator, Animation, Output |
//! | `SpeedSelection` | Input Interpreter | Motor                          |
//! | `MotorDrive`     | Motor Duty        | Output                         |
//! | `ServoState`     | Oscillator        | Output                         |
//! | `DisplayFrame`   | Display Animation | none                           |

use crate::config::SPEED_LEVELS;

// ---------------------------------------------------------------------------
// Field groups
// ---------------------------------------------------------------------------

/// User-selected modes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModeStatus {
    pub power: bool,
    pub oscillating: bool,
    pub temperature_mode: bool,
}

/// Selected speed level, an index into the duty table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpeedSelection {
    index: u8,
}

impl SpeedSelection {
    pub fn new(index: u8) -> Self {
        Self {
            index: index % SPEED_LEVELS as u8,
        }
    }

    /// Zero-based index into the duty table.
    pub fn index(self) -> u8 {
        self.index
    }

    /// One-based level as shown on the status line.
    pub fn level(self) -> u8 {
        self.index + 1
    }

    /// Move to the next speed, wrapping after the last.
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % SPEED_LEVELS as u8;
    }
}

/// Software-PWM state for the DC motor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorDrive {
    pub duty_counter: u16,
    pub enabled: bool,
}

/// Oscillator phase counters and the synthesized servo pulse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServoState {
    /// Steps counted across the sweep/dwell cycle.
    pub phase_elapsed: u16,
    /// Position within the current servo pulse frame.
    pub pulse_counter: u8,
    pub pulse_level: bool,
}

/// Which animation frame is on the bitmap display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DisplayFrame {
    pub index: u8,
}

// ---------------------------------------------------------------------------
// RawInput
// ---------------------------------------------------------------------------

/// Decoded button snapshot: bit set = button pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawInput(u8);

impl RawInput {
    /// Mask of the bits the input interpreter consumes.
    pub const MASK: u8 = 0x0F;
    /// No button pressed.
    pub const IDLE: RawInput = RawInput(0);

    /// From active-low port levels (a pressed button reads low).
    pub fn from_levels(levels: u8) -> Self {
        Self(!levels & Self::MASK)
    }

    /// From an already-inverted code; bits above the mask are dropped.
    pub fn from_code(code: u8) -> Self {
        Self(code & Self::MASK)
    }

    pub fn code(self) -> u8 {
        self.0
    }

    pub fn is_idle(self) -> bool {
        self.0 == 0
    }
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// Input Interpreter: owns modes and speed.
pub struct InputView<'a> {
    pub raw: RawInput,
    pub mode: &'a mut ModeStatus,
    pub speed: &'a mut SpeedSelection,
}

/// Motor Duty: owns the motor drive.
pub struct MotorView<'a> {
    pub mode: &'a ModeStatus,
    pub speed: &'a SpeedSelection,
    pub drive: &'a mut MotorDrive,
}

/// Oscillator: owns the servo state.
pub struct ServoView<'a> {
    pub mode: &'a ModeStatus,
    pub servo: &'a mut ServoState,
}

/// Display Animation: owns the frame index.
pub struct AnimationView<'a> {
    pub mode: &'a ModeStatus,
    pub frame: &'a mut DisplayFrame,
}

/// Output Composer: reads everything, owns nothing.
#[derive(Clone, Copy)]
pub struct OutputView<'a> {
    pub mode: &'a ModeStatus,
    pub drive: &'a MotorDrive,
    pub servo: &'a ServoState,
}

// ---------------------------------------------------------------------------
// StatusRegisters
// ---------------------------------------------------------------------------

/// All shared mutable state.  Lives for the lifetime of the controller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusRegisters {
    mode: ModeStatus,
    speed: SpeedSelection,
    motor: MotorDrive,
    servo: ServoState,
    frame: DisplayFrame,
}

impl StatusRegisters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input_view(&mut self, raw: RawInput) -> InputView<'_> {
        InputView {
            raw,
            mode: &mut self.mode,
            speed: &mut self.speed,
        }
    }

    pub fn motor_view(&mut self) -> MotorView<'_> {
        MotorView {
            mode: &self.mode,
            speed: &self.speed,
            drive: &mut self.motor,
        }
    }

    pub fn servo_view(&mut self) -> ServoView<'_> {
        ServoView {
            mode: &self.mode,
            servo: &mut self.servo,
        }
    }

    pub fn animation_view(&mut self) -> AnimationView<'_> {
        AnimationView {
            mode: &self.mode,
            frame: &mut self.frame,
        }
    }

    pub fn output_view(&self) -> OutputView<'_> {
        OutputView {
            mode: &self.mode,
            drive: &self.motor,
            servo: &self.servo,
        }
    }

    // -- Read-only accessors --

    pub fn mode(&self) -> ModeStatus {
        self.mode
    }

    pub fn speed(&self) -> SpeedSelection {
        self.speed
    }

    pub fn motor(&self) -> MotorDrive {
        self.motor
    }

    pub fn servo(&self) -> ServoState {
        self.servo
    }

    pub fn frame(&self) -> DisplayFrame {
        self.frame
    }
}
