//! Outbound application events.
//!
//! The [`FanController`](super::service::FanController) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them.

use crate::error::Error;
use crate::fsm::animation::AnimationState;
use crate::fsm::input::InputState;
use crate::fsm::motor::MotorState;
use crate::fsm::oscillator::OscillatorPhase;
use crate::fsm::output::OutputWord;

/// Structured events emitted by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has drawn its boot screens and is ready to tick.
    Started,

    /// Power was switched on (`true`) or off.
    PowerChanged(bool),

    /// Oscillation was toggled.
    OscillationChanged(bool),

    /// Temperature mode was toggled.
    TemperatureModeChanged(bool),

    /// A new speed level was selected (1-based, as displayed).
    SpeedChanged(u8),

    /// An input or output port operation failed.
    PortFault(Error),

    /// Periodic telemetry snapshot.
    Telemetry(TelemetryData),
}

/// A point-in-time snapshot of the controller, suitable for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryData {
    pub tick: u64,
    pub power: bool,
    pub oscillating: bool,
    pub temperature_mode: bool,
    pub speed_level: u8,
    pub motor_enabled: bool,
    pub input: InputState,
    pub motor: MotorState,
    pub oscillator: OscillatorPhase,
    pub animation: AnimationState,
    pub phase_elapsed: u16,
    pub last_output: OutputWord,
    pub port_faults: u32,
}
