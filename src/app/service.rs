//! Application service: the hexagonal core.
//!
//! [`FanController`] owns the scheduler, the status registers and the five
//! FSMs.  It exposes a hardware-agnostic API; all I/O flows through port
//! traits injected at call sites, so the whole controller is testable with
//! mock adapters.
//!
//! ```text
//!   InputPort ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                 │        FanController          │
//!  OutputPort ◀── │  Scheduler · Registers · FSMs │ ──▶ Text/BitmapDisplay
//!                 └──────────────────────────────┘
//! ```
//!
//! Within one tick the due tasks run in priority order
//! (Input → Motor → Oscillator → Animation → Output), so the word written
//! by the Output Composer always reflects same-tick register updates.

use log::{debug, info, warn};

use crate::config::FanConfig;
use crate::display::status_line;
use crate::display::{FanFrame, draw_frame};
use crate::error::Error;
use crate::fsm::animation::{AnimationState, DisplayAnimation};
use crate::fsm::input::{InputInterpreter, InputState};
use crate::fsm::motor::{MotorDuty, MotorState};
use crate::fsm::oscillator::{Oscillator, OscillatorPhase};
use crate::fsm::output::{OutputComposer, OutputWord};
use crate::fsm::registers::{ModeStatus, RawInput, SpeedSelection, StatusRegisters};
use crate::fsm::{Effect, Fsm};
use crate::scheduler::{Scheduler, TaskId};

use super::events::{AppEvent, TelemetryData};
use super::ports::{BitmapDisplay, EventSink, InputPort, OutputPort, TextDisplay};

// ───────────────────────────────────────────────────────────────
// FanController
// ───────────────────────────────────────────────────────────────

/// The fan controller orchestrates all domain logic.
pub struct FanController {
    config: FanConfig,
    scheduler: Scheduler,
    registers: StatusRegisters,
    input: Fsm<InputInterpreter>,
    motor: Fsm<MotorDuty>,
    oscillator: Fsm<Oscillator>,
    animation: Fsm<DisplayAnimation>,
    output: Fsm<OutputComposer>,
    tick_count: u64,
    /// Last word the output port accepted.
    last_output: OutputWord,
    port_faults: u32,
}

impl FanController {
    /// Validate `config` and build the controller.
    ///
    /// Does **not** touch any port: call [`start`](Self::start) next.
    pub fn new(config: FanConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            scheduler: Scheduler::new(&config.periods),
            registers: StatusRegisters::new(),
            input: Fsm::new(InputInterpreter),
            motor: Fsm::new(MotorDuty::from_config(&config)),
            oscillator: Fsm::new(Oscillator::new(config.servo)),
            animation: Fsm::new(DisplayAnimation),
            output: Fsm::new(OutputComposer::new(config.motor_direction)),
            config,
            tick_count: 0,
            last_output: OutputWord::default(),
            port_faults: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Draw the boot status line and the upright fan frame.
    pub fn start(
        &mut self,
        display: &mut (impl TextDisplay + BitmapDisplay),
        sink: &mut impl EventSink,
    ) {
        status_line::draw_initial(display);
        draw_frame(display, FanFrame::Upright);
        sink.emit(&AppEvent::Started);
        info!(
            "FanController started (tick={}ms, periods={:?})",
            self.config.tick_period_ms, self.config.periods
        );
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance the scheduler by one tick and step every due task.
    ///
    /// The button bank is sampled only when the input task is due.
    /// Port failures never stop the tick: a failed read skips that input
    /// step, a failed write is retried on the next output step.
    pub fn tick(
        &mut self,
        hw: &mut (impl InputPort + OutputPort),
        display: &mut (impl TextDisplay + BitmapDisplay),
        sink: &mut impl EventSink,
    ) {
        self.tick_count += 1;

        for task in self.scheduler.tick() {
            let effect = match task {
                TaskId::Input => self.step_input(hw, sink),
                TaskId::Motor => self.motor.step(self.registers.motor_view()),
                TaskId::Oscillator => self.oscillator.step(self.registers.servo_view()),
                TaskId::Animation => self.animation.step(self.registers.animation_view()),
                TaskId::Output => self.output.step(self.registers.output_view()),
            };
            if let Some(effect) = effect {
                self.apply_effect(effect, hw, display, sink);
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────

    /// Build a telemetry snapshot from the current registers.
    pub fn build_telemetry(&self) -> TelemetryData {
        let mode = self.registers.mode();
        TelemetryData {
            tick: self.tick_count,
            power: mode.power,
            oscillating: mode.oscillating,
            temperature_mode: mode.temperature_mode,
            speed_level: self.registers.speed().level(),
            motor_enabled: self.registers.motor().enabled,
            input: self.input.state(),
            motor: self.motor.state(),
            oscillator: self.oscillator.state(),
            animation: self.animation.state(),
            phase_elapsed: self.registers.servo().phase_elapsed,
            last_output: self.last_output,
            port_faults: self.port_faults,
        }
    }

    /// Whether the current tick falls on a telemetry boundary.
    pub fn telemetry_due(&self) -> bool {
        let interval = u64::from(self.config.telemetry_interval_ticks);
        interval != 0 && self.tick_count % interval == 0
    }

    pub fn registers(&self) -> &StatusRegisters {
        &self.registers
    }

    pub fn input_state(&self) -> InputState {
        self.input.state()
    }

    pub fn motor_state(&self) -> MotorState {
        self.motor.state()
    }

    pub fn oscillator_phase(&self) -> OscillatorPhase {
        self.oscillator.state()
    }

    pub fn animation_state(&self) -> AnimationState {
        self.animation.state()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn last_output(&self) -> OutputWord {
        self.last_output
    }

    /// Port failures seen since startup.
    pub fn port_faults(&self) -> u32 {
        self.port_faults
    }

    // ── Internal ──────────────────────────────────────────────

    fn step_input(&mut self, hw: &mut impl InputPort, sink: &mut impl EventSink) -> Option<Effect> {
        // Skip the step so a held press stays in Press.
        let raw = match hw.read_levels() {
            Ok(levels) => RawInput::from_levels(levels),
            Err(e) => {
                self.report_fault(e, sink);
                return None;
            }
        };

        let mode = self.registers.mode();
        let speed = self.registers.speed();
        let effect = self.input.step(self.registers.input_view(raw));
        self.report_mode_changes(mode, speed, sink);
        effect
    }

    /// Emit one event per register the input step changed.
    fn report_mode_changes(
        &self,
        before: ModeStatus,
        speed_before: SpeedSelection,
        sink: &mut impl EventSink,
    ) {
        let mode = self.registers.mode();
        let speed = self.registers.speed();

        if mode.power != before.power {
            info!("Power {}", if mode.power { "on" } else { "off" });
            sink.emit(&AppEvent::PowerChanged(mode.power));
        }
        if mode.oscillating != before.oscillating {
            info!("Oscillation {}", if mode.oscillating { "on" } else { "off" });
            sink.emit(&AppEvent::OscillationChanged(mode.oscillating));
        }
        if mode.temperature_mode != before.temperature_mode {
            info!(
                "Temperature mode {}",
                if mode.temperature_mode { "on" } else { "off" }
            );
            sink.emit(&AppEvent::TemperatureModeChanged(mode.temperature_mode));
        }
        if speed != speed_before {
            info!("Speed level {}", speed.level());
            sink.emit(&AppEvent::SpeedChanged(speed.level()));
        }
    }

    /// Carry out an effect returned by a state action.
    fn apply_effect(
        &mut self,
        effect: Effect,
        hw: &mut impl OutputPort,
        display: &mut (impl TextDisplay + BitmapDisplay),
        sink: &mut impl EventSink,
    ) {
        match effect {
            Effect::StatusText(field) => {
                debug!("status line: redraw {:?}", field);
                status_line::draw_field(
                    display,
                    field,
                    self.registers.mode(),
                    self.registers.speed(),
                );
            }
            Effect::Redraw(frame) => draw_frame(display, frame),
            Effect::WriteOutput(word) => match hw.write_word(word) {
                Ok(()) => self.last_output = word,
                Err(e) => self.report_fault(e, sink),
            },
        }
    }

    fn report_fault(&mut self, error: Error, sink: &mut impl EventSink) {
        self.port_faults = self.port_faults.saturating_add(1);
        warn!("Port fault: {}", error);
        sink.emit(&AppEvent::PortFault(error));
    }
}
