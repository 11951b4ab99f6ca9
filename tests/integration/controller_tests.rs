//! Integration tests for the FanController → FSMs → ports pipeline.
//!
//! Every test drives the controller one tick at a time through the mock
//! adapters, exactly as the firmware loop does after each timer tick.

use crate::mock_hw::{
    DisplayCall, MockDisplay, MockHardware, OSCILLATE, POWER, RecordingSink, SPEED, TEMPERATURE,
};

use oscifan::app::events::AppEvent;
use oscifan::app::service::FanController;
use oscifan::config::FanConfig;
use oscifan::display::FanFrame;
use oscifan::fsm::animation::AnimationState;
use oscifan::fsm::input::InputState;
use oscifan::fsm::motor::MotorState;
use oscifan::fsm::oscillator::OscillatorPhase;
use oscifan::fsm::output::OutputWord;

/// Upper bound on ticks any single press may take.
const PRESS_TIMEOUT: u32 = 100;

struct Bench {
    app: FanController,
    hw: MockHardware,
    display: MockDisplay,
    sink: RecordingSink,
}

impl Bench {
    fn new() -> Self {
        let mut app = FanController::new(FanConfig::default()).expect("default config is valid");
        let mut display = MockDisplay::new();
        let mut sink = RecordingSink::new();
        app.start(&mut display, &mut sink);
        Self {
            app,
            hw: MockHardware::new(),
            display,
            sink,
        }
    }

    fn tick(&mut self) {
        self.app
            .tick(&mut self.hw, &mut self.display, &mut self.sink);
    }

    fn run(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn run_until_tick(&mut self, tick: u64) {
        while self.app.tick_count() < tick {
            self.tick();
        }
    }

    /// Tick until `cond` holds, panicking after `limit` ticks.
    fn tick_until(&mut self, limit: u32, cond: impl Fn(&Self) -> bool) {
        for _ in 0..limit {
            if cond(self) {
                return;
            }
            self.tick();
        }
        assert!(cond(self), "condition not reached within {limit} ticks");
    }

    /// Hold `code` until the input interpreter acts on it, then release
    /// and wait for it to return to `Wait`.
    fn press(&mut self, code: u8) {
        self.hw.hold(code);
        self.tick_until(PRESS_TIMEOUT, |b| {
            !matches!(b.app.input_state(), InputState::Start | InputState::Wait)
        });
        self.hw.release();
        self.tick_until(PRESS_TIMEOUT, |b| b.app.input_state() == InputState::Wait);
    }

    fn events(&self, wanted: &AppEvent) -> usize {
        self.sink.count(|e| e == wanted)
    }
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn start_draws_boot_screens() {
    let bench = Bench::new();

    assert!(bench.display.text().starts_with("Pwr:Off Osc:Off Spd:1"));
    assert_eq!(bench.display.frames(), vec![FanFrame::Upright]);
    assert_eq!(
        &bench.display.calls[bench.display.calls.len() - 4..],
        &[
            DisplayCall::Clear,
            DisplayCall::BitmapCursor(18, 0),
            DisplayCall::Bitmap(FanFrame::Upright),
            DisplayCall::Render,
        ]
    );
    assert_eq!(bench.sink.events, vec![AppEvent::Started]);
}

#[test]
fn every_machine_leaves_start_on_its_first_step() {
    let mut bench = Bench::new();
    bench.run_until_tick(250);
    assert_eq!(bench.app.input_state(), InputState::Wait);
    assert_eq!(bench.app.motor_state(), MotorState::Off);
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::Off);
    assert_eq!(bench.app.animation_state(), AnimationState::Dwell);
}

// ── Scheduling ────────────────────────────────────────────────

#[test]
fn buttons_sampled_only_when_input_task_due() {
    let mut bench = Bench::new();
    bench.run(25);
    assert_eq!(bench.hw.reads, 2);
    assert_eq!(bench.hw.writes.len(), 25);
}

#[test]
fn idle_word_carries_only_direction() {
    let mut bench = Bench::new();
    bench.run(100);
    assert!(
        bench
            .hw
            .writes
            .iter()
            .all(|w| *w == OutputWord::from_bits(0b0010_0000))
    );
}

// ── Power and motor ───────────────────────────────────────────

#[test]
fn power_press_drives_lowest_speed_pwm() {
    let mut bench = Bench::new();
    bench.hw.hold(POWER);
    bench.tick_until(PRESS_TIMEOUT, |b| b.events(&AppEvent::PowerChanged(true)) == 1);

    // The power-on tick already shows power, with the motor in its off window.
    let on_word = bench.hw.last_word().expect("word written");
    assert!(on_word.power());
    assert!(!on_word.motor_enabled());

    let start = bench.hw.writes.len();
    bench.hw.release();
    bench.run(48);

    // Duty 11, threshold 10: one high step every 12.
    let highs: Vec<usize> = bench.hw.writes[start..]
        .iter()
        .enumerate()
        .filter(|(_, w)| w.motor_enabled())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(highs, vec![9, 21, 33, 45]);
    assert!(bench.hw.writes[start..].iter().all(|w| w.power()));
}

#[test]
fn power_off_stops_motor_on_the_same_tick() {
    let mut bench = Bench::new();
    bench.press(POWER);
    for _ in 0..3 {
        bench.press(SPEED);
    }
    assert_eq!(bench.app.registers().speed().level(), 4);
    bench.tick_until(200, |b| b.app.registers().motor().enabled);

    bench.hw.hold(POWER);
    bench.tick_until(PRESS_TIMEOUT, |b| b.events(&AppEvent::PowerChanged(false)) == 1);
    let word = bench.hw.last_word().expect("word written");
    assert!(!word.power());
    assert!(!word.motor_enabled());
    assert_eq!(bench.app.motor_state(), MotorState::Off);

    bench.hw.release();
    let start = bench.hw.writes.len();
    bench.run(300);
    assert!(bench.hw.writes[start..].iter().all(|w| !w.motor_enabled()));
}

// ── Speed, temperature mode, status line ──────────────────────

#[test]
fn speed_press_updates_level_and_status_line() {
    let mut bench = Bench::new();
    bench.press(SPEED);
    assert_eq!(bench.events(&AppEvent::SpeedChanged(2)), 1);
    assert_eq!(bench.display.slot(21, 1), "2");
    assert_eq!(
        bench
            .display
            .calls
            .iter()
            .rev()
            .find(|c| matches!(c, DisplayCall::TextCursor(_))),
        Some(&DisplayCall::TextCursor(0))
    );

    for _ in 0..3 {
        bench.press(SPEED);
    }
    assert_eq!(bench.app.registers().speed().level(), 1);
    assert_eq!(bench.display.slot(21, 1), "1");
}

#[test]
fn temperature_mode_freezes_speed() {
    let mut bench = Bench::new();
    bench.press(SPEED);

    bench.press(TEMPERATURE);
    assert_eq!(bench.events(&AppEvent::TemperatureModeChanged(true)), 1);
    assert_eq!(bench.display.slot(21, 4), "Temp");

    bench.press(SPEED);
    assert_eq!(bench.app.registers().speed().level(), 2);
    assert_eq!(bench.sink.count(|e| matches!(e, AppEvent::SpeedChanged(_))), 1);
    assert_eq!(bench.display.slot(21, 4), "Temp");

    bench.press(TEMPERATURE);
    assert_eq!(bench.display.slot(21, 4), "2   ");
}

#[test]
fn mode_slots_follow_presses() {
    let mut bench = Bench::new();
    bench.press(OSCILLATE);
    assert_eq!(bench.display.slot(13, 3), "On ");
    bench.press(POWER);
    assert_eq!(bench.display.slot(5, 3), "On ");
    bench.press(OSCILLATE);
    assert_eq!(bench.display.slot(13, 3), "Off");
    assert!(bench.display.text().starts_with("Pwr:On  Osc:Off Spd:1"));
}

#[test]
fn held_button_fires_once() {
    let mut bench = Bench::new();
    bench.hw.hold(SPEED);
    bench.run(1_000);
    assert_eq!(bench.sink.count(|e| matches!(e, AppEvent::SpeedChanged(_))), 1);
    assert_eq!(bench.app.input_state(), InputState::Press);
}

#[test]
fn chord_changes_nothing() {
    let mut bench = Bench::new();
    bench.hw.hold(POWER | SPEED);
    bench.run(200);
    assert_eq!(bench.sink.events, vec![AppEvent::Started]);
    assert_eq!(bench.app.input_state(), InputState::Wait);
}

// ── Oscillation ───────────────────────────────────────────────

#[test]
fn oscillation_cycle_end_to_end() {
    let mut bench = Bench::new();
    bench.hw.hold(OSCILLATE);
    bench.tick_until(PRESS_TIMEOUT, |b| {
        b.app.oscillator_phase() == OscillatorPhase::SweepLeft
    });
    bench.hw.release();
    assert_eq!(bench.events(&AppEvent::OscillationChanged(true)), 1);

    bench.run(100);
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::SweepLeft);
    bench.tick();
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::Dwell);

    bench.run(899);
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::Dwell);
    bench.tick();
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::SweepRight);

    bench.run(99);
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::SweepRight);
    bench.tick();
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::Dwell);
    assert_eq!(bench.app.registers().servo().phase_elapsed, 0);

    bench.tick();
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::SweepLeft);
}

#[test]
fn servo_pulse_reaches_output_while_sweeping() {
    let mut bench = Bench::new();
    bench.press(OSCILLATE);
    let start = bench.hw.writes.len();
    bench.run(60);
    let words = &bench.hw.writes[start..];
    assert!(words.iter().all(|w| w.oscillating()));
    assert!(words.iter().any(|w| w.servo_pulse()));
    assert!(words.iter().any(|w| !w.servo_pulse()));
}

#[test]
fn stopping_oscillation_parks_the_servo() {
    let mut bench = Bench::new();
    bench.press(OSCILLATE);
    bench.run(500);
    bench.press(OSCILLATE);
    assert_eq!(bench.app.oscillator_phase(), OscillatorPhase::Off);
    let start = bench.hw.writes.len();
    bench.run(100);
    assert!(bench.hw.writes[start..].iter().all(|w| !w.servo_pulse() && !w.oscillating()));
}

// ── Animation ─────────────────────────────────────────────────

#[test]
fn animation_runs_only_while_powered() {
    let mut bench = Bench::new();
    bench.press(POWER);

    // Tick 250 only leaves Start; the first toggle lands on tick 500.
    bench.run_until_tick(499);
    assert_eq!(bench.display.frames(), vec![FanFrame::Upright]);
    bench.run_until_tick(750);
    assert_eq!(
        bench.display.frames(),
        vec![FanFrame::Upright, FanFrame::Angled, FanFrame::Upright]
    );

    bench.press(POWER);
    bench.run_until_tick(1_750);
    assert_eq!(bench.display.frames().len(), 3);
    assert_eq!(bench.app.animation_state(), AnimationState::Dwell);
}

// ── Port faults ───────────────────────────────────────────────

#[test]
fn failed_reads_are_reported_and_skip_the_input_step() {
    let mut bench = Bench::new();
    bench.hw.fail_reads = true;
    bench.hw.hold(POWER);
    bench.run(50);

    assert_eq!(bench.sink.count(|e| matches!(e, AppEvent::PortFault(_))), 5);
    assert_eq!(bench.app.port_faults(), 5);
    assert!(!bench.app.registers().mode().power);
    assert_eq!(bench.app.input_state(), InputState::Start);
    assert_eq!(bench.hw.writes.len(), 50);

    bench.hw.fail_reads = false;
    bench.tick_until(PRESS_TIMEOUT, |b| b.app.registers().mode().power);
}

#[test]
fn read_fault_during_held_press_does_not_fire_again() {
    let mut bench = Bench::new();
    bench.hw.hold(SPEED);
    bench.run(100);
    assert_eq!(bench.app.input_state(), InputState::Press);

    bench.hw.fail_reads = true;
    bench.run(30);
    bench.hw.fail_reads = false;
    bench.run(100);

    assert_eq!(bench.app.port_faults(), 3);
    assert_eq!(bench.sink.count(|e| matches!(e, AppEvent::SpeedChanged(_))), 1);
    assert_eq!(bench.app.registers().speed().level(), 2);
    assert_eq!(bench.app.input_state(), InputState::Press);
}

#[test]
fn failed_writes_are_retried_next_step() {
    let mut bench = Bench::new();
    bench.hw.fail_writes = true;
    bench.run(5);
    assert_eq!(bench.sink.count(|e| matches!(e, AppEvent::PortFault(_))), 5);
    assert_eq!(bench.app.last_output(), OutputWord::default());

    bench.hw.fail_writes = false;
    bench.tick();
    assert_eq!(bench.hw.writes.len(), 1);
    assert_eq!(bench.app.last_output(), OutputWord::from_bits(0b0010_0000));
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reflects_registers() {
    let mut bench = Bench::new();
    bench.press(POWER);
    bench.press(OSCILLATE);
    bench.run_until_tick(1_000);
    assert!(bench.app.telemetry_due());

    let t = bench.app.build_telemetry();
    assert_eq!(t.tick, 1_000);
    assert!(t.power && t.oscillating && !t.temperature_mode);
    assert_eq!(t.motor, MotorState::On);
    assert_eq!(t.input, InputState::Wait);
    assert_ne!(t.oscillator, OscillatorPhase::Off);
    assert_eq!(t.last_output, bench.hw.last_word().expect("word written"));
    assert_eq!(t.port_faults, 0);
}
