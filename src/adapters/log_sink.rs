//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the logger (UART / USB-CDC in production, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

fn on_off(flag: bool) -> &'static str {
    if flag { "ON" } else { "OFF" }
}

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Telemetry(t) => {
                info!(
                    "TELEM | tick={} | pwr={} osc={} temp={} spd={} | motor={} | \
                     fsm={:?}/{:?}/{:?}/{:?} | phase={} | out=0b{:08b} | faults={}",
                    t.tick,
                    on_off(t.power),
                    on_off(t.oscillating),
                    on_off(t.temperature_mode),
                    t.speed_level,
                    on_off(t.motor_enabled),
                    t.input,
                    t.motor,
                    t.oscillator,
                    t.animation,
                    t.phase_elapsed,
                    t.last_output.bits(),
                    t.port_faults,
                );
            }
            AppEvent::PowerChanged(on) => info!("MODE  | power {}", on_off(*on)),
            AppEvent::OscillationChanged(on) => info!("MODE  | oscillation {}", on_off(*on)),
            AppEvent::TemperatureModeChanged(on) => {
                info!("MODE  | temperature mode {}", on_off(*on))
            }
            AppEvent::SpeedChanged(level) => info!("MODE  | speed {}", level),
            AppEvent::PortFault(e) => warn!("FAULT | {}", e),
            AppEvent::Started => info!("START | controller running"),
        }
    }
}
