//! OsciFan firmware entry point
//!
//! One periodic tick drives everything.  The loop blocks on the tick
//! source, runs whichever tasks fell due, and reports telemetry once per
//! `telemetry_interval_ticks`.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter      LogDisplay          LogEventSink         │
//! │  (Input+Output)       (Text+Bitmap)       (EventSink)          │
//! │  HwTickTimer (TickSource)                                      │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              FanController (pure logic)                │    │
//! │  │  Scheduler · StatusRegisters · 5 FSMs                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use oscifan::adapters::hardware::HardwareAdapter;
use oscifan::adapters::log_display::LogDisplay;
use oscifan::adapters::log_sink::LogEventSink;
use oscifan::app::events::AppEvent;
use oscifan::app::ports::{EventSink, TickSource};
use oscifan::app::service::FanController;
use oscifan::config::FanConfig;
use oscifan::drivers::hw_init;
use oscifan::drivers::hw_timer::HwTickTimer;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  OsciFan v{}                         ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration ──────────────────────────────────────
    let config = FanConfig::default();

    // ── 3. Pin banks ──────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let (buttons, latch) = hw_init::init_pin_banks(peripherals.pins)?;
    let mut hw = HardwareAdapter::new(buttons, latch);
    let mut display = LogDisplay::new();
    let mut sink = LogEventSink::new();

    // ── 4. Controller ─────────────────────────────────────────
    let mut controller = FanController::new(config.clone())?;
    controller.start(&mut display, &mut sink);

    // ── 5. Tick source ────────────────────────────────────────
    let mut timer = HwTickTimer::new(config.tick_period_ms);
    timer.configure(config.tick_period_ms);
    timer.start()?;

    info!("System ready. Entering tick loop.");

    // ── 6. Tick loop ──────────────────────────────────────────
    loop {
        timer.wait();
        controller.tick(&mut hw, &mut display, &mut sink);

        if controller.telemetry_due() {
            sink.emit(&AppEvent::Telemetry(controller.build_telemetry()));
        }
    }
}
