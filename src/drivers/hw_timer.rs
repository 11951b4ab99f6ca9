//! Scheduler tick source.
//!
//! On ESP-IDF a periodic `esp_timer` fires the tick; on simulation targets
//! a sleeping thread approximates it.  Either way the tick lands in an
//! `embassy_sync` [`Signal`], and [`TickSource::wait`] blocks on it.
//!
//! A `Signal` holds at most one pending value, so ticks raised while the
//! main loop is still busy coalesce into a single wake-up.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR), and
//! `Signal::signal` only takes a critical section, so no extra locking is
//! needed.

use std::sync::Arc;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use log::info;

use crate::app::ports::TickSource;
use crate::error::Error;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(not(target_os = "espidf"))]
use std::sync::atomic::{AtomicBool, Ordering};
#[cfg(not(target_os = "espidf"))]
use std::thread::JoinHandle;

type TickSignal = Signal<CriticalSectionRawMutex, ()>;

pub struct HwTickTimer {
    period_ms: u32,
    /// Shared with the timer callback / sim thread.
    signal: Arc<TickSignal>,
    #[cfg(target_os = "espidf")]
    handle: esp_timer_handle_t,
    #[cfg(not(target_os = "espidf"))]
    running: Arc<AtomicBool>,
    #[cfg(not(target_os = "espidf"))]
    worker: Option<JoinHandle<()>>,
}

impl HwTickTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            signal: Arc::new(Signal::new()),
            #[cfg(target_os = "espidf")]
            handle: core::ptr::null_mut(),
            #[cfg(not(target_os = "espidf"))]
            running: Arc::new(AtomicBool::new(false)),
            #[cfg(not(target_os = "espidf"))]
            worker: None,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    #[cfg(target_os = "espidf")]
    fn is_started(&self) -> bool {
        !self.handle.is_null()
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_started(&self) -> bool {
        self.worker.is_some()
    }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `Arc<TickSignal>` allocation owned by the
    // HwTickTimer, which stops and deletes the timer before releasing it.
    let signal = unsafe { &*(arg as *const TickSignal) };
    signal.signal(());
}

impl TickSource for HwTickTimer {
    fn configure(&mut self, period_ms: u32) {
        self.period_ms = period_ms.max(1);
    }

    #[cfg(target_os = "espidf")]
    fn start(&mut self) -> Result<(), Error> {
        if self.is_started() {
            return Err(Error::Init("tick timer already started"));
        }
        let args = esp_timer_create_args_t {
            callback: Some(tick_cb),
            arg: Arc::as_ptr(&self.signal) as *mut core::ffi::c_void,
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"tick".as_ptr(),
            skip_unhandled_events: true,
        };
        // SAFETY: `handle` is written once here; the callback argument
        // outlives the timer (see `Drop`).
        unsafe {
            let ret = esp_timer_create(&args, &mut self.handle);
            if ret != ESP_OK as i32 {
                self.handle = core::ptr::null_mut();
                return Err(Error::Timer(ret));
            }
            let ret = esp_timer_start_periodic(self.handle, u64::from(self.period_ms) * 1_000);
            if ret != ESP_OK as i32 {
                esp_timer_delete(self.handle);
                self.handle = core::ptr::null_mut();
                return Err(Error::Timer(ret));
            }
        }
        info!("hw_timer: tick every {}ms", self.period_ms);
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn start(&mut self) -> Result<(), Error> {
        if self.is_started() {
            return Err(Error::Init("tick timer already started"));
        }
        let period = std::time::Duration::from_millis(u64::from(self.period_ms));
        let signal = Arc::clone(&self.signal);
        let running = Arc::clone(&self.running);
        running.store(true, Ordering::Release);

        let worker = std::thread::Builder::new()
            .name("tick".into())
            .spawn(move || {
                while running.load(Ordering::Acquire) {
                    std::thread::sleep(period);
                    signal.signal(());
                }
            })
            .map_err(|_| Error::Init("tick thread spawn failed"))?;
        self.worker = Some(worker);

        info!("hw_timer(sim): tick every {}ms", self.period_ms);
        Ok(())
    }

    fn wait(&mut self) {
        futures_lite::future::block_on(self.signal.wait());
    }
}

impl Drop for HwTickTimer {
    #[cfg(target_os = "espidf")]
    fn drop(&mut self) {
        if self.is_started() {
            // SAFETY: handle is a live timer created in `start`.
            unsafe {
                esp_timer_stop(self.handle);
                esp_timer_delete(self.handle);
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
