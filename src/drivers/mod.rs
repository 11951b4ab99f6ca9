//! Pin banks, the tick timer, and hardware initialisation.

pub mod buttons;
#[cfg(target_os = "espidf")]
pub mod hw_init;
pub mod hw_timer;
pub mod output_latch;
