//! Application core: pure domain logic, zero I/O.
//!
//! The [`service::FanController`] ties the scheduler, the status registers
//! and the five FSMs together.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
