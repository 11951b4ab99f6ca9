//! OsciFan controller library.
//!
//! Exposes the controller core for the firmware binary and for host
//! integration tests.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod display;
pub mod drivers;
pub mod error;
pub mod fsm;
pub mod pins;
pub mod scheduler;

pub use error::{Error, Result};
