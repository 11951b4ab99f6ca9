//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter       | Implements     | Connects to                   |
//! |---------------|----------------|-------------------------------|
//! | `hardware`    | InputPort      | Button bank (GPIO)            |
//! |               | OutputPort     | Output latch (GPIO)           |
//! | `log_display` | TextDisplay    | Serial log (LCD mirror)       |
//! |               | BitmapDisplay  | Serial log (panel mirror)     |
//! | `log_sink`    | EventSink      | Serial log output             |
//!
//! The tick source lives with the drivers in
//! [`hw_timer`](crate::drivers::hw_timer).

pub mod hardware;
pub mod log_display;
pub mod log_sink;
