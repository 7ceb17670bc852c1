//! Hardware abstraction traits
//!
//! These traits define the interface between the application logic
//! and hardware-specific implementations. Delays use
//! [`embedded_hal_async::delay::DelayNs`] directly.

pub mod servo;
pub mod status;

pub use servo::ServoOutput;
pub use status::StatusSink;
