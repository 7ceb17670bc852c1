//! Board-agnostic core logic for the servo swing firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (servo PWM output, status reporting)
//! - Angle-to-duty mapping
//! - Swing trajectory generation
//! - Command state machine and the control loop body
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod motion;
pub mod servo;
pub mod state;
pub mod traits;

pub use controller::ServoController;

#[cfg(test)]
pub(crate) mod testing;
