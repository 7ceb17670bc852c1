//! RP2040-specific HAL for the servo swing firmware
//!
//! This crate provides RP2040 implementations of the `swingservo-core`
//! hardware traits:
//!
//! - PWM slice configuration for servo frame rates (divider/top selection)
//! - [`pwm::RpServoPwm`], a [`swingservo_core::traits::ServoOutput`] on one
//!   PWM channel

#![no_std]
#![deny(unsafe_code)]

pub mod pwm;

pub use pwm::{PwmChannel, PwmError, PwmTiming, RpServoPwm};
