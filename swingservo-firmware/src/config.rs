//! Compiled-in configuration
//!
//! servo.toml is validated by build.rs and turned into constants. The
//! runtime check below only guards against a generated file that the core
//! would still reject.

use defmt::*;
use swingservo_core::config::{ControllerConfig, LoopTiming, ServoCalibration, SwingConfig};

include!(concat!(env!("OUT_DIR"), "/servo_config.rs"));

/// Configuration to run with, falling back to the defaults when invalid
pub fn load() -> ControllerConfig {
    match CONTROLLER_CONFIG.validate() {
        Ok(()) => CONTROLLER_CONFIG,
        Err(e) => {
            error!("Compiled servo config rejected: {:?}, using defaults", e);
            ControllerConfig::default()
        }
    }
}
