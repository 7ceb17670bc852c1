//! Configuration management
//!
//! Configuration is fixed at build time from `servo.toml` and never changes
//! while the firmware runs. The same [`ControllerConfig::validate`] rules are
//! applied by the firmware build script and at startup.

pub mod calibration;
pub mod types;

pub use calibration::ServoCalibration;
pub use types::{ControllerConfig, LoopTiming, SwingConfig};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// `max_duty` is below `min_duty`, the mapping would not be monotonic
    InvertedDutyRange,
    /// PWM frequency must be non-zero
    ZeroFrequency,
    /// A swing needs at least one step per direction
    ZeroSteps,
}
