//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::Deserialize;

use super::{ConfigError, ServoCalibration};
use crate::motion::DEFAULT_STEPS;
use crate::servo::CENTER_ANGLE_DEG;

/// Swing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SwingConfig {
    /// Angle the swing starts and ends at (degrees)
    pub low_deg: i16,
    /// Far end of the swing (degrees)
    pub high_deg: i16,
    /// Total time for out-and-back in milliseconds
    pub duration_ms: u32,
    /// Interpolation steps per direction
    pub steps: u16,
}

impl Default for SwingConfig {
    fn default() -> Self {
        Self {
            low_deg: 30,
            high_deg: 150,
            duration_ms: 500,
            steps: DEFAULT_STEPS,
        }
    }
}

/// Control loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct LoopTiming {
    /// Wait after centering at boot, lets the horn reach position (ms)
    pub settle_ms: u32,
    /// Sleep at the end of every loop iteration (ms)
    pub idle_ms: u32,
    /// Pause after each swing in continuous mode (ms)
    pub continuous_pause_ms: u32,
}

impl Default for LoopTiming {
    fn default() -> Self {
        Self {
            settle_ms: 1000,
            idle_ms: 50,
            continuous_pause_ms: 500,
        }
    }
}

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ControllerConfig {
    /// Rest position used at boot and on stop (degrees)
    pub center_deg: i16,
    /// PWM calibration
    pub calibration: ServoCalibration,
    /// Swing bounds and speed
    pub swing: SwingConfig,
    /// Loop timing
    pub timing: LoopTiming,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            center_deg: CENTER_ANGLE_DEG,
            calibration: ServoCalibration::default(),
            swing: SwingConfig::default(),
            timing: LoopTiming::default(),
        }
    }
}

impl ControllerConfig {
    /// Validate the configuration
    ///
    /// Angles are not range-checked; values outside 0-180 extrapolate the
    /// duty mapping.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calibration.validate()?;
        if self.swing.steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        Ok(())
    }
}
