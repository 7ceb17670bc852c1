//! Servo calibration parameters

#[cfg(feature = "serde")]
use serde::Deserialize;

use super::ConfigError;
use crate::servo::DutyMap;

/// Standard hobby servo frame rate
pub const DEFAULT_PWM_FREQUENCY_HZ: u32 = 50;

/// Duty for 0 degrees (~0.5ms pulse at 50Hz)
pub const DEFAULT_MIN_DUTY: u16 = 1500;

/// Duty for 180 degrees (~2.5ms pulse at 50Hz)
pub const DEFAULT_MAX_DUTY: u16 = 8500;

/// PWM calibration for one servo (SG90/MG90S defaults)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ServoCalibration {
    /// PWM frequency in Hz
    pub pwm_frequency_hz: u32,
    /// 16-bit duty corresponding to 0 degrees
    pub min_duty: u16,
    /// 16-bit duty corresponding to 180 degrees
    pub max_duty: u16,
}

impl Default for ServoCalibration {
    fn default() -> Self {
        Self {
            pwm_frequency_hz: DEFAULT_PWM_FREQUENCY_HZ,
            min_duty: DEFAULT_MIN_DUTY,
            max_duty: DEFAULT_MAX_DUTY,
        }
    }
}

impl ServoCalibration {
    /// Check the calibration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pwm_frequency_hz == 0 {
            return Err(ConfigError::ZeroFrequency);
        }
        if self.max_duty < self.min_duty {
            return Err(ConfigError::InvertedDutyRange);
        }
        Ok(())
    }

    /// Angle-to-duty mapping for this calibration
    pub fn duty_map(&self) -> DutyMap {
        DutyMap::new(self.min_duty, self.max_duty)
    }

    /// Pulse width in microseconds produced by a duty value
    pub fn pulse_width_us(&self, duty: u16) -> u32 {
        if self.pwm_frequency_hz == 0 {
            return 0;
        }
        let period_us = 1_000_000u64 / self.pwm_frequency_hz as u64;
        (period_us * duty as u64 / 65_536) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(ServoCalibration::default().validate(), Ok(()));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let cal = ServoCalibration {
            min_duty: 8500,
            max_duty: 1500,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Err(ConfigError::InvertedDutyRange));
    }

    #[test]
    fn test_equal_range_allowed() {
        // Flat mapping is still non-decreasing
        let cal = ServoCalibration {
            min_duty: 4000,
            max_duty: 4000,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Ok(()));
    }

    #[test]
    fn test_zero_frequency_rejected() {
        let cal = ServoCalibration {
            pwm_frequency_hz: 0,
            ..Default::default()
        };
        assert_eq!(cal.validate(), Err(ConfigError::ZeroFrequency));
        assert_eq!(cal.pulse_width_us(4000), 0);
    }

    #[test]
    fn test_default_pulse_widths() {
        let cal = ServoCalibration::default();
        // 20ms frame: 1500/65536 ~ 0.46ms, 8500/65536 ~ 2.59ms
        assert_eq!(cal.pulse_width_us(cal.min_duty), 457);
        assert_eq!(cal.pulse_width_us(cal.max_duty), 2593);
    }
}
