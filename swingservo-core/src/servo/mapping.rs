//! Angle-to-duty mapping
//!
//! Linear interpolation between the calibrated duty at 0 degrees and the
//! calibrated duty at 180 degrees:
//!
//! ```text
//! duty = min_duty + (max_duty - min_duty) * angle / 180
//! ```
//!
//! The result is truncated toward zero. Angles are not validated; values
//! outside 0-180 extrapolate, saturating at the 16-bit register limits.

/// Full travel of the servo in degrees
pub const MAX_ANGLE_DEG: i16 = 180;

/// Mid-travel rest position
pub const CENTER_ANGLE_DEG: i16 = 90;

/// Linear angle-to-duty map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DutyMap {
    min_duty: u16,
    max_duty: u16,
}

impl DutyMap {
    /// Create a map from the duty at 0 degrees and the duty at 180 degrees
    pub const fn new(min_duty: u16, max_duty: u16) -> Self {
        Self { min_duty, max_duty }
    }

    /// Duty at 0 degrees
    pub fn min_duty(&self) -> u16 {
        self.min_duty
    }

    /// Duty at 180 degrees
    pub fn max_duty(&self) -> u16 {
        self.max_duty
    }

    /// Duty value for an angle in degrees
    pub fn duty_for(&self, angle_deg: i16) -> u16 {
        let min = self.min_duty as i64;
        let span = self.max_duty as i64 - min;
        let max_angle = MAX_ANGLE_DEG as i64;
        // Integer division truncates toward zero, same as the float formula
        let duty = (min * max_angle + span * angle_deg as i64) / max_angle;
        duty.clamp(0, u16::MAX as i64) as u16
    }
}
