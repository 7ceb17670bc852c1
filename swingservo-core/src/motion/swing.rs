//! Out-and-back swing trajectory
//!
//! A swing moves the servo from `start` to `end` and back again. Each
//! direction is split into `steps` equal increments, giving `steps + 1`
//! duty updates per pass (both endpoints included) and `2 * (steps + 1)`
//! updates in total. Every update is followed by the same delay:
//!
//! ```text
//! step_delay_ms = duration_ms / (2 * steps)     (whole milliseconds)
//! ```
//!
//! [`SwingPath`] yields the updates without any timing so the trajectory can
//! be inspected or scheduled elsewhere; [`Swing::run`] plays it back on a
//! servo output, awaiting the delay between updates.

use embedded_hal_async::delay::DelayNs;

use crate::config::SwingConfig;
use crate::servo::DutyMap;
use crate::traits::ServoOutput;

/// Default interpolation steps per direction
pub const DEFAULT_STEPS: u16 = 30;

/// Direction of travel within a swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwingPass {
    /// Moving from start toward end
    Forward,
    /// Moving from end back to start
    Return,
}

/// One duty update of a swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SwingStep {
    /// Position of this update in the whole swing (0-based)
    pub index: usize,
    /// Pass this update belongs to
    pub pass: SwingPass,
    /// Commanded angle in whole degrees
    pub angle_deg: i16,
    /// Duty value for the angle
    pub duty: u16,
}

/// A single out-and-back swing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Swing {
    start_deg: i16,
    end_deg: i16,
    duration_ms: u32,
    steps: u16,
}

impl Swing {
    /// Create a swing with [`DEFAULT_STEPS`] steps per direction
    pub fn new(start_deg: i16, end_deg: i16, duration_ms: u32) -> Self {
        Self {
            start_deg,
            end_deg,
            duration_ms,
            steps: DEFAULT_STEPS,
        }
    }

    /// Swing between the configured bounds, starting at the low bound
    pub fn from_config(config: &SwingConfig) -> Self {
        Self::new(config.low_deg, config.high_deg, config.duration_ms).with_steps(config.steps)
    }

    /// Override the steps per direction (at least one)
    pub fn with_steps(mut self, steps: u16) -> Self {
        self.steps = steps.max(1);
        self
    }

    /// Angle the swing starts and ends at
    pub fn start_deg(&self) -> i16 {
        self.start_deg
    }

    /// Turning point of the swing
    pub fn end_deg(&self) -> i16 {
        self.end_deg
    }

    /// Steps per direction
    pub fn steps(&self) -> u16 {
        self.steps
    }

    /// Delay after each duty update in milliseconds
    pub fn step_delay_ms(&self) -> u32 {
        self.duration_ms / (2 * self.steps as u32)
    }

    /// Number of duty updates in the whole swing
    pub fn update_count(&self) -> usize {
        2 * (self.steps as usize + 1)
    }

    /// Time the swing actually takes, after delay truncation
    pub fn total_time_ms(&self) -> u64 {
        self.update_count() as u64 * self.step_delay_ms() as u64
    }

    /// Angle of step `i` (0..=steps) within a pass
    ///
    /// The fractional angle is truncated toward zero. `i` past `steps` is
    /// treated as `steps`.
    pub fn angle_at(&self, pass: SwingPass, i: u16) -> i16 {
        let steps = self.steps as i64;
        let i = (i as i64).min(steps);
        let delta = (self.end_deg as i64 - self.start_deg as i64) * i;
        let scaled = match pass {
            SwingPass::Forward => self.start_deg as i64 * steps + delta,
            SwingPass::Return => self.end_deg as i64 * steps - delta,
        };
        (scaled / steps).clamp(i16::MIN as i64, i16::MAX as i64) as i16
    }

    /// Iterate over the duty updates of this swing
    pub fn path(&self, map: DutyMap) -> SwingPath {
        SwingPath {
            swing: *self,
            map,
            index: 0,
        }
    }

    /// Play the swing on a servo output
    ///
    /// Runs to completion; nothing else is serviced by the caller until the
    /// last update and its delay are done.
    pub async fn run<S, D>(&self, map: DutyMap, servo: &mut S, delay: &mut D) -> Result<(), S::Error>
    where
        S: ServoOutput,
        D: DelayNs,
    {
        let step_delay_ms = self.step_delay_ms();
        for step in self.path(map) {
            servo.set_duty(step.duty)?;
            delay.delay_ms(step_delay_ms).await;
        }
        Ok(())
    }
}

/// Iterator over the duty updates of a [`Swing`]
#[derive(Debug, Clone)]
pub struct SwingPath {
    swing: Swing,
    map: DutyMap,
    index: usize,
}

impl Iterator for SwingPath {
    type Item = SwingStep;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.swing.update_count() {
            return None;
        }

        let per_pass = self.swing.steps as usize + 1;
        let (pass, i) = if self.index < per_pass {
            (SwingPass::Forward, self.index)
        } else {
            (SwingPass::Return, self.index - per_pass)
        };

        let angle_deg = self.swing.angle_at(pass, i as u16);
        let step = SwingStep {
            index: self.index,
            pass,
            angle_deg,
            duty: self.map.duty_for(angle_deg),
        };
        self.index += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.swing.update_count().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SwingPath {}
