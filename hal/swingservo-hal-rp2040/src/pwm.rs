//! PWM servo output
//!
//! The RP2040 PWM slice counts from 0 to `top` at `clk_sys / divider`, with an
//! 8.4 fixed-point divider (1.0 to 255.9375). For servo frame rates the
//! divider is chosen as small as possible so `top` uses as much of the
//! 16-bit counter as it can, which keeps duty resolution close to the
//! 16-bit values the core works with.

use embassy_rp::clocks::clk_sys_freq;
use embassy_rp::pwm::{Config, Pwm};
use fixed::types::extra::U4;
use fixed::FixedU16;

use swingservo_core::traits::ServoOutput;

/// Divider in 1/16 steps: 1.0
const DIVIDER_X16_MIN: u64 = 16;

/// Divider in 1/16 steps: 255.9375
const DIVIDER_X16_MAX: u64 = 255 * 16 + 15;

/// Counter wraps after top + 1 ticks
const COUNTER_RANGE: u64 = 1 << 16;

/// PWM errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmError {
    /// Frequency cannot be produced from the system clock
    FrequencyOutOfRange,
    /// Duty set before a frequency was configured
    NotConfigured,
}

/// PWM channel within a slice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PwmChannel {
    /// Output A (even GPIO)
    A,
    /// Output B (odd GPIO)
    B,
}

/// Divider and wrap value for one PWM frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PwmTiming {
    /// Clock divider in 1/16 units (16 = divide by 1)
    pub divider_x16: u16,
    /// Counter wrap value
    pub top: u16,
}

impl PwmTiming {
    /// Compute the timing for `freq_hz` from a system clock of `clk_hz`
    pub fn for_frequency(clk_hz: u32, freq_hz: u32) -> Result<Self, PwmError> {
        if freq_hz == 0 {
            return Err(PwmError::FrequencyOutOfRange);
        }
        let clk_x16 = clk_hz as u64 * 16;
        let freq = freq_hz as u64;

        // Smallest divider that keeps one period within the 16-bit counter
        let divider_x16 = clk_x16
            .div_ceil(freq * COUNTER_RANGE)
            .max(DIVIDER_X16_MIN);
        if divider_x16 > DIVIDER_X16_MAX {
            return Err(PwmError::FrequencyOutOfRange);
        }

        let ticks = clk_x16 / (divider_x16 * freq);
        if ticks < 2 {
            return Err(PwmError::FrequencyOutOfRange);
        }

        Ok(Self {
            divider_x16: divider_x16 as u16,
            top: (ticks - 1) as u16,
        })
    }

    /// Compare value producing a 16-bit duty fraction
    pub fn compare_for(&self, duty: u16) -> u16 {
        (duty as u32 * (self.top as u32 + 1) / COUNTER_RANGE as u32) as u16
    }

    /// Achieved frequency in millihertz
    pub fn frequency_mhz(&self, clk_hz: u32) -> u32 {
        let ticks = self.divider_x16 as u64 * (self.top as u64 + 1);
        (clk_hz as u64 * 16 * 1000 / ticks) as u32
    }
}

/// Servo output on one RP2040 PWM channel
///
/// The slice stays disabled until [`ServoOutput::set_frequency`] is called.
pub struct RpServoPwm<'d> {
    pwm: Pwm<'d>,
    config: Config,
    channel: PwmChannel,
    timing: Option<PwmTiming>,
}

impl<'d> RpServoPwm<'d> {
    /// Wrap a PWM slice that drives the servo on `channel`
    pub fn new(mut pwm: Pwm<'d>, channel: PwmChannel) -> Self {
        let mut config = Config::default();
        config.enable = false;
        config.compare_a = 0;
        config.compare_b = 0;
        pwm.set_config(&config);

        Self {
            pwm,
            config,
            channel,
            timing: None,
        }
    }

    /// Timing in use, once a frequency has been configured
    pub fn timing(&self) -> Option<PwmTiming> {
        self.timing
    }
}

impl ServoOutput for RpServoPwm<'_> {
    type Error = PwmError;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        let clk_hz = clk_sys_freq();
        let timing = PwmTiming::for_frequency(clk_hz, hz)?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "PWM {}Hz: clk={}Hz div={}/16 top={} (actual {}mHz)",
            hz,
            clk_hz,
            timing.divider_x16,
            timing.top,
            timing.frequency_mhz(clk_hz)
        );

        self.config.divider = FixedU16::<U4>::from_bits(timing.divider_x16);
        self.config.top = timing.top;
        self.config.phase_correct = false;
        self.config.enable = true;
        self.timing = Some(timing);
        self.pwm.set_config(&self.config);
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), Self::Error> {
        let timing = self.timing.ok_or(PwmError::NotConfigured)?;
        let compare = timing.compare_for(duty);
        match self.channel {
            PwmChannel::A => self.config.compare_a = compare,
            PwmChannel::B => self.config.compare_b = compare,
        }
        self.pwm.set_config(&self.config);
        Ok(())
    }
}
