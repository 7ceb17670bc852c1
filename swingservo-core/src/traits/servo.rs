//! Servo PWM output trait

/// A single PWM channel driving a positional servo
///
/// The controller owns its output for the whole program lifetime and only
/// needs two operations from the hardware.
pub trait ServoOutput {
    /// Error type for output operations
    type Error: core::fmt::Debug;

    /// Configure the PWM frequency in Hz
    ///
    /// Called once at startup, before any duty is set.
    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error>;

    /// Set the duty cycle as a 16-bit fraction of the period (0-65535)
    fn set_duty(&mut self, duty: u16) -> Result<(), Self::Error>;
}

impl<T: ServoOutput + ?Sized> ServoOutput for &mut T {
    type Error = T::Error;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        T::set_frequency(self, hz)
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), Self::Error> {
        T::set_duty(self, duty)
    }
}
