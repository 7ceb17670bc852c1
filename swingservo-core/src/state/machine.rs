//! State machine definition

use swingservo_protocol::Command;

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Servo holds position, swings only on request
    #[default]
    Idle,
    /// Servo swings every loop iteration until stopped
    Continuous,
}

impl State {
    /// Check if the loop should swing on its own
    pub fn is_continuous(&self) -> bool {
        matches!(self, State::Continuous)
    }

    /// Process a command and return the next state
    ///
    /// A single swing never changes the mode; it runs the same way from
    /// either state.
    pub fn transition(self, command: Command) -> Self {
        use Command::*;

        match command {
            SingleSwing => self,
            StartContinuous => State::Continuous,
            StopContinuous => State::Idle,
        }
    }
}
