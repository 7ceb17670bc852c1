//! Status lines reported back to the host.

use core::fmt::{self, Write};

use heapless::String;

/// Terminator appended to every status line
pub const LINE_ENDING: &str = "\r\n";

/// Maximum rendered length of a status line, terminator included
pub const MAX_STATUS_LEN: usize = 96;

/// Status messages, one per event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusMessage {
    /// Startup banner listing the valid commands
    Ready,
    /// `s` accepted, swing starting
    SingleSwingStarted,
    /// Swing requested by `s` finished
    SingleSwingComplete,
    /// `c` accepted
    ContinuousStarted,
    /// `x` accepted, servo returning to center
    ContinuousStopped,
    /// Line started with a character that is not a command
    UnknownCommand(char),
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusMessage::Ready => f.write_str(
                "Starting servo control. Send commands via serial: 's', 'c', 'x'",
            ),
            StatusMessage::SingleSwingStarted => f.write_str("Command: Single swing initiated."),
            StatusMessage::SingleSwingComplete => f.write_str("Single swing complete."),
            StatusMessage::ContinuousStarted => {
                f.write_str("Command: Continuous swinging started.")
            }
            StatusMessage::ContinuousStopped => {
                f.write_str("Command: Continuous swinging stopped.")
            }
            StatusMessage::UnknownCommand(c) => write!(
                f,
                "Unknown command: '{}'. Use 's' for single, 'c' for continuous, 'x' to stop.",
                c
            ),
        }
    }
}

impl StatusMessage {
    /// Render the message as a terminated line ready for the UART
    pub fn render(&self) -> Result<String<MAX_STATUS_LEN>, fmt::Error> {
        let mut line = String::new();
        write!(line, "{}{}", self, LINE_ENDING)?;
        Ok(line)
    }
}
