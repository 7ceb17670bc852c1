//! Commands accepted from the host.

/// Characters that map to a [`Command`]
pub const VALID_COMMANDS: [char; 3] = ['s', 'c', 'x'];

/// Host commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `s` - perform one swing between the bounds
    SingleSwing,
    /// `c` - swing repeatedly until stopped
    StartContinuous,
    /// `x` - stop continuous swinging and return to center
    StopContinuous,
}

/// Errors that can occur when decoding a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// Character is not one of [`VALID_COMMANDS`]
    Unrecognized(char),
}

impl Command {
    /// Decode a command character (case-sensitive)
    pub fn from_char(c: char) -> Result<Self, CommandError> {
        match c {
            's' => Ok(Command::SingleSwing),
            'c' => Ok(Command::StartContinuous),
            'x' => Ok(Command::StopContinuous),
            other => Err(CommandError::Unrecognized(other)),
        }
    }

    /// The character that encodes this command
    pub fn as_char(self) -> char {
        match self {
            Command::SingleSwing => 's',
            Command::StartContinuous => 'c',
            Command::StopContinuous => 'x',
        }
    }
}

impl TryFrom<char> for Command {
    type Error = CommandError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Self::from_char(c)
    }
}
