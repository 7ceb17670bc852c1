//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use swingservo_protocol::{Line, StatusMessage};

/// Channel capacity for received command lines
const LINE_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outgoing status messages
const STATUS_CHANNEL_SIZE: usize = 8;

/// Complete lines received on the serial port, oldest first
///
/// The controller drains at most one line per loop iteration, so lines sent
/// during a swing wait here until it finishes.
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> =
    Channel::new();

/// Status messages waiting to be written to the serial port
pub static STATUS_CHANNEL: Channel<CriticalSectionRawMutex, StatusMessage, STATUS_CHANNEL_SIZE> =
    Channel::new();
