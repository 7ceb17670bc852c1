//! Mock doubles for unit tests

use embedded_hal_async::delay::DelayNs;
use heapless::Vec;
use swingservo_protocol::StatusMessage;

use crate::traits::{ServoOutput, StatusSink};

/// Servo output that records every call
pub struct MockServo {
    pub frequency_hz: Option<u32>,
    pub duties: Vec<u16, 1024>,
    /// Fail `set_duty` once this many duties were recorded
    pub fail_after: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputFault;

impl MockServo {
    pub fn new() -> Self {
        Self {
            frequency_hz: None,
            duties: Vec::new(),
            fail_after: None,
        }
    }

    pub fn last_duty(&self) -> Option<u16> {
        self.duties.last().copied()
    }
}

impl ServoOutput for MockServo {
    type Error = OutputFault;

    fn set_frequency(&mut self, hz: u32) -> Result<(), Self::Error> {
        self.frequency_hz = Some(hz);
        Ok(())
    }

    fn set_duty(&mut self, duty: u16) -> Result<(), Self::Error> {
        if let Some(limit) = self.fail_after {
            if self.duties.len() >= limit {
                return Err(OutputFault);
            }
        }
        self.duties.push(duty).map_err(|_| OutputFault)
    }
}

/// Delay that only advances a simulated clock
pub struct MockDelay {
    elapsed_ns: u64,
    pub calls: u32,
}

impl MockDelay {
    pub fn new() -> Self {
        Self {
            elapsed_ns: 0,
            calls: 0,
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.elapsed_ns += ns as u64;
        self.calls += 1;
    }

    async fn delay_ms(&mut self, ms: u32) {
        self.elapsed_ns += ms as u64 * 1_000_000;
        self.calls += 1;
    }
}

/// Status sink that keeps every message
pub struct MockStatus {
    pub messages: Vec<StatusMessage, 64>,
}

impl MockStatus {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }
}

impl StatusSink for MockStatus {
    fn report(&mut self, msg: StatusMessage) {
        let _ = self.messages.push(msg);
    }
}
