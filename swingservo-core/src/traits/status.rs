//! Status reporting trait

use swingservo_protocol::StatusMessage;

/// Destination for status messages (usually the serial console)
///
/// Reporting never fails from the controller's point of view; sinks that
/// can run out of room drop the message.
pub trait StatusSink {
    /// Report one status event
    fn report(&mut self, msg: StatusMessage);
}

impl<T: StatusSink + ?Sized> StatusSink for &mut T {
    fn report(&mut self, msg: StatusMessage) {
        T::report(self, msg)
    }
}
