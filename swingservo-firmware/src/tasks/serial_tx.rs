//! Serial transmit task
//!
//! Writes status messages to the serial port.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use swingservo_core::traits::StatusSink;
use swingservo_protocol::StatusMessage;

use crate::channels::STATUS_CHANNEL;

/// Serial TX task - sends status lines
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let msg = STATUS_CHANNEL.receive().await;
        match msg.render() {
            Ok(line) => {
                if let Err(e) = tx.write_all(line.as_bytes()).await {
                    warn!("Failed to send status: {:?}", e);
                }
            }
            Err(_) => warn!("Status message too long: {:?}", msg),
        }
    }
}

/// Status sink feeding the TX task
///
/// Never blocks the control loop; messages are dropped when the queue is full.
pub struct ChannelStatusSink;

impl StatusSink for ChannelStatusSink {
    fn report(&mut self, msg: StatusMessage) {
        info!("Status: {:?}", msg);
        if STATUS_CHANNEL.try_send(msg).is_err() {
            warn!("Status channel full, dropping message");
        }
    }
}
