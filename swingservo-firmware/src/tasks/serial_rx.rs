//! Serial receive task
//!
//! Splits incoming bytes into lines and queues them for the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use swingservo_protocol::{Line, LineParser, MAX_LINE_LEN};

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - receives command lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    if let Some(line) = parser.feed(byte) {
                        queue_line(line);
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                // A partial line may be corrupt
                warn!(
                    "UART read error: {:?}, discarding {} buffered bytes",
                    e,
                    parser.pending()
                );
                parser.reset();
            }
        }
    }
}

/// Hand a complete line to the controller
fn queue_line(line: Line) {
    // "\r\n" yields an empty line after the "\r"
    if line.as_bytes().is_empty() {
        return;
    }
    if line.is_truncated() {
        debug!("Line longer than {} bytes, tail discarded", MAX_LINE_LEN);
    }
    trace!("Line: {=[u8]:a}", line.as_bytes());

    if LINE_CHANNEL.try_send(line).is_err() {
        warn!("Line channel full, dropping line");
    }
}
