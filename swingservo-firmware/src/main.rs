//! swingservo - Serial-Commanded Servo Swing Firmware
//!
//! Drives one hobby servo from a Raspberry Pi Pico. Commands arrive one per
//! line on UART0 (GP0 TX, GP1 RX):
//!
//! - `s` swings out and back once
//! - `c` keeps swinging until stopped
//! - `x` stops and returns to center
//!
//! The servo signal is on GP2 (PWM slice 1, channel A).

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use swingservo_core::ServoController;
use swingservo_hal_rp2040::{PwmChannel, RpServoPwm};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("swingservo firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load();
    info!("Configuration: {:?}", config);

    // Setup UART0 for commands and status
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config::SERIAL_BAUDRATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized at {} baud", config::SERIAL_BAUDRATE);

    // Servo signal on GP2; the slice stays off until the controller boots
    let pwm = Pwm::new_output_a(p.PWM_SLICE1, p.PIN_2, PwmConfig::default());
    let servo = RpServoPwm::new(pwm, PwmChannel::A);

    // config::load only returns configurations the controller accepts
    let controller = unwrap!(ServoController::new(servo, config));

    spawner.spawn(unwrap!(tasks::serial_rx_task(rx)));
    spawner.spawn(unwrap!(tasks::serial_tx_task(tx)));
    spawner.spawn(unwrap!(tasks::controller_task(controller)));

    info!("All tasks spawned, firmware running");
}
