//! Servo controller task
//!
//! Boots the servo, then runs the control loop forever: take at most one
//! queued line, swing if continuous mode is active, sleep.

use defmt::*;
use embassy_time::Delay;

use swingservo_core::ServoController;
use swingservo_hal_rp2040::RpServoPwm;

use crate::channels::LINE_CHANNEL;
use crate::tasks::ChannelStatusSink;

/// Controller task - owns the servo for the program lifetime
#[embassy_executor::task]
pub async fn controller_task(mut controller: ServoController<RpServoPwm<'static>>) {
    info!("Controller task started");

    let mut delay = Delay;
    let mut status = ChannelStatusSink;

    if let Err(e) = controller.boot(&mut delay, &mut status).await {
        error!("Servo boot failed: {:?}", e);
    }
    info!(
        "Servo centered at {} deg, swing {}..{} deg",
        controller.config().center_deg,
        controller.swing().start_deg(),
        controller.swing().end_deg()
    );

    let calibration = controller.config().calibration;
    info!(
        "Pulse width {}us at 0 deg, {}us at 180 deg",
        calibration.pulse_width_us(calibration.min_duty),
        calibration.pulse_width_us(calibration.max_duty)
    );
    if let Some(timing) = controller.servo().timing() {
        debug!("PWM timing: {:?}", timing);
    }

    loop {
        let line = LINE_CHANNEL.try_receive().ok();
        let previous = controller.state();

        if let Err(e) = controller.step(line.as_ref(), &mut delay, &mut status).await {
            warn!("Servo update failed: {:?}", e);
        }

        if controller.state() != previous {
            info!("State: {:?} -> {:?}", previous, controller.state());
        }
    }
}
