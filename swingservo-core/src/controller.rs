//! Servo controller
//!
//! Owns the servo output and the command state, and implements one pass of
//! the control loop:
//!
//! 1. Handle at most one received line (first character only)
//! 2. If continuous mode is active, swing once and pause
//! 3. Sleep the idle interval
//!
//! All waiting goes through the injected delay, so a swing in progress is
//! never interrupted by input handling.

use embedded_hal_async::delay::DelayNs;
use swingservo_protocol::{Command, CommandError, Line, StatusMessage};

use crate::config::{ConfigError, ControllerConfig};
use crate::motion::Swing;
use crate::servo::DutyMap;
use crate::state::State;
use crate::traits::{ServoOutput, StatusSink};

/// Command-driven servo controller
pub struct ServoController<S: ServoOutput> {
    /// Servo PWM output, owned for the program lifetime
    servo: S,
    /// Fixed configuration
    config: ControllerConfig,
    /// Angle-to-duty map derived from the calibration
    duty_map: DutyMap,
    /// Swing between the configured bounds
    swing: Swing,
    /// Current mode
    state: State,
}

impl<S: ServoOutput> ServoController<S> {
    /// Create a controller after validating the configuration
    pub fn new(servo: S, config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            servo,
            duty_map: config.calibration.duty_map(),
            swing: Swing::from_config(&config.swing),
            config,
            state: State::Idle,
        })
    }

    /// Current mode
    pub fn state(&self) -> State {
        self.state
    }

    /// Active configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Swing performed by `s` and by continuous mode
    pub fn swing(&self) -> &Swing {
        &self.swing
    }

    /// Access the servo output
    pub fn servo(&self) -> &S {
        &self.servo
    }

    /// Startup sequence
    ///
    /// Configures the PWM frequency, centers the servo, waits for the horn
    /// to settle and then announces readiness.
    pub async fn boot<D, R>(&mut self, delay: &mut D, status: &mut R) -> Result<(), S::Error>
    where
        D: DelayNs,
        R: StatusSink,
    {
        self.servo
            .set_frequency(self.config.calibration.pwm_frequency_hz)?;
        self.center()?;
        delay.delay_ms(self.config.timing.settle_ms).await;
        status.report(StatusMessage::Ready);
        Ok(())
    }

    /// Command the rest position
    pub fn center(&mut self) -> Result<(), S::Error> {
        self.move_to(self.config.center_deg)
    }

    /// Command an angle immediately, without interpolation
    pub fn move_to(&mut self, angle_deg: i16) -> Result<(), S::Error> {
        self.servo.set_duty(self.duty_map.duty_for(angle_deg))
    }

    /// Handle one received line
    ///
    /// Blank lines are ignored. Anything after the first character is
    /// discarded.
    pub async fn handle_line<D, R>(
        &mut self,
        line: &Line,
        delay: &mut D,
        status: &mut R,
    ) -> Result<(), S::Error>
    where
        D: DelayNs,
        R: StatusSink,
    {
        match line.first_char() {
            Some(c) => self.handle_char(c, delay, status).await,
            None => Ok(()),
        }
    }

    /// Handle a command character
    ///
    /// Unknown characters are reported and otherwise ignored.
    pub async fn handle_char<D, R>(
        &mut self,
        c: char,
        delay: &mut D,
        status: &mut R,
    ) -> Result<(), S::Error>
    where
        D: DelayNs,
        R: StatusSink,
    {
        match Command::from_char(c) {
            Ok(command) => self.handle_command(command, delay, status).await,
            Err(CommandError::Unrecognized(c)) => {
                status.report(StatusMessage::UnknownCommand(c));
                Ok(())
            }
        }
    }

    /// Execute a decoded command
    pub async fn handle_command<D, R>(
        &mut self,
        command: Command,
        delay: &mut D,
        status: &mut R,
    ) -> Result<(), S::Error>
    where
        D: DelayNs,
        R: StatusSink,
    {
        self.state = self.state.transition(command);

        match command {
            Command::SingleSwing => {
                status.report(StatusMessage::SingleSwingStarted);
                self.swing
                    .run(self.duty_map, &mut self.servo, delay)
                    .await?;
                status.report(StatusMessage::SingleSwingComplete);
            }
            Command::StartContinuous => {
                status.report(StatusMessage::ContinuousStarted);
            }
            Command::StopContinuous => {
                status.report(StatusMessage::ContinuousStopped);
                self.center()?;
            }
        }
        Ok(())
    }

    /// Swing once and pause if continuous mode is active
    ///
    /// Returns whether a swing was performed.
    pub async fn run_continuous<D: DelayNs>(&mut self, delay: &mut D) -> Result<bool, S::Error> {
        if !self.state.is_continuous() {
            return Ok(false);
        }
        self.swing
            .run(self.duty_map, &mut self.servo, delay)
            .await?;
        delay.delay_ms(self.config.timing.continuous_pause_ms).await;
        Ok(true)
    }

    /// One iteration of the control loop
    ///
    /// The idle delay is always taken, even when the servo output reports an
    /// error, so a failing output cannot turn the loop into a busy spin.
    pub async fn step<D, R>(
        &mut self,
        line: Option<&Line>,
        delay: &mut D,
        status: &mut R,
    ) -> Result<(), S::Error>
    where
        D: DelayNs,
        R: StatusSink,
    {
        let mut result = match line {
            Some(line) => self.handle_line(line, delay, status).await,
            None => Ok(()),
        };
        if result.is_ok() {
            result = self.run_continuous(delay).await.map(|_| ());
        }
        delay.delay_ms(self.config.timing.idle_ms).await;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockDelay, MockServo, MockStatus};
    use embassy_futures::block_on;

    const CENTER_DUTY: u16 = 5000;
    const LOW_DUTY: u16 = 2666;
    const HIGH_DUTY: u16 = 7333;
    const SWING_UPDATES: usize = 62;

    fn booted() -> (
        ServoController<MockServo>,
        MockDelay,
        MockStatus,
    ) {
        let mut controller =
            ServoController::new(MockServo::new(), ControllerConfig::default()).unwrap();
        let mut delay = MockDelay::new();
        let mut status = MockStatus::new();
        block_on(controller.boot(&mut delay, &mut status)).unwrap();
        (controller, delay, status)
    }

    fn line(text: &str) -> Line {
        Line::from_bytes(text.as_bytes())
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = ControllerConfig::default();
        config.swing.steps = 0;
        let result = ServoController::new(MockServo::new(), config);
        assert!(matches!(result, Err(ConfigError::ZeroSteps)));
    }

    #[test]
    fn test_boot_centers_once() {
        let (controller, delay, status) = booted();

        assert_eq!(controller.state(), State::Idle);
        assert_eq!(controller.servo().frequency_hz, Some(50));
        assert_eq!(controller.servo().duties.as_slice(), &[CENTER_DUTY]);
        assert_eq!(delay.elapsed_ms(), 1000);
        assert_eq!(status.messages.as_slice(), &[StatusMessage::Ready]);
    }

    #[test]
    fn test_single_swing_from_idle() {
        let (mut controller, mut delay, mut status) = booted();

        block_on(controller.handle_line(&line("s"), &mut delay, &mut status)).unwrap();

        let duties = &controller.servo().duties;
        assert_eq!(duties.len(), 1 + SWING_UPDATES);
        assert_eq!(duties[1], LOW_DUTY);
        assert_eq!(duties[1 + 30], HIGH_DUTY);
        assert_eq!(duties[SWING_UPDATES], LOW_DUTY);
        assert_eq!(controller.state(), State::Idle);
        assert_eq!(
            &status.messages[1..],
            &[
                StatusMessage::SingleSwingStarted,
                StatusMessage::SingleSwingComplete
            ]
        );
    }

    #[test]
    fn test_single_swing_keeps_continuous_mode() {
        let (mut controller, mut delay, mut status) = booted();

        block_on(controller.handle_char('c', &mut delay, &mut status)).unwrap();
        block_on(controller.handle_char('s', &mut delay, &mut status)).unwrap();

        assert_eq!(controller.state(), State::Continuous);
        assert_eq!(controller.servo().duties.len(), 1 + SWING_UPDATES);
    }

    #[test]
    fn test_continuous_then_stop_sequence() {
        let (mut controller, mut delay, mut status) = booted();

        for c in ['c', 's', 'x'] {
            block_on(controller.handle_char(c, &mut delay, &mut status)).unwrap();
        }

        assert_eq!(controller.state(), State::Idle);
        assert!(!controller.state().is_continuous());
        assert_eq!(controller.servo().last_duty(), Some(CENTER_DUTY));
        assert_eq!(
            &status.messages[1..],
            &[
                StatusMessage::ContinuousStarted,
                StatusMessage::SingleSwingStarted,
                StatusMessage::SingleSwingComplete,
                StatusMessage::ContinuousStopped,
            ]
        );
    }

    #[test]
    fn test_unknown_command_changes_nothing() {
        for start in ['x', 'c'] {
            let (mut controller, mut delay, mut status) = booted();
            block_on(controller.handle_char(start, &mut delay, &mut status)).unwrap();
            let state = controller.state();
            let duties = controller.servo().duties.len();

            block_on(controller.handle_line(&line("q"), &mut delay, &mut status)).unwrap();

            assert_eq!(controller.state(), state);
            assert_eq!(controller.servo().duties.len(), duties);
            assert_eq!(
                status.messages.last(),
                Some(&StatusMessage::UnknownCommand('q'))
            );
        }
    }

    #[test]
    fn test_empty_line_ignored() {
        let (mut controller, mut delay, mut status) = booted();
        let elapsed = delay.elapsed_ms();

        for text in ["", "   ", "\t"] {
            block_on(controller.handle_line(&line(text), &mut delay, &mut status)).unwrap();
        }

        assert_eq!(controller.state(), State::Idle);
        assert_eq!(controller.servo().duties.len(), 1);
        assert_eq!(status.messages.len(), 1);
        assert_eq!(delay.elapsed_ms(), elapsed);
    }

    #[test]
    fn test_trailing_characters_discarded() {
        let (mut controller, mut delay, mut status) = booted();

        block_on(controller.handle_line(&line("cxs"), &mut delay, &mut status)).unwrap();

        assert_eq!(controller.state(), State::Continuous);
        assert_eq!(controller.servo().duties.len(), 1);
    }

    #[test]
    fn test_idle_step_only_sleeps() {
        let (mut controller, mut delay, mut status) = booted();
        let before = delay.elapsed_ms();

        block_on(controller.step(None, &mut delay, &mut status)).unwrap();

        assert_eq!(delay.elapsed_ms() - before, 50);
        assert_eq!(controller.servo().duties.len(), 1);
    }

    #[test]
    fn test_continuous_loop_until_stopped() {
        let (mut controller, mut delay, mut status) = booted();

        // 'c' arrives and the same iteration already swings
        let before = delay.elapsed_ms();
        block_on(controller.step(Some(&line("c")), &mut delay, &mut status)).unwrap();
        assert_eq!(controller.servo().duties.len(), 1 + SWING_UPDATES);
        assert_eq!(delay.elapsed_ms() - before, 496 + 500 + 50);

        // No input, keeps swinging
        for _ in 0..2 {
            block_on(controller.step(None, &mut delay, &mut status)).unwrap();
        }
        assert_eq!(controller.servo().duties.len(), 1 + 3 * SWING_UPDATES);
        assert_eq!(controller.servo().last_duty(), Some(LOW_DUTY));

        // Stop returns to center without another swing
        block_on(controller.step(Some(&line("x")), &mut delay, &mut status)).unwrap();
        assert_eq!(controller.state(), State::Idle);
        assert_eq!(controller.servo().duties.len(), 2 + 3 * SWING_UPDATES);
        assert_eq!(controller.servo().last_duty(), Some(CENTER_DUTY));

        // And stays there
        block_on(controller.step(None, &mut delay, &mut status)).unwrap();
        assert_eq!(controller.servo().duties.len(), 2 + 3 * SWING_UPDATES);
    }

    #[test]
    fn test_step_sleeps_even_on_output_error() {
        let (mut controller, mut delay, mut status) = booted();
        controller.servo.fail_after = Some(3);
        let before = delay.elapsed_ms();

        let result = block_on(controller.step(Some(&line("s")), &mut delay, &mut status));

        assert!(result.is_err());
        // Two swing delays of 8ms, then the idle delay
        assert_eq!(delay.elapsed_ms() - before, 2 * 8 + 50);
        // Completion is not reported for an aborted swing
        assert_eq!(status.messages.last(), Some(&StatusMessage::SingleSwingStarted));
    }
}
