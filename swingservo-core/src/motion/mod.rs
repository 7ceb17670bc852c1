//! Motion generation
//!
//! Open-loop, constant-speed swings built from evenly spaced duty updates.

pub mod swing;

pub use swing::{Swing, SwingPass, SwingPath, SwingStep, DEFAULT_STEPS};
