//! Command state machine
//!
//! The controller is either idle or swinging continuously. Host commands
//! are the only events; see [`State::transition`].

pub mod machine;

pub use machine::State;
