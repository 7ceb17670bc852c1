//! Serial Command Protocol
//!
//! This crate defines the text protocol spoken over the servo controller's
//! serial link. The protocol is deliberately minimal: the host types one
//! character and presses enter.
//!
//! # Protocol Overview
//!
//! Host to controller, one command per line:
//! ```text
//! s\n   single swing
//! c\n   start continuous swinging
//! x\n   stop continuous swinging, return to center
//! ```
//!
//! Only the first non-whitespace character of a line is significant. Lines
//! end with `\n` or `\r`; empty lines are ignored.
//!
//! Controller to host: one human-readable status line per event, terminated
//! with `\r\n` (see [`StatusMessage`]).

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod status;

pub use command::{Command, CommandError, VALID_COMMANDS};
pub use line::{Line, LineParser, MAX_LINE_LEN};
pub use status::{StatusMessage, LINE_ENDING, MAX_STATUS_LEN};
