//! Text protocol handling.
//!
//! Implements the line-based command protocol the transport uses to drive
//! the engine: command parsing for the main loop, with query responses
//! serialized as JSON by the engine session.

pub mod parser;

pub use parser::{parse_command, Command, Query};
