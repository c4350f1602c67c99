//! Entente engine library.
//!
//! Exposes the board representation, rules engine, protocol, and self-play
//! modules for use by integration tests, benches, and the binary entry point.

pub mod board;
pub mod engine;
pub mod error;
pub mod event;
pub mod protocol;
pub mod rules;
pub mod sim;
