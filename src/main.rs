//! Entente -- a diplomatic strategy engine implementing the ECI protocol.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! following the ECI (Entente Command Interface) convention.

use std::io::{self, BufRead};

use entente::engine::Engine;
use entente::protocol::{parse_command, Command};

/// Runs the main ECI protocol loop, reading commands from stdin
/// and writing responses to stdout.
fn main() {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::Eci => {
                engine.handle_eci(&mut out);
            }
            Command::IsReady => {
                engine.handle_isready(&mut out);
            }
            Command::NewGame => {
                engine.new_game();
            }
            Command::SetPlayer { player } => {
                engine.set_player(player);
            }
            Command::Act(action) => {
                engine.handle_action(action, &mut out);
            }
            Command::Query(query) => {
                engine.handle_query(query, &mut out);
            }
            Command::Quit => {
                break;
            }
        }
    }
}
