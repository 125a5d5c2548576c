//! Jot binary entry point.

use std::fmt::Display;
use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(exit_status(jot_gui::run()))
}

/// Status byte for the window's outcome. Failures are reported on stderr.
fn exit_status<E: Display>(outcome: Result<(), E>) -> u8 {
    match outcome {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("{}", startup_failure(&err));
            1
        }
    }
}

fn startup_failure(err: &dyn Display) -> String {
    format!("jot: {}", err)
}
