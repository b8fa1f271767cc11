//! gooper binary entry point.

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;

use gooper::cli::{self, Cli};
use gooper::ui::output;

/// Exit status for usage, help and argument errors.
const EXIT_USAGE: u8 = 1;
/// Exit status for a failed command.
const EXIT_FAILURE: u8 = 2;

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Printing can only fail if the terminal is gone.
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::from(EXIT_USAGE),
            };
        }
    };

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{:#}", err));
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
