//! Rastrum - Command-line tool for rendering overlapping shapes from TOML scenes

use std::process::ExitCode;

use rastrum::cli;

fn main() -> ExitCode {
    cli::run()
}
