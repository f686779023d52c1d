//! `franz-examples` entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    franz_examples::cli::run()
}
