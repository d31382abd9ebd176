#![deny(warnings)]

mod cli;
mod controller;
mod terminal;

use std::process::ExitCode;

fn main() -> ExitCode {
    match cli::run_cli() {
        Ok(cli::CliOutcome::Handled) => ExitCode::SUCCESS,
        Ok(cli::CliOutcome::NotHandled) => terminal::run(),
        Err(err) => {
            eprintln!("capesearch: {err}");
            ExitCode::FAILURE
        }
    }
}
