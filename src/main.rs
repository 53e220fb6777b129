use c2v::driver::{Cli, TranslateDriver};
use c2v::error::report;
use clap::Parser as ClapParser;
use log::info;
use std::process::exit;

/// The main entry point for the application.
///
/// Parses command-line arguments and runs the translator.
fn main() {
    if !run() {
        exit(1);
    }
}

/// Runs the translator, printing a diagnostic on failure.
fn run() -> bool {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut driver = TranslateDriver::new(cli);
    match driver.run() {
        Ok(outputs) => {
            info!(
                "translated {} files, skipped {}",
                outputs.units.len(),
                outputs.skipped.len()
            );
            true
        }
        Err(e) => {
            report(&driver.report(&e));
            false
        }
    }
}
