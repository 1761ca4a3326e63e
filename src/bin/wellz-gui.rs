use std::process::ExitCode;

use colored::Colorize;
use wellz::core::config::Config;

fn main() -> ExitCode {
    wellz::init_logging();

    let result = Config::load()
        .map_err(anyhow::Error::from)
        .and_then(wellz::gui::run);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
