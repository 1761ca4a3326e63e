use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;

use wellz::commands;
use wellz::core::config::Config;
use wellz::core::theme::{Theme, THEMES};

fn build_cli() -> Command {
    Command::new("wellz")
        .version(env!("CARGO_PKG_VERSION"))
        .about("System stats dashboard for the terminal")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('v')
                .short_alias('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("static")
                .short('s')
                .long("static")
                .help("Print the panels once and exit")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["legacy", "json"]),
        )
        .arg(
            Arg::new("legacy")
                .short('l')
                .long("legacy")
                .help("Redraw the static panels every interval")
                .action(ArgAction::SetTrue)
                .conflicts_with("json"),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECS")
                .help("Seconds between redraws in legacy mode")
                .value_parser(parse_interval)
                .default_value("1.0"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one metrics snapshot as JSON and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Config file to use instead of the default location")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("NAME")
                .help("Color theme (see --list-themes)"),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .help("Write a default config file and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-themes")
                .long("list-themes")
                .help("List available themes and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("completions")
                .long("completions")
                .value_name("SHELL")
                .help("Print shell completions (bash, zsh, fish, powershell, elvish)"),
        )
}

/// Legacy redraw interval: any finite positive number of seconds.
fn parse_interval(value: &str) -> Result<f64, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !secs.is_finite() || secs <= 0.0 {
        return Err(format!("interval must be a positive number of seconds, got {}", value));
    }
    Ok(secs)
}

fn main() -> ExitCode {
    wellz::init_logging();

    match run(build_cli().get_matches()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(matches: ArgMatches) -> Result<()> {
    if matches.get_flag("version") {
        println!("wellz version {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(shell) = matches.get_one::<String>("completions") {
        return commands::completions::execute(shell, &mut build_cli());
    }

    let config_path = matches.get_one::<PathBuf>("config").cloned();
    let path = match &config_path {
        Some(path) => path.clone(),
        None => Config::default_path()?,
    };

    if matches.get_flag("init-config") {
        return commands::config::init(&path);
    }

    let mut config = Config::load_from(&path)
        .with_context(|| format!("Invalid config file {}", path.display()))?;

    if let Some(name) = matches.get_one::<String>("theme") {
        if !THEMES.iter().any(|t| t.key.eq_ignore_ascii_case(name.trim())) {
            log::warn!("Unknown theme '{}', using default", name);
        }
        config.theme.name = name.clone();
    }
    let theme = Theme::by_name(&config.theme.name);

    if matches.get_flag("list-themes") {
        commands::config::list_themes(theme);
        return Ok(());
    }

    if matches.get_flag("json") {
        return commands::run_json(&config);
    }
    if matches.get_flag("static") {
        return commands::run_static(&config, theme);
    }
    if matches.get_flag("legacy") {
        let interval = matches.get_one::<f64>("interval").copied().unwrap_or(1.0);
        return commands::run_legacy(&config, theme, interval);
    }

    commands::dashboard(config, Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn test_static_conflicts_with_json() {
        let result = build_cli().try_get_matches_from(["wellz", "--static", "--json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_interval_parses() {
        let matches = build_cli()
            .try_get_matches_from(["wellz", "-l", "-i", "2.5"])
            .unwrap();
        assert_eq!(matches.get_one::<f64>("interval"), Some(&2.5));
    }

    #[test]
    fn test_long_interval_is_kept() {
        let matches = build_cli()
            .try_get_matches_from(["wellz", "-l", "-i", "30"])
            .unwrap();
        assert_eq!(matches.get_one::<f64>("interval"), Some(&30.0));
    }

    #[test]
    fn test_non_positive_interval_is_rejected() {
        for bad in ["0", "-1", "inf", "NaN", "soon"] {
            let result = build_cli().try_get_matches_from(["wellz", "-l", "-i", bad]);
            assert!(result.is_err(), "{} should be rejected", bad);
        }
    }
}
