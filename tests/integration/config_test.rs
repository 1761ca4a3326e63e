use std::fs;

use tempfile::TempDir;
use wellz::core::config::{Config, GraphStyle, TempUnit, MAX_REFRESH_RATE};
use wellz::core::system_monitor::SortBy;

#[test]
fn test_missing_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_defaults_match_documented_values() {
    let config = Config::default();
    assert_eq!(config.general.refresh_rate, 1.0);
    assert_eq!(config.general.history_size, 120);
    assert_eq!(config.display.graph_style, GraphStyle::Braille);
    assert_eq!(config.display.graph_height, 5);
    assert_eq!(config.display.max_cores, 8);
    assert_eq!(config.theme.name, "default");
    assert_eq!(config.processes.sort_by, SortBy::Cpu);
    assert!(config.processes.sort_descending);
    assert_eq!(config.processes.max_processes, 20);
    assert!(config.keybindings.vim_mode);
    assert_eq!(config.advanced.temp_unit, TempUnit::Celsius);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        "[display]\ngraph_style = \"ascii\"\n\n[processes]\nsort_by = \"name\"\n",
    )
    .unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.display.graph_style, GraphStyle::Ascii);
    assert_eq!(config.processes.sort_by, SortBy::Name);
    assert!(config.display.show_cpu);
    assert_eq!(config.general, Config::default().general);
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[general\nrefresh_rate = ").unwrap();
    assert!(Config::load_from(&path).is_err());
}

#[test]
fn test_out_of_range_refresh_is_clamped() {
    let config = Config::parse("[general]\nrefresh_rate = 99\n").unwrap();
    assert_eq!(config.general.refresh_rate, MAX_REFRESH_RATE);
}

#[test]
fn test_init_default_writes_once() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    assert!(Config::init_default(&path).unwrap());
    assert!(!Config::init_default(&path).unwrap());
    assert_eq!(Config::load_from(&path).unwrap(), Config::default());
}
