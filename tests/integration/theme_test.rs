use wellz::core::theme::{Role, Theme, ThemeCycle, THEMES};

#[test]
fn test_cycle_returns_to_start() {
    let n = THEMES.len();
    for k in 1..=3 {
        let mut cycle = ThemeCycle::new("nord");
        let start = cycle.current().key;
        for _ in 0..k * n {
            cycle.next();
        }
        assert_eq!(cycle.current().key, start);

        for _ in 0..k * n {
            cycle.prev();
        }
        assert_eq!(cycle.current().key, start);
    }
}

#[test]
fn test_unknown_name_gives_default() {
    assert_eq!(Theme::by_name("not-a-theme").key, "default");
    assert_eq!(ThemeCycle::new("not-a-theme").current().key, "default");
}

#[test]
fn test_lookup_is_case_insensitive() {
    assert_eq!(Theme::by_name("Dracula").key, "dracula");
    assert_eq!(Theme::by_name(" TOKYO ").key, "tokyo");
}

#[test]
fn test_theme_order() {
    let names: Vec<&str> = Theme::names().collect();
    assert_eq!(
        names,
        vec!["default", "dracula", "nord", "gruvbox", "monokai", "solarized", "tokyo", "catppuccin"]
    );
}

#[test]
fn test_usage_thresholds() {
    assert_eq!(Role::for_usage(49.9), Role::Normal);
    assert_eq!(Role::for_usage(50.0), Role::Warning);
    assert_eq!(Role::for_usage(79.9), Role::Warning);
    assert_eq!(Role::for_usage(80.0), Role::Critical);
}
