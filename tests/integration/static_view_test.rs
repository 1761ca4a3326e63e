use wellz::core::config::Config;
use wellz::core::system_monitor::{
    Availability, DerivedRates, SecurityPosture, SystemMetrics, Unavailable, PLACEHOLDER,
};
use wellz::core::theme::Theme;
use wellz::ui::formatters::{format_size, format_speed, format_uptime, strip_ansi};
use wellz::ui::panels::{render_static, StaticView};

#[test]
fn test_static_view_shows_placeholders_for_missing_metrics() {
    let metrics = SystemMetrics::default();
    let security: Availability<SecurityPosture> =
        Availability::Unavailable(Unavailable::UnsupportedPlatform);
    let config = Config::default();

    let view = StaticView {
        metrics: &metrics,
        rates: DerivedRates::default(),
        history: None,
        processes: &[],
        security: &security,
        config: &config,
        theme: Theme::by_name("nord"),
    };
    let output = render_static(&view);
    let plain = strip_ansi(&output);

    for title in ["SYSTEM", "CPU", "GPU", "MEMORY", "DISK", "NETWORK", "SECURITY"] {
        assert!(plain.contains(title), "missing {}", title);
    }
    assert!(plain.contains(PLACEHOLDER));
    assert!(plain.contains("╭─"));
}

#[test]
fn test_hidden_sections_are_omitted() {
    let metrics = SystemMetrics::default();
    let security: Availability<SecurityPosture> = Availability::default();
    let mut config = Config::default();
    config.display.show_gpu = false;
    config.display.show_security = false;

    let view = StaticView {
        metrics: &metrics,
        rates: DerivedRates::default(),
        history: None,
        processes: &[],
        security: &security,
        config: &config,
        theme: Theme::by_name("default"),
    };
    let plain = strip_ansi(&render_static(&view)).to_string();
    assert!(!plain.contains(" GPU "));
    assert!(!plain.contains(" SECURITY "));
}

#[test]
fn test_formatting() {
    assert_eq!(format_size(0), "0 B");
    assert_eq!(format_size(1536), "1.5 KB");
    assert_eq!(format_speed(2560.0), "2.5 KB/s");
    assert_eq!(format_uptime(2 * 86_400 + 3 * 3_600 + 4 * 60), "2d 3h 4m");
}
