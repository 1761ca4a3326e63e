use wellz::core::system_monitor::{Availability, SystemMetrics, Unavailable, PLACEHOLDER};

#[test]
fn test_unavailable_renders_placeholder() {
    let value: Availability<f32> = Availability::Unavailable(Unavailable::ToolMissing("nvidia-smi".into()));
    assert_eq!(value.display_or_placeholder(|v| format!("{:.1}", v)), PLACEHOLDER);
}

#[test]
fn test_available_renders_value() {
    let value = Availability::Available(42.0_f32);
    assert_eq!(value.display_or_placeholder(|v| format!("{:.1}", v)), "42.0");
}

#[test]
fn test_missing_tool_is_not_an_error() {
    let result = wellz::platform::run_tool("wellz-no-such-tool-xyz", &["--version"]);
    assert!(matches!(
        result,
        Availability::Unavailable(Unavailable::ToolMissing(_))
    ));
}

#[test]
fn test_default_snapshot_serializes_unavailable_sections() {
    let json = serde_json::to_value(SystemMetrics::default()).unwrap();
    assert_eq!(json["gpu"]["status"], "unavailable");
    assert_eq!(json["battery"]["status"], "unavailable");
}
