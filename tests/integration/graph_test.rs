use wellz::core::config::GraphStyle;
use wellz::ui::graph::{bar, braille_dual, render, sparkline};

#[test]
fn test_render_dimensions_for_every_style() {
    let data: Vec<f64> = (0..50).map(|i| (i * 2) as f64).collect();
    for style in [GraphStyle::Braille, GraphStyle::Block, GraphStyle::Ascii] {
        let rows = render(style, &data, 20, 4, 0.0, 100.0);
        assert_eq!(rows.len(), 4, "{:?}", style);
        assert!(rows.iter().all(|r| r.chars().count() == 20), "{:?}", style);
    }
}

#[test]
fn test_short_series_is_padded_on_the_left() {
    let rows = render(GraphStyle::Block, &[100.0], 4, 1, 0.0, 100.0);
    assert_eq!(rows[0], "   █");
}

#[test]
fn test_dual_graph_dimensions() {
    let rows = braille_dual(&[10.0, 20.0], &[30.0], 6, 3, 0.0, 100.0);
    assert_eq!(rows.len(), 3);
    assert!(rows.iter().all(|r| r.len() == 6));
}

#[test]
fn test_sparkline_width() {
    assert_eq!(sparkline(&[1.0, 2.0, 3.0], 10, 0.0, 3.0).chars().count(), 10);
    assert_eq!(sparkline(&[], 4, 0.0, 1.0), "    ");
}

#[test]
fn test_bar_fills_proportionally() {
    let (filled, empty) = bar(25.0, 20);
    assert_eq!(filled.chars().count(), 5);
    assert_eq!(empty.chars().count(), 15);
}
