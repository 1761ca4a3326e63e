//! Text graphs: braille, block and ASCII renderers, sparklines and bars.
//!
//! Renderers return plain rows (top row first) and leave coloring to the
//! caller. Values are clamped into `[min, max]` and the series is fit to
//! the graph width by keeping the newest points and zero-padding the
//! front.

use crate::core::config::GraphStyle;

const BRAILLE_BASE: u32 = 0x2800;

/// Dot bit for (row, column) inside one braille cell
const BRAILLE_DOTS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

pub const BLOCK_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];
pub const ASCII_CHARS: [char; 8] = [' ', '.', '_', '-', '=', '+', '#', '@'];

pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '░';

fn fit(data: &[f64], width: usize) -> Vec<f64> {
    let skip = data.len().saturating_sub(width);
    let mut out = vec![0.0; width.saturating_sub(data.len())];
    out.extend_from_slice(&data[skip..]);
    out
}

fn normalize(value: f64, min: f64, max: f64) -> f64 {
    let range = if max == min { 1.0 } else { max - min };
    (value.clamp(min.min(max), max.max(min)) - min) / range
}

/// Render with the configured style.
pub fn render(style: GraphStyle, data: &[f64], width: usize, height: usize, min: f64, max: f64) -> Vec<String> {
    match style {
        GraphStyle::Braille => braille(data, width, height, min, max),
        GraphStyle::Block => levels(data, width, height, min, max, &BLOCK_CHARS),
        GraphStyle::Ascii => levels(data, width, height, min, max, &ASCII_CHARS),
    }
}

/// Column heights in dots, filled from the bottom.
fn dot_heights(data: &[f64], columns: usize, dots_height: usize, min: f64, max: f64) -> Vec<usize> {
    fit(data, columns)
        .into_iter()
        .map(|v| (normalize(v, min, max) * dots_height as f64) as usize)
        .collect()
}

fn braille_cell(heights: [Option<usize>; 2], row: usize, height: usize) -> u8 {
    let dots_height = height * 4;
    let mut bits = 0u8;
    for (dy, dot_row) in BRAILLE_DOTS.iter().enumerate() {
        // distance of this dot row from the bottom of the graph
        let from_bottom = dots_height - 1 - (row * 4 + dy);
        for (dx, bit) in dot_row.iter().enumerate() {
            if heights[dx].is_some_and(|h| from_bottom < h) {
                bits |= bit;
            }
        }
    }
    bits
}

fn braille_char(bits: u8) -> char {
    char::from_u32(BRAILLE_BASE + bits as u32).unwrap_or(' ')
}

/// 2x4 dots per cell: two samples per column, four levels per row.
pub fn braille(data: &[f64], width: usize, height: usize, min: f64, max: f64) -> Vec<String> {
    let heights = dot_heights(data, width * 2, height * 4, min, max);
    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| {
                    let pair = [Some(heights[col * 2]), Some(heights[col * 2 + 1])];
                    braille_char(braille_cell(pair, row, height))
                })
                .collect()
        })
        .collect()
}

/// Which series lit a dual-graph cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Series {
    None,
    First,
    Second,
    Both,
}

/// Two series in one braille graph: the first in the left dot column of
/// each cell, the second in the right.
pub fn braille_dual(
    first: &[f64],
    second: &[f64],
    width: usize,
    height: usize,
    min: f64,
    max: f64,
) -> Vec<Vec<(char, Series)>> {
    let a = dot_heights(first, width, height * 4, min, max);
    let b = dot_heights(second, width, height * 4, min, max);

    (0..height)
        .map(|row| {
            (0..width)
                .map(|col| {
                    let left = braille_cell([Some(a[col]), None], row, height);
                    let right = braille_cell([None, Some(b[col])], row, height);
                    let series = match (left != 0, right != 0) {
                        (true, true) => Series::Both,
                        (true, false) => Series::First,
                        (false, true) => Series::Second,
                        (false, false) => Series::None,
                    };
                    (braille_char(left | right), series)
                })
                .collect()
        })
        .collect()
}

/// One sample per column, `chars.len() - 1` levels per row.
fn levels(data: &[f64], width: usize, height: usize, min: f64, max: f64, chars: &[char]) -> Vec<String> {
    let per_row = chars.len() - 1;
    let heights = dot_heights(data, width, height * per_row, min, max);

    (0..height)
        .map(|row| {
            let row_bottom = (height - 1 - row) * per_row;
            let row_top = row_bottom + per_row;
            heights
                .iter()
                .map(|&h| {
                    if h >= row_top {
                        chars[per_row]
                    } else if h <= row_bottom {
                        chars[0]
                    } else {
                        chars[h - row_bottom]
                    }
                })
                .collect()
        })
        .collect()
}

/// Single-line graph of block characters.
pub fn sparkline(data: &[f64], width: usize, min: f64, max: f64) -> String {
    if data.is_empty() {
        return " ".repeat(width);
    }
    fit(data, width)
        .into_iter()
        .map(|v| BLOCK_CHARS[(normalize(v, min, max) * 8.0) as usize])
        .collect()
}

/// Filled and empty halves of a progress bar.
pub fn bar(percent: f64, width: usize) -> (String, String) {
    let filled = ((width as f64 * percent.clamp(0.0, 100.0) / 100.0) as usize).min(width);
    (
        BAR_FILLED.to_string().repeat(filled),
        BAR_EMPTY.to_string().repeat(width - filled),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_braille_full_and_empty() {
        let full = braille(&[100.0, 100.0], 1, 1, 0.0, 100.0);
        assert_eq!(full, vec!["⣿".to_string()]);

        let empty = braille(&[], 2, 1, 0.0, 100.0);
        assert_eq!(empty, vec!["⠀⠀".to_string()]);
    }

    #[test]
    fn test_braille_half_height() {
        // 50% of 4 dots fills the bottom two rows of the left column
        let rows = braille(&[50.0, 0.0], 1, 1, 0.0, 100.0);
        assert_eq!(rows[0].chars().next(), Some('⡄'));
    }

    #[test]
    fn test_block_levels() {
        let rows = render(GraphStyle::Block, &[0.0, 50.0, 100.0], 3, 1, 0.0, 100.0);
        assert_eq!(rows, vec![" ▄█".to_string()]);
    }

    #[test]
    fn test_ascii_uses_ascii_only() {
        let rows = render(GraphStyle::Ascii, &[10.0, 60.0, 100.0], 3, 2, 0.0, 100.0);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.is_ascii()));
    }

    #[test]
    fn test_values_clamped() {
        let rows = braille(&[500.0, -20.0], 1, 1, 0.0, 100.0);
        assert_eq!(rows[0].chars().next(), Some('⡇'));
    }

    #[test]
    fn test_dual_marks_series() {
        let rows = braille_dual(&[100.0], &[0.0], 1, 1, 0.0, 100.0);
        assert_eq!(rows[0][0], ('⡇', Series::First));
    }

    #[test]
    fn test_sparkline_and_bar() {
        assert_eq!(sparkline(&[0.0, 100.0], 3, 0.0, 100.0), "  █");
        assert_eq!(bar(50.0, 4), ("██".to_string(), "░░".to_string()));
        assert_eq!(bar(150.0, 2).0.chars().count(), 2);
    }
}
