//! Horizontal bar charts for the terminal.
use super::ui;

pub const FILLED: char = '█';
pub const LIGHT: char = '░';

const MIN_BAR_WIDTH: usize = 10;

#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub glyph: char,
}

impl Bar {
    pub fn new(label: impl Into<String>, value: f64, glyph: char) -> Self {
        Self {
            label: label.into(),
            value,
            glyph,
        }
    }
}

/// Renders one line per bar, scaled so the largest value fills `width`.
pub fn render(bars: &[Bar], width: usize) -> String {
    render_with(bars, width, ui::format_amount)
}

/// Like [`render`], with a custom formatter for the value column.
pub fn render_with(bars: &[Bar], width: usize, format_value: impl Fn(f64) -> String) -> String {
    let label_width = bars.iter().map(|b| b.label.chars().count()).max().unwrap_or(0);
    let values: Vec<String> = bars.iter().map(|b| format_value(b.value)).collect();
    let value_width = values.iter().map(|v| v.len()).max().unwrap_or(0);
    let bar_width = width
        .saturating_sub(label_width + value_width + 3)
        .max(MIN_BAR_WIDTH);
    let max = bars.iter().map(|b| b.value).fold(0.0_f64, f64::max);

    bars.iter()
        .zip(values)
        .map(|(bar, value)| {
            let len = if max > 0.0 && bar.value > 0.0 {
                ((bar.value / max) * bar_width as f64).round() as usize
            } else {
                0
            };
            let filled: String = std::iter::repeat_n(bar.glyph, len).collect();
            format!(
                "{:>label_width$} │{:<bar_width$} {:>value_width$}",
                bar.label, filled, value
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
