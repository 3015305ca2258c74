/*
 * Text histogram of item frequencies: each line holds the item name padded
 * to a fixed column, one space, then one marker per occurrence. Names longer
 * than the column are printed in full rather than truncated.
 */

pub const DEFAULT_NAME_WIDTH: usize = 14;
pub const DEFAULT_MARKER: char = '*';
// Widest name column accepted from settings.
pub const MAX_NAME_WIDTH: usize = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramStyle {
    pub name_width: usize,
    pub marker: char,
}

impl Default for HistogramStyle {
    fn default() -> Self {
        HistogramStyle {
            name_width: DEFAULT_NAME_WIDTH,
            marker: DEFAULT_MARKER,
        }
    }
}

/// Renders one histogram line, without the trailing newline.
pub fn render_line(name: &str, count: usize, style: &HistogramStyle) -> String {
    let bar: String = std::iter::repeat_n(style.marker, count).collect();
    let width = style.name_width.min(MAX_NAME_WIDTH);
    format!("{name:<width$} {bar}")
}

/// Renders every entry as a newline-terminated line, in the given order.
pub fn render_histogram<'a, I>(entries: I, style: &HistogramStyle) -> String
where
    I: IntoIterator<Item = (&'a str, usize)>,
{
    let mut rendered = String::new();
    for (name, count) in entries {
        rendered.push_str(&render_line(name, count, style));
        rendered.push('\n');
    }
    rendered
}
