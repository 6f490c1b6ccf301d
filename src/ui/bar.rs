use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::layout::band::{Band, clamp_percent};
use crate::ui::theme::Theme;

/// Overlays `label` and `percent_text` on a `width`-column gauge.
pub fn render_bar(
    label: &str,
    percent_text: &str,
    percent: f64,
    width: usize,
    theme: &Theme,
) -> Line<'static> {
    if width == 0 {
        return Line::from(format!("{label} {percent_text}"));
    }

    let percent = clamp_percent(percent);
    let band = Band::from_percent(percent);
    let label_chars: Vec<char> = label.chars().collect();
    let percent_chars: Vec<char> = percent_text.chars().collect();

    if label_chars.len() + percent_chars.len() >= width {
        return Line::from(Span::styled(
            format!("{label} {percent_text}"),
            theme.bar_plain(band),
        ));
    }

    let filled = filled_columns(percent, width);
    let plain = theme.bar_plain(band);
    let inverted = theme.bar_filled(band);
    let percent_start = width - percent_chars.len();

    let mut spans: Vec<Span<'static>> = Vec::new();
    for col in 0..width {
        let ch = if col < label_chars.len() {
            label_chars[col]
        } else if col >= percent_start {
            percent_chars[col - percent_start]
        } else {
            ' '
        };
        let style = if col < filled { inverted } else { plain };
        push_cell(&mut spans, ch, style);
    }

    Line::from(spans)
}

pub fn filled_columns(percent: f64, width: usize) -> usize {
    let filled = (clamp_percent(percent) / 100.0 * width as f64).floor() as usize;
    filled.min(width)
}

fn push_cell(spans: &mut Vec<Span<'static>>, ch: char, style: Style) {
    if let Some(last) = spans.last_mut()
        && last.style == style
    {
        last.content.to_mut().push(ch);
        return;
    }
    spans.push(Span::styled(ch.to_string(), style));
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn cell_styles(line: &Line) -> Vec<Style> {
        line.spans
            .iter()
            .flat_map(|s| std::iter::repeat_n(s.style, s.content.chars().count()))
            .collect()
    }

    #[test]
    fn overlays_label_and_percent_on_the_bar() {
        let line = render_bar("CPU00", " 50.0%", 50.0, 20, &Theme::classic());
        assert_eq!(plain(&line), "CPU00          50.0%");
        assert_eq!(line.width(), 20);
    }

    #[test]
    fn filled_region_uses_swapped_colors() {
        let theme = Theme::classic();
        let line = render_bar("CPU00", " 50.0%", 50.0, 20, &theme);
        let styles = cell_styles(&line);
        assert_eq!(styles.len(), 20);
        for (col, style) in styles.iter().enumerate() {
            if col < 10 {
                assert_eq!(*style, theme.bar_filled(Band::Warn), "column {col}");
            } else {
                assert_eq!(*style, theme.bar_plain(Band::Warn), "column {col}");
            }
        }
    }

    #[test]
    fn adjacent_cells_share_spans() {
        let line = render_bar("CPU00", " 50.0%", 50.0, 20, &Theme::classic());
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "CPU00     ");
        assert_eq!(line.spans[1].content, "     50.0%");
    }

    #[test]
    fn fill_reaches_into_the_percent_text() {
        let theme = Theme::classic();
        let line = render_bar("Memory", " 95.0%", 95.0, 20, &theme);
        let styles = cell_styles(&line);
        assert_eq!(filled_columns(95.0, 20), 19);
        assert!(styles[..19].iter().all(|s| s.bg == Some(Color::Red)));
        assert_eq!(styles[19], theme.bar_plain(Band::Critical));
    }

    #[test]
    fn empty_and_full_bars() {
        let theme = Theme::classic();
        let empty = cell_styles(&render_bar("GPU", " 0%", 0.0, 12, &theme));
        assert!(empty.iter().all(|s| *s == theme.bar_plain(Band::Ok)));
        let full = cell_styles(&render_bar("GPU", "100%", 100.0, 12, &theme));
        assert!(full.iter().all(|s| *s == theme.bar_filled(Band::Critical)));
    }

    #[test]
    fn out_of_range_percent_is_clamped() {
        let theme = Theme::classic();
        let over = render_bar("CPU", "x", 180.0, 10, &theme);
        let full = render_bar("CPU", "x", 100.0, 10, &theme);
        assert_eq!(over, full);
        let under = render_bar("CPU", "x", -40.0, 10, &theme);
        let empty = render_bar("CPU", "x", 0.0, 10, &theme);
        assert_eq!(under, empty);
    }

    #[test]
    fn text_too_wide_falls_back_to_plain_text() {
        let theme = Theme::classic();
        let line = render_bar("CPU Usage", " 50.0%", 50.0, 15, &theme);
        assert_eq!(plain(&line), "CPU Usage  50.0%");
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].style, theme.bar_plain(Band::Warn));
    }

    #[test]
    fn zero_width_returns_unstyled_text() {
        let line = render_bar("CPU00", "12.0%", 12.0, 0, &Theme::classic());
        assert_eq!(plain(&line), "CPU00 12.0%");
        assert!(line.spans.iter().all(|s| s.style == Style::default()));
    }

    #[test]
    fn multibyte_labels_count_code_points() {
        let line = render_bar("Ядро", "10%", 10.0, 12, &Theme::classic());
        assert_eq!(plain(&line), "Ядро     10%");
        assert_eq!(line.width(), 12);
    }
}
