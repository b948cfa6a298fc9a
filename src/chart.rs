//! Text bar chart of daily average moods.
//!
//! Layout and coloring are separate steps: [`render_chart`] decides where
//! every character goes, and [`Chart::styled_lines`] paints the result with a
//! [`Palette`]. Switching themes only repeats the second step.

use crate::{DailyAverage, Palette};

pub const CHART_TITLE: &str = "Average Mood Over Last 7 Days";
pub const X_LABEL: &str = "Day of the Week";
pub const Y_LABEL: &str = "Average Mood";

/// Visible range of the y axis.
pub const Y_MIN: f64 = 0.5;
pub const Y_MAX: f64 = 5.5;

pub const MIN_HEIGHT: usize = 5;
pub const MAX_HEIGHT: usize = 40;
pub const DEFAULT_HEIGHT: usize = 10;

const GUTTER: usize = 5;
const BAR_WIDTH: usize = 5;
const SLOT_WIDTH: usize = BAR_WIDTH + 2;

/// What a run of characters represents, used to pick its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    Title,
    Text,
    Bar,
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

/// One line of the chart as styled runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChartRow {
    pub spans: Vec<Span>,
}

impl ChartRow {
    fn push(&mut self, kind: SpanKind, text: &str) {
        match self.spans.last_mut() {
            Some(last) if last.kind == kind => last.text.push_str(text),
            _ => self.spans.push(Span {
                kind,
                text: text.to_string(),
            }),
        }
    }

    fn push_char(&mut self, kind: SpanKind, c: char) {
        let mut buf = [0u8; 4];
        self.push(kind, c.encode_utf8(&mut buf));
    }

    pub fn plain(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

/// A laid-out chart, independent of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chart {
    pub rows: Vec<ChartRow>,
}

impl Chart {
    /// Lines without any escape codes.
    pub fn plain_lines(&self) -> Vec<String> {
        self.rows.iter().map(ChartRow::plain).collect()
    }

    /// Lines colored with the given palette.
    pub fn styled_lines(&self, palette: &Palette) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                row.spans
                    .iter()
                    .map(|span| {
                        let style = match span.kind {
                            SpanKind::Title => palette.graph().bold(),
                            SpanKind::Text => palette.graph(),
                            SpanKind::Bar => palette.bar(),
                            SpanKind::Grid => palette.grid(),
                        };
                        style.apply_to(&span.text).to_string()
                    })
                    .collect()
            })
            .collect()
    }
}

/// Lays out one bar per day, `height` rows tall.
///
/// `height` is clamped to `MIN_HEIGHT..=MAX_HEIGHT`. The tallest bar stops one
/// row short of the top so its value label always fits.
///
/// Returns `None` when there is nothing to plot; callers skip drawing rather
/// than showing an empty frame.
pub fn render_chart(days: &[DailyAverage], height: usize) -> Option<Chart> {
    if days.is_empty() {
        return None;
    }

    let height = height.clamp(MIN_HEIGHT, MAX_HEIGHT);
    let step = (Y_MAX - Y_MIN) / height as f64;
    let plot_width = days.len() * SLOT_WIDTH;
    let total_width = GUTTER + plot_width;

    let bar_rows: Vec<usize> = days
        .iter()
        .map(|day| {
            let rows = ((day.mean - Y_MIN) / step).round();
            rows.clamp(0.0, (height - 1) as f64) as usize
        })
        .collect();

    let mut rows = Vec::with_capacity(height + 6);

    let mut title = ChartRow::default();
    title.push(SpanKind::Title, &center(CHART_TITLE, total_width));
    rows.push(title);

    let mut y_label = ChartRow::default();
    y_label.push(SpanKind::Text, Y_LABEL);
    rows.push(y_label);

    for level in (0..height).rev() {
        let tick = tick_at(level, step);
        let mut row = ChartRow::default();
        match tick {
            Some(value) => row.push(SpanKind::Text, &format!("{:>3} ┤", value)),
            None => row.push(SpanKind::Text, "    │"),
        }

        for (slot, day) in days.iter().enumerate() {
            let filled = bar_rows[slot];
            if level < filled {
                row.push(SpanKind::Text, " ");
                row.push(SpanKind::Bar, &"█".repeat(BAR_WIDTH));
                row.push(SpanKind::Text, " ");
            } else if level == filled {
                row.push(SpanKind::Text, &center(&format!("{:.1}", day.mean), SLOT_WIDTH));
            } else if tick.is_some() {
                for col in 0..SLOT_WIDTH {
                    let c = if (slot * SLOT_WIDTH + col) % 2 == 0 { '-' } else { ' ' };
                    row.push_char(SpanKind::Grid, c);
                }
            } else {
                row.push(SpanKind::Text, &" ".repeat(SLOT_WIDTH));
            }
        }
        rows.push(row);
    }

    let mut axis = ChartRow::default();
    axis.push(SpanKind::Text, &format!("    └{}", "─".repeat(plot_width)));
    rows.push(axis);

    let mut labels = ChartRow::default();
    labels.push(SpanKind::Text, &" ".repeat(GUTTER));
    for day in days {
        labels.push(SpanKind::Text, &center(&day.label, SLOT_WIDTH));
    }
    rows.push(labels);

    let mut x_label = ChartRow::default();
    x_label.push(SpanKind::Text, &center(X_LABEL, total_width));
    rows.push(x_label);

    Some(Chart { rows })
}

/// Integer mood level whose position falls in plot row `level`, if any.
fn tick_at(level: usize, step: f64) -> Option<u8> {
    (1u8..=5).find(|value| ((f64::from(*value) - Y_MIN) / step).floor() as usize == level)
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let left = (width - len) / 2;
    let right = width - len - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::Theme;

    fn day(d: u32, mean: f64) -> DailyAverage {
        let date = NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        DailyAverage {
            date,
            label: date.format("%a").to_string(),
            mean,
            count: 1,
        }
    }

    #[test]
    fn nothing_to_plot_yields_no_chart() {
        assert!(render_chart(&[], DEFAULT_HEIGHT).is_none());
    }

    #[test]
    fn chart_carries_titles_and_weekday_labels() {
        let chart = render_chart(&[day(1, 4.0), day(2, 2.5)], DEFAULT_HEIGHT).unwrap();
        let lines = chart.plain_lines();

        assert!(lines[0].contains(CHART_TITLE));
        assert_eq!(lines[1], Y_LABEL);
        assert!(lines.last().unwrap().contains(X_LABEL));
        let weekdays = &lines[lines.len() - 2];
        assert!(weekdays.contains("Mon"));
        assert!(weekdays.contains("Tue"));
        assert!(weekdays.find("Mon").unwrap() < weekdays.find("Tue").unwrap());
    }

    #[test]
    fn value_labels_sit_above_bars() {
        let chart = render_chart(&[day(1, 4.0)], DEFAULT_HEIGHT).unwrap();
        let lines = chart.plain_lines();

        let label_row = lines.iter().position(|l| l.contains("4.0")).unwrap();
        assert!(lines[label_row + 1].contains('█'));
        assert!(!lines[label_row - 1].contains('█'));
    }

    #[test]
    fn taller_means_get_taller_bars() {
        let chart = render_chart(&[day(1, 1.0), day(2, 5.0)], DEFAULT_HEIGHT).unwrap();
        let bar_cells = |slot: usize| {
            chart
                .plain_lines()
                .iter()
                .filter(|line| {
                    let start = GUTTER + slot * SLOT_WIDTH + 1;
                    line.chars().nth(start) == Some('█')
                })
                .count()
        };
        assert_eq!(bar_cells(0), 1);
        assert_eq!(bar_cells(1), 9);
    }

    #[test]
    fn every_integer_level_has_a_tick() {
        let chart = render_chart(&[day(1, 3.0)], DEFAULT_HEIGHT).unwrap();
        let lines = chart.plain_lines();
        for value in 1..=5 {
            let tick = format!("{:>3} ┤", value);
            assert!(lines.iter().any(|l| l.starts_with(&tick)), "missing tick {}", value);
        }
    }

    #[test]
    fn small_heights_are_raised_to_the_minimum() {
        let chart = render_chart(&[day(1, 3.0)], 1).unwrap();
        // title, y label, plot rows, axis, weekdays, x label
        assert_eq!(chart.rows.len(), MIN_HEIGHT + 5);
    }

    #[test]
    fn huge_heights_are_capped() {
        let chart = render_chart(&[day(1, 3.0)], usize::MAX).unwrap();
        assert_eq!(chart.rows.len(), MAX_HEIGHT + 5);
    }

    #[test]
    fn every_bar_keeps_its_value_label() {
        for height in 1..=12 {
            for half_steps in 2..=10 {
                let mean = f64::from(half_steps) / 2.0;
                let chart = render_chart(&[day(1, mean), day(2, 5.0)], height).unwrap();
                let lines = chart.plain_lines();
                for label in [format!("{:.1}", mean), "5.0".to_string()] {
                    assert!(
                        lines.iter().any(|l| l.contains(&label)),
                        "label {} missing at height {}",
                        label,
                        height
                    );
                }
            }
        }
    }

    #[test]
    fn out_of_range_means_are_clamped() {
        let chart = render_chart(&[day(1, 9.0), day(2, -2.0)], DEFAULT_HEIGHT).unwrap();
        assert_eq!(chart.rows.len(), DEFAULT_HEIGHT + 5);
    }

    #[test]
    fn styling_keeps_the_text() {
        let chart = render_chart(&[day(1, 2.0)], DEFAULT_HEIGHT).unwrap();
        let styled = chart.styled_lines(Theme::Dark.palette());
        let plain = chart.plain_lines();
        assert_eq!(styled.len(), plain.len());
        for (styled, plain) in styled.iter().zip(&plain) {
            assert_eq!(console::strip_ansi_codes(styled), plain.as_str());
        }
    }
}
