use chrono::{Datelike, NaiveDate};
use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Sentiment distribution (bar chart)
// ---------------------------------------------------------------------------

/// Bar per label, height = visible tweet count.
pub fn distribution_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Sentiment Distribution");

    let labels: Vec<String> = state.distribution.iter().map(|c| c.label.clone()).collect();
    let bars: Vec<Bar> = state
        .distribution
        .iter()
        .enumerate()
        .map(|(i, c)| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.label)
                .fill(state.label_colors.color_for(&c.label))
                .width(0.6)
        })
        .collect();

    Plot::new("distribution_plot")
        .height(CHART_HEIGHT)
        .y_axis_label("Tweets")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| category_at(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Axis text for integer positions only.
fn category_at(labels: &[String], value: f64) -> String {
    if value < 0.0 || (value - value.round()).abs() > 1e-6 {
        return String::new();
    }
    labels.get(value.round() as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Sentiment trend (line per label)
// ---------------------------------------------------------------------------

pub fn trend_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Sentiment Trend Over Time");
    if state.trend.is_empty() {
        return;
    }

    Plot::new("trend_plot")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Tweets")
        .allow_scroll(false)
        .x_axis_formatter(|mark, _range| date_at(mark.value))
        .show(ui, |plot_ui| {
            for (column, label) in state.trend.labels.iter().enumerate() {
                let color = state.label_colors.color_for(label);
                let points: Vec<[f64; 2]> = state
                    .trend
                    .series(column)
                    .map(|(date, count)| [day_number(date), count as f64])
                    .collect();

                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .name(label)
                        .color(color)
                        .width(2.0),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .name(label)
                        .color(color)
                        .radius(3.0),
                );
            }
        });
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn date_at(value: f64) -> String {
    if (value - value.round()).abs() > 1e-6 {
        return String::new();
    }
    NaiveDate::from_num_days_from_ce_opt(value.round() as i32)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_whole_positions() {
        let labels = vec!["negatif".to_string(), "positif".to_string()];
        assert_eq!(category_at(&labels, 1.0), "positif");
        assert_eq!(category_at(&labels, 0.5), "");
        assert_eq!(category_at(&labels, 2.0), "");
        assert_eq!(category_at(&labels, -1.0), "");
    }

    #[test]
    fn day_numbers_round_trip_to_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(date_at(day_number(date)), "2025-03-20");
        assert_eq!(date_at(day_number(date) + 0.5), "");
    }
}
