use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use super::{cloud, plot, TITLE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

/// Title, then either the filtered sections or a warning, then
/// dataset-wide statistics.
pub fn dashboard(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(RichText::new(TITLE).size(24.0));
            ui.add_space(8.0);

            if state.visible_indices.is_empty() {
                ui.label(
                    RichText::new(
                        "No data matches the selected filters. Please adjust your filters.",
                    )
                    .color(Color32::YELLOW),
                );
            } else {
                plot::distribution_chart(ui, state);
                ui.add_space(12.0);
                plot::trend_chart(ui, state);
                ui.add_space(12.0);
                cloud::word_cloud_section(ui, state);
                ui.add_space(12.0);
                sample_table(ui, state);
            }

            ui.add_space(12.0);
            ui.separator();
            overall_statistics(ui, state);
        });
}

// ---------------------------------------------------------------------------
// Sample rows
// ---------------------------------------------------------------------------

fn sample_table(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Sample Tweets");
        if ui.small_button("Resample").clicked() {
            state.resample();
        }
    });

    let columns = &state.context.config.columns;
    egui::Grid::new("sample_table")
        .striped(true)
        .num_columns(3)
        .spacing([12.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.strong(columns.timestamp.as_str());
            ui.strong(columns.text.as_str());
            ui.strong(columns.label.as_str());
            ui.end_row();

            for &i in &state.sample {
                let rec = &state.context.dataset.records[i];
                ui.label(rec.timestamp.format("%Y-%m-%d %H:%M:%S").to_string());
                ui.add(egui::Label::new(rec.text.as_str()).truncate());
                ui.label(RichText::new(&rec.label).color(state.label_colors.color_for(&rec.label)));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Dataset-wide statistics
// ---------------------------------------------------------------------------

fn overall_statistics(ui: &mut Ui, state: &AppState) {
    let summary = &state.context.summary;
    ui.heading("Overall Dataset Statistics");
    ui.label(format!("Total tweets: {}", summary.total));
    ui.label(format!("Date range: {}", summary.date_range_label()));
}
