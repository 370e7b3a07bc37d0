use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::DatePickerButton;

use super::TITLE;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Data");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Date range ----
            let mut start = state.criteria.start;
            let mut end = state.criteria.end;

            ui.strong("Start date");
            ui.add(DatePickerButton::new(&mut start).id_salt("start_date"));
            ui.add_space(4.0);
            ui.strong("End date");
            ui.add(DatePickerButton::new(&mut end).id_salt("end_date"));

            if start != state.criteria.start || end != state.criteria.end {
                state.criteria.start = start;
                state.criteria.end = end;
                state.refresh();
            }
            if start > end {
                ui.label(RichText::new("Start date is after end date.").color(Color32::YELLOW));
            }
            ui.separator();

            // ---- Sentiment labels ----
            let labels = state.dataset().labels.clone();
            let n_selected = state.criteria.labels.len();
            ui.strong(format!("Sentiment  ({n_selected}/{})", labels.len()));

            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });

            for label in &labels {
                let mut checked = state.criteria.labels.contains(label);
                let text = RichText::new(label).color(state.label_colors.color_for(label));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_label(label);
                }
            }

            ui.separator();
            if ui.button("Reset filters").clicked() {
                state.reset_filters();
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top status bar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} tweets loaded, {} visible",
            state.dataset().len(),
            state.visible_indices.len()
        ));

        ui.separator();

        ui.label(RichText::new(state.context.model.describe()).weak());
    });
}

// ---------------------------------------------------------------------------
// Fatal startup error
// ---------------------------------------------------------------------------

/// Shown instead of the dashboard when the inputs could not be loaded.
pub fn fatal_error(ui: &mut Ui, diagnostic: &str) {
    ui.heading(TITLE);
    ui.add_space(8.0);
    ui.label(
        RichText::new(format!("Error: {diagnostic}"))
            .color(Color32::RED)
            .strong(),
    );
    ui.label("Check that the model and dataset paths are correct and restart the dashboard.");
}
