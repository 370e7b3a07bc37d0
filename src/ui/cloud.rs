use eframe::egui::{self, vec2, Align2, Color32, FontId, RichText, Sense, Ui};

use crate::state::AppState;
use crate::wordcloud::WordCloudOutcome;

// ---------------------------------------------------------------------------
// Word cloud section
// ---------------------------------------------------------------------------

pub fn word_cloud_section(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Word Cloud per Sentiment");

    let mut selected = state.cloud_label.clone();
    egui::ComboBox::from_label("Sentiment for word cloud")
        .selected_text(selected.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for label in &state.context.dataset.labels {
                ui.selectable_value(&mut selected, label.clone(), label.as_str());
            }
        });
    state.set_cloud_label(selected);

    // Lay out with real glyph extents from the UI font.
    state.ensure_word_cloud(|word, size| {
        let galley = ui.fonts(|fonts| {
            fonts.layout_no_wrap(word.to_owned(), FontId::proportional(size), Color32::BLACK)
        });
        [galley.size().x, galley.size().y]
    });

    match &state.word_cloud {
        Some(WordCloudOutcome::Rendered(words)) => {
            let settings = &state.context.config.word_cloud;
            let scale = (ui.available_width() / settings.width).clamp(0.1, 1.0);
            let (response, painter) = ui.allocate_painter(
                vec2(settings.width * scale, settings.height * scale),
                Sense::hover(),
            );
            let rect = response.rect;
            painter.rect_filled(rect, 0.0, Color32::WHITE);

            for w in words {
                painter.text(
                    rect.min + vec2(w.center[0] * scale, w.center[1] * scale),
                    Align2::CENTER_CENTER,
                    &w.word,
                    FontId::proportional(w.font_size * scale),
                    state.word_palette.color_for_rank(w.rank),
                );
            }

            let hovered = response.hover_pos().and_then(|pos| {
                let local = (pos - rect.min) / scale;
                words.iter().find(|w| {
                    (local.x - w.center[0]).abs() <= w.size[0] / 2.0
                        && (local.y - w.center[1]).abs() <= w.size[1] / 2.0
                })
            });
            if let Some(w) = hovered {
                response.on_hover_text_at_pointer(format!("{}: {}", w.word, w.count));
            }
        }
        Some(WordCloudOutcome::NoData) | None => {
            ui.label(
                RichText::new(format!(
                    "No text for sentiment '{}' in the selected filter range.",
                    state.cloud_label
                ))
                .color(Color32::LIGHT_BLUE),
            );
        }
    }
}
