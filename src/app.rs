use eframe::egui;

use crate::state::AppState;
use crate::ui::{dashboard, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// What the window shows for the whole session.
pub enum Screen {
    Ready(Box<AppState>),
    /// Startup failed; only the diagnostic is rendered.
    Failed(String),
}

pub struct SentimentDashboardApp {
    pub screen: Screen,
}

impl SentimentDashboardApp {
    pub fn new(screen: Screen) -> Self {
        Self { screen }
    }
}

impl eframe::App for SentimentDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state: &mut AppState = match &mut self.screen {
            Screen::Ready(state) => state,
            Screen::Failed(diagnostic) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    panels::fatal_error(ui, diagnostic);
                });
                return;
            }
        };

        // ---- Top panel: status bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: dashboard ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard::dashboard(ui, state);
        });
    }
}
