mod app;
mod classifier;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod wordcloud;

use std::path::Path;

use anyhow::Context;
use app::{Screen, SentimentDashboardApp};
use config::{DashboardConfig, CONFIG_FILE};
use eframe::egui;
use state::{AppContext, AppState};

fn main() -> eframe::Result {
    env_logger::init();

    // Inputs are loaded once, before the window opens.
    let screen = match startup() {
        Ok(context) => Screen::Ready(Box::new(AppState::new(context))),
        Err(e) => {
            log::error!("Failed to start dashboard: {e:#}");
            Screen::Failed(format!("{e:#}"))
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Twitter Sentiment Dashboard",
        options,
        Box::new(|_cc| Ok(Box::new(SentimentDashboardApp::new(screen)))),
    )
}

fn startup() -> anyhow::Result<AppContext> {
    let config = DashboardConfig::load_or_default(Path::new(CONFIG_FILE))?;
    let context = AppContext::load(config).context("loading dashboard inputs")?;
    log::info!("Dashboard ready: {}", context.summary);
    Ok(context)
}
