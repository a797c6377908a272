//! Startup Funding Dashboard - Overall and per-investor funding analysis
//!
//! Loads the funding CSVs once at startup and opens the dashboard window.

use anyhow::Context;
use eframe::egui;
use funding_dashboard::config::DashboardConfig;
use funding_dashboard::data::Dataset;
use funding_dashboard::gui::FundingApp;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = DashboardConfig::load()?;
    let dataset = Dataset::load(&config.data).context("failed to load funding data")?;
    info!("starting dashboard");

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title(config.window_title.as_str()),
        ..Default::default()
    };

    let title = config.window_title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| Ok(Box::new(FundingApp::new(cc, dataset, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {e}"))
}
