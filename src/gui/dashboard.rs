//! Dashboard Widget
//! Central scrollable panel rendering the current view model.

use crate::charts::ChartPlotter;
use crate::view::{ChartSeries, DashboardView, InvestorView, Metric, OverallView, Panel, TableView};
use egui::{Color32, RichText, ScrollArea};

const SECTION_SPACING: f32 = 15.0;
const EMPTY_COLOR: Color32 = Color32::from_rgb(150, 150, 150);

const DATASET_NOTE: &str = "NOTE: The dataset used in this project contains some generic identifiers \
(e.g., Startup_4541, Startup_4542) for startup companies instead of their actual names.";

/// Draws whatever the controller produced. Keeps only local UI toggles.
#[derive(Default)]
pub struct Dashboard {
    pub show_raw_rows: bool,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ui: &mut egui::Ui, view: &DashboardView) {
        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(DATASET_NOTE).size(11.0).italics());
                ui.add_space(8.0);
                ui.heading(RichText::new(view.title()).size(26.0).strong());
                ui.add_space(SECTION_SPACING);

                match view {
                    DashboardView::OverallPrompt => {
                        Self::hint(ui, "Press \"Show Overall Analysis\" in the sidebar.")
                    }
                    DashboardView::InvestorPrompt => Self::hint(
                        ui,
                        "Select an investor and press \"Find Investor Details\".",
                    ),
                    DashboardView::StartupPending { startup } => {
                        let text = match startup {
                            Some(name) => format!("Startup analysis for {name} is not available yet."),
                            None => "Startup analysis is not available yet.".to_string(),
                        };
                        Self::hint(ui, &text);
                    }
                    DashboardView::Overall(overall) => Self::show_overall(ui, overall),
                    DashboardView::Investor(investor) => self.show_investor(ui, investor),
                }
            });
    }

    fn show_overall(ui: &mut egui::Ui, view: &OverallView) {
        ui.label(view.note);
        ui.add_space(8.0);

        ui.columns(view.headlines.len().max(1), |columns| {
            for (column, group) in columns.iter_mut().zip(&view.headlines) {
                column.label(RichText::new(&group.heading).size(16.0).strong());
                match &group.metrics {
                    Panel::Ready(metrics) => metrics.iter().for_each(|m| Self::metric(column, m)),
                    Panel::Empty(message) => Self::empty(column, message),
                }
            }
        });

        ui.add_space(SECTION_SPACING);

        ui.columns(2, |columns| {
            columns[0].heading("Overall Startup Funded by Year");
            Self::chart(&mut columns[0], "founded_by_year", &view.founded_by_year);
            columns[1].heading("Startup Funded by Country");
            Self::chart(&mut columns[1], "investment_by_region", &view.investment_by_region);
        });
    }

    fn show_investor(&mut self, ui: &mut egui::Ui, view: &InvestorView) {
        ui.heading(RichText::new(&view.investor).size(22.0));
        ui.add_space(8.0);

        ui.label(RichText::new("Most Recent Investments").size(18.0).strong());
        ui.label(view.note);
        Self::table(ui, "recent", &view.recent_investments);
        ui.add_space(SECTION_SPACING);

        ui.label(RichText::new("Biggest Investment Analysis").size(18.0).strong());
        ui.columns(2, |columns| {
            Self::chart(&mut columns[0], "vertical", &view.vertical_distribution);
            Self::chart(&mut columns[1], "startups", &view.top_startups);
        });
        if let Panel::Ready(table) = &view.top_startups_table {
            ui.label("Top Investments by Startup:");
            ChartPlotter::draw_table(ui, "top_startups", table);
        }
        ui.add_space(SECTION_SPACING);

        ui.checkbox(&mut self.show_raw_rows, "Show Full raw data for this investor");
        if self.show_raw_rows {
            ui.label("Raw data for this investor:");
            Self::table(ui, "raw", &view.raw_rows);
        }
        ui.add_space(SECTION_SPACING);

        ui.label(
            RichText::new(format!("Further Analysis for {}", view.investor))
                .size(18.0)
                .strong(),
        );
        ui.columns(2, |columns| {
            columns[0].label(RichText::new("Investments by City").strong());
            Self::chart(&mut columns[0], "city", &view.city_ranking);
            columns[1].label(RichText::new("Investments Over Years").strong());
            Self::chart(&mut columns[1], "years", &view.yearly_trend);
        });
    }

    fn metric(ui: &mut egui::Ui, metric: &Metric) {
        ui.label(RichText::new(&metric.label).size(12.0).color(Color32::GRAY));
        ui.label(RichText::new(&metric.value).size(22.0).strong());
        ui.add_space(4.0);
    }

    fn chart(ui: &mut egui::Ui, id: &str, panel: &Panel<ChartSeries>) {
        match panel {
            Panel::Ready(series) => ChartPlotter::draw_series(ui, id, series),
            Panel::Empty(message) => Self::empty(ui, message),
        }
    }

    fn table(ui: &mut egui::Ui, id: &str, panel: &Panel<TableView>) {
        match panel {
            Panel::Ready(table) => ChartPlotter::draw_table(ui, id, table),
            Panel::Empty(message) => Self::empty(ui, message),
        }
    }

    fn empty(ui: &mut egui::Ui, message: &str) {
        ui.label(RichText::new(message).size(13.0).color(EMPTY_COLOR));
    }

    fn hint(ui: &mut egui::Ui, message: &str) {
        ui.centered_and_justified(|ui| {
            ui.label(RichText::new(message).size(18.0));
        });
    }
}
