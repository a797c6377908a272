//! Funding Dashboard Main Application
//! Main window with control panel and dashboard.

use crate::config::DashboardConfig;
use crate::data::Dataset;
use crate::gui::{ControlPanel, ControlPanelAction, Dashboard};
use crate::view::{DashboardView, Session, ViewController};
use egui::SidePanel;
use tracing::trace;

/// Main application window.
pub struct FundingApp {
    dataset: Dataset,
    controller: ViewController,
    session: Session,
    control_panel: ControlPanel,
    dashboard: Dashboard,
}

impl FundingApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, dataset: Dataset, config: &DashboardConfig) -> Self {
        let control_panel = ControlPanel::new(dataset.investors.clone(), dataset.startups.clone());
        Self {
            dataset,
            controller: ViewController::new(config.top_n),
            session: Session::new(),
            control_panel,
            dashboard: Dashboard::new(),
        }
    }

    /// Apply a sidebar action to the session.
    fn handle_action(&mut self, action: ControlPanelAction) {
        match action {
            ControlPanelAction::ModeChanged(mode) => self.session.select_mode(mode),
            ControlPanelAction::ShowOverall => self.session.request_overall(),
            ControlPanelAction::ConfirmInvestor(investor) => {
                self.session.confirm_investor(&investor);
                self.dashboard.show_raw_rows = false;
            }
            ControlPanelAction::ConfirmStartup(startup) => self.session.confirm_startup(&startup),
            ControlPanelAction::None => {}
        }
    }

    /// Build the view for the current session. Nothing is kept between frames.
    fn current_view(&self) -> DashboardView {
        trace!(mode = ?self.session.mode, "rendering view");
        self.controller.render(&self.dataset, &self.session)
    }
}

impl eframe::App for FundingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(260.0)
            .max_width(320.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);
                    self.handle_action(action);
                });
            });

        let view = self.current_view();

        // Central panel - Dashboard
        egui::CentralPanel::default().show(ctx, |ui| {
            self.dashboard.show(ui, &view);
        });
    }
}
