//! Control Panel Widget
//! Sidebar with the analysis picker and the confirm buttons.

use crate::view::Mode;
use egui::{Color32, ComboBox, RichText};

/// Left side panel. Holds only pending picker values; confirmed choices live
/// in the session.
pub struct ControlPanel {
    pub mode: Mode,
    pub investors: Vec<String>,
    pub startups: Vec<String>,
    pub pending_investor: String,
    pub pending_startup: String,
    pub status: String,
}

impl ControlPanel {
    pub fn new(investors: Vec<String>, startups: Vec<String>) -> Self {
        let pending_investor = investors.first().cloned().unwrap_or_default();
        let pending_startup = startups.first().cloned().unwrap_or_default();
        let status = format!(
            "Loaded {} investors, {} startups",
            investors.len(),
            startups.len()
        );
        Self {
            mode: Mode::default(),
            investors,
            startups,
            pending_investor,
            pending_startup,
            status,
        }
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("💸 Startup Funding Analysis")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Analysis Picker =====
        ui.label(RichText::new("Select One").size(14.0).strong());
        ui.add_space(5.0);

        let previous = self.mode;
        ComboBox::from_id_salt("mode")
            .width(220.0)
            .selected_text(self.mode.label())
            .show_ui(ui, |ui| {
                for mode in Mode::ALL {
                    ui.selectable_value(&mut self.mode, mode, mode.label());
                }
            });
        if self.mode != previous {
            action = ControlPanelAction::ModeChanged(self.mode);
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        match self.mode {
            Mode::Overall => {
                ui.vertical_centered(|ui| {
                    let button = egui::Button::new(RichText::new("Show Overall Analysis").size(15.0))
                        .min_size(egui::vec2(200.0, 32.0));
                    if ui.add(button).clicked() {
                        action = ControlPanelAction::ShowOverall;
                    }
                });
            }
            Mode::InvestorDetail => {
                if let Some(investor) = Self::picker(
                    ui,
                    "investor",
                    "Select Investor",
                    "Find Investor Details",
                    &self.investors,
                    &mut self.pending_investor,
                ) {
                    action = ControlPanelAction::ConfirmInvestor(investor);
                }
            }
            Mode::StartupDetail => {
                if let Some(startup) = Self::picker(
                    ui,
                    "startup",
                    "Select StartUp",
                    "Find Startup Details",
                    &self.startups,
                    &mut self.pending_startup,
                ) {
                    action = ControlPanelAction::ConfirmStartup(startup);
                }
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(5.0);
        ui.label(RichText::new(&self.status).size(11.0).color(Color32::GRAY));

        action
    }

    /// Combo box plus confirm button. Returns the choice when confirmed.
    fn picker(
        ui: &mut egui::Ui,
        id: &str,
        label: &str,
        button: &str,
        choices: &[String],
        pending: &mut String,
    ) -> Option<String> {
        ui.label(label);
        ComboBox::from_id_salt(id)
            .width(220.0)
            .selected_text(pending.as_str())
            .show_ui(ui, |ui| {
                for choice in choices {
                    ui.selectable_value(&mut *pending, choice.clone(), choice);
                }
            });

        ui.add_space(8.0);
        let mut confirmed = None;
        ui.add_enabled_ui(!pending.is_empty(), |ui| {
            let button = egui::Button::new(RichText::new(button).size(14.0))
                .min_size(egui::vec2(200.0, 30.0));
            if ui.add(button).clicked() {
                confirmed = Some(pending.clone());
            }
        });
        confirmed
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    ModeChanged(Mode),
    ShowOverall,
    ConfirmInvestor(String),
    ConfirmStartup(String),
}
