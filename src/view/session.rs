//! Session-scoped selection state.
//!
//! Created when the window opens and mutated only by the control panel
//! actions below. The confirmed investor is sticky: it survives mode switches
//! and repaints until another investor is confirmed.

use tracing::info;

/// Which analysis the sidebar has selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Overall,
    /// Offered in the picker but not wired to any analysis yet.
    StartupDetail,
    InvestorDetail,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Overall, Mode::StartupDetail, Mode::InvestorDetail];

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Overall => "Overall Analysis",
            Mode::StartupDetail => "Startup",
            Mode::InvestorDetail => "Investor",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub mode: Mode,
    /// Set by "Show Overall Analysis"; cleared when leaving the overall mode.
    pub overall_requested: bool,
    pub selected_investor: Option<String>,
    pub selected_startup: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        if self.mode == Mode::Overall {
            self.overall_requested = false;
        }
        self.mode = mode;
    }

    pub fn request_overall(&mut self) {
        self.mode = Mode::Overall;
        self.overall_requested = true;
    }

    /// Confirm an investor; replaces any earlier choice.
    pub fn confirm_investor(&mut self, investor: &str) {
        info!(investor, "investor confirmed");
        self.mode = Mode::InvestorDetail;
        self.selected_investor = Some(investor.to_string());
    }

    /// Recorded for the picker only; no analysis consumes it yet.
    pub fn confirm_startup(&mut self, startup: &str) {
        self.mode = Mode::StartupDetail;
        self.selected_startup = Some(startup.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investor_selection_is_sticky() {
        let mut session = Session::new();
        session.confirm_investor("Sequoia Capital");

        session.select_mode(Mode::Overall);
        session.select_mode(Mode::InvestorDetail);
        assert_eq!(session.selected_investor.as_deref(), Some("Sequoia Capital"));

        session.confirm_investor("Accel Partners");
        assert_eq!(session.selected_investor.as_deref(), Some("Accel Partners"));
    }

    #[test]
    fn test_leaving_overall_clears_request() {
        let mut session = Session::new();
        session.request_overall();
        assert!(session.overall_requested);

        session.select_mode(Mode::Overall);
        assert!(session.overall_requested);

        session.select_mode(Mode::InvestorDetail);
        session.select_mode(Mode::Overall);
        assert!(!session.overall_requested);
    }
}
