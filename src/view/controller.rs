//! View Controller
//! Maps the session state onto the view to render.

use crate::config::TopNSettings;
use crate::data::Dataset;
use crate::view::investor::InvestorView;
use crate::view::overall::OverallView;
use crate::view::session::{Mode, Session};

/// What the central panel shows for the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// Overall mode before "Show Overall Analysis" is pressed.
    OverallPrompt,
    Overall(Box<OverallView>),
    /// Investor mode before any investor is confirmed.
    InvestorPrompt,
    Investor(Box<InvestorView>),
    /// Startup drill-down is not implemented.
    StartupPending { startup: Option<String> },
}

impl DashboardView {
    pub fn title(&self) -> &'static str {
        match self {
            DashboardView::OverallPrompt | DashboardView::Overall(_) => "Overall Analysis",
            DashboardView::InvestorPrompt | DashboardView::Investor(_) => "Investor Analysis",
            DashboardView::StartupPending { .. } => "Startup Analysis",
        }
    }
}

pub struct ViewController {
    top_n: TopNSettings,
}

impl ViewController {
    pub fn new(top_n: TopNSettings) -> Self {
        Self { top_n }
    }

    /// Build the view for `session`. No state is kept between calls.
    pub fn render(&self, dataset: &Dataset, session: &Session) -> DashboardView {
        match session.mode {
            Mode::Overall if session.overall_requested => {
                DashboardView::Overall(Box::new(OverallView::build(dataset, &self.top_n)))
            }
            Mode::Overall => DashboardView::OverallPrompt,
            Mode::InvestorDetail => match session.selected_investor.as_deref() {
                Some(investor) => DashboardView::Investor(Box::new(InvestorView::build(
                    dataset,
                    investor,
                    &self.top_n,
                ))),
                None => DashboardView::InvestorPrompt,
            },
            Mode::StartupDetail => DashboardView::StartupPending {
                startup: session.selected_startup.clone(),
            },
        }
    }
}
