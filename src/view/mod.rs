//! View module - Selection state and the view models built from it

mod controller;
pub mod investor;
pub mod model;
pub mod overall;
mod session;

pub use controller::{DashboardView, ViewController};
pub use investor::InvestorView;
pub use model::{ChartKind, ChartSeries, Metric, MetricGroup, Panel, TableView};
pub use overall::OverallView;
pub use session::{Mode, Session};
