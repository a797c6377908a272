//! Startup Funding Dashboard
//!
//! Loads startup funding CSVs with Polars and serves an overall and a
//! per-investor analysis to an egui front end.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod stats;
pub mod view;
