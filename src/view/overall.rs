//! Overall analysis: headline metrics and charts across the reference tables.
//!
//! Amounts here are converted to crores before any aggregation. The investor
//! view does not convert (see `investor.rs`); the two views are not
//! unit-consistent.

use crate::config::TopNSettings;
use crate::data::loader::{FIELD, REGION, STARTUP_NAME, USD_AMOUNT, YEAR_FOUNDED};
use crate::data::{DataProcessor, Dataset};
use crate::stats::{AggregateError, Aggregator};
use crate::view::model::{format_crores, ChartKind, ChartSeries, Metric, MetricGroup, Panel};
use polars::prelude::*;
use tracing::{debug, warn};

pub const UNIT_NOTE: &str = "Amount is in Crores";

#[derive(Debug, Clone, PartialEq)]
pub struct OverallView {
    pub note: &'static str,
    /// Most invested field, country/city and startup.
    pub headlines: Vec<MetricGroup>,
    pub founded_by_year: Panel<ChartSeries>,
    pub investment_by_region: Panel<ChartSeries>,
}

impl OverallView {
    /// Recompute every section from scratch.
    pub fn build(dataset: &Dataset, top_n: &TopNSettings) -> Self {
        debug!("building overall view");
        let normalized = match DataProcessor::normalize_column(&dataset.reference, USD_AMOUNT) {
            Ok(df) => Some(df),
            Err(e) => {
                warn!(error = %e, "reference amounts could not be normalized");
                None
            }
        };

        let headlines = [
            ("Most Invested Field", FIELD),
            ("Most Invested Country", REGION),
            ("Most Invested Startup", STARTUP_NAME),
        ]
        .into_iter()
        .map(|(heading, key)| MetricGroup {
            heading: heading.to_string(),
            metrics: Panel::settle(
                heading,
                normalized.as_ref().map_or(Ok(None), |df| leader(df, heading, key)),
                "No investment data available.",
            ),
        })
        .collect();

        let founded_by_year = Panel::settle(
            "founded by year",
            founded_trend(&dataset.reference),
            "No founding year data available.",
        );

        let investment_by_region = Panel::settle(
            "investment by region",
            normalized
                .as_ref()
                .map_or(Ok(None), |df| region_ranking(df, top_n.region_bar)),
            "No regional investment data available.",
        );

        Self {
            note: UNIT_NOTE,
            headlines,
            founded_by_year,
            investment_by_region,
        }
    }
}

/// Name and amount of the top group.
fn leader(df: &DataFrame, heading: &str, key: &str) -> Result<Option<Vec<Metric>>, AggregateError> {
    let sums = Aggregator::group_sum(df, key, USD_AMOUNT)?;
    Ok(sums.first().map(|(name, amount)| {
        vec![
            Metric::new(heading, name),
            Metric::new("It's Investment Amount", format_crores(amount)),
        ]
    }))
}

/// Startups founded per year, oldest year first. Only the global rows carry
/// a founding year.
fn founded_trend(reference: &DataFrame) -> Result<Option<ChartSeries>, AggregateError> {
    let counts = Aggregator::group_count(reference, YEAR_FOUNDED, STARTUP_NAME)?;
    if counts.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        ChartSeries::new(
            "Number of Startups Founded by Year",
            ChartKind::Line,
            "Year Founded",
            "Number of Startups",
        )
        .from_result(counts.sorted_by_period()),
    ))
}

fn region_ranking(df: &DataFrame, n: usize) -> Result<Option<ChartSeries>, AggregateError> {
    let sums = Aggregator::group_sum(df, REGION, USD_AMOUNT)?;
    if sums.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        ChartSeries::new(
            "Investment Amount by Country",
            ChartKind::Bar,
            "Country",
            "Investment Amount (Cr)",
        )
        .from_result(Aggregator::top_n(&sums, n)),
    ))
}
