//! Investor drill-down: every section is computed from one filtered frame.
//!
//! Amounts use the funding table's own `Amount` column as recorded. Unlike the
//! overall view no crore conversion is applied.

use crate::config::TopNSettings;
use crate::data::loader::{AMOUNT, CITY_LOCATION, DATE, INVESTORS, ROUND, STARTUP_NAME, VERTICAL, YEAR};
use crate::data::Dataset;
use crate::stats::{AggregateError, Aggregator};
use crate::view::model::{ChartKind, ChartSeries, Panel, TableView};
use polars::prelude::*;
use tracing::{debug, warn};

pub const UNIT_NOTE: &str = "Amount is in Crores";

const RECENT_COLUMNS: [&str; 6] = [DATE, STARTUP_NAME, VERTICAL, CITY_LOCATION, ROUND, AMOUNT];
const RAW_COLUMNS: [&str; 7] = [DATE, STARTUP_NAME, VERTICAL, CITY_LOCATION, INVESTORS, ROUND, AMOUNT];

#[derive(Debug, Clone, PartialEq)]
pub struct InvestorView {
    pub investor: String,
    pub note: &'static str,
    /// Rows matched by the investor filter.
    pub matched_rows: usize,
    pub recent_investments: Panel<TableView>,
    pub vertical_distribution: Panel<ChartSeries>,
    pub top_startups: Panel<ChartSeries>,
    /// Startup, summed amount and latest investment date.
    pub top_startups_table: Panel<TableView>,
    pub raw_rows: Panel<TableView>,
    pub city_ranking: Panel<ChartSeries>,
    pub yearly_trend: Panel<ChartSeries>,
}

impl InvestorView {
    pub fn build(dataset: &Dataset, investor: &str, top_n: &TopNSettings) -> Self {
        let filtered = match Aggregator::filter_rows_for_entity(&dataset.funding, INVESTORS, investor) {
            Ok(df) => df,
            Err(e) => {
                warn!(investor, error = %e, "investor filter failed");
                DataFrame::empty()
            }
        };
        let matched_rows = filtered.height();
        debug!(investor, matched_rows, "building investor view");

        let no_data = format!("No investment data for {investor}.");
        let empty_or = |message: String| if matched_rows == 0 { no_data.clone() } else { message };

        Self {
            investor: investor.to_string(),
            note: UNIT_NOTE,
            matched_rows,
            recent_investments: Panel::settle(
                "recent investments",
                recent_investments(&filtered, top_n.recent_investments),
                "No recent investments found for this investor.",
            ),
            vertical_distribution: Panel::settle(
                "vertical distribution",
                vertical_distribution(&filtered, top_n.vertical_pie),
                empty_or("No vertical investment data found.".to_string()),
            ),
            top_startups: Panel::settle(
                "top startups",
                top_startups(&filtered, top_n.startup_bar),
                empty_or("No startup investment data found.".to_string()),
            ),
            top_startups_table: Panel::settle(
                "top startups table",
                top_startups_table(&filtered, top_n.startup_bar),
                empty_or("No startup investment data found.".to_string()),
            ),
            raw_rows: Panel::settle(
                "raw rows",
                raw_rows(&filtered),
                "No data found for this investor.",
            ),
            city_ranking: Panel::settle(
                "city ranking",
                city_ranking(&filtered, top_n.city_bar),
                empty_or(format!("No city investment data found for {investor}.")),
            ),
            yearly_trend: Panel::settle(
                "yearly trend",
                yearly_trend(&filtered),
                empty_or(format!(
                    "No yearly investment data (or valid years) found for {investor}."
                )),
            ),
        }
    }
}

fn non_empty_table(df: DataFrame) -> Result<Option<TableView>, AggregateError> {
    if df.height() == 0 {
        return Ok(None);
    }
    Ok(Some(TableView::from_frame(&df)?))
}

fn recent_investments(df: &DataFrame, n: usize) -> Result<Option<TableView>, AggregateError> {
    if df.height() == 0 {
        return Ok(None);
    }
    let projected = Aggregator::select(df, &RECENT_COLUMNS)?;
    non_empty_table(Aggregator::latest_rows(&projected, DATE, n)?)
}

/// Positive amounts only, top verticals plus an "Others" slice.
fn vertical_distribution(df: &DataFrame, n: usize) -> Result<Option<ChartSeries>, AggregateError> {
    if df.height() == 0 {
        return Ok(None);
    }
    let positive = Aggregator::filter_positive(df, AMOUNT)?;
    let sums = Aggregator::group_sum(&positive, VERTICAL, AMOUNT)?;
    if sums.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        ChartSeries::new(
            "Investment Distribution by Vertical",
            ChartKind::Pie,
            "Vertical",
            "Amount",
        )
        .from_capped(&Aggregator::top_n_with_others(&sums, n)),
    ))
}

fn top_startups(df: &DataFrame, n: usize) -> Result<Option<ChartSeries>, AggregateError> {
    let sums = Aggregator::group_sum(df, STARTUP_NAME, AMOUNT)?;
    if sums.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        ChartSeries::new(
            "Top Startups by Investment Amount",
            ChartKind::Bar,
            "Startup",
            "Amount in Crores",
        )
        .from_result(Aggregator::top_n(&sums, n)),
    ))
}

fn top_startups_table(df: &DataFrame, n: usize) -> Result<Option<TableView>, AggregateError> {
    let sums = Aggregator::group_sum(df, STARTUP_NAME, AMOUNT)?;
    if sums.is_empty() {
        return Ok(None);
    }
    let latest = Aggregator::group_max(df, STARTUP_NAME, DATE)?;
    let rows = Aggregator::top_n(&sums, n)
        .into_entries()
        .into_iter()
        .map(|(startup, amount)| {
            let date = latest.get(&startup).cloned().unwrap_or_default();
            vec![startup, amount.to_string(), date]
        })
        .collect();

    Ok(Some(TableView {
        columns: vec![STARTUP_NAME.to_string(), AMOUNT.to_string(), DATE.to_string()],
        rows,
    }))
}

fn raw_rows(df: &DataFrame) -> Result<Option<TableView>, AggregateError> {
    if df.height() == 0 {
        return Ok(None);
    }
    non_empty_table(Aggregator::select(df, &RAW_COLUMNS)?)
}

fn city_ranking(df: &DataFrame, n: usize) -> Result<Option<ChartSeries>, AggregateError> {
    let sums = Aggregator::group_sum(df, CITY_LOCATION, AMOUNT)?;
    if sums.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        ChartSeries::new(
            "Investment Distribution by City (Top 10)",
            ChartKind::Bar,
            "City",
            "Amount in Crores",
        )
        .from_result(Aggregator::top_n(&sums, n)),
    ))
}

/// Yearly totals, oldest first; rows without a parsed date are left out.
fn yearly_trend(df: &DataFrame) -> Result<Option<ChartSeries>, AggregateError> {
    let sums = Aggregator::group_sum(df, YEAR, AMOUNT)?;
    if sums.is_empty() {
        return Ok(None);
    }
    Ok(Some(
        ChartSeries::new(
            "Investment Trend Over Years",
            ChartKind::Line,
            "Year",
            "Total Amount in Crores",
        )
        .from_result(sums.sorted_by_period()),
    ))
}
