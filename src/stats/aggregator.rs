//! Aggregation Engine
//! Group-by sums and counts, top-N slicing, and row filters shared by all views.

use crate::data::entities::split_tokens;
use crate::data::processor::{float_column, require_columns, text_column, ProcessorError};
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;
use thiserror::Error;

/// Label of the synthetic bucket collapsing a long tail.
pub const OTHERS_LABEL: &str = "Others";

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

impl From<ProcessorError> for AggregateError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::PolarsError(e) => AggregateError::PolarsError(e),
            ProcessorError::MissingColumn(c) => AggregateError::MissingColumn(c),
        }
    }
}

/// Ordered `(key, value)` pairs with unique keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateResult {
    entries: Vec<(String, f64)>,
}

impl AggregateResult {
    pub fn new(entries: Vec<(String, f64)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<(String, f64)> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<(&str, f64)> {
        self.entries.first().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Reorder ascending by period, for time series.
    ///
    /// Keys that parse as numbers compare numerically and sort before
    /// non-numeric keys.
    pub fn sorted_by_period(mut self) -> Self {
        self.entries.sort_by(|(a, _), (b, _)| compare_periods(a, b));
        self
    }
}

fn compare_periods(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Top entries of a ranking plus an optional trailing "Others" bucket.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopNWithOthers {
    pub top: AggregateResult,
    /// Sum of everything past the cutoff; only set when strictly positive.
    pub others: Option<f64>,
}

impl TopNWithOthers {
    /// All entries, with "Others" last when present.
    pub fn entries(&self) -> Vec<(String, f64)> {
        let mut entries = self.top.entries().to_vec();
        if let Some(rest) = self.others {
            entries.push((OTHERS_LABEL.to_string(), rest));
        }
        entries
    }

    pub fn total(&self) -> f64 {
        self.top.total() + self.others.unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.others.is_none()
    }
}

/// Running per-group accumulator that remembers first-seen order.
#[derive(Default)]
struct GroupAccumulator {
    index: HashMap<String, usize>,
    entries: Vec<(String, f64)>,
}

impl GroupAccumulator {
    fn add(&mut self, key: &str, value: f64) {
        match self.index.get(key) {
            Some(&i) => self.entries[i].1 += value,
            None => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), value));
            }
        }
    }

    /// Descending by value; `sort_by` is stable so ties keep first-seen order.
    fn into_ranked(mut self) -> AggregateResult {
        self.entries
            .sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        AggregateResult::new(self.entries)
    }
}

/// Stateless query layer over polars frames.
pub struct Aggregator;

impl Aggregator {
    /// Sum `value_key` per `group_key`, ignoring null values, sorted descending.
    ///
    /// Rows with a null key are dropped, and a group whose values are all null
    /// produces no entry.
    pub fn group_sum(
        df: &DataFrame,
        group_key: &str,
        value_key: &str,
    ) -> Result<AggregateResult, AggregateError> {
        require_columns(df, &[group_key, value_key])?;
        let keys = text_column(df, group_key)?;
        let values = float_column(df, value_key)?;

        let mut acc = GroupAccumulator::default();
        for (key, value) in keys.into_iter().zip(values.into_iter()) {
            if let (Some(k), Some(v)) = (key, value) {
                if !v.is_nan() {
                    acc.add(k, v);
                }
            }
        }
        Ok(acc.into_ranked())
    }

    /// Count non-null `count_key` cells per `group_key`, sorted descending.
    pub fn group_count(
        df: &DataFrame,
        group_key: &str,
        count_key: &str,
    ) -> Result<AggregateResult, AggregateError> {
        require_columns(df, &[group_key, count_key])?;
        let keys = text_column(df, group_key)?;
        let counted = text_column(df, count_key)?;

        let mut acc = GroupAccumulator::default();
        for (key, cell) in keys.into_iter().zip(counted.into_iter()) {
            if let (Some(k), Some(_)) = (key, cell) {
                acc.add(k, 1.0);
            }
        }
        Ok(acc.into_ranked())
    }

    /// Greatest non-null text value of `value_key` per group.
    ///
    /// With ISO dates this is the most recent date.
    pub fn group_max(
        df: &DataFrame,
        group_key: &str,
        value_key: &str,
    ) -> Result<HashMap<String, String>, AggregateError> {
        require_columns(df, &[group_key, value_key])?;
        let keys = text_column(df, group_key)?;
        let values = text_column(df, value_key)?;

        let mut latest: HashMap<String, String> = HashMap::new();
        for (key, value) in keys.into_iter().zip(values.into_iter()) {
            if let (Some(k), Some(v)) = (key, value) {
                latest
                    .entry(k.to_string())
                    .and_modify(|cur| {
                        if v > cur.as_str() {
                            *cur = v.to_string();
                        }
                    })
                    .or_insert_with(|| v.to_string());
            }
        }
        Ok(latest)
    }

    /// First `n` entries of an already-ranked result.
    pub fn top_n(result: &AggregateResult, n: usize) -> AggregateResult {
        AggregateResult::new(result.entries().iter().take(n).cloned().collect())
    }

    /// First `n` entries, with the remainder folded into "Others" when positive.
    pub fn top_n_with_others(result: &AggregateResult, n: usize) -> TopNWithOthers {
        let top = Self::top_n(result, n);
        let rest: f64 = result.entries().iter().skip(n).map(|(_, v)| v).sum();
        TopNWithOthers {
            top,
            others: (rest > 0.0).then_some(rest),
        }
    }

    /// Rows whose comma-separated `column` contains `entity` as a whole token.
    ///
    /// The query is trimmed of whitespace and stray commas first; an empty
    /// query selects nothing.
    pub fn filter_rows_for_entity(
        df: &DataFrame,
        column: &str,
        entity: &str,
    ) -> Result<DataFrame, AggregateError> {
        let cells = text_column(df, column)?;
        let query = entity.trim_matches(|c: char| c == ',' || c.is_whitespace());

        let mask: BooleanChunked = cells
            .into_iter()
            .map(|cell| match cell {
                Some(c) if !query.is_empty() => split_tokens(c).any(|t| t == query),
                _ => false,
            })
            .collect();

        Ok(df.filter(&mask)?)
    }

    /// Rows where `value_key` is strictly positive.
    pub fn filter_positive(df: &DataFrame, value_key: &str) -> Result<DataFrame, AggregateError> {
        let values = float_column(df, value_key)?;
        let mask: BooleanChunked = values
            .into_iter()
            .map(|v| v.is_some_and(|v| v > 0.0))
            .collect();
        Ok(df.filter(&mask)?)
    }

    /// The `n` rows with the greatest `order_key`, nulls last.
    pub fn latest_rows(
        df: &DataFrame,
        order_key: &str,
        n: usize,
    ) -> Result<DataFrame, AggregateError> {
        require_columns(df, &[order_key])?;
        let sorted = df.sort(
            [order_key],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_nulls_last(true)
                .with_maintain_order(true),
        )?;
        Ok(sorted.head(Some(n)))
    }

    /// Project onto `columns` in the given order.
    pub fn select(df: &DataFrame, columns: &[&str]) -> Result<DataFrame, AggregateError> {
        require_columns(df, columns)?;
        Ok(df.select(columns.iter().copied())?)
    }
}
