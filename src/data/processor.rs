//! Data Processor Module
//! Cell coercion (dates, amounts) and the crore unit normalization.
//!
//! Every transform here is pure: it takes a frame by reference and returns a
//! new frame, leaving the loaded tables untouched.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use thiserror::Error;

/// Conversion rate applied before scaling to crores.
pub const USD_TO_NPR_RATE: f64 = 136.0;

/// One crore.
pub const CRORE: f64 = 10_000_000.0;

/// Day-first formats tried in order; ISO is accepted as a fallback.
const DATE_FORMATS: [&str; 7] = [
    "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%d/%m/%y", "%d-%m-%y", "%d.%m.%y", "%Y-%m-%d",
];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

/// Parse a day-first date string. Unparseable input yields `None`.
pub fn parse_day_first_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // chrono's %Y also takes "17", so short years must fall through to %y.
    DATE_FORMATS
        .iter()
        .filter_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .find(|date| date.year() >= 100)
}

/// Parse a monetary cell, tolerating thousands separators ("1,000,000").
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    let value = cleaned.parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// Convert a raw amount into crores. Nulls and non-finite values stay null.
pub fn to_crores(amount: Option<f64>) -> Option<f64> {
    let amount = amount.filter(|a| a.is_finite())?;
    Some(amount * USD_TO_NPR_RATE / CRORE)
}

/// Inverse of [`to_crores`].
pub fn from_crores(crores: f64) -> f64 {
    crores * CRORE / USD_TO_NPR_RATE
}

/// Check that every named column exists.
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<(), ProcessorError> {
    let present = df.get_column_names();
    for &name in columns {
        if !present.iter().any(|c| c.as_str() == name) {
            return Err(ProcessorError::MissingColumn(name.to_string()));
        }
    }
    Ok(())
}

/// Read a column as text regardless of its stored type.
pub fn text_column(df: &DataFrame, column: &str) -> Result<StringChunked, ProcessorError> {
    require_columns(df, &[column])?;
    let text = df.column(column)?.cast(&DataType::String)?;
    Ok(text.str()?.clone())
}

/// Read a column as `f64`; cells that do not cast become null.
pub fn float_column(df: &DataFrame, column: &str) -> Result<Float64Chunked, ProcessorError> {
    require_columns(df, &[column])?;
    let values = df.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.clone())
}

/// Handles cell coercion and unit conversion on whole columns.
pub struct DataProcessor;

impl DataProcessor {
    /// Replace the text `date_col` with its ISO form and add an `Int32` year column.
    ///
    /// Unparseable cells become null in both columns; the row is kept.
    pub fn parse_dates(
        df: &DataFrame,
        date_col: &str,
        year_col: &str,
    ) -> Result<DataFrame, ProcessorError> {
        let raw = text_column(df, date_col)?;

        let mut iso: Vec<Option<String>> = Vec::with_capacity(df.height());
        let mut years: Vec<Option<i32>> = Vec::with_capacity(df.height());
        let mut unparsed = 0usize;

        for cell in raw.into_iter() {
            let parsed = cell.and_then(parse_day_first_date);
            if cell.is_some() && parsed.is_none() {
                unparsed += 1;
            }
            iso.push(parsed.map(|d| d.format("%Y-%m-%d").to_string()));
            years.push(parsed.map(|d| d.year()));
        }

        if unparsed > 0 {
            tracing::debug!(column = date_col, unparsed, "date cells coerced to null");
        }

        let mut out = df.clone();
        out.with_column(Column::new(date_col.into(), iso))?;
        out.with_column(Column::new(year_col.into(), years))?;
        Ok(out)
    }

    /// Coerce a text column into nullable `f64`, stripping thousands separators.
    pub fn parse_amounts(df: &DataFrame, column: &str) -> Result<DataFrame, ProcessorError> {
        let raw = text_column(df, column)?;
        let values: Vec<Option<f64>> = raw
            .into_iter()
            .map(|cell| cell.and_then(parse_amount))
            .collect();

        let mut out = df.clone();
        out.with_column(Column::new(column.into(), values))?;
        Ok(out)
    }

    /// Return a copy of `df` with `column` converted to crores.
    pub fn normalize_column(df: &DataFrame, column: &str) -> Result<DataFrame, ProcessorError> {
        let values: Vec<Option<f64>> = float_column(df, column)?
            .into_iter()
            .map(to_crores)
            .collect();

        let mut out = df.clone();
        out.with_column(Column::new(column.into(), values))?;
        Ok(out)
    }
}
