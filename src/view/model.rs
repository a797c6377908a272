//! Render-ready view models handed to the GUI.

use crate::stats::{AggregateError, AggregateResult, TopNWithOthers};
use polars::prelude::*;
use tracing::warn;

/// A labelled single value.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Heading plus the metrics shown under it.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricGroup {
    pub heading: String,
    pub metrics: Panel<Vec<Metric>>,
}

/// Rows of display text under named columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableView {
    /// Render every cell of `df` as text; nulls become empty strings.
    pub fn from_frame(df: &DataFrame) -> Result<Self, AggregateError> {
        let columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = vec![Vec::with_capacity(columns.len()); df.height()];
        for column in df.get_columns() {
            let text = column.cast(&DataType::String)?;
            for (row, cell) in rows.iter_mut().zip(text.str()?.into_iter()) {
                row.push(cell.unwrap_or_default().to_string());
            }
        }

        Ok(Self { columns, rows })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Pie,
    Bar,
    Line,
}

/// Category/value pairs in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(String, f64)>,
}

impl ChartSeries {
    pub fn new(title: &str, kind: ChartKind, x_label: &str, y_label: &str) -> Self {
        Self {
            title: title.to_string(),
            kind,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            points: Vec::new(),
        }
    }

    pub fn with_points(mut self, points: Vec<(String, f64)>) -> Self {
        self.points = points;
        self
    }

    pub fn from_result(self, result: AggregateResult) -> Self {
        self.with_points(result.into_entries())
    }

    pub fn from_capped(self, capped: &TopNWithOthers) -> Self {
        self.with_points(capped.entries())
    }
}

/// A dashboard section: content, or the message to show instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Panel<T> {
    Ready(T),
    Empty(String),
}

impl<T> Panel<T> {
    /// Settle a section computation. `Ok(None)` and errors both become the
    /// empty state; errors are logged, never surfaced.
    pub fn settle(
        section: &str,
        result: Result<Option<T>, AggregateError>,
        empty_message: impl Into<String>,
    ) -> Self {
        match result {
            Ok(Some(content)) => Panel::Ready(content),
            Ok(None) => Panel::Empty(empty_message.into()),
            Err(e) => {
                warn!(section, error = %e, "section unavailable");
                Panel::Empty(empty_message.into())
            }
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Panel::Ready(content) => Some(content),
            Panel::Empty(_) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Panel::Empty(_))
    }
}

/// Format an amount for metric display.
pub fn format_crores(value: f64) -> String {
    format!("{:.2} Cr", value)
}
