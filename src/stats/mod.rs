//! Stats module - Group-by aggregation engine

mod aggregator;

pub use aggregator::{AggregateError, AggregateResult, Aggregator, TopNWithOthers, OTHERS_LABEL};
