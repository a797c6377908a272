//! Data module - CSV loading, coercion and entity extraction

pub mod entities;
pub mod loader;
pub mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{DataProcessor, ProcessorError};

use crate::config::DataPaths;
use polars::prelude::*;
use tracing::info;

/// Everything loaded at startup. Read-only afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Primary funding table with the fixed 17-column schema plus `Year`.
    pub funding: DataFrame,
    /// Global and India reference tables stacked on a shared schema.
    pub reference: DataFrame,
    pub startups: Vec<String>,
    pub investors: Vec<String>,
}

impl Dataset {
    /// Load all three inputs; any failure aborts.
    pub fn load(paths: &DataPaths) -> Result<Self, LoaderError> {
        let funding = DataLoader::load_funding(&paths.funding)?;
        let global = DataLoader::load_global(&paths.global)?;
        let india = DataLoader::load_india(&paths.india)?;
        Self::from_frames(funding, &global, &india)
    }

    /// Build from frames that already went through the loader's schema step.
    pub fn from_frames(
        funding: DataFrame,
        global: &DataFrame,
        india: &DataFrame,
    ) -> Result<Self, LoaderError> {
        let reference = DataLoader::reference_table(global, india)?;
        let startups = entities::startups(&funding)?;
        let investors = entities::investors(&funding)?;

        info!(
            funding_rows = funding.height(),
            reference_rows = reference.height(),
            startups = startups.len(),
            investors = investors.len(),
            "dataset ready"
        );

        Ok(Self {
            funding,
            reference,
            startups,
            investors,
        })
    }
}
