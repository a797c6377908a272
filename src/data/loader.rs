//! CSV Data Loader Module
//! Reads the funding and reference tables with Polars and fixes up their schema.

use crate::data::processor::{DataProcessor, ProcessorError};
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::info;

/// Positional column names of the primary funding table.
pub const FUNDING_COLUMNS: [&str; 17] = [
    "Date",
    "Startup Name",
    "Vertical",
    "SubVertical",
    "City Location",
    "Investors",
    "Round",
    "Amount",
    "Startup Names",
    "Industries",
    "Funding Rounds",
    "Investment Amount",
    "Valuation",
    "Number of Investors",
    "Country",
    "Year Founded",
    "Growth Rate (%)",
];

pub const DATE: &str = "Date";
pub const YEAR: &str = "Year";
pub const STARTUP_NAME: &str = "Startup Name";
pub const STARTUP_NAMES: &str = "Startup Names";
pub const VERTICAL: &str = "Vertical";
pub const CITY_LOCATION: &str = "City Location";
pub const INVESTORS: &str = "Investors";
pub const ROUND: &str = "Round";
pub const AMOUNT: &str = "Amount";
pub const INVESTMENT_AMOUNT: &str = "Investment Amount";

/// Harmonised reference table columns.
pub const FIELD: &str = "Field";
pub const REGION: &str = "Region";
pub const USD_AMOUNT: &str = "Investment Amount (USD)";
pub const YEAR_FOUNDED: &str = "Year Founded";

/// Raw reference table headers.
const GLOBAL_INDUSTRY: &str = "Industry";
const GLOBAL_COUNTRY: &str = "Country";
const INDIA_AMOUNT: &str = "Amount in USD";
const INDIA_VERTICAL: &str = "Industry Vertical";
/// The double space is part of the source header.
const INDIA_CITY: &str = "City  Location";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Expected {expected} columns, found {found}")]
    SchemaMismatch { expected: usize, found: usize },
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

impl From<ProcessorError> for LoaderError {
    fn from(err: ProcessorError) -> Self {
        match err {
            ProcessorError::PolarsError(e) => LoaderError::CsvError(e),
            ProcessorError::MissingColumn(c) => LoaderError::MissingColumn(c),
        }
    }
}

/// Loads the dashboard's CSV inputs.
pub struct DataLoader;

impl DataLoader {
    /// Read a CSV with every column as text; coercion happens afterwards.
    pub fn read_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.display().to_string()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "read csv"
        );
        Ok(df)
    }

    /// Load the primary funding table.
    ///
    /// Columns are renamed positionally, `Date` is parsed day-first into ISO
    /// text with a derived `Year`, and both amount columns become `f64`.
    pub fn load_funding(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = Self::read_csv(path)?;
        Self::prepare_funding(df)
    }

    /// Apply the funding schema to an already-read frame.
    pub fn prepare_funding(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        if df.width() != FUNDING_COLUMNS.len() {
            return Err(LoaderError::SchemaMismatch {
                expected: FUNDING_COLUMNS.len(),
                found: df.width(),
            });
        }
        df.set_column_names(FUNDING_COLUMNS)?;

        let df = DataProcessor::parse_dates(&df, DATE, YEAR)?;
        let df = DataProcessor::parse_amounts(&df, AMOUNT)?;
        let df = DataProcessor::parse_amounts(&df, INVESTMENT_AMOUNT)?;
        Ok(df)
    }

    /// Load the global reference table.
    pub fn load_global(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = Self::read_csv(path)?;
        Self::prepare_global(df)
    }

    pub fn prepare_global(df: DataFrame) -> Result<DataFrame, LoaderError> {
        Self::require(
            &df,
            &[GLOBAL_INDUSTRY, USD_AMOUNT, GLOBAL_COUNTRY, YEAR_FOUNDED, STARTUP_NAME],
        )?;
        Ok(DataProcessor::parse_amounts(&df, USD_AMOUNT)?)
    }

    /// Load the India reference table, accepting either amount header.
    pub fn load_india(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = Self::read_csv(path)?;
        Self::prepare_india(df)
    }

    pub fn prepare_india(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        let has = |df: &DataFrame, name: &str| {
            df.get_column_names().iter().any(|c| c.as_str() == name)
        };
        if has(&df, INDIA_AMOUNT) && !has(&df, USD_AMOUNT) {
            df.rename(INDIA_AMOUNT, USD_AMOUNT.into())?;
        }
        Self::require(&df, &[USD_AMOUNT, INDIA_VERTICAL, INDIA_CITY, STARTUP_NAME])?;
        Ok(DataProcessor::parse_amounts(&df, USD_AMOUNT)?)
    }

    /// Harmonise both reference tables into
    /// `[Field, Region, Startup Name, Investment Amount (USD), Year Founded]`
    /// and stack them. India rows carry a null `Year Founded`.
    pub fn reference_table(global: &DataFrame, india: &DataFrame) -> Result<DataFrame, LoaderError> {
        let global_part = Self::harmonise(global, GLOBAL_INDUSTRY, GLOBAL_COUNTRY, Some(YEAR_FOUNDED))?;
        let india_part = Self::harmonise(india, INDIA_VERTICAL, INDIA_CITY, None)?;
        Ok(global_part.vstack(&india_part)?)
    }

    fn harmonise(
        df: &DataFrame,
        field_col: &str,
        region_col: &str,
        founded_col: Option<&str>,
    ) -> Result<DataFrame, LoaderError> {
        let text = |name: &str| -> Result<Vec<Option<String>>, LoaderError> {
            Ok(crate::data::processor::text_column(df, name)?
                .into_iter()
                .map(|v| v.map(str::to_string))
                .collect())
        };

        let founded = match founded_col {
            Some(name) => text(name)?,
            None => vec![None; df.height()],
        };
        let amounts: Vec<Option<f64>> = crate::data::processor::float_column(df, USD_AMOUNT)?
            .into_iter()
            .collect();

        let out = DataFrame::new(vec![
            Column::new(FIELD.into(), text(field_col)?),
            Column::new(REGION.into(), text(region_col)?),
            Column::new(STARTUP_NAME.into(), text(STARTUP_NAME)?),
            Column::new(USD_AMOUNT.into(), amounts),
            Column::new(YEAR_FOUNDED.into(), founded),
        ])?;
        Ok(out)
    }

    fn require(df: &DataFrame, columns: &[&str]) -> Result<(), LoaderError> {
        Ok(crate::data::processor::require_columns(df, columns)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().unwrap();
        write!(tmp, "{}", content).unwrap();
        tmp
    }

    const HEADER: &str = "d,s,v,sv,c,i,r,a,s2,ind,fr,ia,val,ni,co,yf,gr\n";

    #[test]
    fn test_file_not_found() {
        let result = DataLoader::load_funding(Path::new("nonexistent.csv"));
        assert!(matches!(result, Err(LoaderError::NotFound(_))));
    }

    #[test]
    fn test_funding_columns_renamed_positionally() {
        let csv = format!(
            "{HEADER}05/03/2017,Ola,Transport,Cabs,Bengaluru,\"A, B\",Seed,\"1,500\",,,,200,,,,,\n"
        );
        let tmp = write_csv(&csv);
        let df = DataLoader::load_funding(tmp.path()).unwrap();

        let names: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
        assert_eq!(&names[..17], FUNDING_COLUMNS.map(String::from).as_slice());
        assert_eq!(names[17], YEAR);

        let amount = df.column(AMOUNT).unwrap().f64().unwrap().get(0);
        assert_eq!(amount, Some(1500.0));
        let year = df.column(YEAR).unwrap().i32().unwrap().get(0);
        assert_eq!(year, Some(2017));
    }

    #[test]
    fn test_bad_date_becomes_null() {
        let csv = format!("{HEADER}someday,Ola,Transport,,,A,,10,,,,,,,,,\n");
        let tmp = write_csv(&csv);
        let df = DataLoader::load_funding(tmp.path()).unwrap();

        assert_eq!(df.height(), 1);
        assert_eq!(df.column(DATE).unwrap().str().unwrap().get(0), None);
        assert_eq!(df.column(YEAR).unwrap().i32().unwrap().get(0), None);
    }

    #[test]
    fn test_wrong_column_count_is_schema_mismatch() {
        let tmp = write_csv("a,b,c\n1,2,3\n");
        let result = DataLoader::load_funding(tmp.path());
        assert!(matches!(
            result,
            Err(LoaderError::SchemaMismatch {
                expected: 17,
                found: 3
            })
        ));
    }

    #[test]
    fn test_india_amount_header_is_renamed() {
        let tmp = write_csv(
            "Startup Name,Industry Vertical,City  Location,Amount in USD\nOla,Transport,Bengaluru,\"2,000\"\n",
        );
        let df = DataLoader::load_india(tmp.path()).unwrap();
        assert_eq!(df.column(USD_AMOUNT).unwrap().f64().unwrap().get(0), Some(2000.0));
    }

    #[test]
    fn test_global_missing_column() {
        let tmp = write_csv("Industry,Country,Startup Name\nFintech,USA,Stripe\n");
        let result = DataLoader::load_global(tmp.path());
        assert!(matches!(result, Err(LoaderError::MissingColumn(c)) if c == USD_AMOUNT));
    }

    #[test]
    fn test_reference_table_stacks_both_sources() {
        let global = DataLoader::prepare_global(
            df! {
                "Industry" => ["Fintech"],
                "Investment Amount (USD)" => ["1,000"],
                "Country" => ["USA"],
                "Year Founded" => ["2010"],
                "Startup Name" => ["Stripe"],
            }
            .unwrap(),
        )
        .unwrap();
        let india = DataLoader::prepare_india(
            df! {
                "Startup Name" => ["Ola", "Swiggy"],
                "Industry Vertical" => ["Transport", "Food"],
                "City  Location" => ["Bengaluru", "Bengaluru"],
                "Amount in USD" => ["500", "N/A"],
            }
            .unwrap(),
        )
        .unwrap();

        let reference = DataLoader::reference_table(&global, &india).unwrap();
        assert_eq!(reference.height(), 3);

        let regions: Vec<Option<&str>> = reference.column(REGION).unwrap().str().unwrap().into_iter().collect();
        assert_eq!(regions, vec![Some("USA"), Some("Bengaluru"), Some("Bengaluru")]);

        let amounts: Vec<Option<f64>> = reference.column(USD_AMOUNT).unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(amounts, vec![Some(1000.0), Some(500.0), None]);

        let founded = reference.column(YEAR_FOUNDED).unwrap().str().unwrap();
        assert_eq!(founded.get(0), Some("2010"));
        assert_eq!(founded.get(1), None);
    }
}
