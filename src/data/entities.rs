//! Entity Extractor
//! Distinct startups and investors derived once from the funding table.

use crate::data::loader::{INVESTORS, STARTUP_NAME, STARTUP_NAMES};
use crate::data::processor::{text_column, ProcessorError};
use polars::prelude::*;
use std::collections::BTreeSet;

/// Shown in the investor picker when no investor survives extraction.
pub const NO_INVESTORS_PLACEHOLDER: &str = "No investors available";

/// Leading entries of the sorted investor list that are skipped.
///
/// Positional data-quality workaround: the first two sorted tokens of the
/// source data are noise. This is not a validated business rule and will
/// drop real names if the data changes.
pub const SKIPPED_LEADING_INVESTORS: usize = 2;

/// Split a multi-valued cell into trimmed, non-empty tokens.
pub fn split_tokens(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Distinct startup names pooled from both name columns, sorted.
pub fn startups(df: &DataFrame) -> Result<Vec<String>, ProcessorError> {
    let mut names: BTreeSet<String> = BTreeSet::new();
    for column in [STARTUP_NAME, STARTUP_NAMES] {
        let values = text_column(df, column)?;
        names.extend(values.into_iter().flatten().map(str::to_string));
    }
    Ok(names.into_iter().collect())
}

/// Every distinct investor token, sorted, before the leading skip.
pub fn distinct_investors(df: &DataFrame) -> Result<Vec<String>, ProcessorError> {
    let cells = text_column(df, INVESTORS)?;
    let set: BTreeSet<String> = cells
        .into_iter()
        .flatten()
        .flat_map(split_tokens)
        .map(str::to_string)
        .collect();
    Ok(set.into_iter().collect())
}

/// Investor choices for the picker.
///
/// Falls back to a single placeholder entry when nothing remains.
pub fn investors(df: &DataFrame) -> Result<Vec<String>, ProcessorError> {
    let picked: Vec<String> = distinct_investors(df)?
        .into_iter()
        .skip(SKIPPED_LEADING_INVESTORS)
        .collect();

    if picked.is_empty() {
        return Ok(vec![NO_INVESTORS_PLACEHOLDER.to_string()]);
    }
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn investor_frame(cells: &[Option<&str>]) -> DataFrame {
        df! { INVESTORS => cells }.unwrap()
    }

    #[test]
    fn test_split_tokens_trims_and_drops_empty() {
        let tokens: Vec<&str> = split_tokens(" Sequoia ,, Accel,").collect();
        assert_eq!(tokens, vec!["Sequoia", "Accel"]);
    }

    #[test]
    fn test_distinct_investors_dedup_and_sort() {
        let df = investor_frame(&[Some("X, Y, X"), Some("Z,"), None]);
        assert_eq!(distinct_investors(&df).unwrap(), vec!["X", "Y", "Z"]);
        assert_eq!(investors(&df).unwrap(), vec!["Z"]);
    }

    #[test]
    fn test_investors_placeholder_when_exhausted() {
        let df = investor_frame(&[Some("A, B"), Some(" , ")]);
        assert_eq!(investors(&df).unwrap(), vec![NO_INVESTORS_PLACEHOLDER]);
    }

    #[test]
    fn test_startups_pool_both_columns() {
        let df = df! {
            STARTUP_NAME => [Some("Ola"), None, Some("Zomato")],
            STARTUP_NAMES => [Some("Startup_4541"), Some("Ola"), None],
        }
        .unwrap();
        assert_eq!(startups(&df).unwrap(), vec!["Ola", "Startup_4541", "Zomato"]);
    }

    #[test]
    fn test_startups_case_sensitive() {
        let df = df! {
            STARTUP_NAME => ["ola", "Ola"],
            STARTUP_NAMES => [None::<&str>, None],
        }
        .unwrap();
        assert_eq!(startups(&df).unwrap(), vec!["Ola", "ola"]);
    }
}
