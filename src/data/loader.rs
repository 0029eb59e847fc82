//! Bench Table Loader Module
//! Loads a test-bench CSV export into a Polars DataFrame.
//!
//! Table parsing stays a black box here: downstream code only ever sees
//! the DataFrame's column labels and cell values.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Table `{}` contains no data rows", .0.display())]
    Empty(PathBuf),
}

/// One loaded test-bench export.
pub struct BenchTable {
    df: DataFrame,
    path: PathBuf,
}

impl BenchTable {
    /// Load a CSV export. Header inference is left to Polars; unreadable
    /// cells become nulls instead of failing the load (the normalizer
    /// deals with them row by row).
    pub fn load(path: &Path) -> Result<Self, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        if df.height() == 0 {
            return Err(LoaderError::Empty(path.to_path_buf()));
        }

        Ok(Self {
            df,
            path: path.to_path_buf(),
        })
    }

    /// Observed column labels, exactly as they appear in the export.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
