//! Dataset loading and saving

use std::fs::{self, File};
use std::path::Path;

use polars::prelude::*;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::utils::dtypes::is_numeric_dtype;

/// Cell texts read as missing, in addition to empty fields
pub const NA_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Loads a dataset from a file location
pub trait DatasetReader {
    fn read(&self, path: &Path) -> Result<DataFrame>;
}

/// Persists a dataset to a file location, creating parent directories
pub trait DatasetWriter {
    fn write(&self, df: &DataFrame, path: &Path) -> Result<()>;
}

/// CSV reader/writer backed by polars.
///
/// Reading infers column types over the whole file unless a limit is set, so
/// a text value anywhere in a column makes the column non-numeric. Cells
/// matching [`NA_TOKENS`] are missing, and a column with no values at all is
/// read as `Float64`.
#[derive(Debug, Clone, Default)]
pub struct CsvDatasetIo {
    infer_schema_length: Option<usize>,
}

impl CsvDatasetIo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit type inference to the first `rows` rows
    pub fn with_infer_schema_length(mut self, rows: usize) -> Self {
        self.infer_schema_length = Some(rows);
        self
    }
}

impl DatasetReader for CsvDatasetIo {
    fn read(&self, path: &Path) -> Result<DataFrame> {
        let null_values = NullValues::AllColumns(NA_TOKENS.iter().map(|t| (*t).into()).collect());
        let mut df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .and_then(|reader| reader.finish())
            .map_err(|e| ValidationError::dataset_load(path, e))?;

        let empty: Vec<Column> = df
            .get_columns()
            .iter()
            .filter(|col| col.len() > 0 && col.null_count() == col.len() && !is_numeric_dtype(col.dtype()))
            .cloned()
            .collect();
        for col in empty {
            debug!(column = col.name().as_str(), "Reading empty column as Float64");
            let cast = col
                .cast(&DataType::Float64)
                .map_err(|e| ValidationError::dataset_load(path, e))?;
            df.with_column(cast)
                .map_err(|e| ValidationError::dataset_load(path, e))?;
        }

        debug!(path = %path.display(), rows = df.height(), cols = df.width(), "Loaded dataset");
        Ok(df)
    }
}

impl DatasetWriter for CsvDatasetIo {
    fn write(&self, df: &DataFrame, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;

        let mut file = File::create(path).map_err(|e| ValidationError::write(path, e))?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(&mut df.clone())
            .map_err(|e| ValidationError::write(path, e))?;

        debug!(path = %path.display(), rows = df.height(), "Wrote dataset");
        Ok(())
    }
}

/// Create the parent directory of `path` if it does not exist
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| ValidationError::write(dir, e))
        }
        _ => Ok(()),
    }
}
