//! CSV Data Loader Module
//! Reads tabular sources with Polars, validates required columns and
//! coerces designated columns to numbers.

use log::{debug, warn};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Data file not found: {}", path.display())]
    FileNotFound { path: PathBuf },
    #[error("Failed to parse {}: {source}", path.display())]
    ParseError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("Missing required columns: {}", missing.join(", "))]
    MissingColumns { missing: Vec<String> },
    #[error("Failed to convert column '{column}' to numbers: {source}")]
    Coercion {
        column: String,
        #[source]
        source: PolarsError,
    },
}

/// Semantic type expected of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Categorical,
    Numeric,
    /// Produced by a transformation (binning), not read from the source.
    Derived,
}

/// A column the caller expects, with its semantic type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn categorical(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Categorical,
        }
    }

    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Numeric,
        }
    }

    pub fn derived(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Derived,
        }
    }
}

/// Returns the subset of `names` absent from `df`, in request order, without duplicates.
pub fn missing_columns<S: AsRef<str>>(df: &DataFrame, names: &[S]) -> Vec<String> {
    let mut missing: Vec<String> = Vec::new();
    for name in names {
        let name = name.as_ref();
        if df.get_column_index(name).is_none() && !missing.iter().any(|m| m == name) {
            missing.push(name.to_string());
        }
    }
    missing
}

/// Loads CSV files relative to an explicit data root.
///
/// Every call re-reads the file; nothing is cached between loads.
#[derive(Debug, Clone)]
pub struct DataLoader {
    data_root: PathBuf,
    infer_schema_length: Option<usize>,
}

impl DataLoader {
    pub fn new(data_root: impl Into<PathBuf>) -> Self {
        Self {
            data_root: data_root.into(),
            infer_schema_length: Some(10000),
        }
    }

    pub fn with_infer_schema_length(mut self, rows: Option<usize>) -> Self {
        self.infer_schema_length = rows;
        self
    }

    pub fn data_root(&self) -> &Path {
        &self.data_root
    }

    /// Resolve a file name against the data root. Absolute paths are kept as is.
    pub fn resolve(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.data_root.join(file_name)
    }

    /// Load a CSV file and verify that every required column is present.
    ///
    /// A file with a header and no data rows loads successfully as an empty
    /// frame; callers decide how to present that. Cells that do not match the
    /// inferred column type become missing.
    pub fn load<S: AsRef<str>>(
        &self,
        file_name: impl AsRef<Path>,
        required: &[S],
    ) -> Result<DataFrame, LoadError> {
        self.load_numeric(file_name, required, &[])
    }

    /// Like [`load`](Self::load), then convert the `numeric` columns that are
    /// present to `Float64`.
    ///
    /// Those columns are read as text, so noise anywhere in the file (also
    /// past the schema inference window) is left for [`coerce_numeric`]
    /// to turn into missing values.
    ///
    /// [`coerce_numeric`]: Self::coerce_numeric
    pub fn load_numeric<S: AsRef<str>>(
        &self,
        file_name: impl AsRef<Path>,
        required: &[S],
        numeric: &[&str],
    ) -> Result<DataFrame, LoadError> {
        let path = self.resolve(file_name);

        let readable = File::open(&path)
            .and_then(|f| f.metadata())
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !readable {
            return Err(LoadError::FileNotFound { path });
        }

        let df = self
            .read_csv(&path, numeric)
            .map_err(|source| LoadError::ParseError {
                path: path.clone(),
                source,
            })?;

        debug!(
            "Loaded {} ({} rows, {} columns)",
            path.display(),
            df.height(),
            df.width()
        );

        let missing = missing_columns(&df, required);
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns { missing });
        }

        if numeric.is_empty() {
            return Ok(df);
        }
        let present: Vec<&str> = numeric
            .iter()
            .copied()
            .filter(|c| df.get_column_index(c).is_some())
            .collect();
        Self::coerce_numeric(&df, &present)
    }

    fn read_csv(&self, path: &Path, text_columns: &[&str]) -> PolarsResult<DataFrame> {
        let mut reader = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(self.infer_schema_length)
            .with_ignore_errors(true);

        if !text_columns.is_empty() {
            // Header only: with no rows to infer from, every column reads as text.
            let header = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(0))
                .finish()?
                .collect_schema()?;
            let overrides: Vec<&str> = text_columns
                .iter()
                .copied()
                .filter(|c| header.contains(c))
                .collect();
            if !overrides.is_empty() {
                let mut schema = Schema::with_capacity(overrides.len());
                for name in overrides {
                    schema.with_column(name.into(), DataType::String);
                }
                reader = reader.with_dtype_overwrite(Some(Arc::new(schema)));
            }
        }

        reader.finish()?.collect()
    }

    /// Load with typed column specs: presence of every non-derived column is
    /// checked and numeric columns are coerced.
    pub fn load_specs(
        &self,
        file_name: impl AsRef<Path>,
        specs: &[ColumnSpec],
    ) -> Result<DataFrame, LoadError> {
        let required: Vec<&str> = specs
            .iter()
            .filter(|s| s.kind != ColumnKind::Derived)
            .map(|s| s.name.as_str())
            .collect();
        let numeric: Vec<&str> = specs
            .iter()
            .filter(|s| s.kind == ColumnKind::Numeric)
            .map(|s| s.name.as_str())
            .collect();
        self.load_numeric(file_name, &required, &numeric)
    }

    /// Convert the named columns to `Float64`.
    ///
    /// Cells that cannot be parsed become missing instead of failing the
    /// column; applying this twice gives the same frame as applying it once.
    pub fn coerce_numeric<S: AsRef<str>>(
        df: &DataFrame,
        columns: &[S],
    ) -> Result<DataFrame, LoadError> {
        let missing = missing_columns(df, columns);
        if !missing.is_empty() {
            return Err(LoadError::MissingColumns { missing });
        }

        let mut out = df.clone();
        for name in columns {
            let name = name.as_ref();
            let column = df.column(name).map_err(|source| LoadError::Coercion {
                column: name.to_string(),
                source,
            })?;
            if column.dtype() == &DataType::Float64 {
                continue;
            }

            let coerced = column
                .cast(&DataType::Float64)
                .map_err(|source| LoadError::Coercion {
                    column: name.to_string(),
                    source,
                })?;

            let lost = coerced.null_count().saturating_sub(column.null_count());
            if lost > 0 {
                warn!("{lost} value(s) in column '{name}' were not numeric and are treated as missing");
            }

            out.with_column(coerced).map_err(|source| LoadError::Coercion {
                column: name.to_string(),
                source,
            })?;
        }

        Ok(out)
    }
}
