//! Expected dataset shape, loaded from the project schema file

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ValidationError};

/// One expected column: name and declared element type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub name: String,
    pub dtype: String,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, dtype: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
        }
    }
}

/// Immutable expected dataset shape.
///
/// Column names are unique and every name in `numerical_columns` is one of
/// the declared columns; the constructors refuse anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaContract {
    columns: Vec<ColumnSpec>,
    numerical_columns: Vec<String>,
}

impl SchemaContract {
    pub fn new(columns: Vec<ColumnSpec>, numerical_columns: Vec<String>) -> Result<Self> {
        let mut declared: HashSet<&str> = HashSet::with_capacity(columns.len());
        for column in &columns {
            if !declared.insert(column.name.as_str()) {
                return Err(ValidationError::configuration(format!(
                    "column '{}' is declared more than once",
                    column.name
                )));
            }
        }
        if let Some(unknown) = numerical_columns
            .iter()
            .find(|name| !declared.contains(name.as_str()))
        {
            return Err(ValidationError::configuration(format!(
                "numerical column '{}' is not a declared column",
                unknown
            )));
        }

        Ok(Self {
            columns,
            numerical_columns,
        })
    }

    /// Parse the YAML schema document
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let raw: RawSchema = serde_yaml::from_str(text).map_err(|e| {
            ValidationError::configuration(format!("malformed schema document: {}", e))
        })?;

        let raw_columns = raw
            .columns
            .ok_or_else(|| ValidationError::configuration("schema has no 'columns' entry"))?;
        let numerical_columns = raw.numerical_columns.ok_or_else(|| {
            ValidationError::configuration("schema has no 'numerical_columns' entry")
        })?;

        let mut columns = Vec::with_capacity(raw_columns.len());
        for (idx, entry) in raw_columns.into_iter().enumerate() {
            if entry.len() != 1 {
                return Err(ValidationError::configuration(format!(
                    "column entry {} must map exactly one name to a type, found {} keys",
                    idx,
                    entry.len()
                )));
            }
            if let Some((name, dtype)) = entry.into_iter().next() {
                columns.push(ColumnSpec::new(name, dtype));
            }
        }

        Self::new(columns, numerical_columns)
    }

    /// Declared column count
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn numerical_columns(&self) -> &[String] {
        &self.numerical_columns
    }
}

#[derive(Deserialize)]
struct RawSchema {
    columns: Option<Vec<BTreeMap<String, String>>>,
    numerical_columns: Option<Vec<String>>,
}

/// Source of the schema contract
pub trait SchemaLoader {
    fn load_schema(&self, path: &Path) -> Result<SchemaContract>;
}

/// Reads the schema from a YAML file
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlSchemaLoader;

impl SchemaLoader for YamlSchemaLoader {
    fn load_schema(&self, path: &Path) -> Result<SchemaContract> {
        let text = fs::read_to_string(path).map_err(|e| {
            ValidationError::configuration(format!(
                "cannot read schema file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let schema = SchemaContract::from_yaml_str(&text)?;
        debug!(
            path = %path.display(),
            columns = schema.column_count(),
            numerical = schema.numerical_columns().len(),
            "Loaded schema"
        );
        Ok(schema)
    }
}
