//! Column count and numeric typing checks

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::schema::SchemaContract;
use crate::utils::is_numeric_column;

/// Outcome of both structural checks on one dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralReport {
    /// Dataset label used in messages ("Train", "Test")
    pub label: String,
    pub expected_columns: usize,
    pub actual_columns: usize,
    pub column_count_ok: bool,
    pub numeric_columns_ok: bool,
    /// One message per failed check
    pub messages: Vec<String>,
}

impl StructuralReport {
    pub fn is_valid(&self) -> bool {
        self.column_count_ok && self.numeric_columns_ok
    }
}

/// Checks a dataset's shape and typing against a [`SchemaContract`].
///
/// Failures are reported through the return value, never as errors.
pub struct StructuralValidator;

impl StructuralValidator {
    /// True iff the dataset has as many columns as the schema declares.
    ///
    /// Only the count is compared; names and order are not.
    pub fn validate_column_count(df: &DataFrame, schema: &SchemaContract) -> bool {
        let expected = schema.column_count();
        info!("Required number of columns: {}", expected);
        info!("Dataframe has columns: {}", df.width());
        df.width() == expected
    }

    /// True iff every schema numerical column is present with a numeric dtype
    pub fn validate_numeric_columns(df: &DataFrame, schema: &SchemaContract) -> bool {
        schema
            .numerical_columns()
            .iter()
            .all(|name| is_numeric_column(df, name))
    }

    /// Run both checks, recording a message for each failure
    pub fn check(df: &DataFrame, schema: &SchemaContract, label: &str) -> StructuralReport {
        let column_count_ok = Self::validate_column_count(df, schema);
        let numeric_columns_ok = Self::validate_numeric_columns(df, schema);

        let mut messages = Vec::new();
        if !column_count_ok {
            messages.push(format!("{} dataframe does not contain all columns", label));
        }
        if !numeric_columns_ok {
            messages.push(format!("{} dataframe does not contain numerical columns", label));
        }
        for message in &messages {
            warn!(dataset = label, "{}", message);
        }

        StructuralReport {
            label: label.to_string(),
            expected_columns: schema.column_count(),
            actual_columns: df.width(),
            column_count_ok,
            numeric_columns_ok,
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnSpec;
    use polars::prelude::*;

    fn schema(columns: &[&str], numerical: &[&str]) -> SchemaContract {
        SchemaContract::new(
            columns.iter().map(|c| ColumnSpec::new(*c, "int64")).collect(),
            numerical.iter().map(|c| c.to_string()).collect(),
        )
        .unwrap()
    }

    fn four_columns() -> DataFrame {
        df!(
            "a" => &[1, 2],
            "b" => &[3, 4],
            "c" => &[5.0, 6.0],
            "d" => &[7, 8]
        )
        .unwrap()
    }

    #[test]
    fn test_column_count_mismatch() {
        let schema = schema(&["a", "b", "c", "d", "e"], &[]);
        assert!(!StructuralValidator::validate_column_count(&four_columns(), &schema));
    }

    #[test]
    fn test_column_count_ignores_names() {
        let schema = schema(&["w", "x", "y", "z"], &[]);
        assert!(StructuralValidator::validate_column_count(&four_columns(), &schema));
    }

    #[test]
    fn test_numeric_columns_present() {
        let schema = schema(&["a", "b", "c", "d"], &["a", "c"]);
        assert!(StructuralValidator::validate_numeric_columns(&four_columns(), &schema));
    }

    #[test]
    fn test_numeric_column_missing() {
        let schema = schema(&["a", "b", "c", "d", "age"], &["a", "age"]);
        assert!(!StructuralValidator::validate_numeric_columns(&four_columns(), &schema));
    }

    #[test]
    fn test_numeric_column_with_text() {
        let df = df!(
            "age" => &["thirty", "forty"],
            "score" => &[1.0, 2.0]
        )
        .unwrap();
        let schema = schema(&["age", "score"], &["age", "score"]);
        assert!(!StructuralValidator::validate_numeric_columns(&df, &schema));
    }

    #[test]
    fn test_empty_numerical_list_passes() {
        let schema = schema(&["a"], &[]);
        assert!(StructuralValidator::validate_numeric_columns(&four_columns(), &schema));
    }

    #[test]
    fn test_check_collects_messages() {
        let schema = schema(&["a", "b", "c", "d", "age"], &["age"]);
        let report = StructuralValidator::check(&four_columns(), &schema, "Train");

        assert!(!report.is_valid());
        assert_eq!(report.expected_columns, 5);
        assert_eq!(report.actual_columns, 4);
        assert_eq!(
            report.messages,
            vec![
                "Train dataframe does not contain all columns".to_string(),
                "Train dataframe does not contain numerical columns".to_string(),
            ]
        );
    }

    #[test]
    fn test_check_passes() {
        let schema = schema(&["a", "b", "c", "d"], &["b"]);
        let report = StructuralValidator::check(&four_columns(), &schema, "Test");
        assert!(report.is_valid());
        assert!(report.messages.is_empty());
    }
}
