//! Mean-shift drift detection between a base and a current dataset

use std::path::Path;

use ndarray::Array1;
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::DEFAULT_DRIFT_THRESHOLD;
use crate::drift::report::{DriftEntry, DriftReport, ReportWriter};
use crate::error::Result;
use crate::utils::{is_numeric_dtype, non_missing_values};

/// Aggregate verdict plus the per-column report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftOutcome {
    /// True when no evaluated column drifted
    pub status: bool,
    pub report: DriftReport,
}

/// Absolute mean difference divided by the base sample standard deviation.
///
/// A zero (or undefined, single-sample) base deviation is replaced by 1.
/// Returns `None` when either side is empty.
pub fn mean_shift_score(base: &Array1<f64>, current: &Array1<f64>) -> Option<f64> {
    let base_mean = base.mean()?;
    let current_mean = current.mean()?;
    let mean_diff = (base_mean - current_mean).abs();

    let std = if base.len() > 1 { base.std(1.0) } else { 0.0 };
    let std = if std == 0.0 { 1.0 } else { std };

    Some(mean_diff / std)
}

/// Compares every numeric column shared by two datasets
#[derive(Debug, Clone)]
pub struct DriftDetector {
    threshold: f64,
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl DriftDetector {
    /// Detector with the default threshold of 0.1
    pub fn new() -> Self {
        Self {
            threshold: DEFAULT_DRIFT_THRESHOLD,
        }
    }

    /// Set drift threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score each base column against `current`.
    ///
    /// Columns missing from `current`, non-numeric in `base`, or empty on
    /// either side after dropping missing values are left out of the report
    /// and do not affect the status. Only the base dtype decides whether a
    /// column is scored; a current column that cannot be read as numbers is a
    /// computation error.
    pub fn detect(&self, base: &DataFrame, current: &DataFrame) -> Result<DriftOutcome> {
        let mut status = true;
        let mut report = DriftReport::new();

        for base_col in base.get_columns() {
            let name = base_col.name().as_str();
            let Ok(current_col) = current.column(name) else {
                continue;
            };
            if !is_numeric_dtype(base_col.dtype()) {
                continue;
            }

            let base_values = Array1::from_vec(non_missing_values(base_col)?);
            let current_values = Array1::from_vec(non_missing_values(current_col)?);

            let Some(drift_score) = mean_shift_score(&base_values, &current_values) else {
                debug!(column = name, "Skipping column with no values on one side");
                continue;
            };

            let drift_status = drift_score > self.threshold;
            if drift_status {
                status = false;
            }
            debug!(column = name, drift_score, drift_status, "Column drift");

            report.insert(name, DriftEntry { drift_score, drift_status });
        }

        info!(
            evaluated = report.len(),
            drifted = report.drifted_columns().len(),
            status,
            "Drift detection finished"
        );

        Ok(DriftOutcome { status, report })
    }

    /// [`detect`](Self::detect), then persist the report at `path`
    pub fn detect_and_persist(
        &self,
        base: &DataFrame,
        current: &DataFrame,
        writer: &dyn ReportWriter,
        path: &Path,
    ) -> Result<DriftOutcome> {
        let outcome = self.detect(base, current)?;
        writer.write_report(&outcome.report, path)?;
        info!(path = %path.display(), "Drift report written");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::YamlReportWriter;
    use crate::error::ErrorKind;
    use crate::utils::read_yaml_file;
    use polars::prelude::*;

    fn arr(values: &[f64]) -> Array1<f64> {
        Array1::from_vec(values.to_vec())
    }

    #[test]
    fn test_identical_columns_score_zero() {
        let base = df!("x" => &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let current = base.clone();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();
        let entry = outcome.report.get("x").unwrap();

        assert_eq!(entry.drift_score, 0.0);
        assert!(!entry.drift_status);
        assert!(outcome.status);
    }

    #[test]
    fn test_zero_std_uses_unit_divisor() {
        let base = df!("x" => &[0.0, 0.0, 0.0, 0.0]).unwrap();
        let current = df!("x" => &[1.0, 1.0, 1.0, 1.0]).unwrap();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();
        let entry = outcome.report.get("x").unwrap();

        assert_eq!(entry.drift_score, 1.0);
        assert!(entry.drift_status);
        assert!(!outcome.status);
    }

    #[test]
    fn test_score_uses_sample_std() {
        // base std (ddof = 1) of [1, 2, 3, 4, 5] is sqrt(2.5)
        let score = mean_shift_score(&arr(&[1.0, 2.0, 3.0, 4.0, 5.0]), &arr(&[4.0, 5.0])).unwrap();
        assert!((score - 1.5 / 2.5f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_non_negative_either_direction() {
        let a = arr(&[1.0, 2.0, 3.0]);
        let b = arr(&[10.0, 11.0, 12.0]);

        let up = mean_shift_score(&a, &b).unwrap();
        let down = mean_shift_score(&b, &a).unwrap();
        assert!(up > 0.0);
        assert!(down > 0.0);
        assert_eq!(up, down);
    }

    #[test]
    fn test_single_sample_base() {
        let score = mean_shift_score(&arr(&[2.0]), &arr(&[2.5, 3.5])).unwrap();
        assert_eq!(score, 1.0);
    }

    #[test]
    fn test_empty_side_has_no_score() {
        assert!(mean_shift_score(&arr(&[]), &arr(&[1.0])).is_none());
        assert!(mean_shift_score(&arr(&[1.0]), &arr(&[])).is_none());
    }

    #[test]
    fn test_skips_missing_non_numeric_and_empty_columns() {
        let base = df!(
            "only_base" => &[1.0, 2.0],
            "text" => &["a", "b"],
            "all_null" => &[None::<f64>, None],
            "kept" => &[1.0, 2.0]
        )
        .unwrap();
        let current = df!(
            "text" => &["c", "d"],
            "all_null" => &[Some(1.0), Some(2.0)],
            "kept" => &[1.0, 2.0]
        )
        .unwrap();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();

        assert_eq!(outcome.report.columns(), vec!["kept"]);
        assert!(outcome.status);
    }

    #[test]
    fn test_text_in_current_numeric_column_is_error() {
        let base = df!("x" => &[1.0, 2.0, 3.0]).unwrap();
        let current = df!("x" => &["oops", "bad", "data"]).unwrap();

        let err = DriftDetector::new().detect(&base, &current).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::Computation(_)));
    }

    #[test]
    fn test_bool_current_column_scored_as_zero_one() {
        let base = df!("x" => &[0.0, 0.0, 0.0]).unwrap();
        let current = df!("x" => &[true, true, true]).unwrap();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();
        assert_eq!(outcome.report.get("x").unwrap().drift_score, 1.0);
    }

    #[test]
    fn test_no_columns_is_vacuous_pass() {
        let base = df!("a" => &["x"]).unwrap();
        let current = df!("b" => &[1.0]).unwrap();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();
        assert!(outcome.report.is_empty());
        assert!(outcome.status);
    }

    #[test]
    fn test_status_false_iff_any_column_drifts() {
        let base = df!(
            "stable" => &[1.0, 2.0, 3.0, 4.0],
            "shifted" => &[1.0, 2.0, 3.0, 4.0],
            "also_stable" => &[5.0, 6.0, 7.0, 8.0]
        )
        .unwrap();
        let current = df!(
            "stable" => &[1.0, 2.0, 3.0, 4.0],
            "shifted" => &[11.0, 12.0, 13.0, 14.0],
            "also_stable" => &[5.0, 6.0, 7.0, 8.0]
        )
        .unwrap();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();

        assert!(!outcome.status);
        assert_eq!(outcome.report.drifted_columns(), vec!["shifted"]);
        assert_eq!(outcome.report.columns(), vec!["stable", "shifted", "also_stable"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let base = df!("x" => &[0.0, 0.0]).unwrap();
        let current = df!("x" => &[0.5, 0.5]).unwrap();

        let at = DriftDetector::new().with_threshold(0.5).detect(&base, &current).unwrap();
        assert!(at.status);

        let below = DriftDetector::new().with_threshold(0.49).detect(&base, &current).unwrap();
        assert!(!below.status);
    }

    #[test]
    fn test_integer_columns_with_nulls() {
        let base = df!("n" => &[Some(1i64), None, Some(3)]).unwrap();
        let current = df!("n" => &[Some(2i64), Some(2), None]).unwrap();

        let outcome = DriftDetector::new().detect(&base, &current).unwrap();
        let entry = outcome.report.get("n").unwrap();
        // mean 2 vs 2
        assert_eq!(entry.drift_score, 0.0);
    }

    #[test]
    fn test_detect_and_persist_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drift_report").join("report.yaml");
        let base = df!("x" => &[0.0, 0.0, 0.0, 0.0]).unwrap();
        let current = df!("x" => &[1.0, 1.0, 1.0, 1.0]).unwrap();

        let outcome = DriftDetector::new()
            .detect_and_persist(&base, &current, &YamlReportWriter, &path)
            .unwrap();

        let persisted: DriftReport = read_yaml_file(&path).unwrap();
        assert_eq!(persisted, outcome.report);
    }
}
