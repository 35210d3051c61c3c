//! Drift detection module
//!
//! Measures whether a current dataset has drifted from a base dataset,
//! column by column, and persists the per-column report.

mod mean_shift;
mod report;

pub use mean_shift::{mean_shift_score, DriftDetector, DriftOutcome};
pub use report::{DriftEntry, DriftReport, ReportWriter, YamlReportWriter};
