//! Output record of the data validation stage

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Validation outcome handed to later pipeline stages.
///
/// Path fields left unset are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValidationArtifact {
    pub validation_status: bool,
    pub valid_train_file_path: Option<PathBuf>,
    pub valid_test_file_path: Option<PathBuf>,
    pub invalid_train_file_path: Option<PathBuf>,
    pub invalid_test_file_path: Option<PathBuf>,
    pub drift_report_file_path: PathBuf,
}

fn show(path: &Option<PathBuf>) -> String {
    path.as_deref()
        .map(Path::display)
        .map(|p| p.to_string())
        .unwrap_or_default()
}

impl fmt::Display for DataValidationArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation_status: {}", self.validation_status)?;
        writeln!(f, "valid_train_file_path: {}", show(&self.valid_train_file_path))?;
        writeln!(f, "valid_test_file_path: {}", show(&self.valid_test_file_path))?;
        writeln!(f, "invalid_train_file_path: {}", show(&self.invalid_train_file_path))?;
        writeln!(f, "invalid_test_file_path: {}", show(&self.invalid_test_file_path))?;
        write!(f, "drift_report_file_path: {}", self.drift_report_file_path.display())
    }
}
