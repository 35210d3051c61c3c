//! Pipeline configuration and ingestion/validation artifact locations

use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};

pub const ARTIFACT_DIR: &str = "Artifacts";
pub const SCHEMA_FILE_PATH: &str = "data_schema/schema.yaml";
pub const TRAIN_FILE_NAME: &str = "train.csv";
pub const TEST_FILE_NAME: &str = "test.csv";

pub const DATA_VALIDATION_DIR_NAME: &str = "data_validation";
pub const DATA_VALIDATION_VALID_DIR: &str = "validated";
pub const DATA_VALIDATION_INVALID_DIR: &str = "invalid";
pub const DATA_VALIDATION_DRIFT_REPORT_DIR: &str = "drift_report";
pub const DATA_VALIDATION_DRIFT_REPORT_FILE_NAME: &str = "report.yaml";

/// Default drift threshold on the normalized mean shift
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.1;

const TIMESTAMP_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";

/// How failed structural checks affect the validation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructuralPolicy {
    /// Log failures only; the status is decided by drift alone
    #[default]
    Report,
    /// A failed structural check also fails validation
    Enforce,
}

/// Which file locations the validation artifact reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactPathPolicy {
    /// Ingestion paths as the valid paths, invalid paths left empty
    #[default]
    Ingestion,
    /// The copies actually written: valid copies on pass, invalid copies on fail
    Written,
}

/// Root of one training pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingPipelineConfig {
    pub artifact_dir: PathBuf,
    pub timestamp: String,
}

impl Default for TrainingPipelineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TrainingPipelineConfig {
    /// Timestamped artifact directory under `Artifacts/`
    pub fn new() -> Self {
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        Self {
            artifact_dir: Path::new(ARTIFACT_DIR).join(&timestamp),
            timestamp,
        }
    }

    /// Use an explicit artifact directory
    pub fn with_artifact_dir(artifact_dir: impl Into<PathBuf>) -> Self {
        Self {
            artifact_dir: artifact_dir.into(),
            timestamp: String::new(),
        }
    }
}

/// Output locations and policies for the data validation stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataValidationConfig {
    pub valid_train_file_path: PathBuf,
    pub valid_test_file_path: PathBuf,
    pub invalid_train_file_path: PathBuf,
    pub invalid_test_file_path: PathBuf,
    pub drift_report_file_path: PathBuf,

    /// Drift score above which a column counts as drifted
    pub drift_threshold: f64,

    pub structural_policy: StructuralPolicy,

    pub artifact_path_policy: ArtifactPathPolicy,
}

impl DataValidationConfig {
    /// Standard layout under a pipeline run directory
    pub fn new(pipeline: &TrainingPipelineConfig) -> Self {
        Self::from_artifact_dir(&pipeline.artifact_dir)
    }

    /// Standard layout under `artifact_dir/data_validation`
    pub fn from_artifact_dir(artifact_dir: impl AsRef<Path>) -> Self {
        let root = artifact_dir.as_ref().join(DATA_VALIDATION_DIR_NAME);
        let valid = root.join(DATA_VALIDATION_VALID_DIR);
        let invalid = root.join(DATA_VALIDATION_INVALID_DIR);

        Self {
            valid_train_file_path: valid.join(TRAIN_FILE_NAME),
            valid_test_file_path: valid.join(TEST_FILE_NAME),
            invalid_train_file_path: invalid.join(TRAIN_FILE_NAME),
            invalid_test_file_path: invalid.join(TEST_FILE_NAME),
            drift_report_file_path: root
                .join(DATA_VALIDATION_DRIFT_REPORT_DIR)
                .join(DATA_VALIDATION_DRIFT_REPORT_FILE_NAME),
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
            structural_policy: StructuralPolicy::default(),
            artifact_path_policy: ArtifactPathPolicy::default(),
        }
    }

    /// Builder method to set the drift threshold
    pub fn with_drift_threshold(mut self, threshold: f64) -> Self {
        self.drift_threshold = threshold;
        self
    }

    /// Builder method to set the structural policy
    pub fn with_structural_policy(mut self, policy: StructuralPolicy) -> Self {
        self.structural_policy = policy;
        self
    }

    /// Builder method to set the artifact path policy
    pub fn with_artifact_path_policy(mut self, policy: ArtifactPathPolicy) -> Self {
        self.artifact_path_policy = policy;
        self
    }

    /// Builder method to override the drift report location
    pub fn with_drift_report_file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.drift_report_file_path = path.into();
        self
    }
}

/// Upstream record of where the train/test splits live
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataIngestionArtifact {
    pub train_file_path: PathBuf,
    pub test_file_path: PathBuf,
}

impl DataIngestionArtifact {
    pub fn new(train_file_path: impl Into<PathBuf>, test_file_path: impl Into<PathBuf>) -> Self {
        Self {
            train_file_path: train_file_path.into(),
            test_file_path: test_file_path.into(),
        }
    }
}
