//! Netsec Validation - train/test data validation gate
//!
//! Checks the train and test splits produced by data ingestion before any
//! model sees them:
//! - structural checks against the schema contract (column count, numeric
//!   column typing)
//! - mean-shift drift detection between the two splits, persisted as a
//!   per-column YAML report
//! - a single [`DataValidationArtifact`] carrying the pass/fail decision
//!
//! # Modules
//!
//! - [`schema`] - Schema contract and its YAML loader
//! - [`validation`] - Structural validation
//! - [`drift`] - Drift detection and drift reports
//! - [`pipeline`] - Orchestration of one validation run
//! - [`config`] - Output locations, thresholds and policies
//! - [`utils`] - Dataset and YAML I/O
//! - [`cli`] - Command-line interface

// Core error handling
pub mod error;

// Configuration and artifacts
pub mod artifact;
pub mod config;
pub mod schema;

// Validation
pub mod drift;
pub mod pipeline;
pub mod validation;

// Utilities
pub mod utils;

// Services
pub mod cli;

pub use artifact::DataValidationArtifact;
pub use error::{ErrorKind, Result, ValidationError};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{ErrorKind, Result, ValidationError};

    // Configuration
    pub use crate::config::{
        ArtifactPathPolicy, DataIngestionArtifact, DataValidationConfig, StructuralPolicy,
        TrainingPipelineConfig,
    };

    // Schema
    pub use crate::schema::{ColumnSpec, SchemaContract, SchemaLoader, YamlSchemaLoader};

    // Validation
    pub use crate::validation::{StructuralReport, StructuralValidator};

    // Drift detection
    pub use crate::drift::{DriftDetector, DriftEntry, DriftOutcome, DriftReport, ReportWriter, YamlReportWriter};

    // Pipeline
    pub use crate::artifact::DataValidationArtifact;
    pub use crate::pipeline::{PipelineStage, ValidationPipeline, ValidationRun};

    // I/O
    pub use crate::utils::{CsvDatasetIo, DatasetReader, DatasetWriter};
}
