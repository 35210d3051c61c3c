//! Data validation pipeline
//!
//! Loads the train/test splits named by the ingestion artifact, checks them
//! against the schema, measures drift between them, and emits the
//! [`DataValidationArtifact`].

use std::fmt;
use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::artifact::DataValidationArtifact;
use crate::config::{ArtifactPathPolicy, DataIngestionArtifact, DataValidationConfig, StructuralPolicy};
use crate::drift::{DriftDetector, DriftOutcome, ReportWriter, YamlReportWriter};
use crate::error::Result;
use crate::schema::{SchemaContract, SchemaLoader, YamlSchemaLoader};
use crate::utils::{ensure_parent_dir, CsvDatasetIo, DatasetReader, DatasetWriter};
use crate::validation::{StructuralReport, StructuralValidator};

/// Stages of one pipeline run, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Start,
    Loaded,
    StructurallyChecked,
    DriftChecked,
    ArtifactEmitted,
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineStage::Start => "start",
            PipelineStage::Loaded => "loaded",
            PipelineStage::StructurallyChecked => "structurally_checked",
            PipelineStage::DriftChecked => "drift_checked",
            PipelineStage::ArtifactEmitted => "artifact_emitted",
        };
        f.write_str(name)
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct ValidationRun {
    pub artifact: DataValidationArtifact,
    /// Train report first, then test
    pub structural: Vec<StructuralReport>,
    pub drift: DriftOutcome,
}

/// Validates a train/test pair against a schema contract
pub struct ValidationPipeline {
    ingestion: DataIngestionArtifact,
    config: DataValidationConfig,
    schema: SchemaContract,
    reader: Box<dyn DatasetReader>,
    writer: Box<dyn DatasetWriter>,
    report_writer: Box<dyn ReportWriter>,
}

impl ValidationPipeline {
    /// Pipeline using CSV datasets and a YAML drift report
    pub fn new(
        ingestion: DataIngestionArtifact,
        config: DataValidationConfig,
        schema: SchemaContract,
    ) -> Self {
        Self {
            ingestion,
            config,
            schema,
            reader: Box::new(CsvDatasetIo::new()),
            writer: Box::new(CsvDatasetIo::new()),
            report_writer: Box::new(YamlReportWriter),
        }
    }

    /// Load the schema from a YAML file, then build the pipeline
    pub fn from_schema_file(
        ingestion: DataIngestionArtifact,
        config: DataValidationConfig,
        schema_path: &Path,
    ) -> Result<Self> {
        let schema = YamlSchemaLoader.load_schema(schema_path)?;
        Ok(Self::new(ingestion, config, schema))
    }

    pub fn with_reader(mut self, reader: impl DatasetReader + 'static) -> Self {
        self.reader = Box::new(reader);
        self
    }

    pub fn with_writer(mut self, writer: impl DatasetWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    pub fn with_report_writer(mut self, writer: impl ReportWriter + 'static) -> Self {
        self.report_writer = Box::new(writer);
        self
    }

    pub fn schema(&self) -> &SchemaContract {
        &self.schema
    }

    pub fn config(&self) -> &DataValidationConfig {
        &self.config
    }

    /// Run the pipeline and return only the artifact
    pub fn initiate_data_validation(&self) -> Result<DataValidationArtifact> {
        Ok(self.run()?.artifact)
    }

    /// Run the pipeline once, start to finish.
    ///
    /// Any failure aborts the run; no artifact is produced in that case.
    pub fn run(&self) -> Result<ValidationRun> {
        let mut stage = PipelineStage::Start;
        info!(stage = %stage, train = %self.ingestion.train_file_path.display(),
            test = %self.ingestion.test_file_path.display(), "Starting data validation");

        let test_df = self.reader.read(&self.ingestion.test_file_path)?;
        let train_df = self.reader.read(&self.ingestion.train_file_path)?;
        advance(&mut stage, PipelineStage::Loaded);

        let structural = vec![
            StructuralValidator::check(&train_df, &self.schema, "Train"),
            StructuralValidator::check(&test_df, &self.schema, "Test"),
        ];
        let structure_ok = structural.iter().all(StructuralReport::is_valid);
        advance(&mut stage, PipelineStage::StructurallyChecked);

        let drift = DriftDetector::new()
            .with_threshold(self.config.drift_threshold)
            .detect_and_persist(
                &train_df,
                &test_df,
                self.report_writer.as_ref(),
                &self.config.drift_report_file_path,
            )?;
        advance(&mut stage, PipelineStage::DriftChecked);

        let status = match self.config.structural_policy {
            StructuralPolicy::Report => drift.status,
            StructuralPolicy::Enforce => {
                if !structure_ok {
                    warn!("Structural checks failed; validation rejected");
                }
                drift.status && structure_ok
            }
        };

        let artifact = self.emit_artifact(status, &train_df, &test_df)?;
        advance(&mut stage, PipelineStage::ArtifactEmitted);
        info!(validation_status = artifact.validation_status, "Data validation finished");

        Ok(ValidationRun {
            artifact,
            structural,
            drift,
        })
    }

    fn emit_artifact(
        &self,
        status: bool,
        train_df: &DataFrame,
        test_df: &DataFrame,
    ) -> Result<DataValidationArtifact> {
        let config = &self.config;
        ensure_parent_dir(&config.valid_train_file_path)?;

        if status {
            self.writer.write(train_df, &config.valid_train_file_path)?;
            self.writer.write(test_df, &config.valid_test_file_path)?;
        }

        let (valid_train, valid_test, invalid_train, invalid_test) = match config.artifact_path_policy {
            ArtifactPathPolicy::Ingestion => (
                Some(self.ingestion.train_file_path.clone()),
                Some(self.ingestion.test_file_path.clone()),
                None,
                None,
            ),
            ArtifactPathPolicy::Written if status => (
                Some(config.valid_train_file_path.clone()),
                Some(config.valid_test_file_path.clone()),
                None,
                None,
            ),
            ArtifactPathPolicy::Written => {
                self.writer.write(train_df, &config.invalid_train_file_path)?;
                self.writer.write(test_df, &config.invalid_test_file_path)?;
                (
                    None,
                    None,
                    Some(config.invalid_train_file_path.clone()),
                    Some(config.invalid_test_file_path.clone()),
                )
            }
        };

        Ok(DataValidationArtifact {
            validation_status: status,
            valid_train_file_path: valid_train,
            valid_test_file_path: valid_test,
            invalid_train_file_path: invalid_train,
            invalid_test_file_path: invalid_test,
            drift_report_file_path: config.drift_report_file_path.clone(),
        })
    }
}

fn advance(stage: &mut PipelineStage, next: PipelineStage) {
    debug_assert!(next > *stage);
    info!(from = %stage, to = %next, "Pipeline stage");
    *stage = next;
}
