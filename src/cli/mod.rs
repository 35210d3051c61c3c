//! Netsec Validation CLI Module
//!
//! Command-line interface for running the data validation stage.

use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::{
    ArtifactPathPolicy, DataIngestionArtifact, DataValidationConfig, StructuralPolicy,
    TrainingPipelineConfig, DEFAULT_DRIFT_THRESHOLD, SCHEMA_FILE_PATH,
};
use crate::pipeline::{ValidationPipeline, ValidationRun};
use crate::schema::{SchemaLoader, YamlSchemaLoader};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString    { s.truecolor(100, 100, 100) }
fn accent(s: &str) -> ColoredString { s.truecolor(120, 170, 255) }
fn muted(s: &str) -> ColoredString  { s.truecolor(140, 140, 140) }
fn ok(s: &str) -> ColoredString     { s.truecolor(100, 210, 120) }
fn bad(s: &str) -> ColoredString    { s.truecolor(235, 100, 100) }

fn kv(key: &str, val: &str) -> String {
    format!("{} {}", muted(key), val.white())
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "netsec-validation")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Schema and drift validation gate for train/test splits")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a train/test pair and emit the validation artifact
    Validate(ValidateArgs),

    /// Show the columns declared by a schema file
    Schema {
        /// Schema file (YAML)
        #[arg(short, long, default_value = SCHEMA_FILE_PATH)]
        schema: PathBuf,
    },
}

/// Options of the `validate` command
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Ingested train split (CSV)
    #[arg(long)]
    pub train: PathBuf,

    /// Ingested test split (CSV)
    #[arg(long)]
    pub test: PathBuf,

    /// Schema file (YAML)
    #[arg(short, long, default_value = SCHEMA_FILE_PATH)]
    pub schema: PathBuf,

    /// Artifact directory (defaults to a timestamped directory under Artifacts/)
    #[arg(short, long)]
    pub artifact_dir: Option<PathBuf>,

    /// Drift threshold on the normalized mean shift
    #[arg(long, default_value_t = DEFAULT_DRIFT_THRESHOLD)]
    pub threshold: f64,

    /// Fail validation when a structural check fails
    #[arg(long)]
    pub enforce_structure: bool,

    /// Report the locations of the written copies instead of the ingestion paths
    #[arg(long)]
    pub report_written_paths: bool,

    /// Print the artifact as JSON
    #[arg(long)]
    pub json: bool,
}

impl ValidateArgs {
    /// Validation config for these options
    pub fn to_config(&self) -> DataValidationConfig {
        let pipeline = match &self.artifact_dir {
            Some(dir) => TrainingPipelineConfig::with_artifact_dir(dir),
            None => TrainingPipelineConfig::new(),
        };
        let structural = if self.enforce_structure {
            StructuralPolicy::Enforce
        } else {
            StructuralPolicy::Report
        };
        let paths = if self.report_written_paths {
            ArtifactPathPolicy::Written
        } else {
            ArtifactPathPolicy::Ingestion
        };

        DataValidationConfig::new(&pipeline)
            .with_drift_threshold(self.threshold)
            .with_structural_policy(structural)
            .with_artifact_path_policy(paths)
    }
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_validate(args: &ValidateArgs) -> anyhow::Result<ValidationRun> {
    let config = args.to_config();
    let ingestion = DataIngestionArtifact::new(&args.train, &args.test);

    if !args.json {
        section("Validate");
        step_run("Loading schema");
    }
    let start = Instant::now();
    let pipeline = ValidationPipeline::from_schema_file(ingestion, config, &args.schema)?;
    if !args.json {
        step_done(&format!("{} columns in {:?}", pipeline.schema().column_count(), start.elapsed()));
        step_run("Running validation");
    }

    let start = Instant::now();
    let run = pipeline.run()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run.artifact)?);
        return Ok(run);
    }
    step_done(&format!("{:?}", start.elapsed()));

    section("Structure");
    for report in &run.structural {
        let mark = if report.is_valid() { ok("✓") } else { bad("✗") };
        println!(
            "  {} {}",
            mark,
            kv(&format!("{}:", report.label), &format!("{}/{} columns", report.actual_columns, report.expected_columns))
        );
        for message in &report.messages {
            println!("      {}", muted(message));
        }
    }

    section("Drift");
    for (column, entry) in run.drift.report.iter() {
        let mark = if entry.drift_status { bad("✗") } else { ok("✓") };
        println!("  {} {}", mark, kv(column, &format!("{:.6}", entry.drift_score)));
    }
    if run.drift.report.is_empty() {
        println!("  {}", dim("no comparable numeric columns"));
    }

    section("Artifact");
    let status = if run.artifact.validation_status { ok("PASSED") } else { bad("FAILED") };
    println!("  {} {}", muted("status"), status.bold());
    for line in run.artifact.to_string().lines().skip(1) {
        println!("  {}", dim(line));
    }
    println!();

    Ok(run)
}

pub fn cmd_schema(schema_path: &Path) -> anyhow::Result<()> {
    let schema = YamlSchemaLoader.load_schema(schema_path)?;

    section("Schema");
    println!("  {}", kv("file", &schema_path.display().to_string()));
    println!("  {}", kv("columns", &schema.column_count().to_string()));
    println!("  {}", kv("numerical", &schema.numerical_columns().len().to_string()));
    println!();

    for column in schema.columns() {
        let numeric = schema.numerical_columns().iter().any(|n| *n == column.name);
        let mark = if numeric { accent("#") } else { dim("·") };
        println!("  {} {} {}", mark, column.name.white(), muted(&column.dtype));
    }
    println!();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_validate() {
        let cli = Cli::try_parse_from([
            "netsec-validation",
            "validate",
            "--train",
            "raw/train.csv",
            "--test",
            "raw/test.csv",
            "--threshold",
            "0.25",
            "--enforce-structure",
        ])
        .unwrap();

        match cli.command {
            Commands::Validate(args) => {
                assert_eq!(args.train, PathBuf::from("raw/train.csv"));
                assert_eq!(args.schema, PathBuf::from(SCHEMA_FILE_PATH));
                assert_eq!(args.threshold, 0.25);
                assert!(args.enforce_structure);
                assert!(!args.report_written_paths);
                assert_eq!(args.artifact_dir, None);
            }
            _ => panic!("expected validate"),
        }
    }

    #[test]
    fn test_parsed_args_drive_config() {
        let cli = Cli::try_parse_from([
            "netsec-validation",
            "validate",
            "--train",
            "t.csv",
            "--test",
            "v.csv",
            "-a",
            "runs/now",
            "--report-written-paths",
            "--json",
        ])
        .unwrap();

        let Commands::Validate(args) = cli.command else {
            panic!("expected validate");
        };
        let config = args.to_config();
        assert_eq!(config.drift_threshold, DEFAULT_DRIFT_THRESHOLD);
        assert_eq!(config.artifact_path_policy, ArtifactPathPolicy::Written);
        assert!(config.drift_report_file_path.starts_with("runs/now"));
        assert!(args.json);
    }

    #[test]
    fn test_args_to_config() {
        let args = ValidateArgs {
            train: "a.csv".into(),
            test: "b.csv".into(),
            schema: SCHEMA_FILE_PATH.into(),
            artifact_dir: Some("run".into()),
            threshold: 0.3,
            enforce_structure: false,
            report_written_paths: true,
            json: true,
        };

        let config = args.to_config();
        assert_eq!(config.drift_threshold, 0.3);
        assert_eq!(config.structural_policy, StructuralPolicy::Report);
        assert_eq!(config.artifact_path_policy, ArtifactPathPolicy::Written);
        assert!(config.drift_report_file_path.starts_with("run"));
    }
}
