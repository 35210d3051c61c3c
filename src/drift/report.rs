//! Per-column drift report and its persistence

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Result;
use crate::utils::yaml::write_yaml_file;

/// Drift result for one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftEntry {
    /// Normalized absolute mean shift, always >= 0
    pub drift_score: f64,
    /// Whether the score exceeded the threshold
    pub drift_status: bool,
}

/// Column name to [`DriftEntry`], in base dataset column order.
///
/// Serializes as a plain mapping so the persisted document reads
/// `column: {drift_score, drift_status}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DriftReport {
    entries: Vec<(String, DriftEntry)>,
    // column name -> position in `entries`
    index: HashMap<String, usize>,
}

impl DriftReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry, replacing any previous entry for the same column
    pub fn insert(&mut self, column: impl Into<String>, entry: DriftEntry) {
        let column = column.into();
        match self.index.get(&column) {
            Some(&pos) => self.entries[pos].1 = entry,
            None => {
                self.index.insert(column.clone(), self.entries.len());
                self.entries.push((column, entry));
            }
        }
    }

    pub fn get(&self, column: &str) -> Option<&DriftEntry> {
        self.index.get(column).map(|&pos| &self.entries[pos].1)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DriftEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn columns(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Names of the columns whose drift status is set
    pub fn drifted_columns(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, entry)| entry.drift_status)
            .map(|(name, _)| name)
            .collect()
    }

    /// Human-readable summary
    pub fn summary(&self) -> String {
        let drifted = self.drifted_columns();
        let mut s = String::new();
        s.push_str("Drift Report\n");
        s.push_str("============\n");
        s.push_str(&format!("Evaluated columns: {}\n", self.len()));
        s.push_str(&format!("Drifted columns: {}\n", drifted.len()));

        if !drifted.is_empty() {
            s.push_str("\nDrifted Columns:\n");
            for (name, entry) in self.iter().filter(|(_, e)| e.drift_status) {
                s.push_str(&format!("  - {} (score {:.4})\n", name, entry.drift_score));
            }
        }

        s
    }
}

impl Serialize for DriftReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for DriftReport {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct ReportVisitor;

        impl<'de> Visitor<'de> for ReportVisitor {
            type Value = DriftReport;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of column names to drift entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut report = DriftReport::new();
                while let Some((name, entry)) = access.next_entry::<String, DriftEntry>()? {
                    report.insert(name, entry);
                }
                Ok(report)
            }
        }

        deserializer.deserialize_map(ReportVisitor)
    }
}

/// Persists a drift report
pub trait ReportWriter {
    fn write_report(&self, report: &DriftReport, path: &Path) -> Result<()>;
}

/// Writes the report as a YAML mapping, creating parent directories
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlReportWriter;

impl ReportWriter for YamlReportWriter {
    fn write_report(&self, report: &DriftReport, path: &Path) -> Result<()> {
        write_yaml_file(path, report)
    }
}
