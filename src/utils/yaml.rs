//! YAML document helpers

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, ValidationError};
use crate::utils::data_loader::ensure_parent_dir;

/// Serialize `value` as YAML at `path`, creating parent directories
pub fn write_yaml_file<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let text = serde_yaml::to_string(value).map_err(|e| ValidationError::write(path, e))?;
    fs::write(path, text).map_err(|e| ValidationError::write(path, e))
}

/// Read a YAML document from `path`
pub fn read_yaml_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&text)?)
}
