//! Dataset I/O and column helpers

pub mod data_loader;
pub mod dtypes;
pub mod yaml;

pub use data_loader::{ensure_parent_dir, CsvDatasetIo, DatasetReader, DatasetWriter};
pub use dtypes::{is_numeric_column, is_numeric_dtype, non_missing_values};
pub use yaml::{read_yaml_file, write_yaml_file};
