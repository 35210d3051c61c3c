//! Structural validation of datasets against the schema contract

mod structural;

pub use structural::{StructuralReport, StructuralValidator};
