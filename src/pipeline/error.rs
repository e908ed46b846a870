//! Error types for the listing pipeline.
//!
//! Parse failures inside cells never surface here; they degrade to missing
//! values. These variants cover the preconditions a run cannot recover from.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised at the boundaries of the cleaning and analysis stages.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The input directory holds no file with a `.csv` extension.
    #[error("No CSV file found in directory: {}", .0.display())]
    NoCsvFile(PathBuf),

    /// Registered columns absent from the loaded table.
    #[error("Dataset is missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// A column expected at a stage boundary is not in the table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// The correlation target is not a numeric column.
    #[error("Target column '{column}' must be numeric, found {dtype}")]
    NonNumericTarget { column: String, dtype: String },

    /// A configuration value is outside its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
