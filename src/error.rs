//! Error types for methcomp

use thiserror::Error;

/// Result type alias for methcomp operations
pub type Result<T> = std::result::Result<T, MethCompError>;

/// Error types that can occur while joining and binning methylation calls
#[derive(Debug, Error)]
pub enum MethCompError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Unparseable input line
    #[error("Malformed record in {source_name} at line {line}, field {field}: {reason}")]
    MalformedRecord {
        /// Label of the input (usually the file path)
        source_name: String,
        /// 1-based line number
        line:        usize,
        /// 0-based field index
        field:       usize,
        /// What was wrong with the field
        reason:      String,
    },

    /// Array shape does not satisfy the operation contract
    #[error("Invalid dimension: {0}")]
    InvalidDimension(String),

    /// Rounded percentage fell outside [0, 100]
    #[error("Bucket out of range: {value} rounds to {bucket} for {chromosome}:{start}")]
    BucketOutOfRange {
        chromosome: String,
        start:      u32,
        value:      f64,
        bucket:     f64,
    },

    /// Selected chromosome is not in the store
    #[error("Chromosome {0} is not present in the positional store")]
    UnknownChromosome(String),
}
