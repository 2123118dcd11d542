use thiserror::Error;

use crate::measurement::MeasurementError;

#[derive(Error, Debug)]
pub enum StrandCutError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV Parsing Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("Data Validation Error: {0}")]
    Validation(String),

    #[error("Unknown product type '{0}'")]
    UnknownProductType(String),

    #[error("Unknown strand pattern '{0}'")]
    UnknownPattern(String),

    #[error("Strand {0} is not part of the pattern")]
    UnknownStrand(String),

    #[error("Invalid cut: {0}")]
    InvalidCutSpec(String),

    #[error("Invalid product geometry '{product_type}': {reason}")]
    InvalidGeometry {
        product_type: String,
        reason: String,
    },

    #[error("Invalid strand pattern '{pattern_id}': {reason}")]
    InvalidPattern { pattern_id: String, reason: String },

    #[error("Duplicate slippage reading for strand {strand} end {end}")]
    DuplicateReading { strand: String, end: String },

    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

pub type ScResult<T> = Result<T, StrandCutError>;
