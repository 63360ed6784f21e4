use std::fs::File;
use std::io::BufReader;
use thiserror::Error;

/// Error types that can occur during model operations
///
/// # Variants
///
/// - `ConfigurationError` - invalid constructor or compile arguments (unit counts, input shapes, activation names, layer placement)
/// - `ShapeError` - mismatch between an expected and an actual shape or vector length
/// - `StateError` - an operation was called before its preconditions were met (e.g. evaluating an uncompiled model)
/// - `NotImplemented` - the requested operation is not supported, such as the derivative of a vectorial activation
/// - `InputValidationError` - indicates the input data provided does not meet the expected format, type, or validation rules
/// - `ProcessingError` - indicates that there is something wrong while processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Shape error: {0}")]
    ShapeError(String),
    #[error("State error: {0}")]
    StateError(String),
    #[error("Not implemented: {0}")]
    NotImplemented(String),
    #[error("Input validation error: {0}")]
    InputValidationError(String),
    #[error("Processing error: {0}")]
    ProcessingError(String),
}

/// Input/Output error types that can occur while saving or loading model weights
///
/// # Variants
///
/// - `StdIoError` - Wraps standard I/O errors from file system operations (reading, writing, file access)
/// - `JsonError` - Wraps JSON serialization/deserialization errors
/// - `StructureMismatch` - The stored weights do not fit the architecture of the model they are loaded into
#[derive(Debug, Error)]
pub enum IoError {
    #[error("IO error: {0}")]
    StdIoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Model structure mismatch: {0}")]
    StructureMismatch(String),
}

impl IoError {
    pub fn load_in_buf_reader(path: &str) -> Result<BufReader<File>, IoError> {
        let file = File::open(path)?;
        Ok(BufReader::new(file))
    }
}
