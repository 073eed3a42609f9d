use thiserror::Error;

/// Errors raised by the record filters themselves. I/O and JSON decoding
/// failures are reported separately through `anyhow` at the edges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A filter was configured with a value it cannot work with
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// A record that had to be inspected lacks the requested field
    #[error("record {index} is missing field '{field}'")]
    MissingField { field: String, index: usize },

    /// The field exists but does not hold a string
    #[error("record {index} field '{field}' is not a string")]
    FieldType { field: String, index: usize },
}

pub type Result<T> = std::result::Result<T, FilterError>;
