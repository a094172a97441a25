//! Error types for key intersection.

/// Result type alias for intersection operations.
pub type Result<T> = std::result::Result<T, IntersectError>;

/// Main error type for the intersection engine and its key sources.
#[derive(Debug, thiserror::Error)]
pub enum IntersectError {
    /// A required argument was absent or out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream key source reported a terminal failure
    #[error("Producer failure in {label}: {source}")]
    ProducerFailure {
        label: String,
        source: Box<IntersectError>,
    },

    /// A reducer could not finish draining its queue
    #[error("Reduction failure: {0}")]
    ReductionFailure(String),

    /// The requested key column is not in the header row
    #[error("header: {column} does not exist")]
    MissingColumn { column: String },

    /// Malformed delimited input
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),
}

impl IntersectError {
    /// Create a new invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Wrap a failure reported by the key source named `label`
    pub fn producer(label: impl Into<String>, source: IntersectError) -> Self {
        Self::ProducerFailure {
            label: label.into(),
            source: Box::new(source),
        }
    }

    /// Create a new reduction error
    pub fn reduction(msg: impl Into<String>) -> Self {
        Self::ReductionFailure(msg.into())
    }

    /// Create a new missing column error
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    /// Create a new config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a producer failure
    pub fn is_producer_failure(&self) -> bool {
        matches!(self, Self::ProducerFailure { .. })
    }

    /// Check if this is a reduction failure
    pub fn is_reduction_failure(&self) -> bool {
        matches!(self, Self::ReductionFailure(_))
    }
}
