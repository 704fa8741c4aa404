use thiserror::Error;

#[derive(Debug, Error)]
pub enum HullError {
    /// Wrong number of control points for the requested degree.
    #[error("Degree error: {required} control points required, got {actual}")]
    Degree { required: usize, actual: usize },

    /// A line of a legacy design file could not be read.
    #[error("Parse error on line {line}: {reason} ({content:?})")]
    Parse {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Insufficient geometry: {0}")]
    InsufficientGeometry(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HullError {
    pub fn degree(degree: usize, actual: usize) -> Self {
        Self::Degree {
            required: degree + 1,
            actual,
        }
    }

    pub fn parse(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HullError>;
