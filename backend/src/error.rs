//! Error types for the query pipeline.
//!
//! Every failure is terminal for the request that raised it; nothing here is
//! retried.

/// A query parameter that could not be parsed.
///
/// Always raised before the engine is contacted.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid {parameter} format: {raw}. Expected {expected}")]
pub struct ValidationError {
    /// Parameter name as it appears on the wire (`POS`, `TIME`, ...)
    pub parameter: &'static str,
    /// The offending raw value
    pub raw: String,
    /// Human-readable expected format
    pub expected: &'static str,
}

impl ValidationError {
    pub fn new(parameter: &'static str, raw: impl Into<String>, expected: &'static str) -> Self {
        Self {
            parameter,
            raw: raw.into(),
            expected,
        }
    }

    /// A required parameter was not supplied at all.
    pub fn missing(parameter: &'static str, expected: &'static str) -> Self {
        Self::new(parameter, "<missing>", expected)
    }
}

/// Failure of the external visibility/planning engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The engine could not be reached.
    #[error("Engine transport error: {0}")]
    Transport(String),

    /// The engine answered with a non-success status.
    #[error("Engine returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The engine answered with a body we could not decode.
    #[error("Engine response could not be decoded: {0}")]
    Decode(String),

    /// The offloaded engine task panicked or was cancelled.
    #[error("Engine task failed: {0}")]
    Task(String),

    /// The engine refused the computation.
    #[error("Engine unavailable: {0}")]
    Unavailable(String),

    /// The request cannot be expressed in the engine's terms.
    #[error("Engine request rejected: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            EngineError::Decode(err.to_string())
        } else {
            EngineError::Transport(err.to_string())
        }
    }
}

impl From<tokio::task::JoinError> for EngineError {
    fn from(err: tokio::task::JoinError) -> Self {
        EngineError::Task(err.to_string())
    }
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Failure while writing a VOTable document.
#[derive(Debug, thiserror::Error)]
pub enum VoTableError {
    #[error("XML write error: {0}")]
    Xml(String),

    #[error("VOTable output is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Any failure of a VO query request.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Serialization(#[from] VoTableError),
}

pub type QueryResult<T> = Result<T, QueryError>;
