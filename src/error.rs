use thiserror::Error;

/// Main error type for Crossdoc operations
#[derive(Error, Debug)]
pub enum CrossdocError {
    #[error("{kind} \"{name}\" does not exist in \"{owner}\"")]
    NotFound {
        kind: &'static str,
        name: String,
        owner: String,
    },

    #[error("Unrecognized record kind: {kind} declared in {scope}")]
    UnrecognizedRecord { kind: &'static str, scope: String },

    #[error("Cyclic declaration detected at \"{name}\"")]
    CycleDetected { name: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Pattern error: {0}")]
    Pattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CrossdocError {
    /// Whether the error aborts a generation run. `NotFound` is the only
    /// condition a caller is expected to recover from.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CrossdocError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, CrossdocError>;
