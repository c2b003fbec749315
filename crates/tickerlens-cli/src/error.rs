use thiserror::Error;

use tickerlens_core::{LookupError, SourceError, SourceErrorKind, ValidationError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Lookup(LookupError::NotFound { .. }) => 3,
            Self::Lookup(LookupError::RateLimited) => 6,
            Self::Lookup(LookupError::Cancelled) => 7,
            Self::Source(error) if error.kind() == SourceErrorKind::RateLimited => 6,
            Self::Source(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
