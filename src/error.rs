use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpanError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("invalid declaration selection in {source_name}: {reason}")]
    Configuration { source_name: String, reason: String },

    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("cannot determine language of {path}")]
    UnsupportedLanguage { path: String },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl SpanError {
    /// Errors that belong to a single input file rather than the whole run
    pub fn is_per_file(&self) -> bool {
        matches!(
            self,
            SpanError::Read { .. } | SpanError::Parse { .. } | SpanError::UnsupportedLanguage { .. }
        )
    }

    /// Attach the file a parse error came from
    pub fn with_path(self, file: &Path) -> Self {
        match self {
            SpanError::Parse { reason, .. } => SpanError::Parse {
                path: file.display().to_string(),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, SpanError>;
