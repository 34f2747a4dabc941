use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum UploaderError {
    #[error("Invalid input: {0}")]
    Config(String),

    #[error("No files found matching '{0}'")]
    NotFound(String),

    #[error("Invalid glob pattern '{0}': {1}")]
    InvalidPattern(String, String),

    #[error("Failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set output: {0}")]
    Output(String),

    /// Raised by the release asset client. Displays the client's message verbatim.
    #[error("{0}")]
    Upload(String),
}

impl UploaderError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, UploaderError>;
