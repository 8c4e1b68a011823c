use thiserror::Error;

/// Failures a store operation can report. `NotFound` and
/// `EmptyDescription` are never fatal and leave the store untouched;
/// the I/O and JSON variants mean the persisted file could not be read
/// or written and must surface to the presentation layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no task found with id {0}")]
    NotFound(u64),
    #[error("task description must not be empty")]
    EmptyDescription,
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("failed to access task file: {0}")]
    Io(#[from] std::io::Error),
    #[error("task file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
