use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartlogError {
    #[error("Log not found: #{0}")]
    RecordNotFound(u64),

    #[error("Please enter either a title or content for the log")]
    EmptyRecord,

    #[error("Invalid import: {0}")]
    InvalidImport(String),

    #[error("No valid logs found in the file")]
    NothingToImport,

    #[error("No log ids left")]
    IdsExhausted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, SmartlogError>;
