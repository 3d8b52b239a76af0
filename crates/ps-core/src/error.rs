use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlagError {
    #[error("Archive format error: {0}")]
    ArchiveFormat(String),
    #[error("Malformed overview document: {0}")]
    MalformedOverview(String),
    #[error("Malformed comparison entry name: {name}")]
    MalformedEntryName { name: String },
    #[error("Malformed comparison entry {name}: {reason}")]
    MalformedComparison { name: String, reason: String },
    #[error("Unknown submission: {id}")]
    UnknownSubmission { id: String },
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Too few submissions: {0} (need at least 2)")]
    TooFewSubmissions(usize),
    #[error("Invalid submission {id}: {reason}")]
    InvalidSubmission { id: String, reason: String },
    #[error("Detector error: {0}")]
    Detector(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, PlagError>;
