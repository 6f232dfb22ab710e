use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, WiktError>;

/// Enum representing all possible errors in the wikt_rs library.
///
/// Field extraction itself never fails: a missing section or table degrades
/// to an empty value. These variants cover the plumbing around it.
#[derive(Error, Debug)]
pub enum WiktError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Markup tokenizing error: {0}")]
    Markup(#[from] quick_xml::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
