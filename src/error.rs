use thiserror::Error;

/// Failures of the preference store. The session swallows all of these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Preference store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Preference store is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Preference store unavailable")]
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unable to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config line {line}: {content}")]
    InvalidLine { line: usize, content: String },
}

/// Anything that can go wrong while asking a language model for a reflection.
/// Never crosses the `ReflectionProvider` boundary.
#[derive(Debug, Error)]
pub enum ReflectionError {
    #[error("Reflection request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No text in model response")]
    Empty,
}
