#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("No dictionary entry shape matches: {0}")]
    UnrecognizedEntry(String),
}
