use thiserror::Error;

/// Custom error type for Newscast operations.
#[derive(Debug, Error)]
pub enum NewscastError {
    /// Required input was empty or malformed. Raised before any external call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The news provider returned nothing for the query.
    #[error("No articles found for '{company}'")]
    NoArticles { company: String },

    /// Articles were fetched but none carried usable text.
    #[error("Fetched {fetched} articles for '{company}' but none could be processed")]
    NoUsableArticles { company: String, fetched: usize },

    /// HTTP transport or provider failure.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Configuration could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Sentiment model missing, shut down, or failed during inference.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Translation provider failure.
    #[error("Translation error: {0}")]
    Translation(String),

    /// Speech synthesis provider failure.
    #[error("Speech synthesis error: {0}")]
    Speech(String),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(String),

    /// Payload could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(String),
}

impl NewscastError {
    /// True for the terminal "nothing to report" outcomes.
    ///
    /// These are distinct from degraded successes (neutral sentiment,
    /// untranslated text, missing audio), which never surface as errors.
    pub fn is_no_data(&self) -> bool {
        matches!(
            self,
            NewscastError::NoArticles { .. } | NewscastError::NoUsableArticles { .. }
        )
    }
}

impl From<reqwest::Error> for NewscastError {
    fn from(err: reqwest::Error) -> Self {
        NewscastError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for NewscastError {
    fn from(err: serde_json::Error) -> Self {
        NewscastError::Json(err.to_string())
    }
}

impl From<std::io::Error> for NewscastError {
    fn from(err: std::io::Error) -> Self {
        NewscastError::Io(err.to_string())
    }
}
