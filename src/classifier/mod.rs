//! Sentiment classification capability.
//!
//! The pipeline only sees [`SentimentClassifier`]. The local candle model,
//! the memoizing wrapper and the no-op fallback all implement it, so the
//! aggregation engine never knows whether a model is actually loaded.

pub mod cached;
pub mod candle_backend;
pub mod local;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ClassifierConfig;
use crate::models::Sentiment;
use crate::NewscastError;

pub use cached::CachedSentimentClassifier;
pub use local::LocalSentimentClassifier;

/// Text to sentiment.
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Classify `text`, considering at most `max_chars` characters of it.
    async fn classify(&self, text: &str, max_chars: usize) -> Result<Sentiment, NewscastError>;

    /// Whether a model is loaded and accepting requests.
    fn is_available(&self) -> bool;

    /// Human-readable backend name for logs and status output.
    fn name(&self) -> &str;

    /// Release model resources. Later `classify` calls fail.
    async fn shutdown(&self) {}
}

/// Classifier without a model. Every call fails, which the engine turns
/// into a Neutral verdict.
pub struct NoopSentimentClassifier;

impl Default for NoopSentimentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl NoopSentimentClassifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentimentClassifier for NoopSentimentClassifier {
    async fn classify(&self, _text: &str, _max_chars: usize) -> Result<Sentiment, NewscastError> {
        Err(NewscastError::Classifier(
            "Sentiment classifier is not available (noop)".to_string(),
        ))
    }

    fn is_available(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "noop"
    }
}

/// Build the process-wide classifier.
///
/// With `use_model` false, or when the model fails to load, this returns the
/// no-op classifier. A positive `cache_capacity` wraps the model in
/// [`CachedSentimentClassifier`].
pub async fn create_classifier(
    config: &ClassifierConfig,
    use_model: bool,
) -> Arc<dyn SentimentClassifier> {
    if !use_model {
        tracing::info!("Sentiment model disabled, all articles will be Neutral");
        return Arc::new(NoopSentimentClassifier::new());
    }

    let repo = config.model_repo.clone();
    let local = match tokio::task::spawn_blocking(move || LocalSentimentClassifier::load(&repo))
        .await
    {
        Ok(local) => local,
        Err(e) => {
            tracing::warn!("Classifier loader task failed: {}. Using noop classifier.", e);
            return Arc::new(NoopSentimentClassifier::new());
        }
    };

    if !local.is_available() {
        return Arc::new(NoopSentimentClassifier::new());
    }

    let local: Arc<dyn SentimentClassifier> = Arc::new(local);
    if config.cache_capacity > 0 {
        Arc::new(CachedSentimentClassifier::new(local, config.cache_capacity))
    } else {
        local
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_classifier_fails() {
        let classifier = NoopSentimentClassifier::new();
        assert!(!classifier.is_available());
        assert_eq!(classifier.name(), "noop");
        let result = classifier.classify("great quarter", 512).await;
        assert!(matches!(result, Err(NewscastError::Classifier(_))));
    }

    #[tokio::test]
    async fn test_create_classifier_without_model() {
        let classifier = create_classifier(&ClassifierConfig::default(), false).await;
        assert!(!classifier.is_available());
        assert_eq!(classifier.name(), "noop");
    }
}
