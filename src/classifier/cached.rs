use std::sync::Arc;

use async_trait::async_trait;
use moka::future::Cache;

use crate::classifier::SentimentClassifier;
use crate::models::Sentiment;
use crate::utils::truncate_chars;
use crate::NewscastError;

/// Memoizes verdicts of a deterministic classifier, keyed by the truncated
/// input text. Failures are never cached.
pub struct CachedSentimentClassifier {
    inner: Arc<dyn SentimentClassifier>,
    cache: Cache<String, Sentiment>,
}

impl CachedSentimentClassifier {
    pub fn new(inner: Arc<dyn SentimentClassifier>, capacity: u64) -> Self {
        Self {
            inner,
            cache: Cache::builder().max_capacity(capacity).build(),
        }
    }

    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl SentimentClassifier for CachedSentimentClassifier {
    async fn classify(&self, text: &str, max_chars: usize) -> Result<Sentiment, NewscastError> {
        // A shut-down model must not keep answering from memory
        if !self.inner.is_available() {
            return self.inner.classify(text, max_chars).await;
        }

        let key = truncate_chars(text, max_chars).to_string();
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let sentiment = self.inner.classify(&key, max_chars).await?;
        // Shutdown may have run while inference was in flight
        if self.inner.is_available() {
            self.cache.insert(key, sentiment).await;
        }
        Ok(sentiment)
    }

    fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn shutdown(&self) {
        self.cache.invalidate_all();
        self.inner.shutdown().await;
    }
}
