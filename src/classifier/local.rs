use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::classifier::candle_backend::{download_model, select_device, SentimentModel};
use crate::classifier::SentimentClassifier;
use crate::models::Sentiment;
use crate::utils::truncate_chars;
use crate::NewscastError;

/// Sentiment classifier backed by a local candle model.
///
/// The model is loaded eagerly. If download or loading fails the classifier
/// is created unavailable instead of erroring. `shutdown` drops the model.
pub struct LocalSentimentClassifier {
    model: RwLock<Option<Arc<SentimentModel>>>,
    name: String,
}

impl LocalSentimentClassifier {
    /// Download and load `model_repo`. Blocking; run it off the async runtime.
    pub fn load(model_repo: &str) -> Self {
        let unavailable = || Self {
            model: RwLock::new(None),
            name: model_repo.to_string(),
        };

        let files = match download_model(model_repo) {
            Ok(files) => files,
            Err(e) => {
                warn!(
                    "Failed to download sentiment model {}: {:#}. Sentiment will default to Neutral.",
                    model_repo, e
                );
                return unavailable();
            }
        };

        match SentimentModel::new(&files, select_device()) {
            Ok(model) => {
                info!(
                    "Sentiment classifier loaded ({}, labels: {})",
                    model_repo,
                    model.labels().join("/")
                );
                Self {
                    model: RwLock::new(Some(Arc::new(model))),
                    name: model_repo.to_string(),
                }
            }
            Err(e) => {
                warn!(
                    "Failed to load sentiment model {}: {:#}. Sentiment will default to Neutral.",
                    model_repo, e
                );
                unavailable()
            }
        }
    }

    fn current_model(&self) -> Option<Arc<SentimentModel>> {
        match self.model.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl SentimentClassifier for LocalSentimentClassifier {
    async fn classify(&self, text: &str, max_chars: usize) -> Result<Sentiment, NewscastError> {
        let model = self
            .current_model()
            .ok_or_else(|| NewscastError::Classifier("Sentiment model not loaded".to_string()))?;

        let input = truncate_chars(text, max_chars).to_string();

        let predictions = tokio::task::spawn_blocking(move || model.predict(&[input]))
            .await
            .map_err(|e| NewscastError::Classifier(format!("Task join error: {}", e)))?
            .map_err(|e| NewscastError::Classifier(format!("Inference error: {:#}", e)))?;

        let (label, score) = predictions
            .into_iter()
            .next()
            .ok_or_else(|| NewscastError::Classifier("Empty classification result".to_string()))?;

        debug!(label = %label, score, "Classified text");
        Ok(Sentiment::from_label(&label))
    }

    fn is_available(&self) -> bool {
        self.current_model().is_some()
    }

    fn name(&self) -> &str {
        &self.name
    }

    async fn shutdown(&self) {
        let dropped = match self.model.write() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if dropped.is_some() {
            info!("Sentiment classifier {} shut down", self.name);
        }
    }
}
