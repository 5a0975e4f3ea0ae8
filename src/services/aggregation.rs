//! Per-article enrichment and sentiment tally.
//!
//! Articles are enriched on a bounded pool (`buffered`, so results come back
//! in input order) and counted in one sequential pass afterwards. Nothing a
//! classifier or extractor does can fail the batch: errors and timeouts
//! become Neutral, and articles without usable text are dropped.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tracing::{debug, info, warn};

use crate::classifier::SentimentClassifier;
use crate::config::AppConfig;
use crate::models::{AggregateReport, EnrichedArticle, RawArticle, Sentiment, SentimentCounts};
use crate::services::topics::TopicExtractor;

#[derive(Debug, Clone)]
pub struct AggregationConfig {
    /// Articles enriched concurrently.
    pub concurrency: usize,
    /// Characters of summary text passed to the classifier.
    pub max_input_chars: usize,
    /// Upper bound on a single classifier call.
    pub classify_timeout: Duration,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            max_input_chars: 512,
            classify_timeout: Duration::from_secs(30),
        }
    }
}

impl From<&AppConfig> for AggregationConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            concurrency: config.analysis.concurrency,
            max_input_chars: config.classifier.max_input_chars,
            classify_timeout: Duration::from_secs(config.classifier.timeout_secs),
        }
    }
}

pub struct AggregationEngine {
    classifier: Arc<dyn SentimentClassifier>,
    extractor: Arc<dyn TopicExtractor>,
    config: AggregationConfig,
}

impl AggregationEngine {
    pub fn new(
        classifier: Arc<dyn SentimentClassifier>,
        extractor: Arc<dyn TopicExtractor>,
        config: AggregationConfig,
    ) -> Self {
        Self {
            classifier,
            extractor,
            config,
        }
    }

    /// Enrich every usable article and tally sentiments.
    ///
    /// Output keeps the relative input order of surviving articles and the
    /// counts always sum to the number of output articles.
    pub async fn comparative_analysis(&self, articles: Vec<RawArticle>) -> AggregateReport {
        let fetched = articles.len();
        let concurrency = self.config.concurrency.max(1);

        let enriched: Vec<Option<EnrichedArticle>> = tokio_stream::iter(articles.into_iter().enumerate())
            .map(|(idx, article)| {
                let classifier = self.classifier.clone();
                let extractor = self.extractor.clone();
                let config = self.config.clone();
                async move { enrich_article(idx, article, classifier, extractor, &config).await }
            })
            .buffered(concurrency)
            .collect()
            .await;

        let articles: Vec<EnrichedArticle> = enriched.into_iter().flatten().collect();
        let sentiment_counts: SentimentCounts = articles.iter().map(|a| a.sentiment).collect();

        info!(
            fetched,
            analyzed = articles.len(),
            positive = sentiment_counts.positive,
            negative = sentiment_counts.negative,
            neutral = sentiment_counts.neutral,
            "Aggregated article sentiment"
        );

        AggregateReport {
            sentiment_counts,
            articles,
        }
    }
}

async fn enrich_article(
    idx: usize,
    article: RawArticle,
    classifier: Arc<dyn SentimentClassifier>,
    extractor: Arc<dyn TopicExtractor>,
    config: &AggregationConfig,
) -> Option<EnrichedArticle> {
    let Some(text) = article.summary_text().map(str::to_string) else {
        debug!(index = idx, "Skipping article without description, content or title");
        return None;
    };

    let sentiment = match tokio::time::timeout(
        config.classify_timeout,
        classifier.classify(&text, config.max_input_chars),
    )
    .await
    {
        Ok(Ok(sentiment)) => sentiment,
        Ok(Err(e)) => {
            warn!(index = idx, "Classification failed, using Neutral: {}", e);
            Sentiment::Neutral
        }
        Err(_) => {
            warn!(
                index = idx,
                "Classification timed out after {:?}, using Neutral", config.classify_timeout
            );
            Sentiment::Neutral
        }
    };

    let topics = extractor.extract(&text);
    debug!(index = idx, %sentiment, ?topics, "Enriched article");

    Some(EnrichedArticle {
        article,
        sentiment,
        topics,
    })
}
