//! Report models returned by the pipeline.
//!
//! Field names serialize to the keys consumers of the news endpoint already
//! read ("Company", "Articles", "Comparative Sentiment Score", ...).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::article::EnrichedArticle;
use crate::models::sentiment::SentimentCounts;

/// Audio marker when speech synthesis produced nothing.
pub const AUDIO_FAILED: &str = "TTS Generation Failed";

/// Sentiment tally plus the enriched articles, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub sentiment_counts: SentimentCounts,
    pub articles: Vec<EnrichedArticle>,
}

impl AggregateReport {
    pub fn into_parts(self) -> (SentimentCounts, Vec<EnrichedArticle>) {
        (self.sentiment_counts, self.articles)
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// One contrast between two neighbouring articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CoverageDifference {
    #[serde(rename = "Comparison")]
    pub comparison: String,
    #[serde(rename = "Impact")]
    pub impact: String,
}

/// Shared and distinctive topics across the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicOverlap {
    #[serde(rename = "Common Topics")]
    pub common_topics: Vec<String>,
    #[serde(rename = "Unique Topics in Article 1")]
    pub unique_topics_first: Vec<String>,
    #[serde(rename = "Unique Topics in Article 2")]
    pub unique_topics_second: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ComparativeScore {
    #[serde(rename = "Sentiment Distribution")]
    pub sentiment_distribution: SentimentCounts,
    #[serde(rename = "Coverage Differences")]
    pub coverage_differences: Vec<CoverageDifference>,
    #[serde(rename = "Topic Overlap")]
    pub topic_overlap: TopicOverlap,
}

/// Full response for a company query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NewsReport {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Articles")]
    pub articles: Vec<EnrichedArticle>,
    #[serde(rename = "Comparative Sentiment Score")]
    pub comparative: ComparativeScore,
    #[serde(rename = "Final Sentiment Analysis (English)")]
    pub summary_english: String,
    #[serde(rename = "Final Sentiment Analysis (Translated)")]
    pub summary_translated: String,
    #[serde(rename = "Target Language")]
    pub target_language: String,
    /// Human-readable audio status: a play marker or [`AUDIO_FAILED`].
    #[serde(rename = "Audio")]
    pub audio: String,
    #[serde(rename = "Audio File", skip_serializing_if = "Option::is_none", default)]
    pub audio_file: Option<String>,
    /// RFC 3339 timestamp of report creation.
    #[serde(rename = "Generated At")]
    pub generated_at: String,
}

impl NewsReport {
    pub fn has_audio(&self) -> bool {
        self.audio_file.is_some()
    }
}

/// Response for free-text speech requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct SpeechResponse {
    pub audio_file: Option<String>,
    pub translated_text: String,
    pub message: String,
}

/// Audio marker for a successful synthesis in `language_name`.
pub fn audio_ready_marker(language_name: &str) -> String {
    format!("[Play {} Speech]", language_name)
}
