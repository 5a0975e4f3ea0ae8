//! Article models: provider records and their enriched form.
//!
//! [`RawArticle`] keeps the three text fields the pipeline reads as typed
//! options and carries every other provider field through untouched, so the
//! enriched output still holds source, url, publish time and so on.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::sentiment::Sentiment;

/// Placeholder used wherever an article has no usable title.
pub const NO_TITLE: &str = "No Title";

/// A news record as returned by the search provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawArticle {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Provider metadata (source, author, url, publishedAt, ...).
    #[serde(flatten)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// Returns the field only when it holds something other than whitespace.
fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

impl RawArticle {
    /// Convenience constructor for the text fields.
    pub fn new(
        title: Option<&str>,
        description: Option<&str>,
        content: Option<&str>,
    ) -> Self {
        Self {
            title: title.map(str::to_string),
            description: description.map(str::to_string),
            content: content.map(str::to_string),
            metadata: serde_json::Map::new(),
        }
    }

    /// Text used for analysis: description, then content, then title.
    ///
    /// Blank fields count as missing. `None` means the article is unusable.
    pub fn summary_text(&self) -> Option<&str> {
        non_blank(&self.description)
            .or_else(|| non_blank(&self.content))
            .or_else(|| non_blank(&self.title))
    }

    /// Title for display, falling back to [`NO_TITLE`].
    pub fn display_title(&self) -> &str {
        non_blank(&self.title).unwrap_or(NO_TITLE)
    }
}

/// A raw article plus its analysis results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EnrichedArticle {
    #[serde(flatten)]
    pub article: RawArticle,
    pub sentiment: Sentiment,
    pub topics: Vec<String>,
}

impl EnrichedArticle {
    pub fn display_title(&self) -> &str {
        self.article.display_title()
    }
}
