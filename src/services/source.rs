//! News article sources.
//!
//! [`NewsApiSource`] queries `https://newsapi.org/v2/everything`. Every
//! failure (missing key, transport, non-2xx status, provider error payload,
//! malformed JSON) is logged and turned into an empty result, so callers
//! only need to handle "no articles".

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::config::NewsConfig;
use crate::models::RawArticle;
use crate::utils::http::create_http_client;
use crate::NewscastError;

/// Fetches raw article records for a query string.
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Never fails; provider errors yield an empty list.
    async fn fetch(&self, query: &str) -> Vec<RawArticle>;
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    status: String,
    #[serde(default, rename = "totalResults")]
    total_results: u64,
    #[serde(default)]
    articles: Vec<RawArticle>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Parse a NewsAPI `/v2/everything` body into articles.
pub fn parse_news_response(body: &str) -> Result<Vec<RawArticle>, NewscastError> {
    let response: NewsApiResponse = serde_json::from_str(body)?;
    if response.status == "error" {
        return Err(NewscastError::Http(format!(
            "NewsAPI error {}: {}",
            response.code.as_deref().unwrap_or("unknown"),
            response.message.as_deref().unwrap_or("no message")
        )));
    }
    debug!(
        total_results = response.total_results,
        returned = response.articles.len(),
        "Parsed NewsAPI response"
    );
    Ok(response.articles)
}

pub struct NewsApiSource {
    http: reqwest::Client,
    config: NewsConfig,
}

impl NewsApiSource {
    pub fn new(config: NewsConfig) -> Result<Self, NewscastError> {
        let http = create_http_client(config.timeout_secs)?;
        Ok(Self { http, config })
    }

    async fn request(&self, query: &str, api_key: &str) -> Result<Vec<RawArticle>, NewscastError> {
        let page_size = self.config.page_size.to_string();
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("q", query),
                ("apiKey", api_key),
                ("language", self.config.language.as_str()),
                ("pageSize", page_size.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            // NewsAPI puts the reason in an error payload
            return match parse_news_response(&body) {
                Err(e) => Err(e),
                Ok(_) => Err(NewscastError::Http(format!("NewsAPI returned {}", status))),
            };
        }
        parse_news_response(&body)
    }
}

#[async_trait]
impl ArticleSource for NewsApiSource {
    async fn fetch(&self, query: &str) -> Vec<RawArticle> {
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty()) else {
            warn!("No NewsAPI key configured (set NEWS_API_KEY); returning no articles");
            return vec![];
        };

        match self.request(query, api_key).await {
            Ok(articles) => {
                info!(query, count = articles.len(), "Fetched articles");
                articles
            }
            Err(e) => {
                warn!(query, "News fetch failed: {}", e);
                vec![]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok_response() {
        let body = r#"{
            "status": "ok",
            "totalResults": 2,
            "articles": [
                {"source": {"id": null, "name": "Reuters"}, "title": "Tesla rises",
                 "description": "Shares up", "content": null, "url": "https://a"},
                {"title": null, "description": null, "content": "Body only"}
            ]
        }"#;
        let articles = parse_news_response(body).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title.as_deref(), Some("Tesla rises"));
        assert_eq!(articles[0].metadata["source"]["name"], "Reuters");
        assert_eq!(articles[1].summary_text(), Some("Body only"));
    }

    #[test]
    fn test_parse_error_payload() {
        let body = r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        let err = parse_news_response(body).unwrap_err();
        assert!(err.to_string().contains("apiKeyInvalid"));
    }

    #[test]
    fn test_parse_missing_articles_field() {
        let articles = parse_news_response(r#"{"status":"ok"}"#).unwrap();
        assert!(articles.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_news_response("<html>"),
            Err(NewscastError::Json(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_key_returns_empty() {
        let source = NewsApiSource::new(NewsConfig::default()).unwrap();
        assert!(source.fetch("Tesla").await.is_empty());
    }
}
