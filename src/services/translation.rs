//! Text translation with fall-back to the source text.
//!
//! Callers go through [`translate_or_original`]: a translation failure never
//! reaches them, they simply get the untranslated text back.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::TranslationConfig;
use crate::utils::http::create_http_client;
use crate::NewscastError;

/// Longest input the public Google endpoint accepts.
pub const MAX_TRANSLATE_CHARS: usize = 5000;

/// Timeout used by [`translate_to_hindi`].
pub const DEFAULT_TRANSLATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Target language, identified by its ISO 639-1 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Language {
    code: String,
}

impl Language {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.trim().to_lowercase(),
        }
    }

    pub fn hindi() -> Self {
        Self::new("hi")
    }

    pub fn english() -> Self {
        Self::new("en")
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// English name for well-known codes, the upper-cased code otherwise.
    pub fn name(&self) -> String {
        let name = match self.code.as_str() {
            "hi" => "Hindi",
            "en" => "English",
            "bn" => "Bengali",
            "ta" => "Tamil",
            "te" => "Telugu",
            "mr" => "Marathi",
            "gu" => "Gujarati",
            "ur" => "Urdu",
            "fr" => "French",
            "de" => "German",
            "es" => "Spanish",
            "ja" => "Japanese",
            "zh" | "zh-cn" => "Chinese",
            other => return other.to_uppercase(),
        };
        name.to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, NewscastError>;
}

/// Translate `text`, returning it unchanged on failure, timeout or blank input.
pub async fn translate_or_original(
    service: &dyn TranslationService,
    text: &str,
    target: &Language,
    timeout: Duration,
) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    match tokio::time::timeout(timeout, service.translate(text, target)).await {
        Ok(Ok(translated)) if !translated.trim().is_empty() => translated,
        Ok(Ok(_)) => {
            warn!(lang = %target, "Translation came back empty, keeping original text");
            text.to_string()
        }
        Ok(Err(e)) => {
            warn!(lang = %target, "Translation failed, keeping original text: {}", e);
            text.to_string()
        }
        Err(_) => {
            warn!(lang = %target, "Translation timed out after {:?}, keeping original text", timeout);
            text.to_string()
        }
    }
}

pub async fn translate_to_hindi(service: &dyn TranslationService, text: &str) -> String {
    translate_or_original(service, text, &Language::hindi(), DEFAULT_TRANSLATE_TIMEOUT).await
}

/// Concatenate the translated segments of a `translate_a/single` response.
///
/// The payload is a nested array: `[[["translated", "source", ...], ...], ...]`.
pub fn parse_google_response(body: &str) -> Result<String, NewscastError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    let segments = value
        .get(0)
        .and_then(|v| v.as_array())
        .ok_or_else(|| NewscastError::Translation("Unexpected response shape".to_string()))?;

    let translated: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(|s| s.as_str()))
        .collect();

    if translated.is_empty() {
        return Err(NewscastError::Translation(
            "Response contained no translated text".to_string(),
        ));
    }
    Ok(translated)
}

/// Translator using Google's public web endpoint (`client=gtx`).
pub struct GoogleTranslator {
    http: reqwest::Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(config: &TranslationConfig) -> Result<Self, NewscastError> {
        Ok(Self {
            http: create_http_client(config.timeout_secs)?,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl TranslationService for GoogleTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, NewscastError> {
        let length = text.chars().count();
        if length > MAX_TRANSLATE_CHARS {
            return Err(NewscastError::Translation(format!(
                "Text has {} characters, limit is {}",
                length, MAX_TRANSLATE_CHARS
            )));
        }

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewscastError::Translation(format!(
                "Translate endpoint returned {}",
                status
            )));
        }

        let body = response.text().await?;
        let translated = parse_google_response(&body)?;
        debug!(lang = %target, chars = translated.chars().count(), "Translated text");
        Ok(translated)
    }
}

/// Translator that always fails, leaving text untranslated.
pub struct NoopTranslator;

#[async_trait]
impl TranslationService for NoopTranslator {
    async fn translate(&self, _text: &str, _target: &Language) -> Result<String, NewscastError> {
        Err(NewscastError::Translation(
            "Translation is not available (noop)".to_string(),
        ))
    }
}
