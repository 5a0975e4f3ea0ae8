//! Deterministic stand-ins for the pipeline capabilities.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use newscast::classifier::SentimentClassifier;
use newscast::models::{RawArticle, Sentiment};
use newscast::services::speech::write_audio_file;
use newscast::services::{
    ArticleSource, AudioArtifact, Language, SpeechSynthesizer, TranslationService,
};
use newscast::NewscastError;

const POSITIVE_WORDS: &[&str] = &["rise", "rises", "gain", "gains", "strong", "record", "beats"];
const NEGATIVE_WORDS: &[&str] = &["fall", "falls", "drop", "loss", "weak", "probe", "lawsuit"];

/// Scores text by keyword. Texts containing "slow" are delayed by `slow_delay`.
pub struct KeywordClassifier {
    pub slow_delay: Duration,
    calls: AtomicUsize,
}

impl KeywordClassifier {
    pub fn new() -> Self {
        Self::with_slow_delay(Duration::ZERO)
    }

    pub fn with_slow_delay(slow_delay: Duration) -> Self {
        Self {
            slow_delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SentimentClassifier for KeywordClassifier {
    async fn classify(&self, text: &str, _max_chars: usize) -> Result<Sentiment, NewscastError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let lower = text.to_lowercase();
        if lower.contains("slow") && !self.slow_delay.is_zero() {
            tokio::time::sleep(self.slow_delay).await;
        }
        let has = |words: &[&str]| {
            lower
                .split(|c: char| !c.is_alphanumeric())
                .any(|w| words.contains(&w))
        };
        Ok(if has(POSITIVE_WORDS) {
            Sentiment::Positive
        } else if has(NEGATIVE_WORDS) {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        })
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

pub struct FailingClassifier;

#[async_trait]
impl SentimentClassifier for FailingClassifier {
    async fn classify(&self, _text: &str, _max_chars: usize) -> Result<Sentiment, NewscastError> {
        Err(NewscastError::Classifier("inference failed".into()))
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Always answers Positive, but only after `delay`.
pub struct SlowClassifier {
    pub delay: Duration,
}

#[async_trait]
impl SentimentClassifier for SlowClassifier {
    async fn classify(&self, _text: &str, _max_chars: usize) -> Result<Sentiment, NewscastError> {
        tokio::time::sleep(self.delay).await;
        Ok(Sentiment::Positive)
    }

    fn is_available(&self) -> bool {
        true
    }

    fn name(&self) -> &str {
        "slow"
    }
}

/// Returns the same articles for every query and records the queries.
pub struct StaticArticleSource {
    articles: Vec<RawArticle>,
    queries: Mutex<Vec<String>>,
}

impl StaticArticleSource {
    pub fn new(articles: Vec<RawArticle>) -> Self {
        Self {
            articles,
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleSource for StaticArticleSource {
    async fn fetch(&self, query: &str) -> Vec<RawArticle> {
        self.queries.lock().unwrap().push(query.to_string());
        self.articles.clone()
    }
}

pub struct FailingTranslator;

#[async_trait]
impl TranslationService for FailingTranslator {
    async fn translate(&self, _text: &str, _target: &Language) -> Result<String, NewscastError> {
        Err(NewscastError::Translation("service unavailable".into()))
    }
}

/// Prefixes text with the target code, e.g. "[hi] Hello".
pub struct TaggingTranslator;

#[async_trait]
impl TranslationService for TaggingTranslator {
    async fn translate(&self, text: &str, target: &Language) -> Result<String, NewscastError> {
        Ok(format!("[{}] {}", target.code(), text))
    }
}

/// Writes a small fake mp3 per call into `dir` and remembers the texts.
pub struct RecordingSpeech {
    dir: PathBuf,
    texts: Mutex<Vec<String>>,
}

impl RecordingSpeech {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            texts: Mutex::new(Vec::new()),
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizer for RecordingSpeech {
    async fn synthesize(
        &self,
        text: &str,
        language: &Language,
    ) -> Result<AudioArtifact, NewscastError> {
        self.texts.lock().unwrap().push(text.to_string());
        let audio = b"ID3fake".to_vec();
        let path = write_audio_file(&self.dir, &audio).await?;
        Ok(AudioArtifact {
            path,
            bytes: audio.len(),
            language: language.clone(),
            chunks: 1,
        })
    }

    fn name(&self) -> &str {
        "recording"
    }
}

pub struct FailingSpeech;

#[async_trait]
impl SpeechSynthesizer for FailingSpeech {
    async fn synthesize(
        &self,
        _text: &str,
        _language: &Language,
    ) -> Result<AudioArtifact, NewscastError> {
        Err(NewscastError::Speech("tts endpoint returned 503".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Article with only a title and description, the common provider shape.
pub fn article(title: &str, description: &str) -> RawArticle {
    RawArticle::new(Some(title), Some(description), None)
}
