//! Pipeline wiring for integration tests.
//!
//! Each harness owns a temporary directory for audio output, removed on drop.

use std::sync::Arc;
use std::time::Duration;

use tempfile::TempDir;

use newscast::classifier::SentimentClassifier;
use newscast::models::RawArticle;
use newscast::services::{
    AggregationConfig, AggregationEngine, FrequencyTopicExtractor, Language, NewsPipeline,
    PipelineConfig, SpeechSynthesizer, TranslationService,
};

use super::fakes::{KeywordClassifier, RecordingSpeech, StaticArticleSource, TaggingTranslator};

/// Engine with the frequency topic extractor and the given classifier timeout.
pub fn build_engine(
    classifier: Arc<dyn SentimentClassifier>,
    classify_timeout: Duration,
) -> AggregationEngine {
    AggregationEngine::new(
        classifier,
        Arc::new(FrequencyTopicExtractor),
        AggregationConfig {
            concurrency: 4,
            max_input_chars: 512,
            classify_timeout,
        },
    )
}

pub struct PipelineHarness {
    pub source: Arc<StaticArticleSource>,
    pub speech: Arc<RecordingSpeech>,
    classifier: Arc<dyn SentimentClassifier>,
    translator: Arc<dyn TranslationService>,
    speech_override: Option<Arc<dyn SpeechSynthesizer>>,
    pub temp_dir: TempDir,
}

impl PipelineHarness {
    /// Keyword classifier, tagging translator and recording speech over `articles`.
    pub fn new(articles: Vec<RawArticle>) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory for audio");
        let speech = Arc::new(RecordingSpeech::new(temp_dir.path().join("audio")));
        Self {
            source: Arc::new(StaticArticleSource::new(articles)),
            speech,
            classifier: Arc::new(KeywordClassifier::new()),
            translator: Arc::new(TaggingTranslator),
            speech_override: None,
            temp_dir,
        }
    }

    pub fn with_translator(mut self, translator: Arc<dyn TranslationService>) -> Self {
        self.translator = translator;
        self
    }

    /// Replace the recording synthesizer; `self.speech` then sees no calls.
    pub fn with_speech(mut self, speech: Arc<dyn SpeechSynthesizer>) -> Self {
        self.speech_override = Some(speech);
        self
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn SentimentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn pipeline(&self) -> NewsPipeline {
        let speech: Arc<dyn SpeechSynthesizer> = match &self.speech_override {
            Some(speech) => speech.clone(),
            None => self.speech.clone(),
        };
        NewsPipeline::new(
            self.source.clone(),
            build_engine(self.classifier.clone(), Duration::from_secs(5)),
            self.translator.clone(),
            speech,
            PipelineConfig {
                target_language: Language::hindi(),
                translate_timeout: Duration::from_secs(2),
                speech_timeout: Duration::from_secs(2),
            },
        )
    }
}
