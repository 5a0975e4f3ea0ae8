//! Shared initialization logic for MCP and CLI modes.

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classifier::{create_classifier, SentimentClassifier};
use crate::config::{load_config, AppConfig};
use crate::services::{
    AggregationConfig, AggregationEngine, ArticleSource, FrequencyTopicExtractor,
    GoogleSpeechSynthesizer, GoogleTranslator, NewsApiSource, NewsPipeline, NoopSpeechSynthesizer,
    PipelineConfig, SpeechSynthesizer, TranslationService,
};

/// Startup switches from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct InitOptions {
    /// Skip loading the sentiment model; every article scores Neutral.
    pub no_model: bool,
    /// Skip speech synthesis.
    pub no_audio: bool,
}

/// Application context holding configuration and the wired pipeline.
///
/// Shared between MCP server and CLI commands. Owns the process-wide
/// sentiment classifier; call [`AppContext::shutdown`] before exit.
pub struct AppContext {
    pub config: AppConfig,
    pub data_path: PathBuf,
    pub classifier: Arc<dyn SentimentClassifier>,
    pub pipeline: Arc<NewsPipeline>,
}

/// Data path priority: explicit path > NEWSCAST_DATA_PATH env > ./.newscast (if exists) > ~/.newscast
pub fn resolve_data_path(explicit_path: Option<PathBuf>) -> PathBuf {
    explicit_path
        .or_else(|| std::env::var("NEWSCAST_DATA_PATH").ok().map(PathBuf::from))
        .or_else(|| {
            let local_path = Path::new(".newscast");
            if local_path.is_dir() {
                Some(local_path.to_path_buf())
            } else {
                None
            }
        })
        .unwrap_or_else(|| {
            dirs::home_dir()
                .map(|h| h.join(".newscast"))
                .unwrap_or_else(|| PathBuf::from(".newscast"))
        })
}

impl AppContext {
    /// Initialize application context.
    pub async fn new(explicit_path: Option<PathBuf>, options: InitOptions) -> Result<Self> {
        let data_path = resolve_data_path(explicit_path);
        tracing::info!("Using data path: {}", data_path.display());

        let config = load_config(&data_path);
        Self::from_config(config, data_path, options).await
    }

    /// Wire the default providers from an already-loaded configuration.
    pub async fn from_config(
        config: AppConfig,
        data_path: PathBuf,
        options: InitOptions,
    ) -> Result<Self> {
        tracing::info!("Initializing sentiment classifier...");
        let classifier = create_classifier(&config.classifier, !options.no_model).await;
        if classifier.is_available() {
            tracing::info!("Sentiment classifier ready ({})", classifier.name());
        } else {
            tracing::warn!("Sentiment classifier not available, articles will be Neutral");
        }

        let source: Arc<dyn ArticleSource> = Arc::new(NewsApiSource::new(config.news.clone())?);
        let translator: Arc<dyn TranslationService> =
            Arc::new(GoogleTranslator::new(&config.translation)?);

        let speech: Arc<dyn SpeechSynthesizer> = if options.no_audio || !config.speech.enabled {
            tracing::info!("Speech synthesis disabled");
            Arc::new(NoopSpeechSynthesizer)
        } else {
            let output_dir = config.speech.resolve_output_dir(&data_path);
            tracing::info!("Audio output directory: {}", output_dir.display());
            Arc::new(GoogleSpeechSynthesizer::new(&config.speech, output_dir)?)
        };

        let engine = AggregationEngine::new(
            classifier.clone(),
            Arc::new(FrequencyTopicExtractor),
            AggregationConfig::from(&config),
        );
        let pipeline = Arc::new(NewsPipeline::new(
            source,
            engine,
            translator,
            speech,
            PipelineConfig::from(&config),
        ));

        Ok(Self {
            config,
            data_path,
            classifier,
            pipeline,
        })
    }

    /// Release the classifier. Requests made afterwards score Neutral.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down");
        self.classifier.shutdown().await;
    }
}
