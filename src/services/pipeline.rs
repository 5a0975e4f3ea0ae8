//! End-to-end request orchestration.
//!
//! A company query runs fetch, enrichment, narrative, translation and speech
//! in that order. Only an empty company name and the two no-data outcomes end
//! a request early; translation and speech failures degrade the report.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::models::{audio_ready_marker, NewsReport, SpeechResponse, AUDIO_FAILED};
use crate::services::aggregation::AggregationEngine;
use crate::services::comparison::build_comparative;
use crate::services::narrative::build_narrative;
use crate::services::progress::{ProgressReporter, Stage};
use crate::services::source::ArticleSource;
use crate::services::speech::{AudioArtifact, SpeechSynthesizer};
use crate::services::translation::{translate_or_original, Language, TranslationService};
use crate::utils::require_non_blank;
use crate::NewscastError;

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub target_language: Language,
    pub translate_timeout: Duration,
    pub speech_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_language: Language::hindi(),
            translate_timeout: Duration::from_secs(10),
            speech_timeout: Duration::from_secs(20),
        }
    }
}

impl From<&AppConfig> for PipelineConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            target_language: Language::new(&config.translation.target_language),
            translate_timeout: Duration::from_secs(config.translation.timeout_secs),
            // Speech issues one request per chunk; the per-request timeout
            // lives on the client, this bounds the whole synthesis
            speech_timeout: Duration::from_secs(config.speech.timeout_secs.saturating_mul(3)),
        }
    }
}

pub struct NewsPipeline {
    source: Arc<dyn ArticleSource>,
    engine: AggregationEngine,
    translator: Arc<dyn TranslationService>,
    speech: Arc<dyn SpeechSynthesizer>,
    config: PipelineConfig,
}

impl NewsPipeline {
    pub fn new(
        source: Arc<dyn ArticleSource>,
        engine: AggregationEngine,
        translator: Arc<dyn TranslationService>,
        speech: Arc<dyn SpeechSynthesizer>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            source,
            engine,
            translator,
            speech,
            config,
        }
    }

    pub fn target_language(&self) -> &Language {
        &self.config.target_language
    }

    /// Build the full sentiment report for `company`.
    ///
    /// # Errors
    ///
    /// - [`NewscastError::Validation`] for a blank company, before any fetch
    /// - [`NewscastError::NoArticles`] when the source returns nothing
    /// - [`NewscastError::NoUsableArticles`] when no article has usable text
    pub async fn analyze_company(
        &self,
        company: &str,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<NewsReport, NewscastError> {
        let company = require_non_blank(company, "Company name")?;
        info!(company, "Analyzing company news");

        progress.stage(Stage::Fetch).await;
        let articles = self.source.fetch(company).await;
        let fetched = articles.len();
        if fetched == 0 {
            error!(company, "No articles found");
            return Err(NewscastError::NoArticles {
                company: company.to_string(),
            });
        }

        progress.stage(Stage::Enrich).await;
        let (counts, articles) = self.engine.comparative_analysis(articles).await.into_parts();
        if articles.is_empty() {
            error!(company, fetched, "Fetched articles but none were usable");
            return Err(NewscastError::NoUsableArticles {
                company: company.to_string(),
                fetched,
            });
        }

        progress.stage(Stage::Narrative).await;
        let summary_english = build_narrative(company, &articles)?;
        let comparative = build_comparative(counts, &articles);

        progress.stage(Stage::Translate).await;
        let summary_translated = translate_or_original(
            self.translator.as_ref(),
            &summary_english,
            &self.config.target_language,
            self.config.translate_timeout,
        )
        .await;

        progress.stage(Stage::Speech).await;
        let audio = self.synthesize(&summary_translated).await;

        progress.finish("Report ready").await;

        Ok(NewsReport {
            company: company.to_string(),
            articles,
            comparative,
            summary_english,
            summary_translated,
            target_language: self.config.target_language.code().to_string(),
            audio: match &audio {
                Some(_) => audio_ready_marker(&self.config.target_language.name()),
                None => AUDIO_FAILED.to_string(),
            },
            audio_file: audio.map(|a| a.path.display().to_string()),
            generated_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Translate free text and speak it.
    ///
    /// A missing audio file is reported in the response message, not as an error.
    pub async fn speak_text(
        &self,
        text: &str,
        progress: Arc<dyn ProgressReporter>,
    ) -> Result<SpeechResponse, NewscastError> {
        let text = require_non_blank(text, "Text")?;

        progress.stage(Stage::Translate).await;
        let translated_text = translate_or_original(
            self.translator.as_ref(),
            text,
            &self.config.target_language,
            self.config.translate_timeout,
        )
        .await;

        progress.stage(Stage::Speech).await;
        let audio = self.synthesize(&translated_text).await;
        progress.finish("Speech ready").await;

        let message = match &audio {
            Some(_) => audio_ready_marker(&self.config.target_language.name()),
            None => AUDIO_FAILED.to_string(),
        };
        Ok(SpeechResponse {
            audio_file: audio.map(|a| a.path.display().to_string()),
            translated_text,
            message,
        })
    }

    async fn synthesize(&self, text: &str) -> Option<AudioArtifact> {
        match tokio::time::timeout(
            self.config.speech_timeout,
            self.speech.synthesize(text, &self.config.target_language),
        )
        .await
        {
            Ok(Ok(artifact)) => Some(artifact),
            Ok(Err(e)) => {
                warn!(provider = self.speech.name(), "Speech synthesis failed: {}", e);
                None
            }
            Err(_) => {
                warn!(
                    provider = self.speech.name(),
                    "Speech synthesis timed out after {:?}", self.config.speech_timeout
                );
                None
            }
        }
    }
}
