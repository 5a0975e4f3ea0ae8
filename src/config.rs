//! Application configuration.
//!
//! Every section has defaults, so an absent or partial `newscast.toml` is
//! valid. Environment variables override individual fields on top of the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::NewscastError;

pub const CONFIG_FILE: &str = "newscast.toml";

pub const ENV_NEWS_API_KEY: &str = "NEWS_API_KEY";
pub const ENV_TARGET_LANG: &str = "NEWSCAST_TARGET_LANG";
pub const ENV_CLASSIFIER_MODEL: &str = "NEWSCAST_CLASSIFIER_MODEL";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub news: NewsConfig,
    pub classifier: ClassifierConfig,
    pub analysis: AnalysisConfig,
    pub translation: TranslationConfig,
    pub speech: SpeechConfig,
}

/// News search provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// NewsAPI key. Without one, fetches return no articles.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub language: String,
    pub page_size: u32,
    pub timeout_secs: u64,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: "https://newsapi.org/v2/everything".to_string(),
            language: "en".to_string(),
            page_size: 5,
            timeout_secs: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// HuggingFace repo of a sequence-classification model.
    pub model_repo: String,
    /// Input is cut to this many characters before inference.
    pub max_input_chars: usize,
    pub timeout_secs: u64,
    /// Memoized results; 0 disables the cache.
    pub cache_capacity: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            model_repo: "cardiffnlp/twitter-roberta-base-sentiment-latest".to_string(),
            max_input_chars: 512,
            timeout_secs: 30,
            cache_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Articles enriched in parallel.
    pub concurrency: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// ISO 639-1 code of the output language.
    pub target_language: String,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            target_language: "hi".to_string(),
            endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    pub enabled: bool,
    pub endpoint: String,
    /// Where MP3 files are written. Defaults to `{data_path}/audio`.
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: u64,
    /// Newest MP3 files kept in the output directory; 0 keeps everything.
    pub max_audio_files: usize,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://translate.google.com/translate_tts".to_string(),
            output_dir: None,
            timeout_secs: 20,
            max_audio_files: 50,
        }
    }
}

impl SpeechConfig {
    pub fn resolve_output_dir(&self, data_path: &Path) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| data_path.join("audio"))
    }
}

/// Load configuration with priority:
/// 1. Environment overrides (`NEWS_API_KEY`, `NEWSCAST_TARGET_LANG`,
///    `NEWSCAST_CLASSIFIER_MODEL`)
/// 2. `{data_path}/newscast.toml` file
/// 3. Defaults
pub fn load_config(data_path: &Path) -> AppConfig {
    load_config_with(data_path, |key| std::env::var(key).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with<F>(data_path: &Path, env: F) -> AppConfig
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match read_config_file(data_path) {
        Ok(config) => config.unwrap_or_default(),
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            AppConfig::default()
        }
    };
    apply_env_overrides(&mut config, env);
    config
}

/// Parse `{data_path}/newscast.toml`. `Ok(None)` when the file does not exist.
pub fn read_config_file(data_path: &Path) -> Result<Option<AppConfig>, NewscastError> {
    let config_path = data_path.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&config_path).map_err(|e| {
        NewscastError::Config(format!("Failed to read {}: {}", config_path.display(), e))
    })?;
    let config = toml::from_str::<AppConfig>(&contents).map_err(|e| {
        NewscastError::Config(format!("Failed to parse {}: {}", config_path.display(), e))
    })?;
    info!("Loaded config from {}", config_path.display());
    Ok(Some(config))
}

fn apply_env_overrides<F>(config: &mut AppConfig, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty(ENV_NEWS_API_KEY) {
        config.news.api_key = Some(key);
    }
    if let Some(lang) = non_empty(ENV_TARGET_LANG) {
        info!("Target language overridden by {}: {}", ENV_TARGET_LANG, lang);
        config.translation.target_language = lang;
    }
    if let Some(model) = non_empty(ENV_CLASSIFIER_MODEL) {
        info!("Classifier model overridden by {}: {}", ENV_CLASSIFIER_MODEL, model);
        config.classifier.model_repo = model;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_with(dir.path(), no_env);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.news.page_size, 5);
        assert_eq!(config.analysis.concurrency, 4);
        assert_eq!(config.translation.target_language, "hi");
        assert!(config.news.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[news]\napi_key = \"abc\"\npage_size = 10\n\n[speech]\nenabled = false\n",
        )
        .unwrap();

        let config = load_config_with(dir.path(), no_env);
        assert_eq!(config.news.api_key.as_deref(), Some("abc"));
        assert_eq!(config.news.page_size, 10);
        assert_eq!(config.news.language, "en");
        assert!(!config.speech.enabled);
        assert_eq!(config.classifier, ClassifierConfig::default());
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[news\nthis is not toml").unwrap();
        let config = load_config_with(dir.path(), no_env);
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "page_size = [").unwrap();
        let err = read_config_file(dir.path()).unwrap_err();
        assert!(matches!(err, NewscastError::Config(ref msg) if msg.contains(CONFIG_FILE)));
        assert!(read_config_file(&dir.path().join("missing")).unwrap().is_none());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[news]\napi_key = \"from-file\"\n[translation]\ntarget_language = \"fr\"\n",
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            (ENV_NEWS_API_KEY, "from-env"),
            (ENV_CLASSIFIER_MODEL, "org/other-model"),
            (ENV_TARGET_LANG, "  "),
        ]
        .into_iter()
        .collect();
        let config = load_config_with(dir.path(), |k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.news.api_key.as_deref(), Some("from-env"));
        assert_eq!(config.classifier.model_repo, "org/other-model");
        // Blank env values are ignored
        assert_eq!(config.translation.target_language, "fr");
    }

    #[test]
    fn test_audio_dir_resolution() {
        let data = Path::new("/tmp/newscast-data");
        let speech = SpeechConfig::default();
        assert_eq!(speech.resolve_output_dir(data), data.join("audio"));

        let speech = SpeechConfig {
            output_dir: Some(PathBuf::from("/var/audio")),
            ..SpeechConfig::default()
        };
        assert_eq!(speech.resolve_output_dir(data), PathBuf::from("/var/audio"));
    }
}
