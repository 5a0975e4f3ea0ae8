//! Speech synthesis to MP3 files.
//!
//! [`GoogleSpeechSynthesizer`] uses the public `translate_tts` endpoint, which
//! only accepts short inputs, so text is split on word boundaries into chunks
//! and the returned MP3 frames are concatenated into one file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::config::SpeechConfig;
use crate::services::translation::Language;
use crate::utils::chunk_on_words;
use crate::utils::http::create_http_client;
use crate::NewscastError;

/// Longest chunk the TTS endpoint accepts per request.
pub const MAX_TTS_CHUNK_CHARS: usize = 100;

/// A synthesized audio file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioArtifact {
    pub path: PathBuf,
    pub bytes: usize,
    pub language: Language,
    /// Number of provider requests the text was split into.
    pub chunks: usize,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: &Language) -> Result<AudioArtifact, NewscastError>;

    /// Provider name for logging.
    fn name(&self) -> &str;
}

/// Write `audio` as `{dir}/{uuid}.mp3`, creating `dir` if needed.
pub async fn write_audio_file(dir: &Path, audio: &[u8]) -> Result<PathBuf, NewscastError> {
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{}.mp3", uuid::Uuid::new_v4()));
    tokio::fs::write(&path, audio).await?;
    Ok(path)
}

/// Delete all but the `keep` most recently modified `.mp3` files in `dir`.
///
/// Returns the number of files removed. `keep == 0` disables pruning.
pub async fn prune_audio_files(dir: &Path, keep: usize) -> Result<usize, NewscastError> {
    if keep == 0 {
        return Ok(0);
    }

    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("mp3") {
            continue;
        }
        let modified = entry.metadata().await?.modified()?;
        files.push((modified, path));
    }
    if files.len() <= keep {
        return Ok(0);
    }

    // Newest first
    files.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));
    let stale = files.split_off(keep);
    for (_, path) in &stale {
        tokio::fs::remove_file(path).await?;
    }
    debug!(removed = stale.len(), kept = keep, "Pruned old audio files");
    Ok(stale.len())
}

pub struct GoogleSpeechSynthesizer {
    http: reqwest::Client,
    endpoint: String,
    output_dir: PathBuf,
    max_audio_files: usize,
}

impl GoogleSpeechSynthesizer {
    pub fn new(config: &SpeechConfig, output_dir: PathBuf) -> Result<Self, NewscastError> {
        Ok(Self {
            http: create_http_client(config.timeout_secs)?,
            endpoint: config.endpoint.clone(),
            output_dir,
            max_audio_files: config.max_audio_files,
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        language: &Language,
        idx: usize,
        total: usize,
    ) -> Result<Vec<u8>, NewscastError> {
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("q", chunk),
                ("tl", language.code()),
                ("client", "tw-ob"),
                ("idx", idx.as_str()),
                ("total", total.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewscastError::Speech(format!(
                "TTS endpoint returned {} for chunk {}",
                status, idx
            )));
        }
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleSpeechSynthesizer {
    async fn synthesize(&self, text: &str, language: &Language) -> Result<AudioArtifact, NewscastError> {
        let chunks = chunk_on_words(text, MAX_TTS_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(NewscastError::Speech("Nothing to synthesize".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            let bytes = self.fetch_chunk(chunk, language, idx, chunks.len()).await?;
            debug!(chunk = idx, bytes = bytes.len(), "Fetched speech chunk");
            audio.extend_from_slice(&bytes);
        }

        if audio.is_empty() {
            return Err(NewscastError::Speech("Provider returned no audio".to_string()));
        }

        let path = write_audio_file(&self.output_dir, &audio).await?;
        info!(path = %path.display(), bytes = audio.len(), chunks = chunks.len(), "Wrote speech audio");
        if let Err(e) = prune_audio_files(&self.output_dir, self.max_audio_files).await {
            warn!("Failed to prune old audio files: {}", e);
        }

        Ok(AudioArtifact {
            path,
            bytes: audio.len(),
            language: language.clone(),
            chunks: chunks.len(),
        })
    }

    fn name(&self) -> &str {
        "google-tts"
    }
}

/// Synthesizer used when audio output is disabled.
pub struct NoopSpeechSynthesizer;

#[async_trait]
impl SpeechSynthesizer for NoopSpeechSynthesizer {
    async fn synthesize(&self, _text: &str, _language: &Language) -> Result<AudioArtifact, NewscastError> {
        Err(NewscastError::Speech("Speech synthesis is disabled".to_string()))
    }

    fn name(&self) -> &str {
        "noop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_audio_file_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("audio").join("out");
        let path = write_audio_file(&nested, b"ID3fake").await.unwrap();
        assert!(path.starts_with(&nested));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp3"));
        assert_eq!(std::fs::read(&path).unwrap(), b"ID3fake");
    }

    #[tokio::test]
    async fn test_unique_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_audio_file(dir.path(), b"a").await.unwrap();
        let b = write_audio_file(dir.path(), b"b").await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_prune_keeps_newest_files() {
        let dir = tempfile::tempdir().unwrap();
        let base = std::time::SystemTime::now() - std::time::Duration::from_secs(600);
        let mut paths = Vec::new();
        for i in 0..5u64 {
            let path = write_audio_file(dir.path(), b"x").await.unwrap();
            let file = std::fs::File::options().write(true).open(&path).unwrap();
            file.set_modified(base + std::time::Duration::from_secs(i * 60)).unwrap();
            paths.push(path);
        }
        std::fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

        let removed = prune_audio_files(dir.path(), 2).await.unwrap();

        assert_eq!(removed, 3);
        assert!(paths[..3].iter().all(|p| !p.exists()));
        assert!(paths[3..].iter().all(|p| p.exists()));
        assert!(dir.path().join("notes.txt").exists());
    }

    #[tokio::test]
    async fn test_prune_disabled_with_zero() {
        let dir = tempfile::tempdir().unwrap();
        for _ in 0..3 {
            write_audio_file(dir.path(), b"x").await.unwrap();
        }
        assert_eq!(prune_audio_files(dir.path(), 0).await.unwrap(), 0);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 3);
    }

    #[tokio::test]
    async fn test_noop_synthesizer_fails() {
        let result = NoopSpeechSynthesizer
            .synthesize("नमस्ते", &Language::hindi())
            .await;
        assert!(matches!(result, Err(NewscastError::Speech(_))));
    }

    #[tokio::test]
    async fn test_google_rejects_blank_text() {
        let dir = tempfile::tempdir().unwrap();
        let synth =
            GoogleSpeechSynthesizer::new(&SpeechConfig::default(), dir.path().to_path_buf()).unwrap();
        let result = synth.synthesize("   ", &Language::hindi()).await;
        assert!(matches!(result, Err(NewscastError::Speech(_))));
    }
}
