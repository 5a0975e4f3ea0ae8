//! Candle inference backend for single-label sentiment models.
//!
//! Loads a RoBERTa-family sequence classifier (e.g.
//! `cardiffnlp/twitter-roberta-base-sentiment-latest`) from the HuggingFace Hub
//! and returns the highest-probability label per text.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::{LayerNorm, Module, VarBuilder};
use candle_transformers::models::xlm_roberta::{
    Config as XLMRobertaConfig, XLMRobertaForSequenceClassification,
};
use tokenizers::models::bpe::BPE;
use tokenizers::pre_tokenizers::byte_level::ByteLevel;
use tokenizers::processors::roberta::RobertaProcessing;
use tokenizers::{PaddingParams, PaddingStrategy, Tokenizer, TruncationParams};

/// RoBERTa position embeddings hold 514 slots, two reserved for padding offset.
const MAX_SEQUENCE_TOKENS: usize = 512;

/// Where the tokenizer definition comes from.
#[derive(Debug, Clone)]
pub enum TokenizerFiles {
    /// A serialized `tokenizer.json`.
    Json(PathBuf),
    /// A bare byte-level BPE vocabulary, as shipped by older checkpoints.
    VocabMerges { vocab: PathBuf, merges: PathBuf },
}

/// Checkpoint weights format.
#[derive(Debug, Clone)]
pub enum WeightsFile {
    Safetensors(PathBuf),
    PyTorch(PathBuf),
}

/// Local paths of a classifier checkpoint in the HuggingFace cache.
pub struct ModelFiles {
    pub config_path: PathBuf,
    pub tokenizer: TokenizerFiles,
    pub weights: WeightsFile,
}

/// Fetch config, tokenizer and weights for `repo_id`.
///
/// Prefers `tokenizer.json` and `model.safetensors`, falling back to
/// `vocab.json` + `merges.txt` and `pytorch_model.bin` for checkpoints that
/// only ship those. Blocking (hf-hub sync API); cached files are not downloaded again.
pub fn download_model(repo_id: &str) -> Result<ModelFiles> {
    let api = hf_hub::api::sync::Api::new().context("HuggingFace Hub API unavailable")?;
    let repo = api.model(repo_id.to_string());
    let fetch = |file: &str| {
        repo.get(file)
            .with_context(|| format!("{} has no usable {}", repo_id, file))
    };

    let config_path = fetch("config.json")?;

    let tokenizer = match fetch("tokenizer.json") {
        Ok(path) => TokenizerFiles::Json(path),
        Err(e) => {
            tracing::debug!("{:#}, trying vocab.json and merges.txt", e);
            TokenizerFiles::VocabMerges {
                vocab: fetch("vocab.json")?,
                merges: fetch("merges.txt")?,
            }
        }
    };

    let weights = match fetch("model.safetensors") {
        Ok(path) => WeightsFile::Safetensors(path),
        Err(e) => {
            tracing::debug!("{:#}, trying pytorch_model.bin", e);
            WeightsFile::PyTorch(fetch("pytorch_model.bin")?)
        }
    };

    Ok(ModelFiles {
        config_path,
        tokenizer,
        weights,
    })
}

/// GPU devices compiled into this build, in order of preference.
fn gpu_candidates() -> Vec<(&'static str, Device)> {
    #[allow(unused_mut)]
    let mut candidates = Vec::new();
    #[cfg(target_os = "macos")]
    {
        if let Ok(device) = Device::new_metal(0) {
            candidates.push(("Metal", device));
        }
    }
    #[cfg(feature = "cuda")]
    {
        if let Ok(device) = Device::new_cuda(0) {
            candidates.push(("CUDA", device));
        }
    }
    candidates
}

/// First GPU that can run layer-norm, else CPU.
pub fn select_device() -> Device {
    for (kind, device) in gpu_candidates() {
        if supports_layer_norm(&device) {
            tracing::info!("Sentiment inference on {} GPU", kind);
            return device;
        }
        tracing::warn!("{} GPU lacks layer-norm support, skipping", kind);
    }
    tracing::info!("Sentiment inference on CPU");
    Device::Cpu
}

fn supports_layer_norm(device: &Device) -> bool {
    let run = || -> candle_core::Result<Tensor> {
        let norm = LayerNorm::new(
            Tensor::ones(2, DType::F32, device)?,
            Tensor::zeros(2, DType::F32, device)?,
            1e-5,
        );
        norm.forward(&Tensor::ones((1, 2), DType::F32, device)?)
    };
    run().is_ok()
}

/// Parse `id2label` from a HuggingFace config into an index-ordered label list.
pub fn parse_labels(config_json: &serde_json::Value) -> Result<Vec<String>> {
    let id2label = config_json
        .get("id2label")
        .and_then(|v| v.as_object())
        .context("config.json missing id2label mapping")?;

    let mut entries: Vec<(usize, String)> = id2label
        .iter()
        .filter_map(|(k, v)| {
            let idx: usize = k.parse().ok()?;
            Some((idx, v.as_str()?.to_string()))
        })
        .collect();
    entries.sort_by_key(|(idx, _)| *idx);

    if entries.is_empty() {
        anyhow::bail!("id2label is empty, cannot determine label count");
    }
    Ok(entries.into_iter().map(|(_, label)| label).collect())
}

/// Index and probability of the most likely label, ignoring NaN scores.
pub fn argmax(probs: &[f32]) -> Option<(usize, f32)> {
    probs
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, p)| !p.is_nan())
        .max_by(|a, b| a.1.total_cmp(&b.1))
}

/// Single-label sentiment classifier (softmax over `id2label`).
pub struct SentimentModel {
    model: XLMRobertaForSequenceClassification,
    tokenizer: Tokenizer,
    device: Device,
    labels: Vec<String>,
}

impl SentimentModel {
    pub fn new(files: &ModelFiles, device: Device) -> Result<Self> {
        let raw: serde_json::Value = serde_json::from_str(
            &std::fs::read_to_string(&files.config_path).context("Unreadable config.json")?,
        )
        .context("config.json is not valid JSON")?;
        let labels = parse_labels(&raw)?;
        let config: XLMRobertaConfig =
            serde_json::from_value(raw).context("config.json is not a RoBERTa config")?;

        let tokenizer = load_tokenizer(&files.tokenizer)?;

        let vb = match &files.weights {
            // SAFETY: the safetensors file is memory-mapped and must stay unchanged while loaded.
            WeightsFile::Safetensors(path) => unsafe {
                VarBuilder::from_mmaped_safetensors(&[path], DType::F32, &device)
                    .context("Unreadable model.safetensors")?
            },
            WeightsFile::PyTorch(path) => VarBuilder::from_pth(path, DType::F32, &device)
                .context("Unreadable pytorch_model.bin")?,
        };
        let model = XLMRobertaForSequenceClassification::new(labels.len(), &config, vb)
            .context("Weights do not match a RoBERTa sequence classifier")?;

        Ok(Self {
            model,
            tokenizer,
            device,
            labels,
        })
    }

    /// Token ids and attention mask for `texts`, padded to the longest one.
    fn encode(&self, texts: &[String]) -> Result<(Tensor, Tensor)> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))?;

        let mut ids = Vec::with_capacity(encodings.len());
        let mut masks = Vec::with_capacity(encodings.len());
        for encoding in &encodings {
            ids.push(Tensor::new(encoding.get_ids(), &self.device)?);
            masks.push(Tensor::new(encoding.get_attention_mask(), &self.device)?);
        }
        Ok((Tensor::stack(&ids, 0)?, Tensor::stack(&masks, 0)?))
    }

    /// Most likely label and its probability for each text.
    pub fn predict(&self, texts: &[String]) -> Result<Vec<(String, f32)>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let (input_ids, attention_mask) = self.encode(texts)?;
        // RoBERTa has a single segment type
        let segments = input_ids.zeros_like()?;
        let logits = self.model.forward(&input_ids, &attention_mask, &segments)?;
        let rows = candle_nn::ops::softmax(&logits, 1)?.to_vec2::<f32>()?;

        rows.iter()
            .map(|probs| {
                let (idx, score) = argmax(probs).context("Classifier produced no scores")?;
                let label = self
                    .labels
                    .get(idx)
                    .with_context(|| format!("No label for class {}", idx))?;
                Ok((label.clone(), score))
            })
            .collect()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// Byte-level BPE tokenizer with RoBERTa `<s> ... </s>` framing.
fn bpe_tokenizer(vocab: &Path, merges: &Path) -> Result<Tokenizer> {
    let to_str = |p: &Path| {
        p.to_str()
            .map(str::to_string)
            .with_context(|| format!("Non UTF-8 path {}", p.display()))
    };
    let bpe = BPE::from_file(&to_str(vocab)?, &to_str(merges)?)
        .build()
        .map_err(|e| anyhow::anyhow!("Unreadable vocab.json/merges.txt: {}", e))?;

    let mut tokenizer = Tokenizer::new(bpe);
    let special = |token: &str| {
        tokenizer
            .token_to_id(token)
            .map(|id| (token.to_string(), id))
            .with_context(|| format!("Vocabulary has no {} token", token))
    };
    let (sep, cls) = (special("</s>")?, special("<s>")?);

    tokenizer
        .with_pre_tokenizer(Some(ByteLevel::default()))
        .with_post_processor(Some(RobertaProcessing::new(sep, cls)))
        .with_decoder(Some(ByteLevel::default()));
    Ok(tokenizer)
}

/// Tokenizer padding batches to their longest member and truncating at the model limit.
fn load_tokenizer(files: &TokenizerFiles) -> Result<Tokenizer> {
    let mut tokenizer = match files {
        TokenizerFiles::Json(path) => Tokenizer::from_file(path)
            .map_err(|e| anyhow::anyhow!("Unreadable tokenizer.json: {}", e))?,
        TokenizerFiles::VocabMerges { vocab, merges } => bpe_tokenizer(vocab, merges)?,
    };

    let mut padding = PaddingParams {
        strategy: PaddingStrategy::BatchLongest,
        ..Default::default()
    };
    if let Some(pad_id) = tokenizer.token_to_id("<pad>") {
        padding.pad_id = pad_id;
        padding.pad_token = "<pad>".to_string();
    }
    tokenizer.with_padding(Some(padding));
    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length: MAX_SEQUENCE_TOKENS,
            ..Default::default()
        }))
        .map_err(|e| anyhow::anyhow!("Cannot enable truncation: {}", e))?;
    Ok(tokenizer)
}
