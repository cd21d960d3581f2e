//! Model file resolution and loading for Candle-based classifiers

use crate::config::{ClassifierSettings, DeviceSpec};
use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::Config as RobertaConfig;
use headline_core::{Error, Result};
use hf_hub::{api::sync::Api, Repo, RepoType};
use std::path::{Path, PathBuf};
use tokenizers::models::bpe::BPE;
use tokenizers::pre_tokenizers::byte_level::ByteLevel;
use tokenizers::processors::roberta::RobertaProcessing;
use tokenizers::{Tokenizer, TruncationParams};

/// Tokenizer files found for a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerFiles {
    /// Serialized `tokenizer.json`
    Json(PathBuf),
    /// Byte-level BPE vocabulary and merges
    Bpe { vocab: PathBuf, merges: PathBuf },
}

/// Weight file found for a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeightsFile {
    SafeTensors(PathBuf),
    PyTorch(PathBuf),
}

/// All files needed to load a sequence classifier
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: TokenizerFiles,
    pub weights: WeightsFile,
}

/// Resolve model files from `model_dir` or the Hugging Face Hub
pub fn resolve_model_files(settings: &ClassifierSettings) -> Result<ModelFiles> {
    match &settings.model_dir {
        Some(dir) => resolve_local(dir),
        None => download_from_huggingface(&settings.repo, &settings.revision),
    }
}

/// Resolve model files inside a local directory
pub fn resolve_local(dir: &Path) -> Result<ModelFiles> {
    if !dir.is_dir() {
        return Err(Error::config(format!(
            "Model directory not found: {}",
            dir.display()
        )));
    }

    let existing = |name: &str| {
        let path = dir.join(name);
        path.is_file().then_some(path)
    };

    let config = existing("config.json").ok_or_else(|| {
        Error::config(format!("config.json not found in {}", dir.display()))
    })?;

    let tokenizer = match existing("tokenizer.json") {
        Some(path) => TokenizerFiles::Json(path),
        None => match (existing("vocab.json"), existing("merges.txt")) {
            (Some(vocab), Some(merges)) => TokenizerFiles::Bpe { vocab, merges },
            _ => {
                return Err(Error::config(format!(
                    "No tokenizer found in {} (tried tokenizer.json, vocab.json + merges.txt)",
                    dir.display()
                )))
            }
        },
    };

    let weights = match (existing("model.safetensors"), existing("pytorch_model.bin")) {
        (Some(path), _) => WeightsFile::SafeTensors(path),
        (None, Some(path)) => WeightsFile::PyTorch(path),
        (None, None) => {
            return Err(Error::config(format!(
                "No model weights found in {} (tried model.safetensors, pytorch_model.bin)",
                dir.display()
            )))
        }
    };

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

/// Download model files from the Hugging Face Hub into its local cache
fn download_from_huggingface(repo_id: &str, revision: &str) -> Result<ModelFiles> {
    tracing::info!("Fetching model {} @ {} from Hugging Face", repo_id, revision);

    let api = Api::new()
        .map_err(|e| Error::classifier(format!("Failed to initialize HF API: {}", e)))?;
    let repo = api.repo(Repo::with_revision(
        repo_id.to_string(),
        RepoType::Model,
        revision.to_string(),
    ));

    let config = repo
        .get("config.json")
        .map_err(|e| Error::classifier(format!("Failed to download config.json: {}", e)))?;

    let tokenizer = match repo.get("tokenizer.json") {
        Ok(path) => TokenizerFiles::Json(path),
        Err(_) => {
            tracing::debug!("tokenizer.json not published, falling back to vocab.json + merges.txt");
            let vocab = repo
                .get("vocab.json")
                .map_err(|e| Error::classifier(format!("Failed to download vocab.json: {}", e)))?;
            let merges = repo
                .get("merges.txt")
                .map_err(|e| Error::classifier(format!("Failed to download merges.txt: {}", e)))?;
            TokenizerFiles::Bpe { vocab, merges }
        }
    };

    let weights = match repo.get("model.safetensors") {
        Ok(path) => WeightsFile::SafeTensors(path),
        Err(_) => {
            tracing::debug!("model.safetensors not published, falling back to pytorch_model.bin");
            let path = repo.get("pytorch_model.bin").map_err(|e| {
                Error::classifier(format!(
                    "No model weights found (tried model.safetensors, pytorch_model.bin): {}",
                    e
                ))
            })?;
            WeightsFile::PyTorch(path)
        }
    };

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

/// Create the Candle device
pub fn create_device(spec: DeviceSpec) -> Result<Device> {
    match spec {
        DeviceSpec::Cpu => Ok(Device::Cpu),
        DeviceSpec::Cuda => Device::new_cuda(0)
            .map_err(|e| Error::config(format!("Failed to create CUDA device: {}", e))),
        DeviceSpec::Metal => Device::new_metal(0)
            .map_err(|e| Error::config(format!("Failed to create Metal device: {}", e))),
        DeviceSpec::Auto => {
            let device = Device::cuda_if_available(0)
                .map_err(|e| Error::config(format!("Failed to probe CUDA: {}", e)))?;
            if device.is_cpu() {
                tracing::warn!("CUDA not available, running sentiment inference on CPU");
            }
            Ok(device)
        }
    }
}

/// Parse `config.json` into the RoBERTa config and the `id2label` codes
pub fn load_model_config(path: &Path) -> Result<(RobertaConfig, Vec<String>)> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        Error::classifier(format!("Failed to read config {}: {}", path.display(), e))
    })?;
    let mut value: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
        Error::classifier(format!("Failed to parse config {}: {}", path.display(), e))
    })?;

    // Older RoBERTa exports omit this key
    if let Some(obj) = value.as_object_mut() {
        obj.entry("position_embedding_type")
            .or_insert_with(|| serde_json::Value::String("absolute".to_string()));
    }

    let labels = id2label(&value);
    let config: RobertaConfig = serde_json::from_value(value).map_err(|e| {
        Error::classifier(format!("Unsupported model config {}: {}", path.display(), e))
    })?;

    Ok((config, labels))
}

/// Label codes indexed by class id.
///
/// Gaps and a missing `id2label` fall back to `LABEL_<i>`.
pub fn id2label(config: &serde_json::Value) -> Vec<String> {
    let entries: Vec<(usize, String)> = config
        .get("id2label")
        .and_then(|v| v.as_object())
        .map(|map| {
            map.iter()
                .filter_map(|(id, label)| {
                    Some((id.parse::<usize>().ok()?, label.as_str()?.to_string()))
                })
                .collect()
        })
        .unwrap_or_default();

    let num_labels = entries
        .iter()
        .map(|(id, _)| id + 1)
        .max()
        .or_else(|| {
            config
                .get("num_labels")
                .and_then(|v| v.as_u64())
                .map(|n| n as usize)
        })
        .unwrap_or(3);

    let mut labels: Vec<String> = (0..num_labels).map(|i| format!("LABEL_{}", i)).collect();
    for (id, label) in entries {
        labels[id] = label;
    }
    labels
}

/// Load the tokenizer with truncation at `max_length` tokens
pub fn load_tokenizer(files: &TokenizerFiles, max_length: usize) -> Result<Tokenizer> {
    let mut tokenizer = match files {
        TokenizerFiles::Json(path) => {
            tracing::debug!("Loading tokenizer from {}", path.display());
            Tokenizer::from_file(path)
                .map_err(|e| Error::classifier(format!("Failed to load tokenizer.json: {}", e)))?
        }
        TokenizerFiles::Bpe { vocab, merges } => {
            tracing::debug!("Building byte-level BPE tokenizer from {}", vocab.display());
            let bpe = BPE::from_file(&vocab.to_string_lossy(), &merges.to_string_lossy())
                .build()
                .map_err(|e| Error::classifier(format!("Failed to build BPE model: {}", e)))?;

            let mut tokenizer = Tokenizer::new(bpe);
            let special = |token: &str| {
                tokenizer
                    .token_to_id(token)
                    .map(|id| (token.to_string(), id))
                    .ok_or_else(|| Error::classifier(format!("Vocabulary has no {} token", token)))
            };
            let cls = special("<s>")?;
            let sep = special("</s>")?;

            tokenizer.with_pre_tokenizer(Some(ByteLevel::new(false, true, true)));
            tokenizer.with_post_processor(Some(RobertaProcessing::new(sep, cls)));
            tokenizer
        }
    };

    tokenizer
        .with_truncation(Some(TruncationParams {
            max_length,
            ..Default::default()
        }))
        .map_err(|e| Error::classifier(format!("Failed to configure truncation: {}", e)))?;

    Ok(tokenizer)
}

/// Load weights into a VarBuilder
pub fn load_var_builder(weights: &WeightsFile, device: &Device) -> Result<VarBuilder<'static>> {
    match weights {
        WeightsFile::SafeTensors(path) => unsafe {
            VarBuilder::from_mmaped_safetensors(&[path], DType::F32, device)
                .map_err(|e| Error::classifier(format!("Failed to load SafeTensors: {}", e)))
        },
        WeightsFile::PyTorch(path) => VarBuilder::from_pth(path, DType::F32, device)
            .map_err(|e| Error::classifier(format!("Failed to load PyTorch weights: {}", e))),
    }
}
