//! Configuration for classifier backends and model loading

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Which classifier backend to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierBackend {
    /// Candle inference on a locally cached Hugging Face model
    #[default]
    Local,
    /// HTTP inference endpoint
    Remote,
    /// Keyword lexicon, no model weights needed
    Lexicon,
}

impl FromStr for ClassifierBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "remote" => Ok(Self::Remote),
            "lexicon" => Ok(Self::Lexicon),
            other => Err(format!(
                "unknown classifier backend '{other}' (expected local, remote or lexicon)"
            )),
        }
    }
}

impl fmt::Display for ClassifierBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Local => "local",
            Self::Remote => "remote",
            Self::Lexicon => "lexicon",
        })
    }
}

/// Device for local inference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceSpec {
    /// CUDA if available, otherwise CPU
    #[default]
    Auto,
    Cpu,
    Cuda,
    Metal,
}

/// Classifier settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierSettings {
    #[serde(default)]
    pub backend: ClassifierBackend,

    /// Hugging Face repository of the sentiment model
    #[serde(default = "default_repo")]
    pub repo: String,

    #[serde(default = "default_revision")]
    pub revision: String,

    /// Local model directory; skips the hub download when set
    #[serde(default)]
    pub model_dir: Option<PathBuf>,

    #[serde(default)]
    pub device: DeviceSpec,

    /// Maximum tokens per input; longer inputs are truncated
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Inference endpoint for the remote backend
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for the remote backend
    #[serde(default)]
    pub api_token: Option<String>,
}

fn default_repo() -> String {
    "cardiffnlp/twitter-roberta-base-sentiment".to_string()
}

fn default_revision() -> String {
    "main".to_string()
}

fn default_max_length() -> usize {
    512
}

fn default_endpoint() -> String {
    format!("https://api-inference.huggingface.co/models/{}", default_repo())
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            backend: ClassifierBackend::default(),
            repo: default_repo(),
            revision: default_revision(),
            model_dir: None,
            device: DeviceSpec::default(),
            max_length: default_max_length(),
            endpoint: default_endpoint(),
            api_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_yaml() {
        let settings: ClassifierSettings = serde_yaml::from_str("{}").unwrap();
        assert_eq!(settings.backend, ClassifierBackend::Local);
        assert_eq!(settings.repo, "cardiffnlp/twitter-roberta-base-sentiment");
        assert_eq!(settings.device, DeviceSpec::Auto);
        assert_eq!(settings.max_length, 512);
        assert!(settings.endpoint.ends_with(&settings.repo));
    }

    #[test]
    fn test_parse_settings() {
        let yaml = r#"
backend: remote
endpoint: "http://localhost:9000/classify"
api_token: "hf_test"
device: cpu
"#;
        let settings: ClassifierSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.backend, ClassifierBackend::Remote);
        assert_eq!(settings.endpoint, "http://localhost:9000/classify");
        assert_eq!(settings.api_token.as_deref(), Some("hf_test"));
        assert_eq!(settings.device, DeviceSpec::Cpu);
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("LEXICON".parse::<ClassifierBackend>().unwrap(), ClassifierBackend::Lexicon);
        assert!("onnx".parse::<ClassifierBackend>().is_err());
    }
}
