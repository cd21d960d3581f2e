//! RoBERTa sequence classifier running on Candle

use crate::classifier::{Classifier, RawPrediction};
use crate::config::ClassifierSettings;
use crate::model_loader::{
    create_device, load_model_config, load_tokenizer, load_var_builder, resolve_model_files,
};
use async_trait::async_trait;
use candle_core::{Device, Tensor, D};
use candle_nn::VarBuilder;
use candle_transformers::models::xlm_roberta::{
    Config as RobertaConfig, XLMRobertaForSequenceClassification,
};
use headline_core::{Error, Result};
use tokenizers::Tokenizer;

/// Pretrained RoBERTa sentiment model (e.g. `cardiffnlp/twitter-roberta-base-sentiment`)
pub struct RobertaSentimentClassifier {
    name: String,
    tokenizer: Tokenizer,
    model: XLMRobertaForSequenceClassification,
    device: Device,
    labels: Vec<String>,
}

impl RobertaSentimentClassifier {
    /// Resolve, download if needed, and load the model named by `settings`
    pub fn load(settings: &ClassifierSettings) -> Result<Self> {
        let files = resolve_model_files(settings)?;
        let (config, labels) = load_model_config(&files.config)?;
        let tokenizer = load_tokenizer(&files.tokenizer, settings.max_length)?;
        let device = create_device(settings.device)?;
        let vb = load_var_builder(&files.weights, &device)?;
        let model = load_sequence_model(&vb, labels.len(), &config)?;

        tracing::info!(
            "Loaded {} with {} labels: {:?}",
            settings.repo,
            labels.len(),
            labels
        );

        Ok(Self {
            name: settings.repo.clone(),
            tokenizer,
            model,
            device,
            labels,
        })
    }

    fn input_tensor(&self, values: &[u32], what: &str) -> Result<Tensor> {
        Tensor::new(values, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(|e| Error::classifier(format!("Failed to create {} tensor: {}", what, e)))
    }
}

fn load_sequence_model(
    vb: &VarBuilder,
    num_labels: usize,
    config: &RobertaConfig,
) -> Result<XLMRobertaForSequenceClassification> {
    let mut errors = Vec::new();

    for prefix in ["", "model"] {
        let vb_prefix = if prefix.is_empty() {
            vb.clone()
        } else {
            vb.pp(prefix)
        };

        match XLMRobertaForSequenceClassification::new(num_labels, config, vb_prefix) {
            Ok(model) => return Ok(model),
            Err(e) => errors.push(format!(
                "{}: {}",
                if prefix.is_empty() { "<root>" } else { prefix },
                e
            )),
        }
    }

    Err(Error::classifier(format!(
        "Failed to load RoBERTa sequence model with tried prefixes [{}]",
        errors.join(" | ")
    )))
}

#[async_trait]
impl Classifier for RobertaSentimentClassifier {
    async fn classify(&self, text: &str) -> Result<RawPrediction> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| Error::classifier(format!("Tokenization failed: {}", e)))?;

        let input_ids = self.input_tensor(encoding.get_ids(), "input ids")?;
        let attention_mask = self.input_tensor(encoding.get_attention_mask(), "attention mask")?;
        let token_type_ids = self.input_tensor(encoding.get_type_ids(), "token type ids")?;

        let logits = self
            .model
            .forward(&input_ids, &attention_mask, &token_type_ids)
            .map_err(|e| Error::classifier(format!("Model forward pass failed: {}", e)))?;

        let probs: Vec<f32> = candle_nn::ops::softmax(&logits, D::Minus1)
            .and_then(|p| p.squeeze(0))
            .and_then(|p| p.to_vec1())
            .map_err(|e| Error::classifier(format!("Softmax failed: {}", e)))?;

        let scores = self.labels.iter().cloned().zip(probs).collect();

        RawPrediction::from_scores(scores)
            .ok_or_else(|| Error::classifier("Model produced no class scores"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
