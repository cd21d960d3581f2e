//! Hosted inference endpoint backend
//!
//! Speaks the Hugging Face inference API text-classification protocol:
//! `POST {"inputs": "<text>"}` answered by a list of `{label, score}` pairs,
//! either flat or nested one level per input.

use crate::classifier::{Classifier, RawPrediction};
use crate::config::ClassifierSettings;
use async_trait::async_trait;
use headline_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InferenceResponse {
    Nested(Vec<Vec<LabelScore>>),
    Flat(Vec<LabelScore>),
}

impl InferenceResponse {
    fn into_scores(self) -> Vec<(String, f32)> {
        let scores = match self {
            Self::Nested(mut batches) if !batches.is_empty() => batches.swap_remove(0),
            Self::Nested(_) => Vec::new(),
            Self::Flat(scores) => scores,
        };
        scores.into_iter().map(|s| (s.label, s.score)).collect()
    }
}

pub struct RemoteClassifier {
    name: String,
    endpoint: String,
    api_token: Option<String>,
    http_client: reqwest::Client,
}

impl RemoteClassifier {
    pub fn new(settings: &ClassifierSettings) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            name: settings.repo.clone(),
            endpoint: settings.endpoint.clone(),
            api_token: settings.api_token.clone(),
            http_client,
        })
    }
}

#[async_trait]
impl Classifier for RemoteClassifier {
    async fn classify(&self, text: &str) -> Result<RawPrediction> {
        let mut request = self
            .http_client
            .post(&self.endpoint)
            .json(&InferenceRequest { inputs: text });
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::classifier(format!("Inference request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::classifier(format!(
                "Inference endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: InferenceResponse = response
            .json()
            .await
            .map_err(|e| Error::classifier(format!("Malformed inference response: {}", e)))?;

        RawPrediction::from_scores(parsed.into_scores())
            .ok_or_else(|| Error::classifier("Inference endpoint returned no class scores"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
