//! Builds the configured classifier backend

use crate::classifier::Classifier;
use crate::config::{ClassifierBackend, ClassifierSettings};
use crate::lexicon::LexiconClassifier;
use crate::remote::RemoteClassifier;
use headline_core::{Error, Result};
use tracing::info;

/// Instantiate the backend selected by `settings.backend`.
///
/// Local model loading (hub download, weight mmap) runs on the blocking pool.
pub async fn build_classifier(settings: &ClassifierSettings) -> Result<Box<dyn Classifier>> {
    info!("Initializing {} classifier", settings.backend);

    let classifier: Box<dyn Classifier> = match settings.backend {
        ClassifierBackend::Local => load_local(settings).await?,
        ClassifierBackend::Remote => Box::new(RemoteClassifier::new(settings)?),
        ClassifierBackend::Lexicon => Box::new(LexiconClassifier::new()?),
    };

    info!("Classifier '{}' ready", classifier.name());
    Ok(classifier)
}

#[cfg(feature = "ml-models")]
async fn load_local(settings: &ClassifierSettings) -> Result<Box<dyn Classifier>> {
    use crate::roberta::RobertaSentimentClassifier;

    let settings = settings.clone();
    let classifier = tokio::task::spawn_blocking(move || RobertaSentimentClassifier::load(&settings))
        .await
        .map_err(|e| Error::classifier(format!("Model loading task failed: {}", e)))??;

    Ok(Box::new(classifier))
}

#[cfg(not(feature = "ml-models"))]
async fn load_local(_settings: &ClassifierSettings) -> Result<Box<dyn Classifier>> {
    Err(Error::config(
        "local classifier backend requires the 'ml-models' feature",
    ))
}
