//! Headline Classifiers
//!
//! Sentiment classifier backends for headline text.
//!
//! Backends produce the model's raw label code with a confidence score:
//! - `local`: Candle inference on a Hugging Face RoBERTa checkpoint (feature `ml-models`)
//! - `remote`: a hosted text-classification endpoint
//! - `lexicon`: an offline keyword matcher
//!
//! [`SentimentAdapter`] maps the raw codes through a fixed [`LabelMap`].

pub mod classifier;
pub mod config;
pub mod labels;
pub mod lexicon;
#[cfg(feature = "ml-models")]
pub mod model_loader;
pub mod registry;
pub mod remote;
#[cfg(feature = "ml-models")]
pub mod roberta;

pub use classifier::{Classifier, RawPrediction};
pub use config::{ClassifierBackend, ClassifierSettings, DeviceSpec};
pub use labels::{LabelMap, SentimentAdapter, SentimentScore};
pub use lexicon::LexiconClassifier;
pub use registry::build_classifier;
pub use remote::RemoteClassifier;
#[cfg(feature = "ml-models")]
pub use roberta::RobertaSentimentClassifier;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::classifier::{Classifier, RawPrediction};
    pub use crate::config::ClassifierSettings;
    pub use crate::labels::{LabelMap, SentimentAdapter, SentimentScore};
}
