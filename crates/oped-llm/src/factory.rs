//! Factory for creating remote classifiers.

use std::sync::Arc;

use oped_core::error::OpedResult;
use oped_core::traits::{ClassifierConfig, RemoteClassifier};

use crate::gemini::GeminiClassifier;

/// Factory for creating remote classifiers.
pub struct ClassifierFactory;

impl ClassifierFactory {
    /// Create a classifier from the given configuration.
    pub fn create(config: ClassifierConfig) -> OpedResult<Arc<dyn RemoteClassifier>> {
        let classifier = GeminiClassifier::new(config)?;
        Ok(Arc::new(classifier))
    }

    /// Create a classifier for a specific model with default settings.
    pub fn with_model(model: impl Into<String>) -> OpedResult<Arc<dyn RemoteClassifier>> {
        let config = ClassifierConfig {
            model: model.into(),
            ..Default::default()
        };
        Self::create(config)
    }
}
