//! oped-llm - Remote LLM classifier implementations for oped.
//!
//! This crate provides the Gemini-backed page classifier used as the
//! primary signal in the classification policy, plus the prompt and
//! response-parsing helpers it is built from.
//!
//! # Example
//!
//! ```ignore
//! use oped_llm::ClassifierFactory;
//!
//! // API key from GEMINI_API_KEY, model defaulted
//! let classifier = ClassifierFactory::create(Default::default())?;
//!
//! // Or with a specific model
//! let classifier = ClassifierFactory::with_model("gemini-2.5-flash")?;
//! ```

mod factory;
mod gemini;
pub mod prompt;
pub mod response;

pub use factory::ClassifierFactory;
pub use gemini::GeminiClassifier;

// Re-export core types for convenience
pub use oped_core::traits::{ClassifierConfig, RemoteClassifier};
pub use oped_core::types::Judgment;
