//! Configuration system for oped.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::classify::DEFAULT_KEYWORDS;
use crate::traits::ClassifierConfig;

/// Default name of the consolidated output file.
pub const DEFAULT_OUTPUT: &str = "Consolidated_Editorial_and_Opinion_Pages.pdf";

/// Default stripped-text length below which the remote classifier is skipped.
pub const DEFAULT_SPARSE_THRESHOLD: usize = 40;

/// Main run configuration.
///
/// Assembled by the CLI from flags and environment variables; every field
/// here is overridable without code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory scanned for PDF documents.
    pub input_dir: PathBuf,
    /// Path of the consolidated output PDF.
    pub output: PathBuf,
    /// Remote classifier configuration.
    pub classifier: ClassifierConfig,
    /// Stripped-text length below which the remote classifier is skipped.
    pub sparse_threshold: usize,
    /// Optional hard floor: pages with less stripped text are dropped
    /// outright, with no keyword check. Off by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_text_length: Option<usize>,
    /// Fallback keyword list.
    pub keywords: Vec<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT),
            classifier: ClassifierConfig::default(),
            sparse_threshold: DEFAULT_SPARSE_THRESHOLD,
            min_text_length: None,
            keywords: DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
