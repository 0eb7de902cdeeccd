//! oped-core - Core library for oped.
//!
//! This crate provides the traits, types, classification policy, and
//! consolidation pipeline for extracting the editorial/opinion pages out of
//! newspaper PDFs. Concrete PDF and LLM backends live in their own crates
//! and plug in through the traits defined here.
//!
//! # Example
//!
//! ```ignore
//! use oped_core::{Consolidator, KeywordMatcher, PagePolicy};
//!
//! let policy = PagePolicy::new(classifier, KeywordMatcher::default())
//!     .with_sparse_threshold(40);
//! let mut consolidator = Consolidator::new(source, sink, policy);
//!
//! let summary = consolidator.run(&inputs, &output).await?;
//! println!("{} of {} pages selected", summary.pages_selected, summary.pages_seen);
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod retry;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use classify::{KeywordMatcher, PagePolicy, DEFAULT_KEYWORDS};
pub use config::RunConfig;
pub use error::{OpedError, OpedResult};
pub use pipeline::Consolidator;
pub use retry::RetryPolicy;
pub use traits::{ClassifierConfig, DocumentSource, PageSink, RemoteClassifier, SourceDocument};
pub use types::{
    DocumentSummary, Judgment, Page, PageLabel, RunSummary, Verdict, VerdictSource,
};
