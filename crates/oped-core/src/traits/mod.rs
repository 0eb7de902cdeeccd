//! Core traits for oped collaborators.

mod classifier;
mod document;

pub use classifier::*;
pub use document::*;
