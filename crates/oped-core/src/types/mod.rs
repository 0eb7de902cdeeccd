//! Core types for oped.

mod page;
mod summary;

pub use page::*;
pub use summary::*;
