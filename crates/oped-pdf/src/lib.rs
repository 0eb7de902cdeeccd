//! PDF support for oped: loading source documents, extracting page text
//! and assembling selected pages into a consolidated output file.
//!
//! Everything here is built on [`lopdf`], which keeps page content as raw
//! PDF objects. Consolidation therefore preserves fonts, images and layout
//! exactly; only the page tree is rebuilt.

mod sink;
mod source;

pub use sink::LopdfSink;
pub use source::{LopdfDocument, LopdfSource};
