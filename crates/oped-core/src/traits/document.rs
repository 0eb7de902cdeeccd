//! Document source and sink traits.
//!
//! The pipeline never touches a PDF library directly. It opens documents
//! through a [`DocumentSource`], reads page text through [`SourceDocument`],
//! and hands selected pages to a [`PageSink`] which owns the output format.

use std::path::Path;

use crate::error::OpedResult;

/// Opens documents for reading.
pub trait DocumentSource: Send + Sync {
    type Document: SourceDocument;

    /// Open the document at `path`.
    ///
    /// Fails with [`crate::error::OpedError::DocumentOpen`] on a corrupt or
    /// unreadable file; the caller skips the document and continues.
    fn open(&self, path: &Path) -> OpedResult<Self::Document>;
}

/// An opened document that can report pages and extract their text.
pub trait SourceDocument {
    /// Number of pages in the document.
    fn page_count(&self) -> usize;

    /// Extract plain text from the page at the given 0-based index.
    ///
    /// An empty string is a valid result for image-only pages.
    fn extract_page_text(&self, index: usize) -> OpedResult<String>;
}

/// Accumulates selected pages and persists them in append order.
pub trait PageSink<D> {
    /// Queue the given 0-based pages of a consumed source document, in the
    /// order listed.
    fn append_pages(&mut self, document: D, indices: &[usize]) -> OpedResult<()>;

    /// Number of pages queued so far.
    fn page_count(&self) -> usize;

    /// Persist the consolidated document.
    ///
    /// Callers check [`PageSink::page_count`] first; an empty run is
    /// reported as "nothing to write" instead of producing an empty file.
    fn write(&mut self, path: &Path) -> OpedResult<()>;
}
