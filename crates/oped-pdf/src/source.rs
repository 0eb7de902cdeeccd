//! PDF-backed document source built on `lopdf`.

use std::path::Path;

use lopdf::{Document, ObjectId};
use oped_core::error::{OpedError, OpedResult};
use oped_core::traits::{DocumentSource, SourceDocument};
use tracing::debug;

/// Opens PDF files from disk and hands out page-level access.
#[derive(Debug, Clone, Default)]
pub struct LopdfSource;

impl LopdfSource {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentSource for LopdfSource {
    type Document = LopdfDocument;

    fn open(&self, path: &Path) -> OpedResult<Self::Document> {
        let mut document = Document::load(path)
            .map_err(|e| OpedError::document_open(path, e.to_string()))?;

        if document.is_encrypted() {
            // Try the empty owner password; anything stronger is unreadable for us.
            document
                .decrypt("")
                .map_err(|_| OpedError::document_open(path, "document is encrypted"))?;
        }

        let pages: Vec<(u32, ObjectId)> = document.get_pages().into_iter().collect();
        debug!("Loaded {} with {} pages", path.display(), pages.len());
        Ok(LopdfDocument { document, pages })
    }
}

/// A loaded PDF with its page tree flattened into reading order.
pub struct LopdfDocument {
    document: Document,
    pages: Vec<(u32, ObjectId)>,
}

impl LopdfDocument {
    pub(crate) fn into_document(self) -> Document {
        self.document
    }
}

impl SourceDocument for LopdfDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_page_text(&self, index: usize) -> OpedResult<String> {
        let (page_number, _) = self
            .pages
            .get(index)
            .copied()
            .ok_or_else(|| OpedError::page_extraction(index, "page index out of range"))?;

        self.document
            .extract_text(&[page_number])
            .map_err(|e| OpedError::page_extraction(index, e.to_string()))
    }
}
