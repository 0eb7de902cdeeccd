//! Page text extraction over an opened document.

use tracing::warn;

use crate::traits::SourceDocument;
use crate::types::Page;

/// Yield every page of a document as a [`Page`] record, in ascending index
/// order.
///
/// A page whose extraction errors is logged and yielded with empty text, so
/// it degrades to sparse-page handling instead of aborting the document.
/// Calling this again restarts from the first page.
pub fn page_texts<D: SourceDocument>(document: &D) -> impl Iterator<Item = Page> + '_ {
    (0..document.page_count()).map(move |index| match document.extract_page_text(index) {
        Ok(text) => Page::new(index, text),
        Err(e) => {
            warn!(
                "Text extraction failed on page {}, treating as empty: {}",
                index + 1,
                e
            );
            Page::new(index, "")
        }
    })
}
