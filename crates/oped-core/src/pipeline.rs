//! The consolidation pipeline.
//!
//! Drives the whole run: documents in sorted order, pages in index order,
//! one verdict per page, selected pages into the sink, counters into the
//! summary. Partial failure never aborts the batch; only an output-write
//! failure propagates.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::classify::PagePolicy;
use crate::error::OpedResult;
use crate::extract::page_texts;
use crate::traits::{DocumentSource, PageSink};
use crate::types::{DocumentSummary, RunSummary};

/// Runs the scan-classify-consolidate flow over a set of documents.
pub struct Consolidator<S, K> {
    source: S,
    sink: K,
    policy: PagePolicy,
}

impl<S, K> Consolidator<S, K>
where
    S: DocumentSource,
    K: PageSink<S::Document>,
{
    pub fn new(source: S, sink: K, policy: PagePolicy) -> Self {
        Self {
            source,
            sink,
            policy,
        }
    }

    /// Classify every page of every input document and write the selected
    /// pages to `output`.
    ///
    /// Documents are processed in lexicographic path order regardless of the
    /// order given, so repeated runs over the same input produce the same
    /// output. A document that fails to open is recorded as skipped and the
    /// run continues.
    pub async fn run(&mut self, inputs: &[PathBuf], output: &Path) -> OpedResult<RunSummary> {
        let mut inputs = inputs.to_vec();
        inputs.sort();

        let mut summary = RunSummary::default();

        for path in &inputs {
            let name = display_name(path);
            info!("Processing {}", name);

            let document = match self.source.open(path) {
                Ok(document) => document,
                Err(e) => {
                    warn!("Skipping {}: {}", name, e);
                    summary.documents.push(DocumentSummary::skipped(name));
                    continue;
                }
            };

            let mut doc_summary = DocumentSummary::new(&name);
            let mut selected = Vec::new();

            for page in page_texts(&document) {
                let verdict = self.policy.label_page(&page).await;
                info!("Page {}: {}", page.index + 1, verdict.label);

                doc_summary.pages_seen += 1;
                if verdict.label.is_selected() {
                    selected.push(page.index);
                    doc_summary.pages_selected += 1;
                }
                summary.record(verdict.label);
            }

            if !selected.is_empty() {
                if let Err(e) = self.sink.append_pages(document, &selected) {
                    warn!("Could not copy selected pages from {}: {}", name, e);
                }
            }
            summary.documents.push(doc_summary);
        }

        if self.sink.page_count() > 0 {
            self.sink.write(output)?;
            info!(
                "Wrote {} pages to {}",
                self.sink.page_count(),
                output.display()
            );
        } else {
            info!("No editorial or opinion pages found");
        }

        Ok(summary)
    }

    /// The sink holding the accumulated output pages.
    pub fn sink(&self) -> &K {
        &self.sink
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
