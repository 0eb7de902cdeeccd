//! Run summary types.

use serde::{Deserialize, Serialize};

use crate::types::PageLabel;

/// Per-document outcome counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentSummary {
    /// File name of the source document.
    pub name: String,
    /// Pages that received a verdict.
    pub pages_seen: usize,
    /// Pages selected for the consolidated output.
    pub pages_selected: usize,
    /// True when the document could not be opened and was skipped.
    pub skipped: bool,
}

impl DocumentSummary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            skipped: true,
            ..Default::default()
        }
    }
}

/// Aggregate counters for one consolidation run.
///
/// Counters are bumped exactly once per page, after its verdict is final.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub pages_seen: usize,
    pub pages_selected: usize,
    pub editorial: usize,
    pub opinion: usize,
    pub documents: Vec<DocumentSummary>,
}

impl RunSummary {
    /// Record a final verdict label for one page.
    pub fn record(&mut self, label: PageLabel) {
        self.pages_seen += 1;
        match label {
            PageLabel::Editorial => {
                self.pages_selected += 1;
                self.editorial += 1;
            }
            PageLabel::Opinion => {
                self.pages_selected += 1;
                self.opinion += 1;
            }
            PageLabel::Other => {}
        }
    }

    /// Number of documents that failed to open.
    pub fn documents_skipped(&self) -> usize {
        self.documents.iter().filter(|d| d.skipped).count()
    }
}
