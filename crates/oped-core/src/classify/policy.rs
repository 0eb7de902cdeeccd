//! Per-page classification policy.
//!
//! Decides each page in two stages: a sparse-text gate that skips the remote
//! classifier entirely, then the remote call with a keyword fallback on any
//! negative or failed outcome. The asymmetry is recall-biased: a model false
//! negative or a transient API failure must not drop a page that carries an
//! unambiguous section keyword.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::classify::KeywordMatcher;
use crate::traits::RemoteClassifier;
use crate::types::{Page, PageLabel, Verdict, VerdictSource};

/// Labels pages using the remote classifier with keyword fallback.
pub struct PagePolicy {
    classifier: Arc<dyn RemoteClassifier>,
    keywords: KeywordMatcher,
    sparse_threshold: usize,
    min_text_length: Option<usize>,
}

impl PagePolicy {
    pub fn new(classifier: Arc<dyn RemoteClassifier>, keywords: KeywordMatcher) -> Self {
        Self {
            classifier,
            keywords,
            sparse_threshold: 40,
            min_text_length: None,
        }
    }

    /// Builder: set the stripped-text length below which the remote
    /// classifier is skipped.
    pub fn with_sparse_threshold(mut self, threshold: usize) -> Self {
        self.sparse_threshold = threshold;
        self
    }

    /// Builder: drop pages shorter than this outright, with no keyword
    /// check. Off by default.
    pub fn with_min_text_length(mut self, min: Option<usize>) -> Self {
        self.min_text_length = min;
        self
    }

    /// Produce the single verdict for a page. Infallible: every failure in
    /// the remote path is absorbed into the keyword fallback.
    pub async fn label_page(&self, page: &Page) -> Verdict {
        let stripped_len = page.stripped_len();

        if let Some(min) = self.min_text_length {
            if stripped_len < min {
                debug!("Page {} below minimum length ({} chars), dropped", page.index + 1, stripped_len);
                return Verdict::new(PageLabel::Other, VerdictSource::MinLength);
            }
        }

        if stripped_len < self.sparse_threshold {
            // Too little text for the model; keywords still count.
            return match self.keywords.find_match(&page.text) {
                Some(kw) => Verdict::new(PageLabel::Opinion, VerdictSource::SparseKeyword)
                    .with_rationale(kw),
                None => Verdict::new(PageLabel::Other, VerdictSource::SparseKeyword),
            };
        }

        match self.classifier.classify(&page.text).await {
            Ok(judgment) if judgment.is_editorial => {
                let verdict = Verdict::new(PageLabel::Editorial, VerdictSource::Llm);
                match judgment.reason {
                    Some(reason) => verdict.with_rationale(reason),
                    None => verdict,
                }
            }
            Ok(_) => self.keyword_fallback(&page.text),
            Err(e) => {
                warn!(
                    "Remote classification failed on page {}, using keyword fallback: {}",
                    page.index + 1,
                    e
                );
                self.keyword_fallback(&page.text)
            }
        }
    }

    /// Keyword decision over the full original text, not the truncated
    /// prompt text.
    fn keyword_fallback(&self, text: &str) -> Verdict {
        match self.keywords.find_match(text) {
            Some(kw) => Verdict::new(PageLabel::Opinion, VerdictSource::Keyword).with_rationale(kw),
            None => Verdict::new(PageLabel::Other, VerdictSource::Keyword),
        }
    }
}
