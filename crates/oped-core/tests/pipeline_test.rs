//! Integration tests for the consolidation pipeline.
//!
//! In-memory fakes stand in for the document source, the page sink, and the
//! remote classifier, so the ordering, fallback, and summary contracts can
//! be checked without a PDF library or the network.

use async_trait::async_trait;
use oped_core::{
    Consolidator, DocumentSource, Judgment, KeywordMatcher, OpedError, OpedResult, PagePolicy,
    PageSink, RemoteClassifier, SourceDocument,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory document: a file name plus one text per page.
#[derive(Clone)]
struct FakeDocument {
    name: String,
    pages: Vec<String>,
}

impl FakeDocument {
    fn new(name: &str, pages: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            pages,
        }
    }
}

impl SourceDocument for FakeDocument {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn extract_page_text(&self, index: usize) -> OpedResult<String> {
        self.pages
            .get(index)
            .cloned()
            .ok_or_else(|| OpedError::page_extraction(index, "page out of range"))
    }
}

/// Source serving fixed documents by file name; unknown names fail to open.
struct FakeSource {
    documents: HashMap<String, FakeDocument>,
}

impl FakeSource {
    fn new(documents: Vec<FakeDocument>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|d| (d.name.clone(), d))
                .collect(),
        }
    }
}

impl DocumentSource for FakeSource {
    type Document = FakeDocument;

    fn open(&self, path: &Path) -> OpedResult<FakeDocument> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.documents
            .get(&name)
            .cloned()
            .ok_or_else(|| OpedError::document_open(path, "unreadable file"))
    }
}

/// Sink recording appended pages as (document name, page index) pairs.
#[derive(Default)]
struct RecordingSink {
    appended: Vec<(String, usize)>,
    written_to: Option<PathBuf>,
}

impl PageSink<FakeDocument> for RecordingSink {
    fn append_pages(&mut self, document: FakeDocument, indices: &[usize]) -> OpedResult<()> {
        for &index in indices {
            self.appended.push((document.name.clone(), index));
        }
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.appended.len()
    }

    fn write(&mut self, path: &Path) -> OpedResult<()> {
        self.written_to = Some(path.to_path_buf());
        Ok(())
    }
}

/// Classifier scripted by a closure over the page text; counts calls.
struct ScriptedClassifier {
    respond: Box<dyn Fn(&str) -> OpedResult<Judgment> + Send + Sync>,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    fn new(respond: impl Fn(&str) -> OpedResult<Judgment> + Send + Sync + 'static) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RemoteClassifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> OpedResult<Judgment> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        (self.respond)(text)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Pad `prefix` with keyword-free filler up to `len` chars.
fn text_of_len(prefix: &str, len: usize) -> String {
    let mut text = String::from(prefix);
    while text.chars().count() < len {
        text.push_str(" municipal council budget report continues");
    }
    text.chars().take(len).collect()
}

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

/// Output order equals sorted-document, ascending-page order restricted to
/// selected pages, regardless of the input order given.
#[tokio::test]
async fn test_output_order_is_sorted_documents_then_page_index() {
    let source = FakeSource::new(vec![
        FakeDocument::new(
            "A.pdf",
            vec![
                text_of_len("County fair schedule and vendor map.", 120),
                text_of_len("Our view on the new transit plan.", 120),
            ],
        ),
        FakeDocument::new(
            "B.pdf",
            vec![text_of_len("Opinion: schools deserve better funding.", 120)],
        ),
    ]);

    // Positive only for A's second page; B's page relies on the keyword
    // fallback after an explicit negative.
    let classifier = ScriptedClassifier::new(|text| {
        if text.contains("Our view") {
            Ok(Judgment::editorial("editorial voice"))
        } else {
            Ok(Judgment::not_editorial("straight news"))
        }
    });

    let policy = PagePolicy::new(classifier, KeywordMatcher::default());
    let mut consolidator = Consolidator::new(source, RecordingSink::default(), policy);

    let summary = consolidator
        .run(&paths(&["B.pdf", "A.pdf"]), Path::new("out.pdf"))
        .await
        .unwrap();

    assert_eq!(
        consolidator.sink().appended,
        vec![("A.pdf".to_string(), 1), ("B.pdf".to_string(), 0)]
    );
    assert_eq!(summary.pages_seen, 3);
    assert_eq!(summary.pages_selected, 2);
}

/// Two runs over unchanged input select the same pages in the same order.
#[tokio::test]
async fn test_repeated_runs_are_idempotent() {
    let documents = vec![
        FakeDocument::new(
            "jan.pdf",
            vec![
                text_of_len("Letters to the Editor: on parking.", 200),
                text_of_len("Box scores from the weekend.", 200),
            ],
        ),
        FakeDocument::new(
            "feb.pdf",
            vec![text_of_len("An editorial on water rights.", 200)],
        ),
    ];

    let mut runs = Vec::new();
    for _ in 0..2 {
        let classifier =
            ScriptedClassifier::new(|_| Ok(Judgment::not_editorial("deterministic negative")));
        let policy = PagePolicy::new(classifier, KeywordMatcher::default());
        let mut consolidator = Consolidator::new(
            FakeSource::new(documents.clone()),
            RecordingSink::default(),
            policy,
        );

        let summary = consolidator
            .run(&paths(&["jan.pdf", "feb.pdf"]), Path::new("out.pdf"))
            .await
            .unwrap();

        runs.push((consolidator.sink().appended.clone(), summary.pages_selected));
    }

    assert_eq!(runs[0], runs[1]);
    assert_eq!(
        runs[0].0,
        vec![("feb.pdf".to_string(), 0), ("jan.pdf".to_string(), 0)]
    );
}

/// One document, three pages: a sparse ads page, a letters page whose remote
/// calls all fail, and a page the model marks editorial.
#[tokio::test]
async fn test_three_page_scenario() {
    let source = FakeSource::new(vec![FakeDocument::new(
        "paper.pdf",
        vec![
            text_of_len("advertisement page", 20),
            text_of_len("Letters to the Editor: readers respond.", 500),
            text_of_len("A quiet case for more park benches.", 300),
        ],
    )]);

    let classifier = ScriptedClassifier::new(|text| {
        if text.contains("Letters to the Editor") {
            Err(OpedError::transport("connect timeout"))
        } else {
            Ok(Judgment::editorial("persuasive essay"))
        }
    });

    let policy = PagePolicy::new(classifier.clone(), KeywordMatcher::default());
    let mut consolidator = Consolidator::new(source, RecordingSink::default(), policy);

    let summary = consolidator
        .run(&paths(&["paper.pdf"]), Path::new("consolidated.pdf"))
        .await
        .unwrap();

    assert_eq!(
        consolidator.sink().appended,
        vec![("paper.pdf".to_string(), 1), ("paper.pdf".to_string(), 2)]
    );
    assert_eq!(
        consolidator.sink().written_to.as_deref(),
        Some(Path::new("consolidated.pdf"))
    );
    assert_eq!(summary.pages_seen, 3);
    assert_eq!(summary.pages_selected, 2);
    assert_eq!(summary.opinion, 1);
    assert_eq!(summary.editorial, 1);
    // The sparse first page never reached the remote classifier.
    assert_eq!(classifier.calls(), 2);
}

/// A document that fails to open is skipped; the rest of the batch runs.
#[tokio::test]
async fn test_unreadable_document_is_skipped() {
    let source = FakeSource::new(vec![FakeDocument::new(
        "good.pdf",
        vec![text_of_len("Opinion: on the harbor cleanup.", 120)],
    )]);

    let classifier = ScriptedClassifier::new(|_| Err(OpedError::transport("offline")));
    let policy = PagePolicy::new(classifier, KeywordMatcher::default());
    let mut consolidator = Consolidator::new(source, RecordingSink::default(), policy);

    let summary = consolidator
        .run(&paths(&["broken.pdf", "good.pdf"]), Path::new("out.pdf"))
        .await
        .unwrap();

    assert_eq!(summary.documents.len(), 2);
    assert_eq!(summary.documents_skipped(), 1);
    assert!(summary.documents[0].skipped);
    assert_eq!(summary.documents[1].pages_selected, 1);
    assert_eq!(
        consolidator.sink().appended,
        vec![("good.pdf".to_string(), 0)]
    );
}

/// When nothing is selected, the sink is never asked to write.
#[tokio::test]
async fn test_empty_selection_writes_nothing() {
    let source = FakeSource::new(vec![FakeDocument::new(
        "news.pdf",
        vec![text_of_len("Traffic report and lottery numbers.", 120)],
    )]);

    let classifier = ScriptedClassifier::new(|_| Ok(Judgment::not_editorial("not opinion")));
    let policy = PagePolicy::new(classifier, KeywordMatcher::default());
    let mut consolidator = Consolidator::new(source, RecordingSink::default(), policy);

    let summary = consolidator
        .run(&paths(&["news.pdf"]), Path::new("out.pdf"))
        .await
        .unwrap();

    assert_eq!(summary.pages_selected, 0);
    assert_eq!(consolidator.sink().page_count(), 0);
    assert!(consolidator.sink().written_to.is_none());
}
