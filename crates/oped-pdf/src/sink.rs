//! Assembles selected pages from many PDFs into one output document.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};
use oped_core::error::{OpedError, OpedResult};
use oped_core::traits::PageSink;
use tracing::debug;

use crate::source::LopdfDocument;

/// Page attributes that may live on an ancestor node instead of the page itself.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on parent-chain walks so a cyclic page tree cannot hang us.
const MAX_TREE_DEPTH: usize = 64;

/// Collects pages from source documents and writes them out as a single PDF.
///
/// Incoming documents are renumbered into a shared object space, so pages keep
/// their content streams, fonts and annotations without any id collisions. The
/// original page tree of each source is discarded; the output gets a fresh
/// catalog with one flat `Pages` node.
#[derive(Default)]
pub struct LopdfSink {
    max_id: u32,
    objects: BTreeMap<ObjectId, Object>,
    pages: Vec<(ObjectId, Dictionary)>,
}

impl LopdfSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PageSink<LopdfDocument> for LopdfSink {
    fn append_pages(&mut self, document: LopdfDocument, indices: &[usize]) -> OpedResult<()> {
        let mut doc = document.into_document();

        doc.renumber_objects_with(self.max_id + 1);
        self.max_id = doc.max_id;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();

        let mut staged = Vec::with_capacity(indices.len());
        for &index in indices {
            let page_id = *page_ids
                .get(index)
                .ok_or_else(|| OpedError::page_extraction(index, "page index out of range"))?;
            let dict = resolved_page_dict(&doc, page_id, index)?;
            staged.push((page_id, dict));
        }

        let structural = structural_ids(&doc, &page_ids);
        for (id, object) in doc.objects {
            if !structural.contains(&id) {
                self.objects.insert(id, object);
            }
        }
        self.pages.extend(staged);
        debug!(
            "Queued {} pages, object pool at {} entries",
            indices.len(),
            self.objects.len()
        );
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn write(&mut self, path: &Path) -> OpedResult<()> {
        if self.pages.is_empty() {
            return Err(OpedError::output_write(path, "no pages selected"));
        }

        let mut document = Document::with_version("1.5");
        for (id, object) in &self.objects {
            document.objects.insert(*id, object.clone());
        }

        let pages_id: ObjectId = (self.max_id + 1, 0);
        let catalog_id: ObjectId = (self.max_id + 2, 0);

        let kids: Vec<Object> = self
            .pages
            .iter()
            .map(|(id, _)| Object::Reference(*id))
            .collect();
        for (page_id, dict) in &self.pages {
            let mut page = dict.clone();
            page.set("Parent", pages_id);
            document.objects.insert(*page_id, Object::Dictionary(page));
        }

        let pages_dict = dictionary! {
            "Type" => "Pages",
            "Count" => self.pages.len() as i64,
            "Kids" => kids,
        };
        document.objects.insert(pages_id, Object::Dictionary(pages_dict));
        document.objects.insert(
            catalog_id,
            Object::Dictionary(dictionary! {
                "Type" => "Catalog",
                "Pages" => pages_id,
            }),
        );
        document.trailer.set("Root", catalog_id);
        document.max_id = self.max_id + 2;

        document.renumber_objects();
        document.compress();
        document
            .save(path)
            .map_err(|e| OpedError::output_write(path, e.to_string()))?;
        Ok(())
    }
}

/// Clones a page dictionary with inherited attributes copied down onto it.
///
/// The clone is detached from its source page tree, so anything the page used
/// to inherit must be materialized before the `Parent` entry is dropped.
fn resolved_page_dict(doc: &Document, page_id: ObjectId, index: usize) -> OpedResult<Dictionary> {
    let page = doc
        .get_object(page_id)
        .ok()
        .and_then(|object| object.as_dict().ok())
        .ok_or_else(|| OpedError::page_extraction(index, "page object is not a dictionary"))?;

    let mut dict = page.clone();
    for key in INHERITABLE_KEYS {
        if dict.get(key).is_err() {
            if let Some(value) = inherited_attribute(doc, page_id, key) {
                dict.set(key, value);
            }
        }
    }
    dict.remove(b"Parent");
    Ok(dict)
}

/// Walks up the page tree looking for an attribute the page did not carry itself.
fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut current = parent_of(doc, page_id)?;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_object(current).ok()?.as_dict().ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value.clone());
        }
        current = dict.get(b"Parent").ok()?.as_reference().ok()?;
    }
    None
}

fn parent_of(doc: &Document, id: ObjectId) -> Option<ObjectId> {
    doc.get_object(id)
        .ok()?
        .as_dict()
        .ok()?
        .get(b"Parent")
        .ok()?
        .as_reference()
        .ok()
}

/// Ids belonging to the source's page tree skeleton rather than page content.
///
/// The output document grows its own catalog and `Pages` node, so the source's
/// versions must not leak into the shared object pool. Page dictionaries are
/// structural too: the resolved clones are inserted separately at write time.
fn structural_ids(doc: &Document, page_ids: &[ObjectId]) -> BTreeSet<ObjectId> {
    let mut structural: BTreeSet<ObjectId> = page_ids.iter().copied().collect();
    for &page_id in page_ids {
        let mut current = page_id;
        for _ in 0..MAX_TREE_DEPTH {
            match parent_of(doc, current) {
                Some(parent) => {
                    if !structural.insert(parent) {
                        break;
                    }
                    current = parent;
                }
                None => break,
            }
        }
    }
    if let Ok(root) = doc.trailer.get(b"Root").and_then(|object| object.as_reference()) {
        structural.insert(root);
    }
    structural
}
