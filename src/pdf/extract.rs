//! Page-range extraction using lopdf

use std::path::{Path, PathBuf};
use lopdf::Document;
use crate::error::{Error, Result};
use super::metadata::reachable_page_count;

/// A loaded source document
///
/// The document is parsed once; each extraction works on a copy.
pub struct SourceDocument {
    doc: Document,
    path: PathBuf,
    page_count: usize,
}

impl SourceDocument {
    /// Load a PDF from disk
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }

        let doc = Document::load(path).map_err(|source| Error::OpenDocument {
            path: path.to_path_buf(),
            source,
        })?;
        let page_count = reachable_page_count(&doc, path);

        Ok(Self {
            doc,
            path: path.to_path_buf(),
            page_count,
        })
    }

    /// Wrap an already loaded document
    pub fn from_document(doc: Document, path: &Path) -> Self {
        let page_count = reachable_page_count(&doc, path);
        Self {
            doc,
            path: path.to_path_buf(),
            page_count,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Build a new document holding pages `first..=last` (0-based) in order
    ///
    /// Works on a clone of the source: every page outside the range is
    /// deleted, then unreferenced objects are pruned.
    pub fn extract_range(&self, first: usize, last: usize) -> Result<Document> {
        if first > last || last >= self.page_count {
            return Err(Error::General(format!(
                "Page range {}-{} is out of range (document has {} pages)",
                first + 1,
                last + 1,
                self.page_count
            )));
        }

        let mut new_doc = self.doc.clone();

        // get_pages() numbers pages from 1
        let keep = (first as u32 + 1)..=(last as u32 + 1);
        let pages_to_delete: Vec<u32> = self
            .doc
            .get_pages()
            .into_keys()
            .filter(|num| !keep.contains(num))
            .collect();

        if !pages_to_delete.is_empty() {
            new_doc.delete_pages(&pages_to_delete);
        }

        new_doc.prune_objects();
        new_doc.compress();

        Ok(new_doc)
    }
}

/// Save a document, creating or replacing the file at `path`
pub fn save_document(doc: &mut Document, path: &Path) -> Result<()> {
    doc.save(path)?;
    Ok(())
}
