//! Open-document state for the reference workspace host.

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use crate::language::LanguageId;

use super::text::LineIndex;

/// A document the host currently has open.
#[derive(Debug, Clone)]
pub struct OpenDocument {
    line_index: LineIndex,
    version: i32,
    language: LanguageId,
}

impl OpenDocument {
    pub fn new(text: String, version: i32, language: LanguageId) -> Self {
        Self {
            line_index: LineIndex::new(text),
            version,
            language,
        }
    }

    pub fn text(&self) -> &str {
        self.line_index.source()
    }

    /// Version assigned by the host; bumped once per edit transaction.
    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn language(&self) -> LanguageId {
        self.language
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Swap in post-edit text, rebuilding the index and bumping the version.
    pub(crate) fn replace_text(&mut self, text: String) {
        self.line_index = LineIndex::new(text);
        self.version += 1;
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, OpenDocument>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or replace a document with the given source text.
    pub fn open(&self, uri: Url, text: String, version: i32, language: LanguageId) {
        self.documents
            .insert(uri, OpenDocument::new(text, version, language));
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Snapshot a document's current state.
    pub fn get(&self, uri: &Url) -> Option<OpenDocument> {
        self.documents.get(uri).map(|doc| doc.value().clone())
    }

    /// Run `f` against a document while holding its entry lock.
    ///
    /// Edit transactions use this so the version check and the text swap
    /// observe the same revision.
    pub fn with_document_mut<T>(&self, uri: &Url, f: impl FnOnce(&mut OpenDocument) -> T) -> Option<T> {
        self.documents.get_mut(uri).map(|mut doc| f(&mut doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn open_get_close() {
        let store = DocumentStore::new();
        store.open(uri("file:///a.css"), "a { }".into(), 1, LanguageId::Css);

        let doc = store.get(&uri("file:///a.css")).unwrap();
        assert_eq!(doc.text(), "a { }");
        assert_eq!(doc.version(), 1);
        assert_eq!(doc.language(), LanguageId::Css);

        store.close(&uri("file:///a.css"));
        assert!(store.get(&uri("file:///a.css")).is_none());
    }

    #[test]
    fn replace_text_bumps_version_once() {
        let store = DocumentStore::new();
        store.open(uri("file:///a.scss"), "old".into(), 7, LanguageId::Scss);

        store.with_document_mut(&uri("file:///a.scss"), |doc| {
            doc.replace_text("new".into());
        });

        let doc = store.get(&uri("file:///a.scss")).unwrap();
        assert_eq!(doc.text(), "new");
        assert_eq!(doc.version(), 8);
    }
}
