//! Document state management for the Vue LSP.

use std::sync::Arc;

use dashmap::DashMap;
use tower_lsp::lsp_types::Url;

use crate::regions::{BlockScanner, DefaultLanguages, DocumentRegions, HOST_LANGUAGE};

use super::text::TextDocument;

/// State for a single open component: its text and the regions scanned from it.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub regions: DocumentRegions,
}

impl DocumentState {
    /// Scan `source` into regions using the given default languages.
    pub fn new(uri: Url, source: String, version: i32, defaults: DefaultLanguages) -> Self {
        let document = Arc::new(TextDocument::new(uri, HOST_LANGUAGE, version, source));
        let scanner = BlockScanner::new(defaults);
        Self {
            regions: DocumentRegions::scan(document, &scanner, defaults),
        }
    }

    pub fn document(&self) -> &TextDocument {
        self.regions.document()
    }

    pub fn version(&self) -> i32 {
        self.document().version()
    }
}

/// Thread-safe storage for open documents.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<DocumentState>>,
}

impl DocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            documents: DashMap::new(),
        }
    }

    /// Open or update a document, rescanning its regions.
    pub fn open(
        &self,
        uri: Url,
        source: String,
        version: i32,
        defaults: DefaultLanguages,
    ) -> Arc<DocumentState> {
        let state = Arc::new(DocumentState::new(uri.clone(), source, version, defaults));
        self.documents.insert(uri, Arc::clone(&state));
        state
    }

    /// Close a document.
    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    /// Get a document's state.
    pub fn get(&self, uri: &Url) -> Option<Arc<DocumentState>> {
        self.documents.get(uri).map(|r| Arc::clone(&r))
    }
}
