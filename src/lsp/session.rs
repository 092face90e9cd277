//! Per-connection document and diagnostic state.
//!
//! Everything here is synchronous; the backend wraps a [`Session`] in a lock and does the publishing.

use std::collections::HashMap;

use clarion_syntax::{Diagnostic, DiagnosticSet, ScanConfig, Scanner, SourceDocument};
use tower_lsp::lsp_types::Url;

use crate::blocks::BlockEditor;

pub struct Session {
    scanner: Scanner,
    documents: HashMap<Url, SourceDocument>,
    diagnostics: DiagnosticSet<Url>,
    pub blocks: BlockEditor,
}

impl Session {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            scanner: Scanner::new(config),
            documents: HashMap::new(),
            diagnostics: DiagnosticSet::new(),
            blocks: BlockEditor::new(),
        }
    }

    /// Rebuild the scanner. Stored diagnostics stay until the next scan.
    pub fn reconfigure(&mut self, config: &ScanConfig) {
        self.scanner = Scanner::new(config);
    }

    pub fn is_open(&self, uri: &Url) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn open_documents(&self) -> Vec<Url> {
        let mut uris: Vec<_> = self.documents.keys().cloned().collect();
        uris.sort();
        uris
    }

    /// Track a document and scan it.
    pub fn open(&mut self, uri: Url, text: impl Into<String>) -> Vec<Diagnostic> {
        self.set_text(uri.clone(), text);
        self.rescan(&uri).unwrap_or_default()
    }

    /// Replace a document's text without scanning.
    pub fn set_text(&mut self, uri: Url, text: impl Into<String>) {
        let doc = SourceDocument::new(uri.as_str(), text);
        self.documents.insert(uri, doc);
    }

    /// Scan the current text of `uri` and store the result. `None` if the document is not open.
    pub fn rescan(&mut self, uri: &Url) -> Option<Vec<Diagnostic>> {
        let doc = self.documents.get(uri)?;
        let found = self.scanner.scan(doc);
        self.diagnostics.replace(uri.clone(), found.clone());
        Some(found)
    }

    /// Scan every open document, in URI order.
    pub fn rescan_all(&mut self) -> Vec<(Url, Vec<Diagnostic>)> {
        self.open_documents()
            .into_iter()
            .filter_map(|uri| self.rescan(&uri).map(|d| (uri, d)))
            .collect()
    }

    /// Drop the stored diagnostics of one document. Returns whether there were any.
    pub fn clear(&mut self, uri: &Url) -> bool {
        self.diagnostics.remove(uri).is_some()
    }

    /// Drop every stored diagnostic, returning the affected documents.
    pub fn clear_all(&mut self) -> Vec<Url> {
        self.diagnostics.clear()
    }

    /// Stop tracking a document.
    pub fn close(&mut self, uri: &Url) {
        self.documents.remove(uri);
        self.diagnostics.remove(uri);
    }

    pub fn document(&self, uri: &Url) -> Option<&SourceDocument> {
        self.documents.get(uri)
    }

    pub fn diagnostics(&self, uri: &Url) -> Option<&[Diagnostic]> {
        self.diagnostics.get(uri)
    }
}
