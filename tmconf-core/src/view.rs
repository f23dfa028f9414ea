use once_cell::sync::OnceCell;

use crate::diagnostic::Diagnostics;
use crate::document::Document;
use crate::format::{
    format_json, format_jsonl, format_records_json, format_tabular_json, tabular_entries,
    TabularEntry,
};

/// Result of one parse: the document, its diagnostics and lazily built views.
///
/// Each view is computed on first request and reused afterwards.
#[derive(Debug)]
pub struct ParsedConfig {
    document: Document,
    diagnostics: Diagnostics,
    json: OnceCell<String>,
    tabular: OnceCell<Vec<TabularEntry>>,
    tabular_json: OnceCell<String>,
    records_json: OnceCell<String>,
    jsonl: OnceCell<String>,
}

impl ParsedConfig {
    pub fn new(document: Document, diagnostics: Diagnostics) -> Self {
        Self {
            document,
            diagnostics,
            json: OnceCell::new(),
            tabular: OnceCell::new(),
            tabular_json: OnceCell::new(),
            records_json: OnceCell::new(),
            jsonl: OnceCell::new(),
        }
    }

    /// The map view.
    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Single-line JSON of the map view.
    pub fn json(&self) -> &str {
        self.json.get_or_init(|| format_json(&self.document))
    }

    pub fn tabular(&self) -> &[TabularEntry] {
        self.tabular.get_or_init(|| tabular_entries(&self.document))
    }

    /// JSON array of `[path, name, object]` triples.
    pub fn tabular_json(&self) -> &str {
        self.tabular_json
            .get_or_init(|| format_tabular_json(self.tabular()))
    }

    /// JSON array of `{path, name, object}` records.
    pub fn records_json(&self) -> &str {
        self.records_json
            .get_or_init(|| format_records_json(self.tabular()))
    }

    /// Newline-delimited `{path, name, object}` records.
    pub fn jsonl(&self) -> &str {
        self.jsonl.get_or_init(|| format_jsonl(self.tabular()))
    }

    pub fn into_parts(self) -> (Document, Diagnostics) {
        (self.document, self.diagnostics)
    }
}
