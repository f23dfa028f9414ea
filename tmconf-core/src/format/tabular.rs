use serde::Serialize;

use super::json::to_json_string;
use crate::document::Document;
use crate::value::ConfigValue;

/// One document entry split into its object path and object name.
///
/// `ltm profile imap imap` becomes path `ltm profile imap`, name `imap`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularEntry {
    pub path: String,
    pub name: String,
    pub object: ConfigValue,
}

impl TabularEntry {
    pub fn from_key(key: &str, object: ConfigValue) -> Self {
        let (path, name) = key.rsplit_once(' ').unwrap_or(("", key));
        Self {
            path: path.to_string(),
            name: name.to_string(),
            object,
        }
    }

    /// Borrowed `(path, name, object)` triple, serialized as a JSON array.
    pub fn as_tuple(&self) -> (&str, &str, &ConfigValue) {
        (&self.path, &self.name, &self.object)
    }
}

/// Entries of `document` in insertion order.
pub fn tabular_entries(document: &Document) -> Vec<TabularEntry> {
    document
        .iter()
        .map(|(key, value)| TabularEntry::from_key(key, value.clone()))
        .collect()
}

/// Format entries as a JSON array of `[path, name, object]` arrays.
pub fn format_tabular_json(entries: &[TabularEntry]) -> String {
    let tuples: Vec<_> = entries.iter().map(TabularEntry::as_tuple).collect();
    to_json_string(&tuples).unwrap_or_else(|_| "[]".to_string())
}

/// Format entries as a JSON array of `{path, name, object}` records.
pub fn format_records_json(entries: &[TabularEntry]) -> String {
    to_json_string(entries).unwrap_or_else(|_| "[]".to_string())
}

/// One JSON record per line, without a trailing newline.
pub fn format_jsonl(entries: &[TabularEntry]) -> String {
    entries
        .iter()
        .filter_map(|entry| to_json_string(entry).ok())
        .collect::<Vec<_>>()
        .join("\n")
}
