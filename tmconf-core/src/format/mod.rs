//! Serializers for parsed documents.

pub mod json;
pub mod tabular;

pub use json::{format_json, to_json_string, CompatFormatter};
pub use tabular::{
    format_jsonl, format_records_json, format_tabular_json, tabular_entries, TabularEntry,
};
