//! Parser for BIG-IP tmconf configuration dumps.
//!
//! [`parse`] turns tmconf text into a [`ParsedConfig`]: an ordered
//! [`Document`] of objects plus the non-fatal [`Diagnostics`] collected on the
//! way, with cached JSON, tabular and JSON-lines views.

mod builder;
pub mod diagnostic;
pub mod document;
pub mod format;
mod group;
mod lines;
pub mod parser;
mod preprocess;
pub mod quirks;
pub mod value;
pub mod view;

pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
pub use document::Document;
pub use format::{format_json, format_jsonl, format_records_json, format_tabular_json, TabularEntry};
pub use parser::{parse, parse_bytes, parse_file, parse_with_options, ParseError, ParseOptions};
pub use preprocess::TOPOLOGY_KEY;
pub use quirks::{BodyStrategy, QuirkTable};
pub use value::{ConfigMap, ConfigValue};
pub use view::ParsedConfig;
