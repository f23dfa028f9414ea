use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::builder::ObjectBuilder;
use crate::diagnostic::Diagnostics;
use crate::document::Document;
use crate::group::group_blocks;
use crate::preprocess::preprocess;
use crate::quirks::QuirkTable;
use crate::view::ParsedConfig;

/// Errors that abort parsing of a tmconf input.
///
/// Line numbers are 1-based positions in the raw input text.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A top-level block never reaches its closing brace.
    #[error("unclosed block starting at line {line}: '{text}'")]
    UnclosedBlock { line: usize, text: String },
    /// A nested object has no `    }` closing line inside its parent body.
    #[error("missing or mis-indented '}}' for line {line}: '{text}'")]
    MissingNestedClose { line: usize, text: String },
    /// A multi-line quoted value never reaches its closing quote.
    #[error("unterminated quoted value starting at line {line}: '{text}'")]
    UnclosedString { line: usize, text: String },
    /// Failed to read input file.
    #[error("failed to read tmconf file: {0}")]
    Io(#[from] std::io::Error),
    /// Input bytes were not valid UTF-8.
    #[error("tmconf input is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl ParseError {
    /// Source line the error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::UnclosedBlock { line, .. }
            | ParseError::MissingNestedClose { line, .. }
            | ParseError::UnclosedString { line, .. } => Some(*line),
            ParseError::Io(_) | ParseError::Utf8(_) => None,
        }
    }
}

/// Configures parse behavior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Recursively sort map keys and list elements of the result.
    pub sort: bool,
    /// Extra key substrings whose object bodies are left unparsed.
    pub opaque_keys: Vec<String>,
}

impl ParseOptions {
    fn quirks(&self) -> QuirkTable {
        QuirkTable::with_opaque_keys(self.opaque_keys.iter().cloned())
    }
}

/// Parse tmconf text with default options.
pub fn parse(text: &str) -> Result<ParsedConfig, ParseError> {
    parse_with_options(text, &ParseOptions::default())
}

/// Parse tmconf text with custom options.
pub fn parse_with_options(text: &str, opts: &ParseOptions) -> Result<ParsedConfig, ParseError> {
    let mut diagnostics = Diagnostics::new();

    let lines = preprocess(text, &mut diagnostics);
    let blocks = group_blocks(&lines, &mut diagnostics)?;
    debug!(lines = lines.len(), blocks = blocks.len(), "grouped top-level blocks");

    let quirks = opts.quirks();
    let mut builder = ObjectBuilder::new(&quirks, &mut diagnostics);
    let mut entries = Vec::with_capacity(blocks.len());
    for block in &blocks {
        entries.push(builder.build_block(block)?);
    }

    let mut document = Document::assemble(entries);
    if opts.sort {
        document.sort_recursive();
    }
    debug!(
        objects = document.len(),
        diagnostics = diagnostics.len(),
        "parsed tmconf document"
    );

    Ok(ParsedConfig::new(document, diagnostics))
}

/// Parse tmconf bytes, which must be UTF-8.
pub fn parse_bytes(bytes: &[u8], opts: &ParseOptions) -> Result<ParsedConfig, ParseError> {
    let text = String::from_utf8(bytes.to_vec())?;
    parse_with_options(&text, opts)
}

/// Read and parse a tmconf file.
pub fn parse_file(path: &Path, opts: &ParseOptions) -> Result<ParsedConfig, ParseError> {
    let bytes = fs::read(path)?;
    parse_bytes(&bytes, opts)
}
