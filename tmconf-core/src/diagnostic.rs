use std::fmt::{self, Display, Formatter};

use serde::Serialize;

/// Category of a non-fatal parse notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Input contains characters outside the ASCII range.
    NonAscii,
    /// A line inside an object body matched none of the known line shapes.
    UnrecognizedLine,
    /// A non-indented line outside any block that does not open one.
    StrayLine,
}

/// A non-fatal notice collected while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based source line, when the notice concerns a single line.
    pub line: Option<usize>,
    /// Object key the line belonged to, if any.
    pub object: Option<String>,
    /// Offending line text, or a short description for input-wide notices.
    pub text: String,
}

impl Diagnostic {
    pub(crate) fn non_ascii() -> Self {
        Self {
            kind: DiagnosticKind::NonAscii,
            line: None,
            object: None,
            text: "input contains non-ASCII characters".to_string(),
        }
    }

    pub(crate) fn unrecognized(object: &str, line: usize, text: &str) -> Self {
        Self {
            kind: DiagnosticKind::UnrecognizedLine,
            line: Some(line),
            object: Some(object.to_string()),
            text: text.to_string(),
        }
    }

    pub(crate) fn stray(line: usize, text: &str) -> Self {
        Self {
            kind: DiagnosticKind::StrayLine,
            line: Some(line),
            object: None,
            text: text.to_string(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::NonAscii => write!(f, "{}", self.text),
            DiagnosticKind::UnrecognizedLine => write!(
                f,
                "unrecognized line for object '{}': '{}'",
                self.object.as_deref().unwrap_or_default(),
                self.text
            ),
            DiagnosticKind::StrayLine => {
                write!(f, "line outside of any object: '{}'", self.text)
            }
        }
    }
}

/// Ordered collection of diagnostics for one parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    /// Count diagnostics of one kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.0.iter().filter(|d| d.kind == kind).count()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
