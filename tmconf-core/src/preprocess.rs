//! Input normalization ahead of block grouping.
//!
//! Drops comments and empty lines, keeps iRule bodies intact, and folds every
//! `gtm topology ldns: ... server: ... { ... }` statement into one synthetic
//! `gtm topology /Common/Shared/topology` block appended at the end.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::lines::{BraceScanner, SourceLine};
use crate::quirks::is_script_header;

/// Key of the object synthesized from topology statements.
pub const TOPOLOGY_KEY: &str = "gtm topology /Common/Shared/topology";

static TOPOLOGY_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^gtm topology ldns:(?P<source>.*?)server:(?P<destination>[^{]*)\{(?P<rest>.*)$")
        .expect("topology statement pattern is valid")
});

static LONGEST_MATCH_DISABLED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"topology-longest-match\b.*\bno\b").expect("longest-match pattern is valid")
});

#[derive(Debug)]
struct TopologyRecord {
    line: usize,
    source: String,
    destination: String,
    body: Vec<SourceLine>,
}

#[derive(Debug)]
struct TopologyCollector {
    records: Vec<TopologyRecord>,
    open: bool,
    longest_match: bool,
}

impl TopologyCollector {
    fn new() -> Self {
        Self {
            records: Vec::new(),
            open: false,
            longest_match: true,
        }
    }

    /// Consume `line` if it belongs to a topology statement.
    fn accept(&mut self, line: &SourceLine) -> bool {
        if self.open {
            if line.text == "}" {
                self.open = false;
            } else if let Some(record) = self.records.last_mut() {
                record.body.push(line.clone());
            }
            return true;
        }

        let Some(caps) = TOPOLOGY_STATEMENT.captures(&line.text) else {
            return false;
        };
        self.records.push(TopologyRecord {
            line: line.number,
            source: caps["source"].trim().to_string(),
            destination: caps["destination"].trim().to_string(),
            body: Vec::new(),
        });
        self.open = !caps["rest"].contains('}');
        true
    }

    fn into_block(self) -> Vec<SourceLine> {
        let Some(first) = self.records.first() else {
            return Vec::new();
        };
        let head = first.line;
        let mut block = vec![
            SourceLine::new(head, format!("{TOPOLOGY_KEY} {{")),
            SourceLine::new(head, "    records {"),
        ];

        for (index, record) in self.records.iter().enumerate() {
            let n = record.line;
            block.push(SourceLine::new(n, format!("        topology_{index} {{")));
            block.push(SourceLine::new(n, format!("            source {}", record.source)));
            block.push(SourceLine::new(
                n,
                format!("            destination {}", record.destination),
            ));
            block.extend(
                record
                    .body
                    .iter()
                    .map(|line| SourceLine::new(line.number, format!("        {}", line.text))),
            );
            block.push(SourceLine::new(n, "        }"));
        }

        let enabled = if self.longest_match { "yes" } else { "no" };
        block.push(SourceLine::new(
            head,
            format!("        longest-match-enabled {enabled}"),
        ));
        block.push(SourceLine::new(head, "    }"));
        block.push(SourceLine::new(head, "}"));
        block
    }
}

/// Comment lines outside scripts: any non-indented `#` line (such as the
/// `#TMSH-VERSION:` banner), or an indented `#` followed by a space or
/// nothing. An indented `#name value` is a property and is kept.
fn is_comment(line: &str) -> bool {
    let trimmed = line.trim();
    line.starts_with('#') || trimmed == "#" || trimmed.starts_with("# ")
}

/// Normalize raw tmconf text into the line sequence consumed by the grouper.
pub(crate) fn preprocess(text: &str, diagnostics: &mut Diagnostics) -> Vec<SourceLine> {
    let normalized = text.replace("\r\n", "\n");
    if !normalized.is_ascii() {
        diagnostics.push(Diagnostic::non_ascii());
    }

    let mut out = Vec::new();
    let mut topology = TopologyCollector::new();
    let mut script_depth: isize = 0;
    let mut scanner = BraceScanner::new();

    for (idx, raw) in normalized.split('\n').enumerate() {
        let line = SourceLine::new(idx + 1, raw);

        if LONGEST_MATCH_DISABLED.is_match(raw) {
            topology.longest_match = false;
        }

        if script_depth > 0 {
            script_depth += scanner.scan_script(raw);
            if !raw.is_empty() {
                out.push(line);
            }
            continue;
        }

        if raw.is_empty() || is_comment(raw) {
            continue;
        }

        if is_script_header(raw) {
            scanner = BraceScanner::new();
            script_depth = scanner.scan(raw);
            trace!(line = line.number, depth = script_depth, "script header");
            out.push(line);
            continue;
        }

        if !topology.accept(&line) {
            out.push(line);
        }
    }

    if !topology.records.is_empty() {
        debug!(
            records = topology.records.len(),
            longest_match = topology.longest_match,
            "synthesized topology block"
        );
    }
    out.extend(topology.into_block());
    out
}
