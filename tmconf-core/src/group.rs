use tracing::trace;

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::lines::{opens_block, BraceScanner, SourceLine};
use crate::parser::ParseError;
use crate::quirks::is_script_header;

/// Lines of one top-level object, header first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block {
    pub lines: Vec<SourceLine>,
    /// False when the block was cut short before its closing line.
    pub closed: bool,
}

impl Block {
    pub fn header(&self) -> &SourceLine {
        &self.lines[0]
    }

    /// Lines between the header and the closing line.
    pub fn interior(&self) -> &[SourceLine] {
        let end = if self.closed && self.lines.len() > 1 {
            self.lines.len() - 1
        } else {
            self.lines.len()
        };
        &self.lines[1.min(end)..end]
    }
}

/// Partition preprocessed lines into top-level object blocks.
pub(crate) fn group_blocks(
    lines: &[SourceLine],
    diagnostics: &mut Diagnostics,
) -> Result<Vec<Block>, ParseError> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let header = &lines[i];
        if header.is_indented() {
            if !header.trimmed().is_empty() {
                diagnostics.push(Diagnostic::stray(header.number, &header.text));
            }
            i += 1;
            continue;
        }

        let mut scanner = BraceScanner::new();
        let mut depth = scanner.scan(&header.text);

        if depth == 0 && header.text.contains('{') && header.text.contains('}') {
            blocks.push(Block {
                lines: vec![header.clone()],
                closed: true,
            });
            i += 1;
            continue;
        }

        if depth <= 0 || !opens_block(header.text.trim_end()) {
            diagnostics.push(Diagnostic::stray(header.number, &header.text));
            i += 1;
            continue;
        }

        let script = is_script_header(&header.text);
        let mut end = i;
        let mut closed = false;
        while !closed {
            end += 1;
            let Some(line) = lines.get(end) else {
                return Err(ParseError::UnclosedBlock {
                    line: header.number,
                    text: header.text.clone(),
                });
            };

            if script {
                if starts_next_script(line) {
                    trace!(line = line.number, "script block ends at next script header");
                    end -= 1;
                    break;
                }
                depth += scanner.scan_script(&line.text);
            } else {
                depth += scanner.scan(&line.text);
            }
            closed = depth <= 0;
        }

        blocks.push(Block {
            lines: lines[i..=end].to_vec(),
            closed,
        });
        i = end + 1;
    }

    Ok(blocks)
}

fn starts_next_script(line: &SourceLine) -> bool {
    !line.is_indented() && is_script_header(&line.text) && opens_block(line.text.trim_end())
}
