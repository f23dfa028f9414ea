//! Turns one grouped block into a `(key, value)` entry.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::diagnostic::{Diagnostic, Diagnostics};
use crate::group::Block;
use crate::lines::{dedent, indent_width, opens_block, unescaped_quotes, SourceLine};
use crate::parser::ParseError;
use crate::quirks::{BodyStrategy, QuirkTable};
use crate::value::{ConfigMap, ConfigValue};

/// Indentation of properties directly inside an object body.
const BODY_INDENT: usize = 4;

/// Closing line of a nested object inside a body.
const NESTED_CLOSE: &str = "    }";

/// Opener of an unnamed object, after de-indenting its parent.
const ANONYMOUS_OPEN: &str = "    {";

static QUOTED_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^"[\s\S]*"$"#).expect("quoted token pattern is valid"));

/// Object key of a block header: the line without its trailing braces.
pub(crate) fn object_key(header: &str) -> String {
    header
        .trim_end()
        .trim_end_matches(['{', '}', ' '])
        .trim()
        .to_string()
}

pub(crate) struct ObjectBuilder<'a> {
    quirks: &'a QuirkTable,
    diagnostics: &'a mut Diagnostics,
}

impl<'a> ObjectBuilder<'a> {
    pub fn new(quirks: &'a QuirkTable, diagnostics: &'a mut Diagnostics) -> Self {
        Self {
            quirks,
            diagnostics,
        }
    }

    pub fn build_block(&mut self, block: &Block) -> Result<(String, ConfigValue), ParseError> {
        self.build(block.header(), block.interior())
    }

    fn build(
        &mut self,
        header: &SourceLine,
        interior: &[SourceLine],
    ) -> Result<(String, ConfigValue), ParseError> {
        let key = object_key(&header.text);
        let value = match self.quirks.body_strategy(&key) {
            BodyStrategy::Script => ConfigValue::RawBlock(join_lines(interior)),
            BodyStrategy::TokenList => ConfigValue::List(token_list(interior)),
            BodyStrategy::Opaque => ConfigValue::empty_map(),
            BodyStrategy::Properties => ConfigValue::Map(self.properties(&key, interior)?),
        };
        Ok((key, value))
    }

    fn properties(&mut self, key: &str, interior: &[SourceLine]) -> Result<ConfigMap, ParseError> {
        let mut map = ConfigMap::new();
        let mut i = 0;

        while i < interior.len() {
            let line = &interior[i];
            let text = line.text.as_str();
            let trimmed = text.trim();

            if trimmed.is_empty() {
                i += 1;
                continue;
            }

            if opens_block(text) && interior.len() > 1 && unescaped_quotes(text) % 2 == 0 {
                let close = interior[i..]
                    .iter()
                    .position(|l| l.text == NESTED_CLOSE)
                    .map(|offset| i + offset)
                    .ok_or_else(|| ParseError::MissingNestedClose {
                        line: line.number,
                        text: text.to_string(),
                    })?;
                let nested = nested_block(&interior[i..=close]);
                let (nested_key, nested_value) =
                    self.build(&nested[0], &nested[1..nested.len() - 1])?;
                map.insert(nested_key, nested_value);
                i = close + 1;
                continue;
            }

            let collapsed: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            if collapsed.ends_with("{}") {
                map.insert(key_before_brace(text), ConfigValue::empty_map());
            } else if text.contains('{') && text.contains('}') && !text.contains('"') {
                map.insert(key_before_brace(text), ConfigValue::List(pseudo_array(text)));
            } else if (!trimmed.contains(' ') || QUOTED_TOKEN.is_match(trimmed))
                && !text.contains('}')
            {
                map.insert(trimmed.to_string(), ConfigValue::Scalar(String::new()));
            } else if indent_width(text) == Some(BODY_INDENT) {
                if unescaped_quotes(text) % 2 == 1 {
                    let end = (i + 1..interior.len())
                        .find(|&j| unescaped_quotes(&interior[j].text) % 2 == 1)
                        .ok_or_else(|| ParseError::UnclosedString {
                            line: line.number,
                            text: text.to_string(),
                        })?;
                    let (name, value) = multiline_property(&interior[i..=end]);
                    map.insert(name, ConfigValue::Scalar(value));
                    i = end + 1;
                    continue;
                }

                let (name, value) = split_property(trimmed);
                if self.quirks.is_grouped_property(key, name) {
                    let (inner_name, inner_value) = split_property(value);
                    let slot = map
                        .entry(name.to_string())
                        .or_insert_with(ConfigValue::empty_map);
                    if !matches!(slot, ConfigValue::Map(_)) {
                        *slot = ConfigValue::empty_map();
                    }
                    if let ConfigValue::Map(group) = slot {
                        group.insert(
                            inner_name.to_string(),
                            ConfigValue::Scalar(inner_value.to_string()),
                        );
                    }
                } else {
                    map.insert(name.to_string(), ConfigValue::Scalar(value.to_string()));
                }
            } else {
                self.diagnostics
                    .push(Diagnostic::unrecognized(key, line.number, text));
            }
            i += 1;
        }

        Ok(map)
    }
}

fn join_lines(lines: &[SourceLine]) -> String {
    lines
        .iter()
        .map(|l| l.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn token_list(lines: &[SourceLine]) -> Vec<String> {
    lines
        .iter()
        .map(SourceLine::trimmed)
        .collect::<Vec<_>>()
        .join(" ")
        .split(' ')
        .map(str::to_string)
        .collect()
}

/// De-indent a nested block and name its unnamed child objects `0`, `1`, ...
fn nested_block(lines: &[SourceLine]) -> Vec<SourceLine> {
    let mut anonymous = 0;
    lines
        .iter()
        .map(|line| {
            let text = dedent(&line.text, BODY_INDENT);
            if text == ANONYMOUS_OPEN {
                let named = format!("    {anonymous} {{");
                anonymous += 1;
                SourceLine::new(line.number, named)
            } else {
                SourceLine::new(line.number, text)
            }
        })
        .collect()
}

fn key_before_brace(line: &str) -> String {
    line.split('{').next().unwrap_or_default().trim().to_string()
}

/// Tokens of a single-line `key { a b c }` list.
fn pseudo_array(line: &str) -> Vec<String> {
    line.split('{')
        .nth(1)
        .unwrap_or_default()
        .replace('}', "")
        .trim()
        .split(' ')
        .map(str::to_string)
        .collect()
}

/// Split `key value...` on the first space; the value may be empty.
fn split_property(line: &str) -> (&str, &str) {
    line.split_once(' ').unwrap_or((line, ""))
}

/// Key from the first line, value from the rest of the first line plus every
/// following line verbatim, joined with newlines.
fn multiline_property(lines: &[SourceLine]) -> (String, String) {
    let (name, first) = split_property(lines[0].trimmed());
    let mut value = first.to_string();
    for line in &lines[1..] {
        value.push('\n');
        value.push_str(&line.text);
    }
    (name.to_string(), value)
}
