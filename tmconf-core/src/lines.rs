//! Line primitives shared by the preprocessing, grouping and building stages.

/// One line of tmconf text together with its 1-based position in the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceLine {
    pub number: usize,
    pub text: String,
}

impl SourceLine {
    pub fn new(number: usize, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }

    pub fn is_indented(&self) -> bool {
        self.text.starts_with(char::is_whitespace)
    }

    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }
}

/// Tracks brace depth across lines while ignoring quoted and escaped braces.
///
/// String state carries over line breaks so a quoted value spanning several
/// lines keeps its braces out of the count.
#[derive(Debug, Default, Clone)]
pub(crate) struct BraceScanner {
    in_string: bool,
}

impl BraceScanner {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn in_string(&self) -> bool {
        self.in_string
    }

    /// Net depth change contributed by `line`.
    pub fn scan(&mut self, line: &str) -> isize {
        let mut delta = 0;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' => self.in_string = !self.in_string,
                '{' if !self.in_string => delta += 1,
                '}' if !self.in_string => delta -= 1,
                _ => {}
            }
        }
        delta
    }

    /// Scan a line of script body, where `#` lines are comments.
    ///
    /// A `"` inside braces opened earlier on the same line is a literal
    /// character, as in Tcl (`set q {"}`), and does not start a string.
    pub fn scan_script(&mut self, line: &str) -> isize {
        if !self.in_string && line.trim_start().starts_with('#') {
            return 0;
        }
        let mut delta = 0;
        let mut braced = 0;
        let mut chars = line.chars();
        while let Some(c) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                '"' if braced == 0 => self.in_string = !self.in_string,
                '{' if !self.in_string => {
                    delta += 1;
                    braced += 1;
                }
                '}' if !self.in_string => {
                    delta -= 1;
                    braced = (braced - 1).max(0);
                }
                _ => {}
            }
        }
        delta
    }
}

/// Position of the first non-whitespace character, `None` for blank lines.
pub(crate) fn indent_width(line: &str) -> Option<usize> {
    line.find(|c: char| !c.is_whitespace())
}

/// Number of `"` characters not preceded by an escaping backslash.
pub(crate) fn unescaped_quotes(line: &str) -> usize {
    let mut count = 0;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '"' => count += 1,
            _ => {}
        }
    }
    count
}

/// True when the line's last character is a `{` that is not escaped.
pub(crate) fn opens_block(line: &str) -> bool {
    line.ends_with('{') && !line.ends_with("\\{")
}

/// Strip up to `width` leading spaces.
pub(crate) fn dedent(line: &str, width: usize) -> &str {
    let leading = line.len() - line.trim_start_matches(' ').len();
    &line[leading.min(width)..]
}
