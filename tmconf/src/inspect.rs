use colored::Colorize;
use tmconf_core::{ConfigValue, Diagnostics, Document};

/// Render the document's key tree down to `max_depth` levels below the
/// top-level objects.
pub fn render_tree(document: &Document, max_depth: usize) -> String {
    let mut out = String::new();
    for (key, value) in document {
        render_node(key, value, 0, max_depth, &mut out);
    }
    out
}

fn render_node(key: &str, value: &ConfigValue, depth: usize, max_depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    match value {
        ConfigValue::List(items) => out.push_str(&format!("{indent}{key} [{}]\n", items.len())),
        ConfigValue::RawBlock(body) => {
            out.push_str(&format!("{indent}{key} <{} lines>\n", body.lines().count()))
        }
        ConfigValue::Scalar(_) | ConfigValue::Map(_) => out.push_str(&format!("{indent}{key}\n")),
    }

    if depth >= max_depth {
        return;
    }

    if let ConfigValue::Map(children) = value {
        for (child_key, child) in children {
            render_node(child_key, child, depth + 1, max_depth, out);
        }
    }
}

/// Render a diagnostics count followed by one line per diagnostic.
pub fn render_diagnostics(diagnostics: &Diagnostics) -> String {
    let mut out = vec![format!("diagnostics={}", diagnostics.len())
        .cyan()
        .to_string()];
    for diagnostic in diagnostics {
        let location = diagnostic
            .line
            .map(|line| format!("line {line}: "))
            .unwrap_or_default();
        out.push(format!("{location}{diagnostic}").yellow().to_string());
    }
    out.join("\n")
}
