//! Ordered table of tmconf format special cases.
//!
//! Object keys are matched against body rules in order; the first match picks
//! how the object's body is interpreted. New quirks are added as table entries.

/// Substrings that mark an object (or a header line) as an embedded script.
pub(crate) const SCRIPT_MARKERS: [&str; 3] = ["ltm rule", "gtm rule", "pem irule"];

const TOKEN_LIST_MARKER: &str = "monitor min";

const OPAQUE_MARKERS: [&str; 2] = ["cli script", "sys crypto cert-order-manager"];

/// True when `line` names an iRule-style script object.
pub(crate) fn is_script_header(line: &str) -> bool {
    SCRIPT_MARKERS.iter().any(|marker| line.contains(marker))
}

/// How an object body is turned into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyStrategy {
    /// Body kept verbatim as a raw block.
    Script,
    /// Body flattened into a single token list.
    TokenList,
    /// Body skipped; the object becomes an empty map.
    Opaque,
    /// Body parsed line by line into a map.
    Properties,
}

/// Predicate on an object key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMatch {
    Contains(String),
    StartsWith(String),
}

impl KeyMatch {
    pub fn matches(&self, key: &str) -> bool {
        match self {
            KeyMatch::Contains(needle) => key.contains(needle.as_str()),
            KeyMatch::StartsWith(prefix) => key.starts_with(prefix.as_str()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRule {
    pub matcher: KeyMatch,
    pub strategy: BodyStrategy,
}

/// A property that may repeat inside matching objects, each occurrence
/// holding a nested `name value` pair collected into one map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedProperty {
    pub object: KeyMatch,
    pub property: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuirkTable {
    body_rules: Vec<BodyRule>,
    grouped: Vec<GroupedProperty>,
}

impl Default for QuirkTable {
    fn default() -> Self {
        let mut body_rules: Vec<BodyRule> = SCRIPT_MARKERS
            .iter()
            .map(|marker| BodyRule {
                matcher: KeyMatch::Contains(marker.to_string()),
                strategy: BodyStrategy::Script,
            })
            .collect();
        body_rules.push(BodyRule {
            matcher: KeyMatch::Contains(TOKEN_LIST_MARKER.to_string()),
            strategy: BodyStrategy::TokenList,
        });
        body_rules.extend(OPAQUE_MARKERS.iter().map(|marker| BodyRule {
            matcher: KeyMatch::Contains(marker.to_string()),
            strategy: BodyStrategy::Opaque,
        }));

        Self {
            body_rules,
            grouped: vec![GroupedProperty {
                object: KeyMatch::StartsWith("gtm monitor external".to_string()),
                property: "user-defined".to_string(),
            }],
        }
    }
}

impl QuirkTable {
    /// Built-in table extended with extra opaque key substrings.
    pub fn with_opaque_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = Self::default();
        table.body_rules.extend(keys.into_iter().map(|key| BodyRule {
            matcher: KeyMatch::Contains(key.into()),
            strategy: BodyStrategy::Opaque,
        }));
        table
    }

    pub fn body_rules(&self) -> &[BodyRule] {
        &self.body_rules
    }

    /// Strategy of the first rule matching `key`, [`BodyStrategy::Properties`] otherwise.
    pub fn body_strategy(&self, key: &str) -> BodyStrategy {
        self.body_rules
            .iter()
            .find(|rule| rule.matcher.matches(key))
            .map(|rule| rule.strategy)
            .unwrap_or(BodyStrategy::Properties)
    }

    /// True when `property` repeats as nested pairs inside `object_key`.
    pub fn is_grouped_property(&self, object_key: &str, property: &str) -> bool {
        self.grouped
            .iter()
            .any(|g| g.property == property && g.object.matches(object_key))
    }
}
