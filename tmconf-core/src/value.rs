use indexmap::IndexMap;
use serde::Serialize;

/// Ordered key/value body of a tmconf object.
pub type ConfigMap = IndexMap<String, ConfigValue>;

/// A parsed tmconf value.
///
/// Serializes untagged: scalars and raw blocks become JSON strings, lists
/// become arrays of strings and maps become objects in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Single-line property value, possibly empty.
    Scalar(String),
    /// Brace-enclosed token list such as `vlans { /Common/external }`.
    List(Vec<String>),
    /// Nested object.
    Map(ConfigMap),
    /// Verbatim script body (iRules).
    RawBlock(String),
}

impl ConfigValue {
    /// Create an empty [`ConfigValue::Map`].
    pub fn empty_map() -> Self {
        Self::Map(ConfigMap::new())
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ConfigMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_raw_block(&self) -> Option<&str> {
        match self {
            Self::RawBlock(body) => Some(body),
            _ => None,
        }
    }

    /// Return the child value stored under `key` when this is a map.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Walk a nested key path through maps.
    pub fn get_path<'a>(&'a self, path: &[&str]) -> Option<&'a ConfigValue> {
        let mut current = self;
        for segment in path {
            current = current.get(segment)?;
        }
        Some(current)
    }

    /// Recursively order every map by key and every list by element.
    ///
    /// Scalars and raw blocks are left untouched. Applying it twice yields the
    /// same value as applying it once.
    pub fn sort_recursive(&mut self) {
        match self {
            Self::Scalar(_) | Self::RawBlock(_) => {}
            Self::List(items) => items.sort(),
            Self::Map(map) => sort_map(map),
        }
    }

    /// Owned variant of [`ConfigValue::sort_recursive`].
    pub fn sorted(mut self) -> Self {
        self.sort_recursive();
        self
    }
}

pub(crate) fn sort_map(map: &mut ConfigMap) {
    for value in map.values_mut() {
        value.sort_recursive();
    }
    map.sort_keys();
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<String>> for ConfigValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<ConfigMap> for ConfigValue {
    fn from(map: ConfigMap) -> Self {
        Self::Map(map)
    }
}
