use serde::Serialize;

use crate::value::{sort_map, ConfigMap, ConfigValue};

/// Parsed tmconf objects keyed by their full object name, in source order.
///
/// When the same key appears twice the later value wins while the key keeps
/// the position of its first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    objects: ConfigMap,
}

impl Document {
    /// Merge built `(key, value)` entries in order.
    pub fn assemble<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, ConfigValue)>,
    {
        let mut objects = ConfigMap::new();
        for (key, value) in entries {
            objects.insert(key, value);
        }
        Self { objects }
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.objects.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.objects.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, ConfigValue> {
        self.objects.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, ConfigValue> {
        self.objects.iter()
    }

    pub fn as_map(&self) -> &ConfigMap {
        &self.objects
    }

    pub fn into_map(self) -> ConfigMap {
        self.objects
    }

    /// Sorted copy of the document, see [`ConfigValue::sort_recursive`].
    pub fn sorted(mut self) -> Self {
        self.sort_recursive();
        self
    }

    pub(crate) fn sort_recursive(&mut self) {
        sort_map(&mut self.objects);
    }
}

impl FromIterator<(String, ConfigValue)> for Document {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        Self::assemble(iter)
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = indexmap::map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.iter()
    }
}
