use crate::checkers::parse_index;
use crate::compat::{String, ToString, Vec};

/// A query parameter value: a scalar, or a nested structure built from
/// bracket keys (`arr[]=a` is a sequence, `arr[sub]=a` is a map).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Scalar(String),
    Sequence(Vec<QueryValue>),
    Map(QueryMap),
}

impl Default for QueryValue {
    fn default() -> Self {
        Self::Scalar(String::new())
    }
}

impl QueryValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[QueryValue]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&QueryMap> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar(_))
    }

    /// A scalar, or a sequence holding only scalars
    pub fn is_flat(&self) -> bool {
        match self {
            Self::Scalar(_) => true,
            Self::Sequence(items) => items.iter().all(Self::is_scalar),
            Self::Map(_) => false,
        }
    }

    /// Look one level down: a map entry by name or a sequence item by index
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        match self {
            Self::Scalar(_) => None,
            Self::Sequence(items) => parse_index(key).and_then(|i| items.get(i)),
            Self::Map(map) => map.get(key),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(s: &str) -> Self {
        Self::Scalar(s.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(s: String) -> Self {
        Self::Scalar(s)
    }
}

impl<V: Into<QueryValue>> From<Vec<V>> for QueryValue {
    fn from(items: Vec<V>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<QueryMap> for QueryValue {
    fn from(map: QueryMap) -> Self {
        Self::Map(map)
    }
}

impl PartialEq<str> for QueryValue {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for QueryValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

/// Insertion-ordered map with unique keys.
///
/// Stored as a vector of pairs: query strings are short, and positional
/// inserts must never reorder the other entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: Vec<(String, QueryValue)>,
}

impl QueryMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut QueryValue)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &QueryValue> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn first(&self) -> Option<(&str, &QueryValue)> {
        self.entries.first().map(|(k, v)| (k.as_str(), v))
    }

    pub fn last(&self) -> Option<(&str, &QueryValue)> {
        self.entries.last().map(|(k, v)| (k.as_str(), v))
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _)| k == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut QueryValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Set `key` to `value`, in place if the key exists, else at the end.
    /// Returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: QueryValue) -> Option<QueryValue> {
        let key = key.into();
        match self.get_mut(&key) {
            Some(slot) => Some(core::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Place `key` at `index` (clamped to the end). An existing entry with
    /// the same key is moved rather than duplicated.
    /// Returns the index the entry ended up at.
    pub fn insert_at(&mut self, index: usize, key: impl Into<String>, value: QueryValue) -> usize {
        let key = key.into();
        let mut index = index;
        if let Some(existing) = self.position(&key) {
            self.entries.remove(existing);
            if existing < index {
                index -= 1;
            }
        }

        let index = index.min(self.entries.len());
        self.entries.insert(index, (key, value));
        index
    }

    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        let index = self.position(key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn remove_at(&mut self, index: usize) -> Option<(String, QueryValue)> {
        (index < self.entries.len()).then(|| self.entries.remove(index))
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str, &QueryValue) -> bool) {
        self.entries.retain(|(k, v)| keep(k, v));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Next free integer key, for `[]` appends into a map
    pub(crate) fn next_index(&self) -> usize {
        self.keys()
            .filter_map(parse_index)
            .max()
            .map_or(0, |max| max + 1)
    }

    /// Check if the keys are exactly `"0"`..`"n-1"` in order
    pub(crate) fn is_list_like(&self) -> bool {
        !self.entries.is_empty()
            && self
                .keys()
                .enumerate()
                .all(|(i, key)| parse_index(key) == Some(i))
    }

    pub(crate) fn into_values(self) -> Vec<QueryValue> {
        self.entries.into_iter().map(|(_, v)| v).collect()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value.into());
        }
        map
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, QueryValue);
    type IntoIter = crate::compat::vec::IntoIter<(String, QueryValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
