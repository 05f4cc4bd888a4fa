mod parse;
mod serialize;
mod value;
mod walk;

pub use value::{QueryMap, QueryValue};

use crate::bag::{Bag, Rendering};
use crate::compat::{Cow, String, Vec, format};
use crate::error::{Result, UrlError};

/// Mailto headers holding comma-separated address lists
const MAILTO_LIST_HEADERS: &[&str] = &["to", "cc", "bcc"];

/// Mailto headers that never hold nested values
const MAILTO_FLAT_HEADERS: &[&str] = &["to", "cc", "bcc", "subject", "body"];

/// How nested values are written in the query of a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryStyle {
    /// `arr[]=a&arr[key]=b` (http, https, ftp)
    #[default]
    Brackets,
    /// `to=a@x,b@x&subject=...` (mailto headers)
    CommaLists,
}

impl QueryStyle {
    /// Check if values under `key` are comma-separated lists
    pub fn is_list_key(self, key: &str) -> bool {
        self == Self::CommaLists && MAILTO_LIST_HEADERS.contains(&key)
    }

    /// Check if `key` is declared single-dimensional
    pub fn requires_flat(self, key: &str) -> bool {
        self == Self::CommaLists && MAILTO_FLAT_HEADERS.contains(&key)
    }
}

/// Query parameters of a URL, keyed by name, in insertion order.
///
/// Values may nest (see [`QueryValue`]). Edits happen in place and return
/// `&mut Self` for chaining; a failed edit leaves the store untouched,
/// except for [`Self::overwrite_recursive`] with several keys.
///
/// A parsed query keeps its text, and its raw form is that text until the
/// first edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryComponents {
    map: QueryMap,
    style: QueryStyle,
    source: Option<String>,
}

impl QueryComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(style: QueryStyle) -> Self {
        Self {
            map: QueryMap::new(),
            style,
            source: None,
        }
    }

    /// Parse a query string, with or without the leading `?`
    pub fn parse(raw: &str) -> Self {
        Self::parse_with_style(raw, QueryStyle::Brackets)
    }

    pub fn parse_with_style(raw: &str, style: QueryStyle) -> Self {
        let body = raw.strip_prefix('?').unwrap_or(raw);
        Self {
            map: parse::parse_query(body, style),
            style,
            source: (!body.is_empty()).then(|| format!("?{body}")),
        }
    }

    /// Parse the text after a URL's `?`. The `?` is kept in the raw form
    /// even when nothing follows it.
    pub(crate) fn parse_after_mark(body: &str, style: QueryStyle) -> Self {
        Self {
            map: parse::parse_query(body, style),
            style,
            source: Some(format!("?{body}")),
        }
    }

    pub fn style(&self) -> QueryStyle {
        self.style
    }

    pub(crate) fn set_style(&mut self, style: QueryStyle) {
        self.style = style;
        self.source = None;
    }

    // Accessors

    pub fn all(&self) -> &QueryMap {
        &self.map
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn first(&self) -> Option<(&str, &QueryValue)> {
        self.map.first()
    }

    pub fn last(&self) -> Option<(&str, &QueryValue)> {
        self.map.last()
    }

    /// Check if a top-level entry named `key` exists
    pub fn has(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Get the top-level entry named `key`
    pub fn get(&self, key: &str) -> Result<&QueryValue> {
        self.map.get(key).ok_or(UrlError::ComponentNotFound)
    }

    /// Mutable access to the entry named `key`; the raw form is rebuilt
    /// from then on
    pub fn get_mut(&mut self, key: &str) -> Result<&mut QueryValue> {
        let value = self.map.get_mut(key).ok_or(UrlError::ComponentNotFound)?;
        self.source = None;
        Ok(value)
    }

    /// Every scalar with its flattened bracket key, in render order
    pub fn leaves(&self) -> Vec<(String, Cow<'_, str>)> {
        serialize::leaves(&self.map, self.style)
    }

    /// Index of the first entry whose key, or else whose scalar value,
    /// equals `reference`
    fn find_reference(&self, reference: &str) -> Result<usize> {
        self.map
            .position(reference)
            .or_else(|| self.map.values().position(|value| value == reference))
            .ok_or(UrlError::ComponentNotFound)
    }

    /// Collect caller entries, rejecting an empty set and nested values
    /// under single-dimensional keys
    fn collect_entries<I, K, V>(&self, entries: I) -> Result<Vec<(String, QueryValue)>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries: Vec<(String, QueryValue)> = entries
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();

        if entries.is_empty() {
            return Err(UrlError::InvalidComponents);
        }
        if entries
            .iter()
            .any(|(key, value)| self.style.requires_flat(key) && !value.is_flat())
        {
            return Err(UrlError::InvalidComponents);
        }
        Ok(entries)
    }

    fn place_at(&mut self, index: usize, entries: Vec<(String, QueryValue)>) -> &mut Self {
        let mut index = index;
        for (key, value) in entries {
            index = self.map.insert_at(index, key, value) + 1;
        }
        self.edited()
    }

    fn edited(&mut self) -> &mut Self {
        self.source = None;
        self
    }

    // Mutators

    /// Add entries at the end; an existing key is moved there
    pub fn append<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries = self.collect_entries(entries)?;
        Ok(self.place_at(self.map.len(), entries))
    }

    /// Add entries at the front, keeping their given order
    pub fn prepend<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries = self.collect_entries(entries)?;
        Ok(self.place_at(0, entries))
    }

    /// Insert entries right before the entry matching `reference`
    pub fn insert_before<I, K, V>(&mut self, reference: &str, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries = self.collect_entries(entries)?;
        let at = self.find_reference(reference)?;
        Ok(self.place_at(at, entries))
    }

    /// Insert entries right after the entry matching `reference`
    pub fn insert_after<I, K, V>(&mut self, reference: &str, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries = self.collect_entries(entries)?;
        let at = self.find_reference(reference)?;
        Ok(self.place_at(at + 1, entries))
    }

    /// Replace top-level values in place. Every key must already exist;
    /// nothing is written unless all of them do.
    pub fn overwrite<I, K, V>(&mut self, entries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries = self.collect_entries(entries)?;
        if entries.iter().any(|(key, _)| !self.map.contains_key(key)) {
            return Err(UrlError::ComponentNotFound);
        }

        for (key, value) in entries {
            self.map.insert(key, value);
        }
        Ok(self.edited())
    }

    /// Replace values at any depth, walking depth-first in iteration order.
    ///
    /// With `stop_at_first_match` only the first occurrence of each key is
    /// replaced, otherwise all of them. A key with no occurrence fails with
    /// [`UrlError::ComponentNotFound`]; keys earlier in `entries` have
    /// already been written by then.
    pub fn overwrite_recursive<I, K, V>(
        &mut self,
        entries: I,
        stop_at_first_match: bool,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<QueryValue>,
    {
        let entries = self.collect_entries(entries)?;
        for (key, value) in &entries {
            let replaced = walk::overwrite_in_map(&mut self.map, key, value, stop_at_first_match);
            if replaced == 0 {
                return Err(UrlError::ComponentNotFound);
            }
            self.source = None;
        }
        Ok(self)
    }

    /// Remove the top-level entry named `key_or_value`, or else the first
    /// entry whose scalar value equals it
    pub fn remove(&mut self, key_or_value: &str) -> Result<&mut Self> {
        let at = self.find_reference(key_or_value)?;
        self.map.remove_at(at);
        Ok(self.edited())
    }

    /// Remove several entries, each matched like [`Self::remove`].
    ///
    /// Every reference must match before anything is removed. A reference
    /// already gone through an earlier one is skipped.
    pub fn forget<I, S>(&mut self, keys_or_values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let references: Vec<S> = keys_or_values.into_iter().collect();
        if references.is_empty() {
            return Err(UrlError::InvalidComponents);
        }
        for reference in &references {
            self.find_reference(reference.as_ref())?;
        }

        for reference in &references {
            if let Ok(at) = self.find_reference(reference.as_ref()) {
                self.map.remove_at(at);
            }
        }
        Ok(self.edited())
    }

    /// Remove `key` at every depth. Does nothing to the entries when the key
    /// is absent, but the raw form is rebuilt either way.
    pub fn remove_recursive(&mut self, key: &str) -> &mut Self {
        walk::remove_in_map(&mut self.map, key);
        self.edited()
    }

    /// Keep only the listed top-level keys, in their current order
    pub fn only<I, S>(&mut self, keys: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keys: Vec<S> = keys.into_iter().collect();
        if keys.is_empty() {
            return Err(UrlError::InvalidComponents);
        }

        self.map
            .retain(|key, _| keys.iter().any(|wanted| wanted.as_ref() == key));
        Ok(self.edited())
    }

    pub fn forget_all(&mut self) -> &mut Self {
        self.map.clear();
        self.edited()
    }

    // Serializer

    /// `?key=value&...` as parsed, or rebuilt after an edit; `""` when empty
    pub fn raw(&self) -> String {
        self.render(Rendering::Raw)
    }

    /// Like [`Self::raw`] with keys and values form-encoded
    pub fn encoded(&self) -> String {
        self.render(Rendering::Encoded)
    }

    fn render(&self, rendering: Rendering) -> String {
        match (&self.source, rendering) {
            (Some(source), Rendering::Raw) => source.clone(),
            _ => serialize::render(&self.map, self.style, rendering),
        }
    }
}

impl Bag for QueryComponents {
    type Key = str;
    type Value = QueryValue;

    fn len(&self) -> usize {
        self.map.len()
    }

    fn has(&self, key: &str) -> bool {
        QueryComponents::has(self, key)
    }

    fn get(&self, key: &str) -> Result<&QueryValue> {
        QueryComponents::get(self, key)
    }

    fn forget_all(&mut self) -> &mut Self {
        QueryComponents::forget_all(self)
    }

    fn serialize(&self, rendering: Rendering) -> String {
        self.render(rendering)
    }
}

impl core::fmt::Display for QueryComponents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.raw())
    }
}

impl From<&str> for QueryComponents {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}
