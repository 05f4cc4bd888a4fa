use crate::bag::{Bag, Rendering};
use crate::compat::{String, ToString, Vec};
use crate::error::{Result, UrlError};
use crate::helpers::trim_delimiter;
use crate::unicode::percent_encode::{RECIPIENT_SET, SEGMENT_SET, percent_encode_into};

/// How segments are delimited in the path of a scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathStyle {
    /// `/forum/questions/` (http, https, ftp)
    #[default]
    Slash,
    /// `a@example.com,b@example.com` (mailto recipients)
    Comma,
}

impl PathStyle {
    pub fn delimiter(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Comma => ',',
        }
    }
}

/// Ordered path segments of a URL.
///
/// Segments are kept exactly as given (no decoding) and may repeat. Every
/// edit happens in place and returns `&mut Self` so calls can be chained.
/// Until the first edit, the raw form is the parsed text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathComponents {
    segments: Vec<String>,
    style: PathStyle,
    trailing_slash: bool,
    source: Option<String>,
}

impl Default for PathComponents {
    fn default() -> Self {
        Self::new()
    }
}

impl PathComponents {
    pub fn new() -> Self {
        Self::with_style(PathStyle::Slash)
    }

    pub fn with_style(style: PathStyle) -> Self {
        Self {
            segments: Vec::new(),
            style,
            trailing_slash: true,
            source: None,
        }
    }

    /// Parse a `/`-delimited path; boundary slashes are trimmed
    pub fn parse(raw: &str) -> Self {
        Self::parse_with_style(raw, PathStyle::Slash)
    }

    /// Parse a path delimited according to `style`.
    ///
    /// The text is kept, so an unedited path renders back exactly as given
    /// (a bare `/` included).
    pub fn parse_with_style(raw: &str, style: PathStyle) -> Self {
        let trimmed = trim_delimiter(raw, style.delimiter());
        let segments = if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed
                .split(style.delimiter())
                .map(ToString::to_string)
                .collect()
        };

        Self {
            segments,
            style,
            trailing_slash: raw.is_empty() || raw.ends_with('/'),
            source: Some(raw.to_string()),
        }
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub(crate) fn set_style(&mut self, style: PathStyle) {
        self.style = style;
        self.source = None;
    }

    pub fn trailing_slash(&self) -> bool {
        self.trailing_slash
    }

    /// Choose whether [`Bag::serialize`] ends the path with `/`
    pub fn set_trailing_slash(&mut self, trailing_slash: bool) -> &mut Self {
        self.trailing_slash = trailing_slash;
        self.edited()
    }

    // Accessors

    pub fn all(&self) -> &[String] {
        &self.segments
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn first(&self) -> Option<&str> {
        self.segments.first().map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// Check if `index` is in bounds. Negative indexes are never in bounds.
    pub fn has(&self, index: isize) -> bool {
        usize::try_from(index).is_ok_and(|i| i < self.segments.len())
    }

    /// Get the segment at `index`. A negative index uses its absolute value,
    /// so `-1` addresses the second segment, not the last one.
    pub fn get(&self, index: isize) -> Result<&str> {
        self.resolve(index)
            .map(|i| self.segments[i].as_str())
            .ok_or(UrlError::ComponentNotFound)
    }

    /// Check if any segment equals `value`
    pub fn contains(&self, value: &str) -> bool {
        self.position(value).is_some()
    }

    fn resolve(&self, index: isize) -> Option<usize> {
        let index = index.unsigned_abs();
        (index < self.segments.len()).then_some(index)
    }

    fn position(&self, value: &str) -> Option<usize> {
        self.segments.iter().position(|segment| segment == value)
    }

    fn require(&self, value: &str) -> Result<usize> {
        self.position(value).ok_or(UrlError::ComponentNotFound)
    }

    fn edited(&mut self) -> &mut Self {
        self.source = None;
        self
    }

    // Mutators

    pub fn append(&mut self, value: impl Into<String>) -> &mut Self {
        self.segments.push(value.into());
        self.edited()
    }

    pub fn prepend(&mut self, value: impl Into<String>) -> &mut Self {
        self.segments.insert(0, value.into());
        self.edited()
    }

    /// Insert `value` right before the first segment equal to `reference`
    pub fn insert_before(
        &mut self,
        reference: &str,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        let at = self.require(reference)?;
        self.segments.insert(at, value.into());
        Ok(self.edited())
    }

    /// Insert `value` right after the first segment equal to `reference`
    pub fn insert_after(&mut self, reference: &str, value: impl Into<String>) -> Result<&mut Self> {
        let at = self.require(reference)?;
        self.segments.insert(at + 1, value.into());
        Ok(self.edited())
    }

    /// Insert `value` between two reference segments.
    ///
    /// With `first` given the value goes right after its first occurrence,
    /// or at the end when `first` is absent. With only `last` given it goes
    /// right before `last`. Naming neither reference is
    /// [`UrlError::InvalidComponents`]; naming only absent ones is
    /// [`UrlError::ComponentNotFound`].
    pub fn insert_between(
        &mut self,
        first: Option<&str>,
        last: Option<&str>,
        value: impl Into<String>,
    ) -> Result<&mut Self> {
        if first.is_none() && last.is_none() {
            return Err(UrlError::InvalidComponents);
        }

        let first_at = first.and_then(|first| self.position(first));
        let last_at = last.and_then(|last| self.position(last));
        let at = match (first_at, last_at) {
            (None, None) => return Err(UrlError::ComponentNotFound),
            (Some(i), _) => i + 1,
            (None, Some(i)) if first.is_none() => i,
            (None, Some(_)) => self.segments.len(),
        };

        self.segments.insert(at, value.into());
        Ok(self.edited())
    }

    /// Replace the first segment equal to `reference`
    pub fn overwrite(&mut self, reference: &str, value: impl Into<String>) -> Result<&mut Self> {
        let at = self.require(reference)?;
        self.segments[at] = value.into();
        Ok(self.edited())
    }

    /// Replace the segment at `index` (same absolute-value rule as [`Self::get`])
    pub fn set(&mut self, index: isize, value: impl Into<String>) -> Result<&mut Self> {
        let at = self.resolve(index).ok_or(UrlError::ComponentNotFound)?;
        self.segments[at] = value.into();
        Ok(self.edited())
    }

    /// Remove the first segment equal to `value`
    pub fn remove(&mut self, value: &str) -> Result<&mut Self> {
        let at = self.require(value)?;
        self.segments.remove(at);
        Ok(self.edited())
    }

    /// Remove the first occurrence of each listed value.
    ///
    /// Every value must be present before anything is removed.
    pub fn forget<I, S>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        if values.is_empty() {
            return Err(UrlError::InvalidComponents);
        }
        if !values.iter().all(|value| self.contains(value.as_ref())) {
            return Err(UrlError::ComponentNotFound);
        }

        for value in &values {
            if let Some(at) = self.position(value.as_ref()) {
                self.segments.remove(at);
            }
        }
        Ok(self.edited())
    }

    /// Remove the segment at `index` (same absolute-value rule as [`Self::get`])
    pub fn remove_at(&mut self, index: isize) -> Result<&mut Self> {
        let at = self.resolve(index).ok_or(UrlError::ComponentNotFound)?;
        self.segments.remove(at);
        Ok(self.edited())
    }

    /// Keep only segments whose value is listed, in their current order
    pub fn only<I, S>(&mut self, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        if values.is_empty() {
            return Err(UrlError::InvalidComponents);
        }

        self.segments
            .retain(|segment| values.iter().any(|value| value.as_ref() == segment));
        Ok(self.edited())
    }

    pub fn forget_all(&mut self) -> &mut Self {
        self.segments.clear();
        self.edited()
    }

    // Serializer

    /// Segments joined as given; slash paths are rooted at `/`
    pub fn raw(&self, with_trailing_slash: bool) -> String {
        self.render(Rendering::Raw, with_trailing_slash)
    }

    /// Like [`Self::raw`] with every segment percent-encoded
    pub fn encoded(&self, with_trailing_slash: bool) -> String {
        self.render(Rendering::Encoded, with_trailing_slash)
    }

    fn render(&self, rendering: Rendering, with_trailing_slash: bool) -> String {
        if rendering == Rendering::Raw && with_trailing_slash == self.trailing_slash {
            if let Some(source) = &self.source {
                return source.clone();
            }
        }

        if self.segments.is_empty() {
            // Parsed bare root
            let rooted = self.style == PathStyle::Slash
                && with_trailing_slash
                && self.source.as_deref().is_some_and(|source| !source.is_empty());
            return if rooted { String::from("/") } else { String::new() };
        }

        let delimiter = self.style.delimiter();
        let encode_set = match self.style {
            PathStyle::Slash => SEGMENT_SET,
            PathStyle::Comma => RECIPIENT_SET,
        };

        let capacity = self.segments.iter().map(|s| s.len() + 1).sum::<usize>() + 1;
        let mut result = String::with_capacity(capacity);

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 || self.style == PathStyle::Slash {
                result.push(delimiter);
            }
            match rendering {
                Rendering::Raw => result.push_str(segment),
                Rendering::Encoded => percent_encode_into(&mut result, segment, encode_set),
            }
        }

        if with_trailing_slash && self.style == PathStyle::Slash {
            result.push('/');
        }
        result
    }
}

impl Bag for PathComponents {
    type Key = isize;
    type Value = str;

    fn len(&self) -> usize {
        self.segments.len()
    }

    fn has(&self, key: &isize) -> bool {
        PathComponents::has(self, *key)
    }

    fn get(&self, key: &isize) -> Result<&str> {
        PathComponents::get(self, *key)
    }

    fn forget_all(&mut self) -> &mut Self {
        PathComponents::forget_all(self)
    }

    fn serialize(&self, rendering: Rendering) -> String {
        self.render(rendering, self.trailing_slash)
    }
}

impl<S: Into<String>> FromIterator<S> for PathComponents {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
            ..Self::new()
        }
    }
}

impl core::fmt::Display for PathComponents {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.serialize(Rendering::Raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn segments(path: &PathComponents) -> Vec<&str> {
        path.iter().collect()
    }

    #[test]
    fn test_parse() {
        let path = PathComponents::parse("/forum/questions/");
        assert_eq!(segments(&path), ["forum", "questions"]);
        assert!(path.trailing_slash());

        let path = PathComponents::parse("/forum/questions");
        assert!(!path.trailing_slash());

        assert!(PathComponents::parse("").is_empty());
        assert!(PathComponents::parse("/").is_empty());
    }

    #[test]
    fn test_parse_keeps_inner_empty_segments() {
        let path = PathComponents::parse("/a//b/");
        assert_eq!(segments(&path), ["a", "", "b"]);
        assert_eq!(path.to_string(), "/a//b/");
    }

    #[test]
    fn test_unedited_renders_as_parsed() {
        for raw in ["", "/", "/a", "/a/", "/a%20b/c", "//"] {
            assert_eq!(PathComponents::parse(raw).serialize(Rendering::Raw), raw);
        }
    }

    #[test]
    fn test_bare_root() {
        let mut path = PathComponents::parse("/");
        assert_eq!(path.raw(true), "/");
        assert_eq!(path.encoded(true), "/");
        assert_eq!(path.raw(false), "");

        path.append("a");
        assert_eq!(path.raw(true), "/a/");
        path.forget_all();
        assert_eq!(path.raw(true), "");
    }

    #[test]
    fn test_insert_before_after() {
        let mut path = PathComponents::parse("/a/b/c");
        path.insert_after("b", "x").unwrap();
        assert_eq!(segments(&path), ["a", "b", "x", "c"]);

        let mut path = PathComponents::parse("/a/b/c");
        path.insert_before("b", "x").unwrap();
        assert_eq!(segments(&path), ["a", "x", "b", "c"]);
    }

    #[test]
    fn test_insert_between() {
        let mut path = PathComponents::parse("/a/b/c");
        path.insert_between(Some("a"), Some("b"), "x").unwrap();
        assert_eq!(segments(&path), ["a", "x", "b", "c"]);

        path.insert_between(None, Some("c"), "y").unwrap();
        assert_eq!(segments(&path), ["a", "x", "b", "y", "c"]);

        path.insert_between(Some("missing"), Some("a"), "z").unwrap();
        assert_eq!(path.last(), Some("z"));
    }

    #[test]
    fn test_insert_between_errors() {
        let mut path = PathComponents::parse("/a/b");
        assert_eq!(
            path.insert_between(None, None, "x").unwrap_err(),
            UrlError::InvalidComponents
        );
        assert_eq!(
            path.insert_between(Some("p"), Some("q"), "x").unwrap_err(),
            UrlError::ComponentNotFound
        );
        assert_eq!(segments(&path), ["a", "b"]);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let mut path = PathComponents::parse("/a/b/a");
        path.insert_after("a", "x").unwrap();
        assert_eq!(segments(&path), ["a", "x", "b", "a"]);

        path.remove("a").unwrap();
        assert_eq!(segments(&path), ["x", "b", "a"]);

        path.overwrite("a", "z").unwrap();
        assert_eq!(segments(&path), ["x", "b", "z"]);
    }

    #[test]
    fn test_missing_reference() {
        let mut path = PathComponents::parse("/a/b");
        assert_eq!(path.insert_before("nope", "x").unwrap_err(), UrlError::ComponentNotFound);
        assert_eq!(path.insert_after("nope", "x").unwrap_err(), UrlError::ComponentNotFound);
        assert_eq!(path.overwrite("nope", "x").unwrap_err(), UrlError::ComponentNotFound);
        assert_eq!(path.remove("nope").unwrap_err(), UrlError::ComponentNotFound);
        assert_eq!(segments(&path), ["a", "b"]);
    }

    #[test]
    fn test_forget() {
        let mut path = PathComponents::parse("/a/b/c/b");
        path.forget(["b", "c"]).unwrap();
        assert_eq!(segments(&path), ["a", "b"]);

        assert_eq!(path.forget(["a", "nope"]).unwrap_err(), UrlError::ComponentNotFound);
        assert_eq!(segments(&path), ["a", "b"]);

        let none: [&str; 0] = [];
        assert_eq!(path.forget(none).unwrap_err(), UrlError::InvalidComponents);
    }

    #[test]
    fn test_negative_index() {
        let path = PathComponents::parse("/zero/one/two");
        assert_eq!(path.get(-1).unwrap(), "one");
        assert_eq!(path.get(2).unwrap(), "two");
        assert!(path.has(2));
        assert!(!path.has(-1));
        assert!(!path.has(3));
        assert_eq!(path.get(-3).unwrap_err(), UrlError::ComponentNotFound);
    }

    #[test]
    fn test_set_and_remove_at() {
        let mut path = PathComponents::parse("/a/b/c");
        path.set(1, "B").unwrap().remove_at(0).unwrap();
        assert_eq!(segments(&path), ["B", "c"]);
        assert_eq!(path.remove_at(5).unwrap_err(), UrlError::ComponentNotFound);
    }

    #[test]
    fn test_only() {
        let mut path = PathComponents::parse("/a/b/c/b");
        path.only(["b", "a"]).unwrap();
        assert_eq!(segments(&path), ["a", "b", "b"]);

        let none: [&str; 0] = [];
        assert_eq!(path.only(none).unwrap_err(), UrlError::InvalidComponents);
    }

    #[test]
    fn test_raw() {
        let mut path = PathComponents::parse("/forum/questions/");
        path.append("archive");
        assert_eq!(path.raw(true), "/forum/questions/archive/");
        assert_eq!(path.raw(false), "/forum/questions/archive");
        assert_eq!(PathComponents::new().raw(true), "");
    }

    #[test]
    fn test_encoded() {
        let path: PathComponents = ["a b", "ü"].into_iter().collect();
        assert_eq!(path.encoded(false), "/a%20b/%C3%BC");
        assert_eq!(path.serialize(Rendering::Raw), "/a b/ü/");
    }

    #[test]
    fn test_comma_style() {
        let mut path =
            PathComponents::parse_with_style("a@example.com,b@example.com", PathStyle::Comma);
        assert_eq!(segments(&path), ["a@example.com", "b@example.com"]);
        path.prepend("first@example.com");
        assert_eq!(path.raw(true), "first@example.com,a@example.com,b@example.com");
    }

    #[test]
    fn test_forget_all() {
        let mut path = PathComponents::parse("/a/b");
        path.forget_all().append("c");
        assert_eq!(path.first(), Some("c"));
        assert_eq!(path.last(), Some("c"));
    }
}
