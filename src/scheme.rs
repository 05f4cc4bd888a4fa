use crate::checkers::is_valid_scheme;
use crate::error::{Result, UrlError};
use crate::types::SchemeType;

/// Get the scheme type from a scheme string, ASCII case-insensitively.
/// Filters by length + first byte before the full comparison.
pub fn get_scheme_type(scheme: &str) -> Option<SchemeType> {
    let bytes = scheme.as_bytes();

    match (bytes.len(), bytes.first().map(u8::to_ascii_lowercase)) {
        (3, Some(b'f')) if bytes.eq_ignore_ascii_case(b"ftp") => Some(SchemeType::Ftp),
        (4, Some(b'h')) if bytes.eq_ignore_ascii_case(b"http") => Some(SchemeType::Http),
        (5, Some(b'h')) if bytes.eq_ignore_ascii_case(b"https") => Some(SchemeType::Https),
        (6, Some(b'm')) if bytes.eq_ignore_ascii_case(b"mailto") => Some(SchemeType::Mailto),
        _ => None,
    }
}

/// Resolve a scheme string against the allow-list.
///
/// A string that is not a scheme at all is [`UrlError::MalformedUrl`]; a
/// well-formed scheme outside the list is [`UrlError::UnsupportedScheme`].
pub fn resolve_scheme(scheme: &str) -> Result<SchemeType> {
    if !is_valid_scheme(scheme) {
        return Err(UrlError::MalformedUrl);
    }
    get_scheme_type(scheme).ok_or(UrlError::UnsupportedScheme)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_type() {
        assert_eq!(get_scheme_type("http"), Some(SchemeType::Http));
        assert_eq!(get_scheme_type("https"), Some(SchemeType::Https));
        assert_eq!(get_scheme_type("ftp"), Some(SchemeType::Ftp));
        assert_eq!(get_scheme_type("mailto"), Some(SchemeType::Mailto));
        assert_eq!(get_scheme_type("HTTPS"), Some(SchemeType::Https));
        assert_eq!(get_scheme_type("ws"), None);
        assert_eq!(get_scheme_type("file"), None);
    }

    #[test]
    fn test_resolve_scheme() {
        assert_eq!(resolve_scheme("mailto"), Ok(SchemeType::Mailto));
        assert_eq!(resolve_scheme("gopher"), Err(UrlError::UnsupportedScheme));
        assert_eq!(resolve_scheme("invalid_scheme"), Err(UrlError::MalformedUrl));
        assert_eq!(resolve_scheme(""), Err(UrlError::MalformedUrl));
        assert_eq!(resolve_scheme("1http"), Err(UrlError::MalformedUrl));
    }
}
