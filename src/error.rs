/// Errors raised while parsing, editing or assembling a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// Empty input, missing or invalid scheme, or an unparsable port
    MalformedUrl,
    /// Scheme is well formed but not one this library handles
    UnsupportedScheme,
    /// Key, index or value is not present in the component
    ComponentNotFound,
    /// Nested value where a flat one is required, or an empty collection
    InvalidComponents,
    /// Authority-bearing URL built without a scheme or a host
    IncompleteUrl,
}

impl core::fmt::Display for UrlError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::MalformedUrl => "The url is malformed",
            Self::UnsupportedScheme => "The scheme is not supported",
            Self::ComponentNotFound => "Component not found",
            Self::InvalidComponents => "Invalid components",
            Self::IncompleteUrl => "At least the scheme and the host must be present",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UrlError {}

/// Result type for URL operations
pub type Result<T> = core::result::Result<T, UrlError>;
