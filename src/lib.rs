#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Compatibility layer for std/no_std
mod compat;

// Internal modules (not public API)
mod checkers;
mod error;
mod helpers;
mod parser;
mod scheme;
mod types;
mod unicode;
mod url_components;

// Component stores
mod bag;
mod path;
mod query;
mod url_builder;

// Public API
pub use bag::{Bag, Rendering};
pub use error::{Result, UrlError};
pub use parser::{Parseable, split_url};
pub use path::{PathComponents, PathStyle};
pub use query::{QueryComponents, QueryMap, QueryStyle, QueryValue};
pub use types::SchemeType;
pub use url_builder::Url;
pub use url_components::UrlComponents;

use compat::String;

/// Parse a URL string into an editable [`Url`]
pub fn parse(input: &str) -> Result<Url> {
    Url::parse(input)
}

/// Assemble `url` in its raw form
pub fn build(url: &Url) -> Result<String> {
    url.raw()
}
