mod split;

pub use split::split_url;

use crate::error::Result;

/// Trait for types that can be parsed from URL strings
pub trait Parseable: Sized {
    /// Parse from input string
    fn parse(input: &str) -> Result<Self>;
}
