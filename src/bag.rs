use crate::compat::String;
use crate::error::Result;

/// Output form of a serialized component or URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rendering {
    /// Characters exactly as stored
    #[default]
    Raw,
    /// Every key, value and segment percent-encoded
    Encoded,
}

/// Common interface of the path and query component stores.
///
/// Both stores are plain owned collections; `&Bag` is the read-only
/// capability and `&mut Bag` the editable one.
pub trait Bag {
    /// Lookup key: a position for paths, a name for queries
    type Key: ?Sized;
    /// Stored element
    type Value: ?Sized;

    // Accessors

    /// Number of top-level entries
    fn len(&self) -> usize;

    /// Check if the store holds nothing
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if `key` addresses an entry
    fn has(&self, key: &Self::Key) -> bool;

    /// Get the entry at `key`, or [`crate::UrlError::ComponentNotFound`]
    fn get(&self, key: &Self::Key) -> Result<&Self::Value>;

    // Mutators

    /// Reset the store to empty
    fn forget_all(&mut self) -> &mut Self;

    // Serializer

    /// Render the store; empty stores render as `""`
    fn serialize(&self, rendering: Rendering) -> String;
}
