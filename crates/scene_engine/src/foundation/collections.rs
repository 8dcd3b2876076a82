//! Specialized collection types

pub use slotmap::{SlotMap, DefaultKey};

/// Handle-based map using slot map for stable references
pub type HandleMap<T> = SlotMap<DefaultKey, T>;

/// Handle type for stable references
///
/// Handles are copyable weak keys: a handle to a removed entry resolves to
/// `None` rather than to freed memory, which makes them the representation of
/// choice for non-owning back-references.
pub type Handle = DefaultKey;
