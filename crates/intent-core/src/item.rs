//! # Storage Items
//!
//! Mapping between entities and key-value store items.
//!
//! An item is a flat map of attribute name to scalar JSON value. Each entity
//! type owns exactly one table, keyed by a hash attribute and optionally a
//! range attribute. Backends translate the flat map into their own attribute
//! representation (see `intent-dynamo`).

use crate::error::PaymentResult;

/// Flat attribute map as written to the key-value store
pub type Item = serde_json::Map<String, serde_json::Value>;

/// An entity that can be stored as a single key-value store item.
pub trait StorageItem: Sized {
    /// Table holding items of this type
    fn table_name() -> &'static str;

    /// Partition (hash) key attribute
    fn hash_name() -> &'static str;

    /// Sort (range) key attribute, `None` for single-key tables
    fn range_name() -> Option<&'static str>;

    /// Rebuild the entity from a stored item
    fn hydrate(item: Item) -> PaymentResult<Self>;

    /// Serialize the entity into a stored item
    fn output(&self) -> PaymentResult<Item>;

    /// Value of the hash key attribute for this entity
    fn hash_key(&self) -> String;
}
