//! Ordered, key-addressable collections and the runtime values they hold.
//!
//! `OrderedMap` is the only collection type the zip-map engine iterates.
//! Keys are integers or strings, iteration follows insertion order, and
//! appends pick the next free integer key. Values are a small tagged union
//! whose `Ref` variant models a by-reference slot shared between holders.

pub mod error;
pub mod json;
pub mod key;
pub mod map;
pub mod value;

pub use error::ValueError;
pub use json::{map_from_json, map_to_json, value_from_json, value_to_json};
pub use key::Key;
pub use map::OrderedMap;
pub use value::{SharedCell, Value};
