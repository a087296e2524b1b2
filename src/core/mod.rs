//! Core entity types the modifier engine attaches to.
//!
//! The engine never interprets these beyond the fields named in the hook
//! contract; games own their meaning.

pub mod card;

pub use card::{Card, Color, DamageKind, EntityId, GroupId, PlayAction};
