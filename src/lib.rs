//! # cardmod
//!
//! A pluggable card modifier engine: cards gain behavior through ordered
//! polymorphic attachments that intercept cost, damage, block,
//! description, playability, and lifecycle events, without the card's
//! own definition knowing about any specific modifier.
//!
//! ## Design Principles
//!
//! 1. **Closed capability interface**: every optional hook has a default
//!    no-op on the `CardModifier` trait; concrete behaviors implement
//!    only what they need.
//!
//! 2. **Deterministic order**: stores stay sorted by priority with
//!    stable insertion-order tie-breaks, and every dispatch walks that
//!    order. Transform folds make order semantically significant.
//!
//! 3. **No global registry**: modifier lookup is strictly per-card.
//!
//! 4. **Recompute-after-mutation**: every mutating store operation ends
//!    with exactly one description recompute per affected card.
//!
//! ## Modules
//!
//! - `core`: the card entity and the small collaborator types hooks see
//! - `modifiers`: the store, event dispatch, cost negotiation, and the
//!   persistence seam
//! - `error`: persistence-seam errors

pub mod core;
pub mod error;
pub mod modifiers;

// Re-export commonly used types
pub use crate::core::{Card, Color, DamageKind, EntityId, GroupId, PlayAction};

pub use crate::error::ModifierError;

pub use crate::modifiers::{
    CardModifier, ModifierFactory, ModifierId, ModifierRecord, ModifierStore,
};
