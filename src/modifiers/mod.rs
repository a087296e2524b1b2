//! Modifier system: pluggable behavioral attachments for cards.
//!
//! ## Key Types
//!
//! - `CardModifier`: the capability trait concrete behaviors implement
//! - `ModifierId`: per-store handle for targeted removal
//! - `ModifierStore`: ordered per-card collection with lifecycle dispatch,
//!   value-transform folds, and alternate-cost negotiation
//! - `ModifierRecord` / `ModifierFactory`: the persistence seam
//!
//! ## Dispatch shapes
//!
//! Lifecycle events fan out to every modifier in store order. Transform
//! events fold a value left-to-right through the list. `can_play_card`
//! is a short-circuit AND. Cost negotiation is two-phase: an
//! affordability check, then an ordered spend protocol (see `cost`).

pub mod cost;
pub mod dispatch;
pub mod modifier;
pub mod save;
pub mod store;

pub use modifier::{CardModifier, ModifierId};
pub use save::{ModifierFactory, ModifierRecord};
pub use store::ModifierStore;
