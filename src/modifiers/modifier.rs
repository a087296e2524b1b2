//! The `CardModifier` capability trait.
//!
//! A modifier is a unit of pluggable behavior attached to exactly one
//! card at a time. Every hook defaults to a no-op (or neutral value), so
//! concrete modifiers implement only what they need. Behaviors are
//! authored by games; the engine only dispatches.

use std::any::Any;

use serde::{Deserialize, Serialize};

use crate::core::{Card, Color, DamageKind, EntityId, GroupId, PlayAction};

/// Handle to a specific modifier instance within one store.
///
/// Allocated by `ModifierStore::add`; never reused within a store.
/// Identifiers are intentionally non-unique (stacking), so targeted
/// removal of one instance goes through its `ModifierId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierId(pub u64);

impl ModifierId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ModifierId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Modifier({})", self.0)
    }
}

/// A pluggable behavioral attachment for a card.
///
/// ## Contract
///
/// - `identifier` groups instances for query/removal; multiple instances
///   may share one identifier to represent stacking.
/// - `priority` is the ordering key: stores sort ascending, ties broken
///   by insertion order (stable). Transform folds run in exactly this
///   order, so priority is semantically significant.
/// - `make_copy` must produce a fully independent clone sharing no
///   mutable state with the original; copy/move between cards relies on
///   this.
/// - Hooks run synchronously and must not block. A hook must not touch
///   the store it is being dispatched from (it only receives the card,
///   which makes that impossible by construction).
pub trait CardModifier {
    /// Identifier grouping this modifier for query and removal.
    /// Not required to be unique on a card.
    fn identifier(&self, card: &Card) -> &str;

    /// Inherent modifiers survive removal unless the caller passes the
    /// `include_inherent` override.
    fn is_inherent(&self, _card: &Card) -> bool {
        false
    }

    /// Ordering key. Lower values sort first; equal values keep
    /// insertion order.
    fn priority(&self) -> i32 {
        0
    }

    /// Independent deep clone. Both copies may diverge afterwards
    /// without affecting each other.
    fn make_copy(&self) -> Box<dyn CardModifier>;

    // === Lifecycle hooks ===

    /// Fired once when this modifier is added to a store.
    fn on_initial_application(&mut self, _card: &mut Card) {}

    /// Fired once when this modifier is removed from a store, before the
    /// instance is dropped.
    fn on_remove(&mut self, _card: &mut Card) {}

    /// Return true to be removed by the end-of-turn sweep.
    fn remove_at_end_of_turn(&self, _card: &Card) -> bool {
        false
    }

    /// Return true to be removed by the on-play sweep.
    fn remove_on_card_played(&self, _card: &Card) -> bool {
        false
    }

    /// Fired when the game recalculates power-derived card numbers.
    fn on_apply_powers(&mut self, _card: &mut Card) {}

    /// Fired when the card is played, before resolution.
    fn on_use(&mut self, _card: &mut Card, _target: Option<EntityId>, _action: &mut PlayAction) {}

    /// Fired when the card is drawn.
    fn on_drawn(&mut self, _card: &mut Card) {}

    /// Fired when the card is exhausted.
    fn on_exhausted(&mut self, _card: &mut Card) {}

    /// Fired when the card is discarded.
    fn on_discarded(&mut self, _card: &mut Card) {}

    /// Fired when the card is retained at end of turn.
    fn on_retained(&mut self, _card: &mut Card) {}

    /// Fired every frame the card is live.
    fn on_update(&mut self, _card: &mut Card) {}

    /// Fired at a fixed point in the draw cycle. `surface` is the game's
    /// drawing context, passed through opaquely.
    fn on_render(&mut self, _card: &Card, _surface: &mut dyn Any) {}

    /// Fired at end of turn for cards in `group`.
    fn at_end_of_turn(&mut self, _card: &mut Card, _group: GroupId) {}

    /// Fired when another card is played while this card sits in `group`.
    fn on_other_card_played(&mut self, _card: &mut Card, _other: &Card, _group: GroupId) {}

    // === Transform hooks (value-threading) ===

    /// Rewrite the card's description text. Receives the previous
    /// modifier's output.
    fn modify_description(&self, text: String, _card: &Card) -> String {
        text
    }

    /// Rewrite damage during the normal damage pass.
    fn modify_damage(
        &mut self,
        damage: f32,
        _kind: DamageKind,
        _card: &Card,
        _target: Option<EntityId>,
    ) -> f32 {
        damage
    }

    /// Rewrite damage after all normal passes (last word).
    fn modify_damage_final(
        &mut self,
        damage: f32,
        _kind: DamageKind,
        _card: &Card,
        _target: Option<EntityId>,
    ) -> f32 {
        damage
    }

    /// Rewrite block during the normal block pass.
    fn modify_block(&mut self, block: f32, _card: &Card) -> f32 {
        block
    }

    /// Rewrite block after all normal passes.
    fn modify_block_final(&mut self, block: f32, _card: &Card) -> f32 {
        block
    }

    /// Rewrite the cost string shown on the card. `color` is the display
    /// tint, passed through opaquely.
    fn replace_cost_string(&self, _card: &Card, current: String, _color: &Color) -> String {
        current
    }

    // === Gating ===

    /// Veto playing the card. The first `false` short-circuits the scan.
    fn can_play_card(&self, _card: &Card) -> bool {
        true
    }

    // === Alternate-cost negotiation ===

    /// Amount of alternate resource this modifier offers for paying the
    /// card's cost. Negative means "not offering any resource".
    fn get_alternate_resource(&self, _card: &Card) -> i32 {
        -1
    }

    /// Whether this modifier's resource combines additively with other
    /// splittable resources. Non-splittable resources must alone cover
    /// the full cost.
    fn can_split_cost(&self, _card: &Card) -> bool {
        false
    }

    /// Tier: `true` = spent before the default currency, `false` = after.
    fn prioritize_alternate_cost(&self, _card: &Card) -> bool {
        false
    }

    /// Deduct up to `amount` from this modifier's resource; return the
    /// cost still outstanding after the deduction.
    fn spend_alternate_cost(&mut self, _card: &mut Card, amount: i32) -> i32 {
        amount
    }

    // === Persistence ===

    /// Opaque save payload, re-fed to the game's factory on load.
    /// `None` means the modifier is stateless beyond its identifier.
    fn save_payload(&self, _card: &Card) -> Option<serde_json::Value> {
        None
    }
}
