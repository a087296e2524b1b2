//! Card entity - the object modifiers attach to.
//!
//! `Card` carries the fields the modifier hook contract references:
//! cost, per-turn cost, description text, damage type, and a generic
//! state map for game-specific counters. It deliberately does NOT own
//! its `ModifierStore`; the store and the card are sibling objects so
//! that hooks can receive `&mut Card` while the store is mid-iteration.
//!
//! ## State Values (i64 only)
//!
//! The `state` field uses `FxHashMap<String, i64>`:
//! - Booleans: use 0/1
//! - Entity references: use EntityId.0 as i64

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Unique identifier for any game entity (card, creature, player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Create a new entity ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Opaque card-pile identifier. Games define what piles exist
/// (hand, draw, discard, exhaust); the engine doesn't interpret them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupId(pub u16);

impl GroupId {
    /// Create a new group ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Group({})", self.0)
    }
}

/// Damage type for the current turn, threaded through damage folds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DamageKind {
    #[default]
    Normal,
    Thorns,
    HpLoss,
}

/// RGBA tint passed through `replace_cost_string` unmodified.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
}

/// In-flight play context handed to `on_use` hooks.
///
/// Hooks may rewrite these fields to redirect or annotate the play
/// before the game resolves it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlayAction {
    /// The chosen target, if the play has one.
    pub target: Option<EntityId>,
    /// Whether the card should be exhausted after resolution.
    pub exhaust_card: bool,
}

impl PlayAction {
    /// Create a play action against an optional target.
    #[must_use]
    pub fn new(target: Option<EntityId>) -> Self {
        Self {
            target,
            exhaust_card: false,
        }
    }
}

/// A card in a game.
///
/// Mutable entity state visible to modifier hooks. The description pair
/// follows the original split: `raw_description` is authored by the
/// game's description engine, `description` is derived by folding every
/// attached modifier's `modify_description` over it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique entity ID for this card.
    pub entity_id: EntityId,

    /// Display name (for diagnostics).
    pub name: String,

    /// Printed cost.
    pub cost: i32,

    /// Effective cost for the current turn. Read-only from the engine's
    /// perspective; the game sets it each turn.
    pub cost_for_turn: i32,

    /// Raw description text, owned by the game's description engine.
    pub raw_description: String,

    /// Derived description after the modifier fold. Recomputed after
    /// every store mutation.
    pub description: String,

    /// Damage type for the current turn.
    pub damage_kind: DamageKind,

    /// Mutable card state (counters, flags, balances).
    #[serde(default)]
    pub state: FxHashMap<String, i64>,
}

impl Card {
    /// Create a card with the given costs and raw description.
    #[must_use]
    pub fn new(entity_id: EntityId, name: impl Into<String>, cost: i32) -> Self {
        Self {
            entity_id,
            name: name.into(),
            cost,
            cost_for_turn: cost,
            raw_description: String::new(),
            description: String::new(),
            damage_kind: DamageKind::Normal,
            state: FxHashMap::default(),
        }
    }

    /// Set the raw description (builder pattern).
    #[must_use]
    pub fn with_raw_description(mut self, text: impl Into<String>) -> Self {
        self.raw_description = text.into();
        self.description = self.raw_description.clone();
        self
    }

    /// Get a state value with a default.
    #[must_use]
    pub fn get_state(&self, key: &str, default: i64) -> i64 {
        self.state.get(key).copied().unwrap_or(default)
    }

    /// Set a state value.
    pub fn set_state(&mut self, key: impl Into<String>, value: i64) {
        self.state.insert(key.into(), value);
    }

    /// Modify a state value by delta.
    pub fn modify_state(&mut self, key: &str, delta: i64) {
        let current = self.get_state(key, 0);
        self.state.insert(key.to_string(), current + delta);
    }

    /// Check if a state flag is set (non-zero).
    #[must_use]
    pub fn has_flag(&self, key: &str) -> bool {
        self.get_state(key, 0) != 0
    }

    /// Set a boolean flag (1 for true, 0 for false).
    pub fn set_flag(&mut self, key: impl Into<String>, value: bool) {
        self.set_state(key, if value { 1 } else { 0 });
    }
}
