//! Persistence seam for modifier stores.
//!
//! The engine does not define a save-file format. It exports each
//! card's modifiers as ordered `ModifierRecord`s (identifier plus an
//! opaque JSON payload) and rebuilds them through a game-supplied
//! `ModifierFactory`. Restoring goes through `ModifierStore::add`, so
//! `on_initial_application` fires and re-sorting runs exactly as it
//! would for a freshly attached modifier; order and identifiers
//! round-trip because the sort is stable.

use serde::{Deserialize, Serialize};

use crate::core::Card;
use crate::error::ModifierError;

use super::modifier::CardModifier;
use super::store::ModifierStore;

/// One saved modifier: its identifier and whatever state the modifier
/// chose to serialize. The engine never looks inside `payload`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModifierRecord {
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
}

/// Game-side reconstruction hook: build a live modifier from a record.
///
/// Typically backed by a match over the game's known identifiers.
pub trait ModifierFactory {
    fn build(&self, record: &ModifierRecord) -> Result<Box<dyn CardModifier>, ModifierError>;
}

impl ModifierStore {
    /// Export this card's modifiers as ordered save records.
    #[must_use]
    pub fn export_records(&self, card: &Card) -> Vec<ModifierRecord> {
        self.iter()
            .map(|m| ModifierRecord {
                identifier: m.identifier(card).to_string(),
                payload: m.save_payload(card),
            })
            .collect()
    }

    /// Rebuild modifiers from save records, in record order.
    ///
    /// Each record goes through the factory and then `add`, so lifecycle
    /// hooks fire normally. Stops at the first record the factory
    /// rejects; records already restored stay attached.
    pub fn restore(
        &mut self,
        card: &mut Card,
        records: &[ModifierRecord],
        factory: &dyn ModifierFactory,
    ) -> Result<(), ModifierError> {
        for record in records {
            let modifier = factory.build(record)?;
            self.add(card, modifier);
        }
        Ok(())
    }
}
