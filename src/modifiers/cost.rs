//! Alternate-resource cost negotiation.
//!
//! Modifiers may offer a resource other than energy to pay a card's
//! cost. An offer is *splittable* (combines additively with other
//! splittable offers plus energy) or not (must alone cover the full
//! cost), and sits in the *pre* or *post* tier (spent before or after
//! energy).
//!
//! Resolution is two-phase: an affordability check first, then the spend
//! protocol. The spend protocol assumes the check already succeeded; if
//! it still runs out of resources that is a caller-sequencing or
//! modifier-accounting defect, reported as a warning rather than a
//! failure so the play never dies mid-spend.

use tracing::warn;

use crate::core::Card;

use super::store::ModifierStore;

impl ModifierStore {
    /// Check whether the card's cost can be paid using energy plus
    /// alternate resources.
    ///
    /// The card is affordable when energy plus the sum of splittable
    /// offers exceeds `cost_for_turn`, or when a single non-splittable
    /// offer does.
    ///
    /// Note the non-splittable scan carries `amt` as a running maximum
    /// baseline: each offer is compared against the best total seen so
    /// far, not against the original energy+splittable sum. That
    /// comparison order is load-bearing legacy behavior; see the
    /// documented test before changing it.
    #[must_use]
    pub fn has_enough_alternate_cost(&self, card: &Card, energy: i32) -> bool {
        let mut amt = energy;
        for entry in &self.entries {
            if entry.modifier.can_split_cost(card) {
                let c = entry.modifier.get_alternate_resource(card);
                if c > -1 {
                    amt += c;
                }
            }
        }
        if amt > card.cost_for_turn {
            return true;
        }
        for entry in &self.entries {
            if entry.modifier.can_split_cost(card) {
                continue;
            }
            let c = entry.modifier.get_alternate_resource(card);
            if c > amt {
                amt = c;
                if amt > card.cost_for_turn {
                    return true;
                }
            }
        }
        false
    }

    /// Largest single pre-tier offer. Advisory, for cost-display strings
    /// only; a max across the tier, never a sum.
    #[must_use]
    pub fn pre_energy_amount(&self, card: &Card) -> i32 {
        let mut tmp = 0;
        for entry in &self.entries {
            if entry.modifier.prioritize_alternate_cost(card) {
                tmp = tmp.max(entry.modifier.get_alternate_resource(card));
            }
        }
        tmp
    }

    /// Largest single post-tier offer. Advisory only.
    #[must_use]
    pub fn post_energy_amount(&self, card: &Card) -> i32 {
        let mut tmp = 0;
        for entry in &self.entries {
            if !entry.modifier.prioritize_alternate_cost(card) {
                tmp = tmp.max(entry.modifier.get_alternate_resource(card));
            }
        }
        tmp
    }

    /// Sum of all splittable offers, both tiers. Advisory only.
    #[must_use]
    pub fn splittable_amount(&self, card: &Card) -> i32 {
        let mut tmp = 0;
        for entry in &self.entries {
            if entry.modifier.can_split_cost(card) {
                let c = entry.modifier.get_alternate_resource(card);
                if c > -1 {
                    tmp += c;
                }
            }
        }
        tmp
    }

    /// Spend phase, pre tier, whole-cost resources: the first pre-tier
    /// modifier whose offer covers the full `cost_for_turn` pays it and
    /// the scan stops. Only one resource may cover the whole cost this
    /// way.
    pub fn spend_pre_energy_resource(&mut self, card: &mut Card) {
        let cost = card.cost_for_turn;
        for entry in &mut self.entries {
            if entry.modifier.prioritize_alternate_cost(card) {
                let c = entry.modifier.get_alternate_resource(card);
                if c >= cost {
                    entry.modifier.spend_alternate_cost(card, cost);
                    return;
                }
            }
        }
    }

    /// Spend phase, post tier, whole-cost resources.
    pub fn spend_post_energy_resource(&mut self, card: &mut Card) {
        let cost = card.cost_for_turn;
        for entry in &mut self.entries {
            if !entry.modifier.prioritize_alternate_cost(card) {
                let c = entry.modifier.get_alternate_resource(card);
                if c >= cost {
                    entry.modifier.spend_alternate_cost(card, cost);
                    return;
                }
            }
        }
    }

    /// Spend phase, pre tier, splittable resources: starting from the
    /// full `cost_for_turn`, each pre-tier splittable modifier deducts
    /// its share and returns the new remainder; the scan stops once the
    /// remainder reaches zero. Returns the cost still outstanding, which
    /// the caller covers with energy and then the post tier.
    pub fn spend_pre_energy_splittable_resource(&mut self, card: &mut Card) -> i32 {
        let mut remaining = card.cost_for_turn;
        for entry in &mut self.entries {
            if entry.modifier.prioritize_alternate_cost(card)
                && entry.modifier.can_split_cost(card)
            {
                remaining = entry.modifier.spend_alternate_cost(card, remaining);
                if remaining <= 0 {
                    break;
                }
            }
        }
        remaining
    }

    /// Spend phase, post tier, splittable resources. Runs last; by the
    /// time it finishes affordability guarantees the remainder is gone.
    /// A positive remainder after exhausting the tier means the check
    /// and the spend disagreed - reported, not fatal, and the remainder
    /// is returned so the caller can keep its accounts consistent.
    pub fn spend_post_energy_splittable_resource(
        &mut self,
        card: &mut Card,
        mut remaining: i32,
    ) -> i32 {
        for entry in &mut self.entries {
            if !entry.modifier.prioritize_alternate_cost(card)
                && entry.modifier.can_split_cost(card)
            {
                remaining = entry.modifier.spend_alternate_cost(card, remaining);
                if remaining <= 0 {
                    return remaining;
                }
            }
        }
        warn!(
            card = %card.name,
            remaining,
            "splittable resources spent without covering the cost"
        );
        remaining
    }
}
