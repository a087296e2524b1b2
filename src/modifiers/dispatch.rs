//! Event dispatch over a card's modifier store.
//!
//! Two shapes of dispatch, both strictly in store order:
//!
//! - **Fan-out**: lifecycle events invoke the hook on every modifier
//!   with no early exit and no return value.
//! - **Fold**: value-transform events thread the accumulator through the
//!   list; modifier i+1 sees modifier i's output, so the store's sort
//!   order is semantically significant.
//!
//! `can_play_card` is the one exception: a short-circuit AND that stops
//! at the first veto.

use std::any::Any;

use crate::core::{Card, Color, EntityId, GroupId, PlayAction};

use super::store::ModifierStore;

impl ModifierStore {
    /// Fan out `on_apply_powers` to every modifier.
    pub fn on_apply_powers(&mut self, card: &mut Card) {
        for entry in &mut self.entries {
            entry.modifier.on_apply_powers(card);
        }
    }

    /// Fan out `on_use` when the card is played.
    pub fn on_use(&mut self, card: &mut Card, target: Option<EntityId>, action: &mut PlayAction) {
        for entry in &mut self.entries {
            entry.modifier.on_use(card, target, action);
        }
    }

    /// Fan out `on_drawn`.
    pub fn on_drawn(&mut self, card: &mut Card) {
        for entry in &mut self.entries {
            entry.modifier.on_drawn(card);
        }
    }

    /// Fan out `on_exhausted`.
    pub fn on_exhausted(&mut self, card: &mut Card) {
        for entry in &mut self.entries {
            entry.modifier.on_exhausted(card);
        }
    }

    /// Fan out `on_discarded`.
    pub fn on_discarded(&mut self, card: &mut Card) {
        for entry in &mut self.entries {
            entry.modifier.on_discarded(card);
        }
    }

    /// Fan out `on_retained`.
    pub fn on_retained(&mut self, card: &mut Card) {
        for entry in &mut self.entries {
            entry.modifier.on_retained(card);
        }
    }

    /// Fan out `on_update`.
    pub fn on_update(&mut self, card: &mut Card) {
        for entry in &mut self.entries {
            entry.modifier.on_update(card);
        }
    }

    /// Fan out `on_render`. `surface` is the game's drawing context,
    /// passed through opaquely.
    pub fn on_render(&mut self, card: &Card, surface: &mut dyn Any) {
        for entry in &mut self.entries {
            entry.modifier.on_render(card, surface);
        }
    }

    /// Fan out `at_end_of_turn` for cards resting in `group`.
    pub fn at_end_of_turn(&mut self, card: &mut Card, group: GroupId) {
        for entry in &mut self.entries {
            entry.modifier.at_end_of_turn(card, group);
        }
    }

    /// Fan out `on_other_card_played`.
    pub fn on_other_card_played(&mut self, card: &mut Card, other: &Card, group: GroupId) {
        for entry in &mut self.entries {
            entry.modifier.on_other_card_played(card, other, group);
        }
    }

    /// Recompute the card's derived description: fold every modifier's
    /// `modify_description` over the raw text. Called by every mutating
    /// store operation; games call it directly after editing
    /// `raw_description`.
    pub fn recompute_description(&self, card: &mut Card) {
        let mut text = card.raw_description.clone();
        for entry in &self.entries {
            text = entry.modifier.modify_description(text, card);
        }
        card.description = text;
    }

    /// Fold `modify_damage` over the store. The card's current damage
    /// kind is threaded through unchanged.
    pub fn modify_damage(&mut self, mut damage: f32, card: &Card, target: Option<EntityId>) -> f32 {
        let kind = card.damage_kind;
        for entry in &mut self.entries {
            damage = entry.modifier.modify_damage(damage, kind, card, target);
        }
        damage
    }

    /// Fold `modify_damage_final` over the store.
    pub fn modify_damage_final(
        &mut self,
        mut damage: f32,
        card: &Card,
        target: Option<EntityId>,
    ) -> f32 {
        let kind = card.damage_kind;
        for entry in &mut self.entries {
            damage = entry.modifier.modify_damage_final(damage, kind, card, target);
        }
        damage
    }

    /// Fold `modify_block` over the store.
    pub fn modify_block(&mut self, mut block: f32, card: &Card) -> f32 {
        for entry in &mut self.entries {
            block = entry.modifier.modify_block(block, card);
        }
        block
    }

    /// Fold `modify_block_final` over the store.
    pub fn modify_block_final(&mut self, mut block: f32, card: &Card) -> f32 {
        for entry in &mut self.entries {
            block = entry.modifier.modify_block_final(block, card);
        }
        block
    }

    /// Fold `replace_cost_string` over the store, producing the cost
    /// text to display.
    pub fn cost_string(&self, card: &Card, mut current: String, color: &Color) -> String {
        for entry in &self.entries {
            current = entry.modifier.replace_cost_string(card, current, color);
        }
        current
    }

    /// Ask every modifier whether the card may be played. Returns false
    /// on the first veto without consulting the rest.
    #[must_use]
    pub fn can_play_card(&self, card: &Card) -> bool {
        for entry in &self.entries {
            if !entry.modifier.can_play_card(card) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::core::{DamageKind, EntityId};
    use crate::modifiers::CardModifier;

    /// Applies `damage * mult + add` so fold order is observable.
    #[derive(Clone)]
    struct Arith {
        id: &'static str,
        mult: f32,
        add: f32,
    }

    impl CardModifier for Arith {
        fn identifier(&self, _card: &Card) -> &str {
            self.id
        }

        fn modify_damage(
            &mut self,
            damage: f32,
            _kind: DamageKind,
            _card: &Card,
            _target: Option<EntityId>,
        ) -> f32 {
            damage * self.mult + self.add
        }

        fn modify_block(&mut self, block: f32, _card: &Card) -> f32 {
            block + self.add
        }

        fn make_copy(&self) -> Box<dyn CardModifier> {
            Box::new(self.clone())
        }
    }

    #[derive(Clone)]
    struct Veto {
        allows: bool,
        asked: Rc<Cell<u32>>,
    }

    impl CardModifier for Veto {
        fn identifier(&self, _card: &Card) -> &str {
            "veto"
        }

        fn can_play_card(&self, _card: &Card) -> bool {
            self.asked.set(self.asked.get() + 1);
            self.allows
        }

        fn make_copy(&self) -> Box<dyn CardModifier> {
            Box::new(self.clone())
        }
    }

    #[derive(Clone)]
    struct Tally;

    impl CardModifier for Tally {
        fn identifier(&self, _card: &Card) -> &str {
            "tally"
        }

        fn on_drawn(&mut self, card: &mut Card) {
            card.modify_state("drawn", 1);
        }

        fn on_discarded(&mut self, card: &mut Card) {
            card.modify_state("discarded", 1);
        }

        fn on_render(&mut self, _card: &Card, surface: &mut dyn Any) {
            if let Some(log) = surface.downcast_mut::<Vec<String>>() {
                log.push("tally".to_string());
            }
        }

        fn make_copy(&self) -> Box<dyn CardModifier> {
            Box::new(Tally)
        }
    }

    fn card() -> Card {
        Card::new(EntityId(1), "Strike", 1)
    }

    #[test]
    fn test_damage_fold_is_left_to_right() {
        let mut card = card();
        let mut store = ModifierStore::new();

        // A doubles, B adds 3. A-then-B must give (6*2)+3, not (6+3)*2.
        store.add(&mut card, Box::new(Arith { id: "a", mult: 2.0, add: 0.0 }));
        store.add(&mut card, Box::new(Arith { id: "b", mult: 1.0, add: 3.0 }));

        assert_eq!(store.modify_damage(6.0, &card, None), 15.0);
    }

    #[test]
    fn test_block_fold_accumulates() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Arith { id: "a", mult: 1.0, add: 2.0 }));
        store.add(&mut card, Box::new(Arith { id: "b", mult: 1.0, add: 4.0 }));

        assert_eq!(store.modify_block(5.0, &card), 11.0);
    }

    #[test]
    fn test_can_play_short_circuits_after_first_veto() {
        let mut card = card();
        let mut store = ModifierStore::new();

        let first = Rc::new(Cell::new(0));
        let second = Rc::new(Cell::new(0));
        let third = Rc::new(Cell::new(0));

        store.add(&mut card, Box::new(Veto { allows: true, asked: first.clone() }));
        store.add(&mut card, Box::new(Veto { allows: false, asked: second.clone() }));
        store.add(&mut card, Box::new(Veto { allows: true, asked: third.clone() }));

        assert!(!store.can_play_card(&card));
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
        assert_eq!(third.get(), 0);
    }

    #[test]
    fn test_can_play_all_agree() {
        let mut card = card();
        let mut store = ModifierStore::new();

        let asked = Rc::new(Cell::new(0));
        store.add(&mut card, Box::new(Veto { allows: true, asked: asked.clone() }));

        assert!(store.can_play_card(&card));
        assert_eq!(asked.get(), 1);
    }

    #[test]
    fn test_fanout_reaches_every_modifier() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Tally));
        store.add(&mut card, Box::new(Tally));

        store.on_drawn(&mut card);
        store.on_drawn(&mut card);
        store.on_discarded(&mut card);

        assert_eq!(card.get_state("drawn", 0), 4);
        assert_eq!(card.get_state("discarded", 0), 2);
    }

    #[test]
    fn test_render_surface_passed_through() {
        let mut card = card();
        let mut store = ModifierStore::new();
        store.add(&mut card, Box::new(Tally));

        let mut log: Vec<String> = Vec::new();
        store.on_render(&card, &mut log);

        assert_eq!(log, vec!["tally"]);
    }

    #[test]
    fn test_cost_string_fold() {
        struct Free;
        impl CardModifier for Free {
            fn identifier(&self, _card: &Card) -> &str {
                "free"
            }
            fn replace_cost_string(&self, _card: &Card, _current: String, _color: &Color) -> String {
                "0".to_string()
            }
            fn make_copy(&self) -> Box<dyn CardModifier> {
                Box::new(Free)
            }
        }

        let mut card = card();
        let mut store = ModifierStore::new();
        store.add(&mut card, Box::new(Free));

        let shown = store.cost_string(&card, "1".to_string(), &Color::WHITE);
        assert_eq!(shown, "0");
    }
}
