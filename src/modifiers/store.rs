//! Modifier store - the ordered, per-card modifier collection.
//!
//! One store is owned by (paired with) exactly one card. The sequence is
//! kept sorted by `priority()` after every insertion; the sort is stable,
//! so equal priorities preserve insertion order. Every mutating operation
//! ends with exactly one description recompute on each affected card.
//!
//! Removal sweeps are index-based rather than iterator-based so a removal
//! mid-sweep never skips or double-visits a neighbor.

use smallvec::SmallVec;

use crate::core::Card;

use super::modifier::{CardModifier, ModifierId};

pub(super) struct Entry {
    pub(super) id: ModifierId,
    pub(super) modifier: Box<dyn CardModifier>,
}

/// Ordered collection of modifiers attached to one card.
///
/// Most cards carry zero to a handful of modifiers, hence the inline
/// capacity.
#[derive(Default)]
pub struct ModifierStore {
    pub(super) entries: SmallVec<[Entry; 4]>,
    next_id: u64,
}

impl ModifierStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Number of attached modifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no modifiers are attached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate modifiers in store order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CardModifier> {
        self.entries.iter().map(|e| &*e.modifier)
    }

    /// Iterate `(id, modifier)` pairs in store order.
    pub fn iter_with_ids(&self) -> impl Iterator<Item = (ModifierId, &dyn CardModifier)> {
        self.entries.iter().map(|e| (e.id, &*e.modifier))
    }

    /// Look up one instance by its handle.
    #[must_use]
    pub fn get(&self, id: ModifierId) -> Option<&dyn CardModifier> {
        self.entries.iter().find(|e| e.id == id).map(|e| &*e.modifier)
    }

    /// Mutable lookup by handle.
    pub fn get_mut(&mut self, id: ModifierId) -> Option<&mut (dyn CardModifier + 'static)> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut *e.modifier)
    }

    /// Attach a modifier to `card`.
    ///
    /// Re-sorts the store (stable), fires `on_initial_application`, and
    /// recomputes the description. Duplicate identifiers are permitted;
    /// stacking is by design. Returns the handle for targeted removal.
    pub fn add(&mut self, card: &mut Card, modifier: Box<dyn CardModifier>) -> ModifierId {
        let id = ModifierId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, modifier });
        self.entries.sort_by_key(|e| e.modifier.priority());
        if let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) {
            entry.modifier.on_initial_application(card);
        }
        self.recompute_description(card);
        id
    }

    /// Remove exactly the instance behind `id`, if present and either
    /// non-inherent or `include_inherent` is set. Fires `on_remove`.
    ///
    /// No-op (returns false) on absent or protected instances; the
    /// description is recomputed either way.
    pub fn remove_specific(
        &mut self,
        card: &mut Card,
        id: ModifierId,
        include_inherent: bool,
    ) -> bool {
        let pos = self.entries.iter().position(|e| e.id == id);
        let mut removed = false;
        if let Some(idx) = pos {
            if include_inherent || !self.entries[idx].modifier.is_inherent(card) {
                let mut entry = self.entries.remove(idx);
                entry.modifier.on_remove(card);
                removed = true;
            }
        }
        self.recompute_description(card);
        removed
    }

    /// Remove every instance whose identifier equals `id` and passes the
    /// inherent gate. Fires `on_remove` per removed instance; one
    /// recompute at the end. Returns the number removed.
    pub fn remove_by_identifier(
        &mut self,
        card: &mut Card,
        id: &str,
        include_inherent: bool,
    ) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.entries.len() {
            let matches = {
                let m = &self.entries[i].modifier;
                m.identifier(card) == id && (include_inherent || !m.is_inherent(card))
            };
            if matches {
                let mut entry = self.entries.remove(i);
                entry.modifier.on_remove(card);
                removed += 1;
            } else {
                i += 1;
            }
        }
        self.recompute_description(card);
        removed
    }

    /// Remove every instance passing the inherent gate.
    pub fn remove_all(&mut self, card: &mut Card, include_inherent: bool) {
        self.remove_all_inner(card, include_inherent);
        self.recompute_description(card);
    }

    /// Clears without the trailing recompute, for callers that batch
    /// several mutations under a single recompute.
    fn remove_all_inner(&mut self, card: &mut Card, include_inherent: bool) {
        let mut i = 0;
        while i < self.entries.len() {
            if include_inherent || !self.entries[i].modifier.is_inherent(card) {
                let mut entry = self.entries.remove(i);
                entry.modifier.on_remove(card);
            } else {
                i += 1;
            }
        }
    }

    /// Check whether any attached modifier matches `id`.
    #[must_use]
    pub fn has(&self, card: &Card, id: &str) -> bool {
        self.entries.iter().any(|e| e.modifier.identifier(card) == id)
    }

    /// All modifiers matching `id`, in store order.
    #[must_use]
    pub fn query(&self, card: &Card, id: &str) -> Vec<&dyn CardModifier> {
        self.entries
            .iter()
            .filter(|e| e.modifier.identifier(card) == id)
            .map(|e| &*e.modifier)
            .collect()
    }

    /// Handles of all modifiers matching `id`, in store order.
    #[must_use]
    pub fn query_ids(&self, card: &Card, id: &str) -> Vec<ModifierId> {
        self.entries
            .iter()
            .filter(|e| e.modifier.identifier(card) == id)
            .map(|e| e.id)
            .collect()
    }

    /// Copy (or move) modifiers from one card's store onto another's.
    ///
    /// If `replace_existing`, the destination is first cleared (honoring
    /// `include_inherent`). Each source modifier passing the inherent
    /// gate is cloned via `make_copy` into the destination, firing
    /// `on_initial_application` there; with `remove_from_source` the
    /// original is removed first, firing `on_remove` on the source card.
    /// The destination is re-sorted once after the batch; each mutated
    /// card gets exactly one recompute, source before destination.
    #[allow(clippy::too_many_arguments)]
    pub fn copy_or_move(
        source: &mut ModifierStore,
        source_card: &mut Card,
        dest: &mut ModifierStore,
        dest_card: &mut Card,
        include_inherent: bool,
        replace_existing: bool,
        remove_from_source: bool,
    ) {
        if replace_existing {
            dest.remove_all_inner(dest_card, include_inherent);
        }
        let mut i = 0;
        while i < source.entries.len() {
            if !include_inherent && source.entries[i].modifier.is_inherent(source_card) {
                i += 1;
                continue;
            }
            let copy = source.entries[i].modifier.make_copy();
            if remove_from_source {
                let mut entry = source.entries.remove(i);
                entry.modifier.on_remove(source_card);
            } else {
                i += 1;
            }
            let id = ModifierId(dest.next_id);
            dest.next_id += 1;
            dest.entries.push(Entry { id, modifier: copy });
            if let Some(entry) = dest.entries.last_mut() {
                entry.modifier.on_initial_application(dest_card);
            }
        }
        dest.entries.sort_by_key(|e| e.modifier.priority());
        if remove_from_source {
            source.recompute_description(source_card);
        }
        dest.recompute_description(dest_card);
    }

    /// End-of-turn sweep: remove every modifier whose
    /// `remove_at_end_of_turn` returns true. Single recompute after.
    pub fn remove_end_of_turn(&mut self, card: &mut Card) {
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].modifier.remove_at_end_of_turn(card) {
                let mut entry = self.entries.remove(i);
                entry.modifier.on_remove(card);
            } else {
                i += 1;
            }
        }
        self.recompute_description(card);
    }

    /// On-play sweep: remove every modifier whose
    /// `remove_on_card_played` returns true. Single recompute after.
    pub fn remove_on_play(&mut self, card: &mut Card) {
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].modifier.remove_on_card_played(card) {
                let mut entry = self.entries.remove(i);
                entry.modifier.on_remove(card);
            } else {
                i += 1;
            }
        }
        self.recompute_description(card);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::EntityId;

    /// Minimal configurable modifier for container tests.
    #[derive(Clone)]
    struct Tag {
        id: &'static str,
        inherent: bool,
        priority: i32,
        ends_turn: bool,
    }

    impl Tag {
        fn new(id: &'static str) -> Self {
            Self {
                id,
                inherent: false,
                priority: 0,
                ends_turn: false,
            }
        }

        fn inherent(mut self) -> Self {
            self.inherent = true;
            self
        }

        fn with_priority(mut self, p: i32) -> Self {
            self.priority = p;
            self
        }

        fn ends_turn(mut self) -> Self {
            self.ends_turn = true;
            self
        }
    }

    impl CardModifier for Tag {
        fn identifier(&self, _card: &Card) -> &str {
            self.id
        }

        fn is_inherent(&self, _card: &Card) -> bool {
            self.inherent
        }

        fn priority(&self) -> i32 {
            self.priority
        }

        fn remove_at_end_of_turn(&self, _card: &Card) -> bool {
            self.ends_turn
        }

        fn on_initial_application(&mut self, card: &mut Card) {
            card.modify_state("applied", 1);
        }

        fn on_remove(&mut self, card: &mut Card) {
            card.modify_state("removed", 1);
        }

        fn modify_description(&self, text: String, _card: &Card) -> String {
            format!("{} [{}]", text, self.id)
        }

        fn make_copy(&self) -> Box<dyn CardModifier> {
            Box::new(self.clone())
        }
    }

    fn card() -> Card {
        Card::new(EntityId(1), "Strike", 1).with_raw_description("Deal 6 damage.")
    }

    fn ids(store: &ModifierStore, card: &Card) -> Vec<String> {
        store.iter().map(|m| m.identifier(card).to_string()).collect()
    }

    #[test]
    fn test_add_fires_hooks_and_recomputes() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Tag::new("echo")));

        assert_eq!(card.get_state("applied", 0), 1);
        assert_eq!(card.description, "Deal 6 damage. [echo]");
    }

    #[test]
    fn test_stable_sort_by_priority() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Tag::new("b").with_priority(1)));
        store.add(&mut card, Box::new(Tag::new("a").with_priority(-1)));
        store.add(&mut card, Box::new(Tag::new("c").with_priority(1)));
        store.add(&mut card, Box::new(Tag::new("d").with_priority(1)));

        // Equal priorities keep insertion order: b before c before d.
        assert_eq!(ids(&store, &card), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_remove_specific_respects_inherent() {
        let mut card = card();
        let mut store = ModifierStore::new();

        let id = store.add(&mut card, Box::new(Tag::new("core").inherent()));

        assert!(!store.remove_specific(&mut card, id, false));
        assert_eq!(store.len(), 1);
        assert_eq!(card.get_state("removed", 0), 0);

        assert!(store.remove_specific(&mut card, id, true));
        assert!(store.is_empty());
        assert_eq!(card.get_state("removed", 0), 1);
        assert_eq!(card.description, "Deal 6 damage.");
    }

    #[test]
    fn test_remove_specific_absent_is_noop() {
        let mut card = card();
        let mut store = ModifierStore::new();
        let id = store.add(&mut card, Box::new(Tag::new("echo")));
        store.remove_specific(&mut card, id, false);

        // Handle no longer present; second removal is a no-op.
        assert!(!store.remove_specific(&mut card, id, false));
    }

    #[test]
    fn test_remove_by_identifier_removes_stack() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Tag::new("echo")));
        store.add(&mut card, Box::new(Tag::new("echo")));
        store.add(&mut card, Box::new(Tag::new("other")));

        let removed = store.remove_by_identifier(&mut card, "echo", false);

        assert_eq!(removed, 2);
        assert_eq!(ids(&store, &card), vec!["other"]);
        assert_eq!(card.get_state("removed", 0), 2);
    }

    #[test]
    fn test_remove_all_inherent_gate() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Tag::new("core").inherent()));
        store.add(&mut card, Box::new(Tag::new("echo")));
        store.add(&mut card, Box::new(Tag::new("burn")));

        store.remove_all(&mut card, false);
        assert_eq!(ids(&store, &card), vec!["core"]);

        store.remove_all(&mut card, true);
        assert!(store.is_empty());
    }

    #[test]
    fn test_query_and_has_preserve_order() {
        let mut card = card();
        let mut store = ModifierStore::new();

        store.add(&mut card, Box::new(Tag::new("echo").with_priority(2)));
        store.add(&mut card, Box::new(Tag::new("echo").with_priority(-2)));

        assert!(store.has(&card, "echo"));
        assert!(!store.has(&card, "burn"));

        let found = store.query(&card, "echo");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].priority(), -2);
        assert_eq!(found[1].priority(), 2);
        assert_eq!(store.query_ids(&card, "echo").len(), 2);
    }

    #[test]
    fn test_end_of_turn_sweep() {
        let mut card = card();
        let mut store = ModifierStore::new();

        // Adjacent removable entries exercise the index discipline.
        store.add(&mut card, Box::new(Tag::new("a").ends_turn()));
        store.add(&mut card, Box::new(Tag::new("b").ends_turn()));
        store.add(&mut card, Box::new(Tag::new("keep")));
        store.add(&mut card, Box::new(Tag::new("c").ends_turn()));

        store.remove_end_of_turn(&mut card);

        assert_eq!(ids(&store, &card), vec!["keep"]);
        assert_eq!(card.get_state("removed", 0), 3);
        assert_eq!(card.description, "Deal 6 damage. [keep]");
    }

    #[test]
    fn test_copy_preserves_source() {
        let mut src_card = card();
        let mut dst_card = Card::new(EntityId(2), "Defend", 1).with_raw_description("Gain 5 Block.");
        let mut src = ModifierStore::new();
        let mut dst = ModifierStore::new();

        src.add(&mut src_card, Box::new(Tag::new("echo")));
        src.add(&mut src_card, Box::new(Tag::new("core").inherent()));

        ModifierStore::copy_or_move(
            &mut src, &mut src_card, &mut dst, &mut dst_card, false, false, false,
        );

        assert_eq!(src.len(), 2);
        assert_eq!(ids(&dst, &dst_card), vec!["echo"]);
        assert_eq!(dst_card.description, "Gain 5 Block. [echo]");
    }

    #[test]
    fn test_move_transfers_ownership() {
        let mut src_card = card();
        let mut dst_card = Card::new(EntityId(2), "Defend", 1);
        let mut src = ModifierStore::new();
        let mut dst = ModifierStore::new();

        src.add(&mut src_card, Box::new(Tag::new("echo")));
        src.add(&mut src_card, Box::new(Tag::new("burn")));

        ModifierStore::copy_or_move(
            &mut src, &mut src_card, &mut dst, &mut dst_card, true, false, true,
        );

        assert!(src.is_empty());
        assert_eq!(ids(&dst, &dst_card), vec!["echo", "burn"]);
        // on_remove fired on the source card, on_initial_application on dest.
        assert_eq!(src_card.get_state("removed", 0), 2);
        assert_eq!(dst_card.get_state("applied", 0), 2);
    }

    #[test]
    fn test_copy_with_replace_clears_dest_first() {
        let mut src_card = card();
        let mut dst_card = Card::new(EntityId(2), "Defend", 1);
        let mut src = ModifierStore::new();
        let mut dst = ModifierStore::new();

        src.add(&mut src_card, Box::new(Tag::new("echo")));
        dst.add(&mut dst_card, Box::new(Tag::new("stale")));

        ModifierStore::copy_or_move(
            &mut src, &mut src_card, &mut dst, &mut dst_card, false, true, false,
        );

        assert_eq!(ids(&dst, &dst_card), vec!["echo"]);
    }
}
