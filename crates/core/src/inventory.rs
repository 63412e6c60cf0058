use crate::Spell;
use tracing::{debug, info};

pub const SPELL_SLOTS: usize = 4;

/// Fixed-capacity spell slots. Empty slots are explicit so indices stay stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CasterInventory {
    slots: [Option<Spell>; SPELL_SLOTS],
}

impl CasterInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn capacity(&self) -> usize {
        SPELL_SLOTS
    }

    pub fn slots(&self) -> &[Option<Spell>] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&Spell> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Place `spell` at `index`, returning whatever occupied it.
    pub fn set(&mut self, index: usize, spell: Option<Spell>) -> Option<Option<Spell>> {
        let slot = self.slots.get_mut(index)?;
        Some(std::mem::replace(slot, spell))
    }

    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied() == SPELL_SLOTS
    }

    fn position_of(&self, display_name: &str) -> Option<usize> {
        self.slots.iter().position(|slot| {
            slot.as_ref()
                .is_some_and(|spell| spell.display_name() == display_name)
        })
    }

    fn first_empty(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentResult {
    Duplicate(usize),
    Inserted(usize),
    Full,
}

impl AssignmentResult {
    pub fn slot(self) -> Option<usize> {
        match self {
            AssignmentResult::Duplicate(slot) | AssignmentResult::Inserted(slot) => Some(slot),
            AssignmentResult::Full => None,
        }
    }
}

pub struct SlotAssigner;

impl SlotAssigner {
    /// Duplicates are checked before empty slots. Only `Inserted` mutates the
    /// inventory; otherwise `offered` is dropped.
    pub fn accept(inventory: &mut CasterInventory, offered: Spell) -> AssignmentResult {
        if let Some(slot) = inventory.position_of(offered.display_name()) {
            debug!(slot, name = offered.display_name(), "duplicate spell, skipping add");
            return AssignmentResult::Duplicate(slot);
        }
        let Some(slot) = inventory.first_empty() else {
            debug!(name = offered.display_name(), "all spell slots full");
            return AssignmentResult::Full;
        };
        info!(slot, name = offered.display_name(), "added spell");
        inventory.slots[slot] = Some(offered);
        AssignmentResult::Inserted(slot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BaseSpell, StatTransform};

    fn base(name: &str) -> Spell {
        BaseSpell::new(name, 0, 10.0, 5.0).into()
    }

    fn inventory_of(slots: [Option<Spell>; SPELL_SLOTS]) -> CasterInventory {
        let mut inventory = CasterInventory::new();
        for (idx, spell) in slots.into_iter().enumerate() {
            inventory.set(idx, spell);
        }
        inventory
    }

    #[test]
    fn duplicate_name_is_reported_without_mutation() {
        let mut inventory = inventory_of([Some(base("Fireball")), None, None, None]);
        let before = inventory.clone();
        let result = SlotAssigner::accept(&mut inventory, base("Fireball"));
        assert_eq!(result, AssignmentResult::Duplicate(0));
        assert_eq!(inventory, before);
    }

    #[test]
    fn inserts_into_first_gap() {
        let mut inventory = inventory_of([Some(base("A")), None, Some(base("B")), None]);
        let offered = base("C");
        let result = SlotAssigner::accept(&mut inventory, offered.clone());
        assert_eq!(result, AssignmentResult::Inserted(1));
        assert_eq!(
            inventory.slots(),
            &[Some(base("A")), Some(offered), Some(base("B")), None]
        );
    }

    #[test]
    fn full_inventory_rejects_without_mutation() {
        let mut inventory = inventory_of([
            Some(base("A")),
            Some(base("B")),
            Some(base("C")),
            Some(base("D")),
        ]);
        let before = inventory.clone();
        assert!(inventory.is_full());
        let result = SlotAssigner::accept(&mut inventory, base("E"));
        assert_eq!(result, AssignmentResult::Full);
        assert_eq!(result.slot(), None);
        assert_eq!(inventory, before);
    }

    #[test]
    fn duplicate_wins_over_full() {
        let mut inventory = inventory_of([
            Some(base("A")),
            Some(base("B")),
            Some(base("C")),
            Some(base("D")),
        ]);
        assert_eq!(
            SlotAssigner::accept(&mut inventory, base("C")),
            AssignmentResult::Duplicate(2)
        );
    }

    #[test]
    fn duplicate_uses_first_matching_slot() {
        let mut inventory = inventory_of([None, Some(base("A")), None, Some(base("A"))]);
        assert_eq!(
            SlotAssigner::accept(&mut inventory, base("A")),
            AssignmentResult::Duplicate(1)
        );
    }

    #[test]
    fn modified_spell_is_distinct_from_its_base() {
        let mut inventory = inventory_of([Some(base("Fireball")), None, None, None]);
        let chained = base("Fireball").wrap("Chain", StatTransform::IDENTITY);
        assert_eq!(
            SlotAssigner::accept(&mut inventory, chained),
            AssignmentResult::Inserted(1)
        );
        assert_eq!(
            inventory.get(1).map(Spell::display_name),
            Some("Chain Fireball")
        );
    }

    #[test]
    fn set_replaces_and_ignores_out_of_range() {
        let mut inventory = inventory_of([Some(base("A")), None, None, None]);
        assert_eq!(inventory.set(0, None), Some(Some(base("A"))));
        assert_eq!(inventory.occupied(), 0);
        assert_eq!(inventory.set(9, None), None);
        assert_eq!(inventory.capacity(), SPELL_SLOTS);
    }
}
