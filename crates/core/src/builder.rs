use crate::rng::pick_weighted;
use crate::{
    BaseSpell, BaseSpellDef, Caster, ModifierDef, RewardConfig, RngState, Spell, MAX_MODIFIERS,
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("no base spell is eligible for this caster")]
    NoEligibleBase,
}

/// Decides which catalog pieces may be offered to a caster.
pub trait OfferPolicy {
    fn allows_base(&self, _caster: &Caster, _base: &BaseSpell) -> bool {
        true
    }

    /// `current` is the chain built so far; `modifier` would wrap it.
    fn allows_modifier(&self, _caster: &Caster, _current: &Spell, _modifier: &ModifierDef) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl OfferPolicy for AllowAll {}

/// Each modifier word appears at most once in a chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistinctModifiers;

impl OfferPolicy for DistinctModifiers {
    fn allows_modifier(&self, _caster: &Caster, current: &Spell, modifier: &ModifierDef) -> bool {
        !current.has_modifier(&modifier.word)
    }
}

/// Bases whose scaled mana cost exceeds the caster's pool are never offered.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithinManaBudget;

impl OfferPolicy for WithinManaBudget {
    fn allows_base(&self, caster: &Caster, base: &BaseSpell) -> bool {
        base.mana <= caster.baseline.mana_pool
    }
}

impl<A: OfferPolicy, B: OfferPolicy> OfferPolicy for (A, B) {
    fn allows_base(&self, caster: &Caster, base: &BaseSpell) -> bool {
        self.0.allows_base(caster, base) && self.1.allows_base(caster, base)
    }

    fn allows_modifier(&self, caster: &Caster, current: &Spell, modifier: &ModifierDef) -> bool {
        self.0.allows_modifier(caster, current, modifier)
            && self.1.allows_modifier(caster, current, modifier)
    }
}

pub struct SpellBuilder<'a> {
    config: &'a RewardConfig,
    policy: &'a dyn OfferPolicy,
}

impl<'a> SpellBuilder<'a> {
    pub fn new(config: &'a RewardConfig, policy: &'a dyn OfferPolicy) -> Self {
        Self { config, policy }
    }

    /// Build a fresh offer for `caster`. The caster is only read.
    pub fn build(&self, caster: &Caster, rng: &mut RngState) -> Result<Spell, BuildError> {
        let bases: Vec<BaseSpell> = self
            .config
            .base_spells
            .iter()
            .map(|def| scaled_base(def, caster))
            .filter(|base| self.policy.allows_base(caster, base))
            .collect();
        let Some(idx) = rng.next_index(bases.len()) else {
            return Err(BuildError::NoEligibleBase);
        };
        let mut spell = Spell::Base(bases[idx].clone());

        let count = self.roll_modifier_count(rng);
        for _ in 0..count {
            let eligible: Vec<&ModifierDef> = self
                .config
                .modifiers
                .iter()
                .filter(|def| self.policy.allows_modifier(caster, &spell, def))
                .collect();
            let Some(idx) = rng.next_index(eligible.len()) else {
                debug!(
                    wanted = count,
                    built = spell.modifier_count(),
                    "no eligible modifier left"
                );
                break;
            };
            let def = eligible[idx];
            spell = spell.wrap(def.word.clone(), def.transform);
        }
        Ok(spell)
    }

    fn roll_modifier_count(&self, rng: &mut RngState) -> usize {
        pick_weighted(self.config.count_weights(), rng)
            .unwrap_or(0)
            .min(MAX_MODIFIERS)
    }
}

fn scaled_base(def: &BaseSpellDef, caster: &Caster) -> BaseSpell {
    BaseSpell::new(
        def.name.clone(),
        def.icon_index,
        def.damage * caster.baseline.damage_scale,
        def.mana * caster.baseline.mana_scale,
    )
}
