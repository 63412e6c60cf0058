use crate::{StatTransform, MAX_MODIFIERS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PRESENTATION_DELAY: f32 = 0.25;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSpellDef {
    pub name: String,
    #[serde(default)]
    pub icon_index: u32,
    pub damage: f64,
    pub mana: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierDef {
    pub word: String,
    #[serde(flatten)]
    pub transform: StatTransform,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewardConfig {
    #[serde(default = "default_presentation_delay")]
    pub presentation_delay: f32,
    /// Weight of drawing `index` modifiers; entries past `MAX_MODIFIERS` are ignored.
    pub modifier_weights: Vec<u32>,
    pub base_spells: Vec<BaseSpellDef>,
    #[serde(default)]
    pub modifiers: Vec<ModifierDef>,
}

fn default_presentation_delay() -> f32 {
    DEFAULT_PRESENTATION_DELAY
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no base spells configured")]
    NoBaseSpells,
    #[error("modifier weights are all zero")]
    NoModifierWeights,
    #[error("presentation delay must be finite and non-negative, got {0}")]
    InvalidDelay(f32),
    #[error("blank spell name at base_spells[{0}]")]
    BlankBaseName(usize),
    #[error("blank modifier word at modifiers[{0}]")]
    BlankModifierWord(usize),
    #[error("base spell {name} has invalid {field}: {value}")]
    InvalidBaseStat {
        name: String,
        field: &'static str,
        value: f64,
    },
    #[error("modifier {word} has invalid {field}: {value}")]
    InvalidTransform {
        word: String,
        field: &'static str,
        value: f64,
    },
}

impl RewardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.presentation_delay.is_finite() || self.presentation_delay < 0.0 {
            return Err(ConfigError::InvalidDelay(self.presentation_delay));
        }
        if self.base_spells.is_empty() {
            return Err(ConfigError::NoBaseSpells);
        }
        if self.count_weights().all(|(_, weight)| weight == 0) {
            return Err(ConfigError::NoModifierWeights);
        }
        for (idx, def) in self.base_spells.iter().enumerate() {
            if def.name.trim().is_empty() {
                return Err(ConfigError::BlankBaseName(idx));
            }
            for (field, value) in [("damage", def.damage), ("mana", def.mana)] {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidBaseStat {
                        name: def.name.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        for (idx, def) in self.modifiers.iter().enumerate() {
            if def.word.trim().is_empty() {
                return Err(ConfigError::BlankModifierWord(idx));
            }
            let t = &def.transform;
            let fields = [
                ("damage_mult", t.damage_mult, true),
                ("damage_add", t.damage_add, false),
                ("mana_mult", t.mana_mult, true),
                ("mana_add", t.mana_add, false),
            ];
            for (field, value, must_be_non_negative) in fields {
                if !value.is_finite() || (must_be_non_negative && value < 0.0) {
                    return Err(ConfigError::InvalidTransform {
                        word: def.word.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// `(modifier count, weight)` pairs that the builder may draw from.
    pub fn count_weights(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.modifier_weights
            .iter()
            .copied()
            .enumerate()
            .take(MAX_MODIFIERS + 1)
    }
}
