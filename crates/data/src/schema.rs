pub use wavecast_core::{
    BaseSpellDef, ConfigError, ModifierDef, RewardConfig, SpellCatalog, SpellCatalogEntry,
    StatTransform,
};

pub const SPELLS_FILE: &str = "spells.json";
pub const REWARD_FILE: &str = "reward.json";
