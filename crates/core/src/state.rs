use crate::CasterInventory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    Menu,
    Wave,
    WaveEnd,
    GameOver,
}

/// Multipliers and budget that generated rewards are scaled against.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatBaseline {
    pub damage_scale: f64,
    pub mana_scale: f64,
    pub mana_pool: f64,
}

impl Default for StatBaseline {
    fn default() -> Self {
        Self {
            damage_scale: 1.0,
            mana_scale: 1.0,
            mana_pool: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Caster {
    pub baseline: StatBaseline,
    pub inventory: CasterInventory,
}

impl Caster {
    pub fn new(baseline: StatBaseline) -> Self {
        Self {
            baseline,
            inventory: CasterInventory::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaveSummary {
    pub completed_wave: u32,
    pub next_wave: u32,
    pub enemies_killed: u32,
}

impl WaveSummary {
    pub fn after_wave(completed_wave: u32, enemies_killed: u32) -> Self {
        Self {
            completed_wave,
            next_wave: completed_wave.saturating_add(1),
            enemies_killed,
        }
    }
}
