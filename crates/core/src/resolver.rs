use crate::{Spell, SpellCatalog};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpellStats {
    pub damage: f64,
    pub mana: f64,
}

impl SpellStats {
    /// Presentation rounding, half away from zero.
    pub fn rounded(self) -> (i64, i64) {
        (self.damage.round() as i64, self.mana.round() as i64)
    }
}

/// Catalog key for a modifier: the last whitespace-separated token of its word.
///
/// A modifier whose word contains spaces resolves to its final token only.
pub fn lookup_key(word: &str) -> &str {
    word.split_whitespace().next_back().unwrap_or(word)
}

/// Description lines for every layer with a catalog hit, outer modifiers
/// first and the base last. Misses contribute no line.
pub fn resolve_description(spell: &Spell, catalog: &SpellCatalog) -> Vec<String> {
    let mut lines = Vec::with_capacity(spell.node_count());
    for modifier in spell.modifiers() {
        let key = lookup_key(modifier.word());
        push_line(&mut lines, key, catalog);
    }
    push_line(&mut lines, &spell.base().display_name, catalog);
    lines
}

fn push_line(lines: &mut Vec<String>, key: &str, catalog: &SpellCatalog) {
    match catalog.find_by_name(key) {
        Some(entry) => lines.push(format!("{}: {}", key, entry.description)),
        None => debug!(key, "no catalog entry, omitting description line"),
    }
}

/// Final stats, folding modifier transforms from the innermost layer outwards.
pub fn resolve_stats(spell: &Spell) -> SpellStats {
    let base = spell.base();
    let layers: Vec<_> = spell.modifiers().collect();
    layers.iter().rev().fold(
        SpellStats {
            damage: base.damage,
            mana: base.mana,
        },
        |stats, modifier| {
            let transform = modifier.transform();
            SpellStats {
                damage: transform.apply_damage(stats.damage),
                mana: transform.apply_mana(stats.mana),
            }
        },
    )
}
