use serde::{Deserialize, Serialize};

/// Upper bound on modifier layers a built spell may carry.
pub const MAX_MODIFIERS: usize = 3;

/// Multiplicative-then-additive adjustment a modifier contributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatTransform {
    #[serde(default = "default_mult")]
    pub damage_mult: f64,
    #[serde(default)]
    pub damage_add: f64,
    #[serde(default = "default_mult")]
    pub mana_mult: f64,
    #[serde(default)]
    pub mana_add: f64,
}

fn default_mult() -> f64 {
    1.0
}

impl Default for StatTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl StatTransform {
    pub const IDENTITY: Self = Self {
        damage_mult: 1.0,
        damage_add: 0.0,
        mana_mult: 1.0,
        mana_add: 0.0,
    };

    pub fn apply_damage(&self, damage: f64) -> f64 {
        clamp_stat(damage * self.damage_mult + self.damage_add)
    }

    pub fn apply_mana(&self, mana: f64) -> f64 {
        clamp_stat(mana * self.mana_mult + self.mana_add)
    }
}

/// Stats are finite and never negative. Overflow saturates at `f64::MAX`;
/// NaN and negative values collapse to zero.
pub fn clamp_stat(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, f64::MAX)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BaseSpell {
    pub display_name: String,
    pub icon_index: u32,
    pub damage: f64,
    pub mana: f64,
}

impl BaseSpell {
    pub fn new(display_name: impl Into<String>, icon_index: u32, damage: f64, mana: f64) -> Self {
        Self {
            display_name: display_name.into(),
            icon_index,
            damage: clamp_stat(damage),
            mana: clamp_stat(mana),
        }
    }
}

/// A decorator around another spell.
///
/// `display_name` is composed once as `"<word> <inner display name>"`, so the
/// fields stay private to keep that composition true.
#[derive(Debug, Clone, PartialEq)]
pub struct ModifierSpell {
    word: String,
    display_name: String,
    inner: Box<Spell>,
    transform: StatTransform,
}

impl ModifierSpell {
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn inner(&self) -> &Spell {
        &self.inner
    }

    pub fn transform(&self) -> StatTransform {
        self.transform
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Spell {
    Base(BaseSpell),
    Modifier(ModifierSpell),
}

impl From<BaseSpell> for Spell {
    fn from(base: BaseSpell) -> Self {
        Spell::Base(base)
    }
}

impl Spell {
    /// Wrap `self` in a new outermost modifier layer.
    pub fn wrap(self, word: impl Into<String>, transform: StatTransform) -> Spell {
        let word = word.into();
        let display_name = format!("{} {}", word, self.display_name());
        Spell::Modifier(ModifierSpell {
            word,
            display_name,
            inner: Box::new(self),
            transform,
        })
    }

    pub fn display_name(&self) -> &str {
        match self {
            Spell::Base(base) => &base.display_name,
            Spell::Modifier(modifier) => &modifier.display_name,
        }
    }

    /// The terminal base spell at the end of the chain.
    pub fn base(&self) -> &BaseSpell {
        let mut cursor = self;
        loop {
            match cursor {
                Spell::Base(base) => return base,
                Spell::Modifier(modifier) => cursor = modifier.inner.as_ref(),
            }
        }
    }

    pub fn icon_index(&self) -> u32 {
        self.base().icon_index
    }

    /// Modifier layers, outermost first.
    pub fn modifiers(&self) -> Modifiers<'_> {
        Modifiers {
            cursor: Some(self),
        }
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers().count()
    }

    /// Total nodes in the chain, base included.
    pub fn node_count(&self) -> usize {
        self.modifier_count() + 1
    }

    pub fn has_modifier(&self, word: &str) -> bool {
        self.modifiers().any(|modifier| modifier.word == word)
    }
}

pub struct Modifiers<'a> {
    cursor: Option<&'a Spell>,
}

impl<'a> Iterator for Modifiers<'a> {
    type Item = &'a ModifierSpell;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor? {
            Spell::Base(_) => {
                self.cursor = None;
                None
            }
            Spell::Modifier(modifier) => {
                self.cursor = Some(modifier.inner.as_ref());
                Some(modifier)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fireball() -> Spell {
        BaseSpell::new("Fireball", 2, 10.0, 5.0).into()
    }

    #[test]
    fn wrap_prefixes_word_onto_inner_name() {
        let spell = fireball()
            .wrap("Chain", StatTransform::IDENTITY)
            .wrap("Twin", StatTransform::IDENTITY);
        assert_eq!(spell.display_name(), "Twin Chain Fireball");
        let words: Vec<&str> = spell.modifiers().map(|m| m.word()).collect();
        assert_eq!(words, vec!["Twin", "Chain"]);
        let names: Vec<&str> = spell.modifiers().map(|m| m.display_name()).collect();
        assert_eq!(names, vec!["Twin Chain Fireball", "Chain Fireball"]);
    }

    #[test]
    fn base_and_icon_come_from_terminal_node() {
        let spell = fireball().wrap("Chain", StatTransform::IDENTITY);
        assert_eq!(spell.base().display_name, "Fireball");
        assert_eq!(spell.icon_index(), 2);
        assert_eq!(spell.node_count(), 2);
        assert!(spell.has_modifier("Chain"));
        assert!(!spell.has_modifier("Fireball"));
    }

    #[test]
    fn base_spell_has_no_modifiers() {
        let spell = fireball();
        assert_eq!(spell.modifier_count(), 0);
        assert_eq!(spell.node_count(), 1);
    }

    #[test]
    fn inner_unwraps_one_layer() {
        let spell = fireball().wrap("Chain", StatTransform::IDENTITY);
        let Spell::Modifier(modifier) = &spell else {
            panic!("expected modifier");
        };
        assert_eq!(modifier.inner(), &fireball());
    }

    #[test]
    fn overflowing_transform_saturates_instead_of_zeroing() {
        let huge = StatTransform {
            damage_mult: f64::MAX,
            ..StatTransform::IDENTITY
        };
        assert_eq!(huge.apply_damage(10.0), f64::MAX);
        assert_eq!(huge.apply_mana(5.0), 5.0);
    }

    #[test]
    fn clamp_stat_rejects_negative_and_non_finite() {
        assert_eq!(clamp_stat(-3.0), 0.0);
        assert_eq!(clamp_stat(f64::NAN), 0.0);
        assert_eq!(clamp_stat(f64::INFINITY), f64::MAX);
        assert_eq!(clamp_stat(f64::NEG_INFINITY), 0.0);
        assert_eq!(clamp_stat(4.5), 4.5);
        let base = BaseSpell::new("Void", 0, -1.0, f64::NAN);
        assert_eq!((base.damage, base.mana), (0.0, 0.0));
    }
}
