//! Cards and Team Modifiers
//!
//! Cards are the permanent upgrades a team picks on level-up. Every numeric
//! field of a card multiplies into the team's running multiplier, so effects
//! compound and never reset during a match; ability fields flip an unlock flag
//! on for good.
//!
//! ## Lookups
//!
//! Scoped multipliers (damage, health, range) are stored per
//! [`ModifierScope`]. The effective value for a class is the class row times
//! the `All` row, e.g. "Sharp Arrows" (archer ×1.2) plus "War Fury" (all ×1.15)
//! gives archers ×1.38.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::components::GameRng;
use crate::states::match_config::UnitClass;

/// Which classes a scoped multiplier applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModifierScope {
    All,
    Class(UnitClass),
}

/// A multiplier bound to a scope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScopedMultiplier {
    pub scope: ModifierScope,
    pub value: f32,
}

/// The effect payload of a card.
///
/// Every field is optional; absent fields leave the team untouched, so an
/// empty payload is a valid no-op card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardEffect {
    pub damage: Option<ScopedMultiplier>,
    pub health: Option<ScopedMultiplier>,
    pub range: Option<ScopedMultiplier>,
    pub speed: Option<f32>,
    pub attack_speed: Option<f32>,
    pub burn: Option<f32>,
    pub freeze_chance: Option<f32>,
    pub poison: Option<f32>,
    pub lifesteal: Option<f32>,
    pub splash: Option<f32>,
    pub crit: Option<f32>,
    pub thorns: Option<f32>,
    pub regen: Option<f32>,
    pub archer_fan: bool,
    pub swordsman_sweep: bool,
    pub knight_taunt: bool,
    pub mage_conflagration: bool,
}

impl CardEffect {
    /// Whether this effect unlocks any class ability
    pub fn unlocks_ability(&self) -> bool {
        self.archer_fan || self.swordsman_sweep || self.knight_taunt || self.mage_conflagration
    }
}

/// A selectable card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub effect: CardEffect,
}

/// Accumulated multipliers and unlocks for one team.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamModifiers {
    damage: HashMap<ModifierScope, f32>,
    health: HashMap<ModifierScope, f32>,
    range: HashMap<ModifierScope, f32>,
    pub speed: f32,
    pub attack_speed: f32,
    pub burn: f32,
    pub freeze_chance: f32,
    pub poison: f32,
    pub lifesteal: f32,
    pub splash: f32,
    pub crit: f32,
    pub thorns: f32,
    pub regen: f32,
    pub archer_fan: bool,
    pub swordsman_sweep: bool,
    pub knight_taunt: bool,
    pub mage_conflagration: bool,
    /// Ids of every card applied, in order
    pub applied_cards: Vec<u32>,
}

impl Default for TeamModifiers {
    fn default() -> Self {
        Self {
            damage: HashMap::new(),
            health: HashMap::new(),
            range: HashMap::new(),
            speed: 1.0,
            attack_speed: 1.0,
            burn: 1.0,
            freeze_chance: 1.0,
            poison: 1.0,
            lifesteal: 1.0,
            splash: 1.0,
            crit: 1.0,
            thorns: 1.0,
            regen: 1.0,
            archer_fan: false,
            swordsman_sweep: false,
            knight_taunt: false,
            mage_conflagration: false,
            applied_cards: Vec::new(),
        }
    }
}

fn compound(table: &mut HashMap<ModifierScope, f32>, multiplier: &ScopedMultiplier) {
    if multiplier.value.is_finite() && multiplier.value > 0.0 {
        *table.entry(multiplier.scope).or_insert(1.0) *= multiplier.value;
    }
}

fn compound_scalar(current: &mut f32, value: Option<f32>) {
    if let Some(value) = value.filter(|v| v.is_finite() && *v > 0.0) {
        *current *= value;
    }
}

fn scoped_lookup(table: &HashMap<ModifierScope, f32>, class: UnitClass) -> f32 {
    let class_row = table
        .get(&ModifierScope::Class(class.modifier_class()))
        .copied()
        .unwrap_or(1.0);
    let all_row = table.get(&ModifierScope::All).copied().unwrap_or(1.0);
    class_row * all_row
}

impl TeamModifiers {
    /// Fold a card into the team's modifiers.
    pub fn apply_card(&mut self, card: &Card) {
        self.apply_effect(&card.effect);
        self.applied_cards.push(card.id);
    }

    pub fn apply_effect(&mut self, effect: &CardEffect) {
        if let Some(m) = &effect.damage {
            compound(&mut self.damage, m);
        }
        if let Some(m) = &effect.health {
            compound(&mut self.health, m);
        }
        if let Some(m) = &effect.range {
            compound(&mut self.range, m);
        }
        compound_scalar(&mut self.speed, effect.speed);
        compound_scalar(&mut self.attack_speed, effect.attack_speed);
        compound_scalar(&mut self.burn, effect.burn);
        compound_scalar(&mut self.freeze_chance, effect.freeze_chance);
        compound_scalar(&mut self.poison, effect.poison);
        compound_scalar(&mut self.lifesteal, effect.lifesteal);
        compound_scalar(&mut self.splash, effect.splash);
        compound_scalar(&mut self.crit, effect.crit);
        compound_scalar(&mut self.thorns, effect.thorns);
        compound_scalar(&mut self.regen, effect.regen);

        self.archer_fan |= effect.archer_fan;
        self.swordsman_sweep |= effect.swordsman_sweep;
        self.knight_taunt |= effect.knight_taunt;
        self.mage_conflagration |= effect.mage_conflagration;
    }

    pub fn damage_multiplier(&self, class: UnitClass) -> f32 {
        scoped_lookup(&self.damage, class)
    }

    pub fn health_multiplier(&self, class: UnitClass) -> f32 {
        scoped_lookup(&self.health, class)
    }

    pub fn range_multiplier(&self, class: UnitClass) -> f32 {
        scoped_lookup(&self.range, class)
    }

    /// Whether applying this effect would unlock nothing new.
    ///
    /// Only meaningful for ability cards; numeric effects always stack.
    pub fn already_owns(&self, effect: &CardEffect) -> bool {
        effect.unlocks_ability()
            && (!effect.archer_fan || self.archer_fan)
            && (!effect.swordsman_sweep || self.swordsman_sweep)
            && (!effect.knight_taunt || self.knight_taunt)
            && (!effect.mage_conflagration || self.mage_conflagration)
    }

    /// Lifesteal fraction, or zero until the team owns any lifesteal.
    pub fn lifesteal_fraction(&self, base: f32) -> f32 {
        if self.lifesteal > 1.0 {
            base * self.lifesteal
        } else {
            0.0
        }
    }

    /// Thorns fraction, or zero until the team owns any thorns.
    pub fn thorns_fraction(&self, base: f32) -> f32 {
        if self.thorns > 1.0 {
            base * self.thorns
        } else {
            0.0
        }
    }
}

/// Draw `count` distinct cards uniformly, skipping ability cards the team
/// already owns.
pub fn offer_cards(
    catalog: &[Card],
    modifiers: &TeamModifiers,
    count: usize,
    rng: &mut GameRng,
) -> Vec<Card> {
    let eligible: Vec<Card> = catalog
        .iter()
        .filter(|card| !modifiers.already_owns(&card.effect))
        .cloned()
        .collect();
    rng.sample(&eligible, count)
}

fn card(id: u32, name: &str, description: &str, effect: CardEffect) -> Card {
    Card {
        id,
        name: name.to_string(),
        description: description.to_string(),
        effect,
    }
}

fn class(class: UnitClass, value: f32) -> Option<ScopedMultiplier> {
    Some(ScopedMultiplier {
        scope: ModifierScope::Class(class),
        value,
    })
}

fn all(value: f32) -> Option<ScopedMultiplier> {
    Some(ScopedMultiplier {
        scope: ModifierScope::All,
        value,
    })
}

/// The full card catalog.
pub fn card_catalog() -> Vec<Card> {
    use UnitClass::*;
    let none = CardEffect::default;

    vec![
        // Damage
        card(1, "Sharp Arrows", "+20% Archer damage", CardEffect { damage: class(Archer, 1.2), ..none() }),
        card(2, "Honed Blades", "+20% Swordsman damage", CardEffect { damage: class(Swordsman, 1.2), ..none() }),
        card(3, "Inferno Staff", "+20% Mage damage", CardEffect { damage: class(Mage, 1.2), ..none() }),
        card(4, "Heavy Strikes", "+20% Knight damage", CardEffect { damage: class(Knight, 1.2), ..none() }),
        card(5, "War Fury", "+15% all damage", CardEffect { damage: all(1.15), ..none() }),
        // Health
        card(6, "Thick Armor", "+25% Swordsman health", CardEffect { health: class(Swordsman, 1.25), ..none() }),
        card(7, "Fortress Shield", "+30% Knight health", CardEffect { health: class(Knight, 1.3), ..none() }),
        card(8, "Arcane Barrier", "+25% Mage health", CardEffect { health: class(Mage, 1.25), ..none() }),
        card(9, "Fortitude", "+15% all health", CardEffect { health: all(1.15), ..none() }),
        card(10, "Ranger Endurance", "+25% Archer health", CardEffect { health: class(Archer, 1.25), ..none() }),
        // Speed
        card(11, "Swift Feet", "+25% movement speed", CardEffect { speed: Some(1.25), ..none() }),
        card(12, "Battle Frenzy", "+20% attack speed", CardEffect { attack_speed: Some(1.2), ..none() }),
        card(
            13,
            "Lightning Reflexes",
            "+15% speed & attack speed",
            CardEffect { speed: Some(1.15), attack_speed: Some(1.15), ..none() },
        ),
        // Range
        card(14, "Eagle Eye", "+30% Archer range", CardEffect { range: class(Archer, 1.3), ..none() }),
        card(15, "Far Sight", "+30% Mage range", CardEffect { range: class(Mage, 1.3), ..none() }),
        card(16, "Extended Reach", "+20% all range", CardEffect { range: all(1.2), ..none() }),
        // More combat
        card(17, "Piercing Shots", "+25% Archer damage", CardEffect { damage: class(Archer, 1.25), ..none() }),
        card(18, "Arcane Power", "+25% Mage damage", CardEffect { damage: class(Mage, 1.25), ..none() }),
        card(19, "Iron Will", "+20% all health", CardEffect { health: all(1.2), ..none() }),
        card(
            20,
            "Bloodlust",
            "+25% damage, -10% health",
            CardEffect { damage: all(1.25), health: all(0.9), ..none() },
        ),
        card(21, "Sniper Training", "+40% Archer range", CardEffect { range: class(Archer, 1.4), ..none() }),
        // Status effects
        card(22, "Burning Weapons", "+10% burn damage on hit", CardEffect { burn: Some(1.1), ..none() }),
        card(23, "Frost Touch", "+15% freeze chance", CardEffect { freeze_chance: Some(1.15), ..none() }),
        card(24, "Poison Tips", "+10% poison damage on hit", CardEffect { poison: Some(1.1), ..none() }),
        card(25, "Vampiric Strike", "+20% lifesteal", CardEffect { lifesteal: Some(1.2), ..none() }),
        card(26, "Shattering Blow", "+15% splash damage", CardEffect { splash: Some(1.15), ..none() }),
        // Specials
        card(27, "Critical Mastery", "+15% crit chance", CardEffect { crit: Some(1.15), ..none() }),
        card(28, "Thorns Aura", "+15% thorns damage", CardEffect { thorns: Some(1.15), ..none() }),
        card(29, "Regeneration", "+20% regen rate", CardEffect { regen: Some(1.2), ..none() }),
        card(
            30,
            "Glass Cannon",
            "+40% damage, -20% health",
            CardEffect { damage: all(1.4), health: all(0.8), ..none() },
        ),
        card(31, "Berserker Rage", "+30% attack speed", CardEffect { attack_speed: Some(1.3), ..none() }),
        card(32, "Fortified Armor", "+30% Knight health", CardEffect { health: class(Knight, 1.3), ..none() }),
        card(33, "Deadly Precision", "+25% crit chance", CardEffect { crit: Some(1.25), ..none() }),
        card(34, "Infernal Touch", "+20% burn damage", CardEffect { burn: Some(1.2), ..none() }),
        card(35, "Arctic Chill", "+25% freeze chance", CardEffect { freeze_chance: Some(1.25), ..none() }),
        card(36, "Toxic Coating", "+20% poison damage", CardEffect { poison: Some(1.2), ..none() }),
        card(37, "Soul Drain", "+30% lifesteal", CardEffect { lifesteal: Some(1.3), ..none() }),
        card(38, "Explosive Force", "+25% splash damage", CardEffect { splash: Some(1.25), ..none() }),
        card(39, "Sword Mastery", "+30% Swordsman damage", CardEffect { damage: class(Swordsman, 1.3), ..none() }),
        card(40, "Knight's Valor", "+25% Knight damage", CardEffect { damage: class(Knight, 1.25), ..none() }),
        card(41, "Marathon Runner", "+35% movement speed", CardEffect { speed: Some(1.35), ..none() }),
        card(
            42,
            "Mage Supremacy",
            "+35% Mage damage, +20% range",
            CardEffect { damage: class(Mage, 1.35), range: class(Mage, 1.2), ..none() },
        ),
        // Ability unlocks
        card(
            43,
            "Arrow Storm",
            "Archers fire fan of 5 arrows every 5 attacks",
            CardEffect { archer_fan: true, ..none() },
        ),
        card(
            44,
            "Whirlwind Slash",
            "Swordsmen sweep all nearby enemies every 3 attacks",
            CardEffect { swordsman_sweep: true, ..none() },
        ),
        card(
            45,
            "Guardian's Call",
            "Knights taunt enemies and become invulnerable (6s cooldown)",
            CardEffect { knight_taunt: true, ..none() },
        ),
        card(
            46,
            "Conflagration",
            "Mages cause chain-reaction fire every 10 attacks",
            CardEffect { mage_conflagration: true, ..none() },
        ),
    ]
}

/// Look up a catalog card by id
pub fn find_card(catalog: &[Card], id: u32) -> Option<&Card> {
    catalog.iter().find(|card| card.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog_card(id: u32) -> Card {
        find_card(&card_catalog(), id).cloned().expect("card in catalog")
    }

    #[test]
    fn test_catalog_ids_are_unique_and_dense() {
        let catalog = card_catalog();
        assert_eq!(catalog.len(), 46);
        for (i, card) in catalog.iter().enumerate() {
            assert_eq!(card.id as usize, i + 1, "card ids should be 1..=46 in order");
            assert!(!card.name.is_empty());
        }
    }

    #[test]
    fn test_all_row_multiplies_class_row() {
        let mut mods = TeamModifiers::default();
        mods.apply_card(&catalog_card(1)); // archer 1.2
        mods.apply_card(&catalog_card(5)); // all 1.15
        assert!((mods.damage_multiplier(UnitClass::Archer) - 1.38).abs() < 1e-5);
        assert!((mods.damage_multiplier(UnitClass::Mage) - 1.15).abs() < 1e-5);
    }

    #[test]
    fn test_elites_share_host_rows() {
        let mut mods = TeamModifiers::default();
        mods.apply_card(&catalog_card(7)); // knight health 1.3
        assert!((mods.health_multiplier(UnitClass::Ogre) - 1.3).abs() < 1e-6);
        assert_eq!(mods.health_multiplier(UnitClass::Wraith), 1.0);
    }

    #[test]
    fn test_trade_off_cards_lower_health() {
        let mut mods = TeamModifiers::default();
        mods.apply_card(&catalog_card(30));
        assert!((mods.health_multiplier(UnitClass::Swordsman) - 0.8).abs() < 1e-6);
        assert!((mods.damage_multiplier(UnitClass::Swordsman) - 1.4).abs() < 1e-6);
    }

    #[test]
    fn test_empty_effect_is_noop() {
        let mut mods = TeamModifiers::default();
        mods.apply_effect(&CardEffect::default());
        assert_eq!(mods, TeamModifiers::default());
    }

    #[test]
    fn test_lifesteal_needs_a_card() {
        let mut mods = TeamModifiers::default();
        assert_eq!(mods.lifesteal_fraction(0.1), 0.0);
        mods.apply_card(&catalog_card(25));
        assert!((mods.lifesteal_fraction(0.1) - 0.12).abs() < 1e-6);
    }

    #[test]
    fn test_owned_ability_cards_are_not_offered() {
        let catalog = card_catalog();
        let mut mods = TeamModifiers::default();
        mods.apply_card(&catalog_card(43));
        let mut rng = GameRng::from_seed(7);
        for _ in 0..200 {
            let offer = offer_cards(&catalog, &mods, 3, &mut rng);
            assert_eq!(offer.len(), 3);
            assert!(offer.iter().all(|c| c.id != 43), "Arrow Storm offered twice");
            assert_ne!(offer[0].id, offer[1].id);
            assert_ne!(offer[1].id, offer[2].id);
            assert_ne!(offer[0].id, offer[2].id);
        }
    }
}
