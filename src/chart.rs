//! Type-effectiveness computation: the fixed attacking × defending chart,
//! the sparse ability modifier table, and the combined per-species multiplier.

use crate::types::{normalize_name, PokemonType};

/// Base chart multiplier for one attacking type against one defending type.
///
/// Values are drawn from {0.0, 0.5, 1.0, 2.0}.
pub fn base_multiplier(attacking: PokemonType, defending: PokemonType) -> f64 {
    use PokemonType::*;

    match (attacking, defending) {
        // Normal
        (Normal, Ghost) => 0.0,
        (Normal, Rock) | (Normal, Steel) => 0.5,
        (Normal, _) => 1.0,

        // Fire
        (Fire, Grass) | (Fire, Ice) | (Fire, Bug) | (Fire, Steel) => 2.0,
        (Fire, Fire) | (Fire, Water) | (Fire, Rock) | (Fire, Dragon) => 0.5,
        (Fire, _) => 1.0,

        // Water
        (Water, Fire) | (Water, Ground) | (Water, Rock) => 2.0,
        (Water, Water) | (Water, Grass) | (Water, Dragon) => 0.5,
        (Water, _) => 1.0,

        // Electric
        (Electric, Ground) => 0.0,
        (Electric, Water) | (Electric, Flying) => 2.0,
        (Electric, Electric) | (Electric, Grass) | (Electric, Dragon) => 0.5,
        (Electric, _) => 1.0,

        // Grass
        (Grass, Water) | (Grass, Ground) | (Grass, Rock) => 2.0,
        (Grass, Fire)
        | (Grass, Grass)
        | (Grass, Poison)
        | (Grass, Flying)
        | (Grass, Bug)
        | (Grass, Dragon)
        | (Grass, Steel) => 0.5,
        (Grass, _) => 1.0,

        // Ice
        (Ice, Grass) | (Ice, Ground) | (Ice, Flying) | (Ice, Dragon) => 2.0,
        (Ice, Fire) | (Ice, Water) | (Ice, Ice) | (Ice, Steel) => 0.5,
        (Ice, _) => 1.0,

        // Fighting
        (Fighting, Ghost) => 0.0,
        (Fighting, Normal)
        | (Fighting, Ice)
        | (Fighting, Rock)
        | (Fighting, Dark)
        | (Fighting, Steel) => 2.0,
        (Fighting, Poison)
        | (Fighting, Flying)
        | (Fighting, Psychic)
        | (Fighting, Bug)
        | (Fighting, Fairy) => 0.5,
        (Fighting, _) => 1.0,

        // Poison
        (Poison, Steel) => 0.0,
        (Poison, Grass) | (Poison, Fairy) => 2.0,
        (Poison, Poison) | (Poison, Ground) | (Poison, Rock) | (Poison, Ghost) => 0.5,
        (Poison, _) => 1.0,

        // Ground
        (Ground, Flying) => 0.0,
        (Ground, Fire) | (Ground, Electric) | (Ground, Poison) | (Ground, Rock) | (Ground, Steel) => {
            2.0
        }
        (Ground, Grass) | (Ground, Bug) => 0.5,
        (Ground, _) => 1.0,

        // Flying
        (Flying, Grass) | (Flying, Fighting) | (Flying, Bug) => 2.0,
        (Flying, Electric) | (Flying, Rock) | (Flying, Steel) => 0.5,
        (Flying, _) => 1.0,

        // Psychic
        (Psychic, Dark) => 0.0,
        (Psychic, Fighting) | (Psychic, Poison) => 2.0,
        (Psychic, Psychic) | (Psychic, Steel) => 0.5,
        (Psychic, _) => 1.0,

        // Bug
        (Bug, Grass) | (Bug, Psychic) | (Bug, Dark) => 2.0,
        (Bug, Fire)
        | (Bug, Fighting)
        | (Bug, Poison)
        | (Bug, Flying)
        | (Bug, Ghost)
        | (Bug, Steel)
        | (Bug, Fairy) => 0.5,
        (Bug, _) => 1.0,

        // Rock
        (Rock, Fire) | (Rock, Ice) | (Rock, Flying) | (Rock, Bug) => 2.0,
        (Rock, Fighting) | (Rock, Ground) | (Rock, Steel) => 0.5,
        (Rock, _) => 1.0,

        // Ghost
        (Ghost, Normal) => 0.0,
        (Ghost, Psychic) | (Ghost, Ghost) => 2.0,
        (Ghost, Dark) => 0.5,
        (Ghost, _) => 1.0,

        // Dragon
        (Dragon, Fairy) => 0.0,
        (Dragon, Dragon) => 2.0,
        (Dragon, Steel) => 0.5,
        (Dragon, _) => 1.0,

        // Dark
        (Dark, Psychic) | (Dark, Ghost) => 2.0,
        (Dark, Fighting) | (Dark, Dark) | (Dark, Fairy) => 0.5,
        (Dark, _) => 1.0,

        // Steel
        (Steel, Ice) | (Steel, Rock) | (Steel, Fairy) => 2.0,
        (Steel, Fire) | (Steel, Water) | (Steel, Electric) | (Steel, Steel) => 0.5,
        (Steel, _) => 1.0,

        // Fairy
        (Fairy, Fighting) | (Fairy, Dragon) | (Fairy, Dark) => 2.0,
        (Fairy, Fire) | (Fairy, Poison) | (Fairy, Steel) => 0.5,
        (Fairy, _) => 1.0,
    }
}

/// Sparse ability → attacking-type modifier table.
///
/// A miss means "no modifier". Names are matched case-insensitively.
pub fn ability_modifier(ability: &str, attacking: PokemonType) -> Option<f64> {
    use PokemonType::*;

    match (normalize_name(ability).as_str(), attacking) {
        ("levitate", Ground) => Some(0.0),
        ("flash fire", Fire) => Some(0.0),
        ("water absorb", Water) => Some(0.0),
        ("storm drain", Water) => Some(0.0),
        ("volt absorb", Electric) => Some(0.0),
        ("lightning rod", Electric) => Some(0.0),
        ("motor drive", Electric) => Some(0.0),
        ("sap sipper", Grass) => Some(0.0),
        ("thick fat", Fire) | ("thick fat", Ice) => Some(0.5),
        ("heatproof", Fire) => Some(0.5),
        ("water bubble", Fire) => Some(0.5),
        ("dry skin", Water) => Some(0.0),
        ("dry skin", Fire) => Some(1.25),
        ("fluffy", Fire) => Some(2.0),
        _ => None,
    }
}

/// Combined multiplier for one attacking type against a species.
///
/// Dual typing composes multiplicatively; every ability in the species'
/// ability set that has a registered modifier for the attacking type then
/// multiplies in, in ability-list order. The result folds in *all* of the
/// species' possible abilities at once rather than a single active one,
/// so conflicting modifiers for the same type stack (inherited product
/// behavior; do not change without confirming intent).
pub fn effectiveness<S: AsRef<str>>(
    attacking: PokemonType,
    defending: &[PokemonType],
    abilities: &[S],
) -> f64 {
    let mut value = defending
        .iter()
        .map(|d| base_multiplier(attacking, *d))
        .product::<f64>();

    for ability in abilities {
        if let Some(modifier) = ability_modifier(ability.as_ref(), attacking) {
            value *= modifier;
        }
    }

    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use PokemonType::*;

    const NO_ABILITIES: &[&str] = &[];

    #[test]
    fn test_chart_values_are_from_fixed_set() {
        for attacking in PokemonType::ALL {
            for defending in PokemonType::ALL {
                let value = base_multiplier(attacking, defending);
                assert!(
                    value == 0.0 || value == 0.5 || value == 1.0 || value == 2.0,
                    "{attacking} vs {defending} produced {value}"
                );
            }
        }
    }

    #[test]
    fn test_dual_typing_composes_multiplicatively() {
        for attacking in PokemonType::ALL {
            for d1 in PokemonType::ALL {
                for d2 in PokemonType::ALL {
                    let combined = effectiveness(attacking, &[d1, d2], NO_ABILITIES);
                    let expected = base_multiplier(attacking, d1) * base_multiplier(attacking, d2);
                    assert_eq!(combined, expected, "{attacking} vs {d1}/{d2}");
                }
            }
        }
    }

    #[test]
    fn test_fire_vs_grass_bug_is_quadruple() {
        assert_eq!(base_multiplier(Fire, Grass), 2.0);
        assert_eq!(base_multiplier(Fire, Bug), 2.0);
        assert_eq!(effectiveness(Fire, &[Grass, Bug], NO_ABILITIES), 4.0);
    }

    #[test]
    fn test_immunity_dominates_dual_typing() {
        // Water/Ground vs Electric: 2.0 * 0.0 = 0.0
        assert_eq!(base_multiplier(Electric, Water), 2.0);
        assert_eq!(base_multiplier(Electric, Ground), 0.0);
        assert_eq!(effectiveness(Electric, &[Water, Ground], NO_ABILITIES), 0.0);
    }

    #[test]
    fn test_levitate_zeroes_ground_regardless_of_chart() {
        for defending in PokemonType::ALL {
            assert_eq!(effectiveness(Ground, &[defending], &["Levitate"]), 0.0);
        }
    }

    #[test]
    fn test_ability_modifier_scales_base_value() {
        // Thick Fat halves Fire and Ice
        assert_eq!(
            effectiveness(Fire, &[Ice], &["Thick Fat"]),
            base_multiplier(Fire, Ice) * 0.5
        );
        assert_eq!(
            effectiveness(Ice, &[Dragon], &["Thick Fat"]),
            base_multiplier(Ice, Dragon) * 0.5
        );
    }

    #[test]
    fn test_modifier_lookup_is_case_insensitive() {
        assert_eq!(ability_modifier("LEVITATE", Ground), Some(0.0));
        assert_eq!(ability_modifier("flash fire", Fire), Some(0.0));
    }

    #[test]
    fn test_modifier_miss_means_no_modifier() {
        assert_eq!(ability_modifier("Intimidate", Fire), None);
        assert_eq!(ability_modifier("Levitate", Fire), None);
        assert_eq!(
            effectiveness(Fire, &[Grass], &["Intimidate"]),
            base_multiplier(Fire, Grass)
        );
    }

    #[test]
    fn test_multiple_matching_abilities_apply_in_sequence() {
        // Both modifiers registered for Fire multiply in list order.
        let value = effectiveness(Fire, &[Normal], &["Thick Fat", "Fluffy"]);
        assert_eq!(value, 1.0 * 0.5 * 2.0);
    }

    #[test]
    fn test_known_immunities() {
        assert_eq!(base_multiplier(Normal, Ghost), 0.0);
        assert_eq!(base_multiplier(Ground, Flying), 0.0);
        assert_eq!(base_multiplier(Psychic, Dark), 0.0);
        assert_eq!(base_multiplier(Dragon, Fairy), 0.0);
        assert_eq!(base_multiplier(Poison, Steel), 0.0);
        assert_eq!(base_multiplier(Ghost, Normal), 0.0);
        assert_eq!(base_multiplier(Fighting, Ghost), 0.0);
    }
}
