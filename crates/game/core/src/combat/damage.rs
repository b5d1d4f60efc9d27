//! Damage calculation.

use super::Combatant;
use crate::config::DamageParams;
use crate::env::RngOracle;
use crate::state::TriangleEdge;

/// Raw striking power before the defender's defense is applied.
///
/// ```text
/// power = attack (+ might if armed)
/// power = power × triangle% / 100     (only if the defender is armed too)
/// power = power × effective_multiplier (if effective against the class)
/// ```
pub fn attack_power(
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    params: &DamageParams,
) -> i32 {
    let mut power = attacker.stats.attack;
    let Some(weapon) = attacker.weapon else {
        return power;
    };

    power += weapon.might;

    if let Some(theirs) = defender.weapon {
        let percent = match weapon.kind.triangle_against(theirs.kind) {
            TriangleEdge::Advantage => params.triangle_advantage_percent,
            TriangleEdge::Disadvantage => params.triangle_disadvantage_percent,
            TriangleEdge::Neutral => 100,
        };
        power = power * percent / 100;
    }

    if weapon.is_effective_against(defender.class) {
        power *= params.effective_multiplier;
    }

    power
}

/// Defense plus the terrain bonus of the defender's tile.
pub fn effective_defense(defender: &Combatant<'_>) -> i32 {
    defender.stats.defense + defender.terrain.defense_bonus()
}

/// Deterministic damage: everything except variance.
///
/// ```text
/// damage = max(minimum, power - defense / divisor)
/// damage = damage × critical_multiplier   (on a critical)
/// ```
pub fn calculate_damage(
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    is_critical: bool,
    params: &DamageParams,
) -> i32 {
    let power = attack_power(attacker, defender, params);
    let defense = effective_defense(defender) / params.defense_divisor.max(1);

    let mut damage = (power - defense).max(params.minimum);
    if is_critical {
        damage *= params.critical_multiplier;
    }
    damage
}

/// Applies uniform ±`variance_percent` spread and floors at the minimum.
pub fn apply_variance(
    damage: i32,
    params: &DamageParams,
    rng: &(impl RngOracle + ?Sized),
    seed: u64,
) -> i32 {
    let percent = 100 + rng.spread(seed, params.variance_percent);
    (damage * percent / 100).max(params.minimum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{FixedRng, Terrain};
    use crate::state::{Team, Unit, UnitClass, UnitId, Weapon, WeaponKind};
    use crate::stats::Stats;

    fn unit(class: UnitClass) -> Unit {
        Unit::new(UnitId(1), "u", class, Team::Player, 1)
    }

    fn view(unit: &Unit, terrain: Terrain) -> Combatant<'_> {
        Combatant::of(unit, terrain, Stats::ZERO)
    }

    #[test]
    fn unarmed_knight_against_archer_on_plain() {
        let knight = unit(UnitClass::Knight);
        let archer = unit(UnitClass::Archer);
        let params = DamageParams::default();

        let damage = calculate_damage(
            &view(&knight, Terrain::Plain),
            &view(&archer, Terrain::Plain),
            false,
            &params,
        );
        assert_eq!(damage, 8);
    }

    #[test]
    fn terrain_and_critical() {
        let knight = unit(UnitClass::Knight);
        let archer = unit(UnitClass::Archer);
        let params = DamageParams::default();

        // defense 8 + fort 2 = 10, halved to 5
        let on_fort = calculate_damage(
            &view(&knight, Terrain::Plain),
            &view(&archer, Terrain::Fort),
            true,
            &params,
        );
        assert_eq!(on_fort, 21);
    }

    #[test]
    fn minimum_damage_is_one() {
        let healer = unit(UnitClass::Healer);
        let knight = unit(UnitClass::Knight);
        let damage = calculate_damage(
            &view(&healer, Terrain::Plain),
            &view(&knight, Terrain::Mountain),
            false,
            &DamageParams::default(),
        );
        assert_eq!(damage, 1);
    }

    #[test]
    fn triangle_applies_only_against_armed_defenders() {
        let sword = Weapon::new("Iron Sword", WeaponKind::Sword, 5, (1, 1), 46);
        let axe = Weapon::new("Iron Axe", WeaponKind::Axe, 8, (1, 1), 45);
        let lord = unit(UnitClass::Lord).with_weapon(sword).unwrap();
        let bare = unit(UnitClass::Knight);
        let axeman = unit(UnitClass::Knight).with_weapon(axe).unwrap();
        let params = DamageParams::default();

        let attacker = view(&lord, Terrain::Plain);
        // attack 7 + might 5 = 12
        assert_eq!(attack_power(&attacker, &view(&bare, Terrain::Plain), &params), 12);
        // 12 × 120% = 14
        assert_eq!(attack_power(&attacker, &view(&axeman, Terrain::Plain), &params), 14);
    }

    #[test]
    fn effectiveness_doubles_after_triangle() {
        let bow = Weapon::new("Iron Bow", WeaponKind::Bow, 6, (2, 2), 45)
            .effective_against(&[UnitClass::PegasusKnight]);
        let archer = unit(UnitClass::Archer).with_weapon(bow).unwrap();
        let pegasus = unit(UnitClass::PegasusKnight);
        let params = DamageParams::default();

        // (9 + 6) × 2 = 30
        assert_eq!(
            attack_power(&view(&archer, Terrain::Plain), &view(&pegasus, Terrain::Plain), &params),
            30
        );
    }

    #[test]
    fn variance_is_bounded_and_floored() {
        let params = DamageParams::default();
        assert_eq!(apply_variance(20, &params, &FixedRng(0), 0), 15);
        assert_eq!(apply_variance(20, &params, &FixedRng(50), 0), 25);
        assert_eq!(apply_variance(1, &params, &FixedRng(0), 0), 1);

        let flat = DamageParams {
            variance_percent: 0,
            ..params
        };
        assert_eq!(apply_variance(20, &flat, &FixedRng(7), 0), 20);
    }

    #[test]
    fn same_inputs_same_damage() {
        let knight = unit(UnitClass::Knight);
        let mage = unit(UnitClass::Mage);
        let params = DamageParams::default();
        let a = view(&knight, Terrain::Plain);
        let d = view(&mage, Terrain::Forest);
        let first = calculate_damage(&a, &d, false, &params);
        for _ in 0..10 {
            assert_eq!(calculate_damage(&a, &d, false, &params), first);
        }
    }
}
