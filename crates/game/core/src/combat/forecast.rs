//! Side-effect-free battle preview.
//!
//! A forecast ignores variance and criticals and treats any strike whose hit
//! rate reaches `forecast_assume_hit` as landing, and any other as missing.

use super::{Combatant, calculate_damage, can_double_attack, hit_rate};
use crate::config::CombatParams;
use crate::state::UnitId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleForecast {
    pub attacker: UnitId,
    pub target: UnitId,
    pub attacker_damage: i32,
    pub attacker_hit_rate: u32,
    pub attacker_doubles: bool,
    pub target_can_counter: bool,
    pub target_damage: i32,
    pub target_hit_rate: u32,
    pub target_doubles: bool,
    pub attacker_hp_after: i32,
    pub target_hp_after: i32,
    pub attacker_defeated: bool,
    pub target_defeated: bool,
}

pub fn calculate_battle_forecast(
    attacker: &Combatant<'_>,
    target: &Combatant<'_>,
    params: &CombatParams,
) -> BattleForecast {
    let distance = attacker.distance_to(target);
    let (a_speed, t_speed) = (attacker.stats.speed, target.stats.speed);

    let attacker_damage = calculate_damage(attacker, target, false, &params.damage);
    let attacker_hit_rate = hit_rate(a_speed, t_speed, &params.hit);
    let attacker_doubles = can_double_attack(a_speed, t_speed, &params.hit);

    let target_can_counter = target.can_counter_at(distance);
    let target_damage = calculate_damage(target, attacker, false, &params.damage);
    let target_hit_rate = hit_rate(t_speed, a_speed, &params.hit);
    let target_doubles = target_can_counter && can_double_attack(t_speed, a_speed, &params.hit);

    let assume = params.hit.forecast_assume_hit;
    let attacker_lands = attacker_hit_rate >= assume;
    let target_lands = target_hit_rate >= assume;

    let mut attacker_hp = attacker.hp;
    let mut target_hp = target.hp;

    let strike = |hp: &mut i32, lands: bool, damage: i32| {
        if lands {
            *hp = (*hp - damage).max(0);
        }
    };

    strike(&mut target_hp, attacker_lands, attacker_damage);
    if target_hp > 0 && target_can_counter {
        strike(&mut attacker_hp, target_lands, target_damage);
    }
    if attacker_doubles && attacker_hp > 0 && target_hp > 0 {
        strike(&mut target_hp, attacker_lands, attacker_damage);
    }
    if target_doubles && attacker_hp > 0 && target_hp > 0 {
        strike(&mut attacker_hp, target_lands, target_damage);
    }

    BattleForecast {
        attacker: attacker.id,
        target: target.id,
        attacker_damage,
        attacker_hit_rate,
        attacker_doubles,
        target_can_counter,
        target_damage,
        target_hit_rate,
        target_doubles,
        attacker_hp_after: attacker_hp,
        target_hp_after: target_hp,
        attacker_defeated: attacker_hp == 0,
        target_defeated: target_hp == 0,
    }
}
