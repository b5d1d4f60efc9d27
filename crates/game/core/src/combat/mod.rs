//! Combat resolution: damage, critical and hit-rate math, forecasts.
//!
//! Everything here is a pure function of [`Combatant`] views and
//! [`CombatParams`](crate::config::CombatParams). Randomness enters only
//! through an explicit [`RngOracle`](crate::env::RngOracle) and seed, so the
//! battle engine decides which rolls happen and in what order.
//!
//! Damage is resolved in a fixed order: weapon triangle, effectiveness,
//! terrain defense, critical, variance.

pub mod damage;
pub mod forecast;
pub mod hit;
pub mod result;

pub use damage::{apply_variance, attack_power, calculate_damage, effective_defense};
pub use forecast::{BattleForecast, calculate_battle_forecast};
pub use hit::{can_double_attack, check_critical_hit, critical_chance, hit_rate};
pub use result::{BattleResult, HealResult, attack_experience};

use crate::env::Terrain;
use crate::state::{Position, Unit, UnitClass, UnitId, Weapon};
use crate::stats::Stats;

/// Read-only view of a unit as it enters combat.
///
/// `stats` already include support bonuses; `weapon` is the equipped weapon
/// if it is unbroken.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub id: UnitId,
    pub class: UnitClass,
    pub level: u32,
    pub hp: i32,
    pub stats: Stats,
    pub weapon: Option<&'a Weapon>,
    pub terrain: Terrain,
    pub position: Position,
    pub can_act: bool,
}

impl<'a> Combatant<'a> {
    pub fn of(unit: &'a Unit, terrain: Terrain, support: Stats) -> Self {
        Self {
            id: unit.id(),
            class: unit.class(),
            level: unit.level(),
            hp: unit.hp(),
            stats: unit.current_stats() + support,
            weapon: unit.equipped_weapon(),
            terrain,
            position: unit.position(),
            can_act: unit.can_act(),
        }
    }

    pub fn distance_to(&self, other: &Combatant<'_>) -> u32 {
        self.position.distance(other.position)
    }

    /// Whether this unit can strike back at an attacker `distance` tiles away.
    pub fn can_counter_at(&self, distance: u32) -> bool {
        self.can_act
            && self
                .weapon
                .is_some_and(|w| w.can_strike() && w.in_range(distance))
    }
}
