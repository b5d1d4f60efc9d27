//! Hit-rate, critical and follow-up checks.

use crate::config::HitParams;
use crate::env::RngOracle;
use crate::stats::Stats;

/// `skill + luck / 2`, in percent.
pub fn critical_chance(stats: &Stats) -> i32 {
    stats.skill + stats.luck / 2
}

/// Rolls a d100; the strike is critical when the roll does not exceed the
/// chance.
pub fn check_critical_hit(stats: &Stats, rng: &(impl RngOracle + ?Sized), seed: u64) -> bool {
    rng.roll_d100(seed) as i32 <= critical_chance(stats)
}

/// `base + per_speed_point × (attacker speed - defender speed)`, clamped.
pub fn hit_rate(attacker_speed: i32, defender_speed: i32, params: &HitParams) -> u32 {
    let rate = params.base + params.per_speed_point * (attacker_speed - defender_speed);
    rate.clamp(params.min, params.max).max(0) as u32
}

pub fn can_double_attack(attacker_speed: i32, defender_speed: i32, params: &HitParams) -> bool {
    attacker_speed - defender_speed >= params.double_attack_speed
}
