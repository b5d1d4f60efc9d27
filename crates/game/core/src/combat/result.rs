//! Outcome records handed to the presentation layer.

use crate::config::ExperienceParams;
use crate::state::{LevelProgress, UnitId};
use crate::stats::Stats;

/// One resolved attack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleResult {
    pub attacker: UnitId,
    pub target: UnitId,
    pub damage: i32,
    pub target_defeated: bool,
    pub critical: bool,
    pub experience_gained: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub stat_gains: Option<Stats>,
    /// The attacker's weapon broke on this strike.
    pub weapon_broke: bool,
}

impl BattleResult {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// One resolved heal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealResult {
    pub healer: UnitId,
    pub target: UnitId,
    pub amount: i32,
    pub experience_gained: u32,
    pub level_before: u32,
    pub level_after: u32,
    pub stat_gains: Option<Stats>,
    pub staff_broke: bool,
}

impl HealResult {
    pub(crate) fn new(
        healer: UnitId,
        target: UnitId,
        amount: i32,
        experience_gained: u32,
        progress: LevelProgress,
        staff_broke: bool,
    ) -> Self {
        Self {
            healer,
            target,
            amount,
            experience_gained,
            level_before: progress.level_before,
            level_after: progress.level_after,
            stat_gains: progress.stat_gains,
            staff_broke,
        }
    }
}

/// Kill: `target level × kill_per_level`. Any other hit: the flat hit reward.
pub fn attack_experience(target_level: u32, killed: bool, params: &ExperienceParams) -> u32 {
    if killed {
        target_level * params.kill_per_level
    } else {
        params.hit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kills_scale_with_target_level() {
        let params = ExperienceParams::default();
        assert_eq!(attack_experience(3, true, &params), 75);
        assert_eq!(attack_experience(3, false, &params), 10);
    }
}
