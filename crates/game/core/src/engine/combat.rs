//! Attack and heal resolution against live battle state.

use super::{ActionError, Battle};
use crate::combat::{
    BattleForecast, BattleResult, HealResult, apply_variance, attack_experience,
    calculate_battle_forecast, calculate_damage, check_critical_hit,
};
use crate::env::roll;
use crate::state::{UnitId, WeaponUse};

impl Battle {
    /// Resolves one strike from `attacker` on `target`.
    ///
    /// The strike always lands; hit rate only feeds the forecast. Damage is
    /// rolled for criticals and variance, the attacker's weapon loses a use,
    /// and experience is awarded. A defeated target leaves the battle.
    pub(crate) fn perform_attack(
        &mut self,
        attacker: UnitId,
        target: UnitId,
    ) -> Result<BattleResult, ActionError> {
        let striker = self.roster.get(attacker).ok_or(ActionError::UnknownUnit(attacker))?;
        let victim = self.roster.get(target).ok_or(ActionError::UnknownUnit(target))?;

        if !victim.is_alive() {
            return Err(ActionError::Defeated(target));
        }
        if !striker.can_act() {
            return Err(ActionError::AlreadyActed(attacker));
        }
        if !striker.team().is_hostile_to(victim.team()) {
            return Err(ActionError::NotHostile(target));
        }
        let distance = striker.position().distance(victim.position());
        if !striker.can_attack_at(distance) {
            return Err(ActionError::OutOfRange { target, distance });
        }

        let (Some(a), Some(d)) = (self.combatant(attacker), self.combatant(target)) else {
            return Err(ActionError::UnknownUnit(attacker));
        };
        let params = &self.config.combat;
        let rng = self.env.rng();

        let critical = check_critical_hit(&a.stats, rng, self.roll_seed(attacker, roll::CRITICAL));
        let damage = calculate_damage(&a, &d, critical, &params.damage);
        let damage = apply_variance(
            damage,
            &params.damage,
            rng,
            self.roll_seed(attacker, roll::VARIANCE),
        );
        let target_level = d.level;
        self.turn.nonce += 1;

        let Some((striker, victim)) = self.roster.pair_mut(attacker, target) else {
            return Err(ActionError::UnknownUnit(attacker));
        };
        victim.take_damage(damage);
        let target_defeated = !victim.is_alive();

        let weapon_broke = matches!(striker.use_equipped_weapon(), Some(WeaponUse::Broken));
        let experience_gained =
            attack_experience(target_level, target_defeated, &self.config.combat.experience);
        let progress = striker.gain_experience(
            experience_gained,
            self.config.combat.experience.per_level_threshold,
        );
        striker.mark_acted();

        tracing::debug!(
            %attacker,
            %target,
            damage,
            critical,
            weapon_broke,
            "attack resolved"
        );

        if target_defeated {
            self.remove_from_battle(target);
            tracing::info!(unit = %target, by = %attacker, "unit defeated");
        }
        self.debug_assert_consistent();

        Ok(BattleResult {
            attacker,
            target,
            damage,
            target_defeated,
            critical,
            experience_gained,
            level_before: progress.level_before,
            level_after: progress.level_after,
            stat_gains: progress.stat_gains,
            weapon_broke,
        })
    }

    /// Heals `target` with `healer`'s equipped staff.
    ///
    /// The amount comes from the staff's entry in the tables. Experience is
    /// granted only when the target was actually wounded.
    pub(crate) fn perform_heal(
        &mut self,
        healer: UnitId,
        target: UnitId,
    ) -> Result<HealResult, ActionError> {
        let medic = self.roster.get(healer).ok_or(ActionError::UnknownUnit(healer))?;
        let patient = self.roster.get(target).ok_or(ActionError::UnknownUnit(target))?;

        if !patient.is_alive() {
            return Err(ActionError::Defeated(target));
        }
        if !medic.can_act() {
            return Err(ActionError::AlreadyActed(healer));
        }
        if healer == target || medic.team() != patient.team() {
            return Err(ActionError::NotAlly(target));
        }
        let staff = medic
            .healing_staff()
            .ok_or(ActionError::NoHealingStaff(healer))?;
        let distance = medic.position().distance(patient.position());
        if !staff.in_range(distance) {
            return Err(ActionError::OutOfRange { target, distance });
        }

        let amount = self.env.tables().staff_heal(&staff.name);
        let was_wounded = patient.is_wounded();

        let Some((medic, patient)) = self.roster.pair_mut(healer, target) else {
            return Err(ActionError::UnknownUnit(healer));
        };
        let restored = patient.heal(amount);
        let staff_broke = matches!(medic.use_equipped_weapon(), Some(WeaponUse::Broken));
        let experience = if was_wounded {
            self.config.combat.experience.heal
        } else {
            0
        };
        let progress =
            medic.gain_experience(experience, self.config.combat.experience.per_level_threshold);
        medic.mark_acted();

        tracing::debug!(%healer, %target, restored, staff_broke, "heal resolved");
        Ok(HealResult::new(
            healer,
            target,
            restored,
            experience,
            progress,
            staff_broke,
        ))
    }

    /// Side-effect-free preview of `attacker` striking `target`.
    pub fn forecast(&self, attacker: UnitId, target: UnitId) -> Option<BattleForecast> {
        let a = self.combatant(attacker)?;
        let d = self.combatant(target)?;
        Some(calculate_battle_forecast(&a, &d, &self.config.combat))
    }
}
