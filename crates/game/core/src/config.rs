//! Engine configuration: capacity constants and tunable combat balance.

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Base seed for every random roll in a battle (variance, criticals).
    pub seed: u64,

    /// Combat balance parameters.
    pub combat: CombatParams,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Weapons a unit may carry.
    pub const MAX_WEAPONS: usize = 5;
    /// Consumable items a unit may carry.
    pub const MAX_ITEMS: usize = 5;
    pub const MAX_LEVEL: u32 = 20;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_SEED: u64 = 0x5eed_7ac7_1c5;

    pub fn new() -> Self {
        Self {
            seed: Self::DEFAULT_SEED,
            combat: CombatParams::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::new()
        }
    }

    /// Configuration with damage variance disabled, for reproducible numbers.
    pub fn deterministic() -> Self {
        let mut config = Self::new();
        config.combat.damage.variance_percent = 0;
        config
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Balance parameters consumed by the combat engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatParams {
    pub damage: DamageParams,
    pub hit: HitParams,
    pub experience: ExperienceParams,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DamageParams {
    /// Effective defense is divided by this before subtraction.
    pub defense_divisor: i32,
    pub critical_multiplier: i32,
    pub minimum: i32,
    /// Uniform spread applied to final damage, in percent (25 = ±25%).
    pub variance_percent: i32,
    /// Weapon-triangle multipliers, in percent.
    pub triangle_advantage_percent: i32,
    pub triangle_disadvantage_percent: i32,
    /// Multiplier applied when the weapon is effective against the target class.
    pub effective_multiplier: i32,
}

impl Default for DamageParams {
    fn default() -> Self {
        Self {
            defense_divisor: 2,
            critical_multiplier: 3,
            minimum: 1,
            variance_percent: 25,
            triangle_advantage_percent: 120,
            triangle_disadvantage_percent: 80,
            effective_multiplier: 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HitParams {
    pub base: i32,
    /// Hit-rate change per point of speed differential.
    pub per_speed_point: i32,
    pub min: i32,
    pub max: i32,
    /// Forecasts treat a strike as landing when its hit rate reaches this value.
    pub forecast_assume_hit: u32,
    /// Speed advantage required to strike twice.
    pub double_attack_speed: i32,
}

impl Default for HitParams {
    fn default() -> Self {
        Self {
            base: 90,
            per_speed_point: 2,
            min: 50,
            max: 100,
            forecast_assume_hit: 75,
            double_attack_speed: 5,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ExperienceParams {
    /// Kill reward is `target level × kill_per_level`.
    pub kill_per_level: u32,
    pub hit: u32,
    pub heal: u32,
    /// Experience needed to leave level `n` is `n × per_level_threshold`.
    pub per_level_threshold: u32,
}

impl Default for ExperienceParams {
    fn default() -> Self {
        Self {
            kill_per_level: 25,
            hit: 10,
            heal: 12,
            per_level_threshold: 100,
        }
    }
}
