//! Units: stateful combatants on the board.
//!
//! Current stats are derived from class and level on demand; only hp/mp are
//! stored. Position is written exclusively by [`Board`](super::Board).

mod class;
mod inventory;

pub use class::{ClassProfile, UnitClass};
pub use inventory::Inventory;

use bitflags::bitflags;

use super::{Item, Position, Team, UnitId, Weapon, WeaponUse};
use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::stats::Stats;

bitflags! {
    /// Per-turn action flags, cleared when the owning team's turn ends.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct TurnFlags: u8 {
        const MOVED = 1 << 0;
        const ACTED = 1 << 1;
        /// Set by a move made after acting (canto).
        const REPOSITIONED = 1 << 2;
        const DONE = Self::MOVED.bits() | Self::ACTED.bits() | Self::REPOSITIONED.bits();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitError {
    #[error("inventory is full ({capacity} weapons)")]
    InventoryFull { capacity: usize },

    #[error("item bag is full ({capacity} items)")]
    ItemsFull { capacity: usize },

    #[error("no weapon in slot {index}")]
    NoSuchWeapon { index: usize },

    #[error("weapon in slot {index} is broken")]
    BrokenWeapon { index: usize },

    #[error("no usable item in slot {index}")]
    NoSuchItem { index: usize },

    #[error("{class} has no alternate form")]
    CannotTransform { class: UnitClass },

    #[error("unit is already transformed")]
    AlreadyTransformed,

    #[error("unit is not transformed")]
    NotTransformed,
}

impl GameError for UnitError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            UnitError::InventoryFull { .. } | UnitError::ItemsFull { .. } => {
                ErrorSeverity::Recoverable
            }
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            UnitError::InventoryFull { .. } => "UNIT_INVENTORY_FULL",
            UnitError::ItemsFull { .. } => "UNIT_ITEMS_FULL",
            UnitError::NoSuchWeapon { .. } => "UNIT_NO_SUCH_WEAPON",
            UnitError::BrokenWeapon { .. } => "UNIT_BROKEN_WEAPON",
            UnitError::NoSuchItem { .. } => "UNIT_NO_SUCH_ITEM",
            UnitError::CannotTransform { .. } => "UNIT_CANNOT_TRANSFORM",
            UnitError::AlreadyTransformed => "UNIT_ALREADY_TRANSFORMED",
            UnitError::NotTransformed => "UNIT_NOT_TRANSFORMED",
        }
    }
}

/// Level progress produced by [`Unit::gain_experience`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelProgress {
    pub level_before: u32,
    pub level_after: u32,
    /// Stat growth across every level gained; `None` if no level was gained.
    pub stat_gains: Option<Stats>,
}

impl LevelProgress {
    pub fn leveled_up(&self) -> bool {
        self.level_after > self.level_before
    }
}

/// Hp/mp restored by a consumable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Restored {
    pub hp: i32,
    pub mp: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    id: UnitId,
    name: String,
    class: UnitClass,
    team: Team,
    position: Position,
    level: u32,
    experience: u32,
    hp: i32,
    mp: i32,
    flags: TurnFlags,
    /// Class to return to; set only while transformed.
    transformed_from: Option<UnitClass>,
    inventory: Inventory,
}

impl Unit {
    /// Creates a unit at full hp/mp. Level is clamped to `1..=MAX_LEVEL`.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        class: UnitClass,
        team: Team,
        level: u32,
    ) -> Self {
        let level = level.clamp(1, GameConfig::MAX_LEVEL);
        let stats = class.base_stats() + Stats::level_bonus(level);
        Self {
            id,
            name: name.into(),
            class,
            team,
            position: Position::ORIGIN,
            level,
            experience: 0,
            hp: stats.hp,
            mp: stats.mp,
            flags: TurnFlags::empty(),
            transformed_from: None,
            inventory: Inventory::default(),
        }
    }

    pub fn id(&self) -> UnitId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active class (the alternate form while transformed).
    pub fn class(&self) -> UnitClass {
        self.class
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn mp(&self) -> i32 {
        self.mp
    }

    pub fn flags(&self) -> TurnFlags {
        self.flags
    }

    pub fn current_stats(&self) -> Stats {
        self.class.base_stats() + Stats::level_bonus(self.level)
    }

    pub fn max_hp(&self) -> i32 {
        self.current_stats().hp
    }

    pub fn max_mp(&self) -> i32 {
        self.current_stats().mp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_wounded(&self) -> bool {
        self.is_alive() && self.hp < self.max_hp()
    }

    pub fn profile(&self) -> ClassProfile {
        self.class.profile()
    }

    pub fn movement(&self) -> u32 {
        self.profile().movement
    }

    pub fn can_fly(&self) -> bool {
        self.class.can_fly()
    }

    pub fn has_canto(&self) -> bool {
        self.class.has_canto()
    }

    // ===== turn flags =====

    pub fn has_moved(&self) -> bool {
        self.flags.contains(TurnFlags::MOVED)
    }

    pub fn has_acted(&self) -> bool {
        self.flags.contains(TurnFlags::ACTED)
    }

    pub fn can_act(&self) -> bool {
        self.is_alive() && !self.has_acted()
    }

    /// A unit may move once per turn, before acting. Canto grants one move
    /// after acting.
    pub fn can_move_now(&self) -> bool {
        if !self.is_alive() {
            return false;
        }
        if self.has_acted() {
            self.has_canto() && !self.flags.contains(TurnFlags::REPOSITIONED)
        } else {
            !self.has_moved()
        }
    }

    /// Neither acting nor moving is possible until the next turn reset.
    pub fn is_done(&self) -> bool {
        !self.can_act() && !self.can_move_now()
    }

    pub(crate) fn mark_moved(&mut self) {
        if self.has_acted() {
            self.flags.insert(TurnFlags::REPOSITIONED);
        }
        self.flags.insert(TurnFlags::MOVED);
    }

    pub(crate) fn clear_moved(&mut self) {
        self.flags.remove(TurnFlags::MOVED);
    }

    pub(crate) fn mark_acted(&mut self) {
        self.flags.insert(TurnFlags::ACTED);
    }

    pub(crate) fn finish_turn(&mut self) {
        self.flags = TurnFlags::DONE;
    }

    pub fn reset_turn(&mut self) {
        self.flags = TurnFlags::empty();
    }

    // ===== resources =====

    /// Applies damage, clamping hp to `[0, max]`. Returns hp actually lost.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).clamp(0, self.max_hp());
        before - self.hp
    }

    /// Restores hp up to max. Returns hp actually restored. The dead stay dead.
    pub fn heal(&mut self, amount: i32) -> i32 {
        if !self.is_alive() {
            return 0;
        }
        let before = self.hp;
        self.hp = (self.hp + amount.max(0)).min(self.max_hp());
        self.hp - before
    }

    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        let before = self.mp;
        self.mp = (self.mp + amount.max(0)).min(self.max_mp());
        self.mp - before
    }

    fn restore_fully(&mut self) {
        let stats = self.current_stats();
        self.hp = stats.hp;
        self.mp = stats.mp;
    }

    /// Accumulates experience and levels up while the threshold for the
    /// current level is met. Each level-up consumes its threshold and fully
    /// restores hp/mp. Experience keeps accumulating at the level cap.
    pub fn gain_experience(&mut self, amount: u32, per_level_threshold: u32) -> LevelProgress {
        let level_before = self.level;
        let stats_before = self.current_stats();
        self.experience = self.experience.saturating_add(amount);

        while self.level < GameConfig::MAX_LEVEL {
            let threshold = self.level * per_level_threshold.max(1);
            if self.experience < threshold {
                break;
            }
            self.experience -= threshold;
            self.level += 1;
            self.restore_fully();
        }

        let stat_gains =
            (self.level > level_before).then(|| self.current_stats() - stats_before);
        if let Some(gains) = stat_gains {
            tracing::info!(
                unit = %self.id,
                from = level_before,
                to = self.level,
                attack = gains.attack,
                "level up"
            );
        }
        LevelProgress {
            level_before,
            level_after: self.level,
            stat_gains,
        }
    }

    // ===== transformation =====

    pub fn is_transformed(&self) -> bool {
        self.transformed_from.is_some()
    }

    /// Class the unit was created as.
    pub fn base_class(&self) -> UnitClass {
        self.transformed_from.unwrap_or(self.class)
    }

    pub fn can_transform(&self) -> bool {
        !self.is_transformed() && self.profile().transforms_into.is_some()
    }

    /// Swaps to the alternate form at full hp/mp.
    pub fn transform(&mut self) -> Result<UnitClass, UnitError> {
        if self.is_transformed() {
            return Err(UnitError::AlreadyTransformed);
        }
        let target = self
            .profile()
            .transforms_into
            .ok_or(UnitError::CannotTransform { class: self.class })?;
        self.transformed_from = Some(self.class);
        self.class = target;
        self.restore_fully();
        Ok(target)
    }

    /// Returns to the original form, keeping the hp/mp ratio. Hp never drops
    /// below 1 through reverting.
    pub fn revert_transform(&mut self) -> Result<UnitClass, UnitError> {
        let origin = self.transformed_from.ok_or(UnitError::NotTransformed)?;
        let (old_max_hp, old_max_mp) = (self.max_hp(), self.max_mp());
        self.class = origin;
        self.transformed_from = None;

        let (new_max_hp, new_max_mp) = (self.max_hp(), self.max_mp());
        self.hp = scale(self.hp, old_max_hp, new_max_hp).max(1);
        self.mp = scale(self.mp, old_max_mp, new_max_mp);
        Ok(origin)
    }

    // ===== inventory =====

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn weapons(&self) -> &[Weapon] {
        self.inventory.weapons()
    }

    pub fn items(&self) -> &[Item] {
        self.inventory.items()
    }

    pub fn equipped_weapon(&self) -> Option<&Weapon> {
        self.inventory.equipped()
    }

    pub fn add_weapon(&mut self, weapon: Weapon) -> Result<usize, UnitError> {
        self.inventory.add_weapon(weapon)
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Result<Self, UnitError> {
        self.inventory.add_weapon(weapon)?;
        Ok(self)
    }

    pub fn equip_weapon(&mut self, index: usize) -> Result<(), UnitError> {
        self.inventory.equip(index)
    }

    pub fn remove_weapon(&mut self, index: usize) -> Result<Weapon, UnitError> {
        self.inventory.remove_weapon(index)
    }

    pub fn use_equipped_weapon(&mut self) -> Option<WeaponUse> {
        self.inventory.use_equipped()
    }

    pub fn add_item(&mut self, item: Item) -> Result<usize, UnitError> {
        self.inventory.add_item(item)
    }

    /// Consumes one use of an item, applying its restoration.
    pub fn use_item(&mut self, index: usize) -> Result<Restored, UnitError> {
        let item = self.inventory.consume_item(index)?;
        Ok(Restored {
            hp: self.heal(item.heal),
            mp: self.restore_mp(item.mana),
        })
    }

    /// Whether a target `distance` tiles away can be struck with the equipped
    /// weapon or the class's innate range.
    pub fn can_attack_at(&self, distance: u32) -> bool {
        let by_weapon = self
            .equipped_weapon()
            .is_some_and(|w| w.can_strike() && w.in_range(distance));
        let by_class = self
            .profile()
            .attack_range
            .is_some_and(|(min, max)| (min..=max).contains(&distance));
        by_weapon || by_class
    }

    /// Equipped staff, if it can still heal.
    pub fn healing_staff(&self) -> Option<&Weapon> {
        self.equipped_weapon().filter(|w| w.can_heal())
    }
}

fn scale(value: i32, from_max: i32, to_max: i32) -> i32 {
    if from_max <= 0 {
        return to_max;
    }
    (value * to_max / from_max).clamp(0, to_max)
}
