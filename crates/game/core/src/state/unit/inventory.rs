use arrayvec::ArrayVec;

use super::UnitError;
use crate::config::GameConfig;
use crate::state::{Item, Weapon, WeaponUse};

/// Bounded weapon and item storage with an equipped-weapon index.
///
/// The equipped index always points at an unbroken weapon or is `None`;
/// broken weapons are evicted as soon as they break.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Inventory {
    weapons: ArrayVec<Weapon, { GameConfig::MAX_WEAPONS }>,
    equipped: Option<usize>,
    items: ArrayVec<Item, { GameConfig::MAX_ITEMS }>,
}

impl Inventory {
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn equipped_index(&self) -> Option<usize> {
        self.equipped
    }

    pub fn equipped(&self) -> Option<&Weapon> {
        self.equipped
            .and_then(|i| self.weapons.get(i))
            .filter(|w| !w.is_broken())
    }

    pub fn is_full(&self) -> bool {
        self.weapons.is_full()
    }

    /// Stores a weapon, equipping it if nothing usable is equipped yet.
    pub fn add_weapon(&mut self, weapon: Weapon) -> Result<usize, UnitError> {
        if self.weapons.is_full() {
            return Err(UnitError::InventoryFull {
                capacity: GameConfig::MAX_WEAPONS,
            });
        }
        let usable = !weapon.is_broken();
        self.weapons.push(weapon);
        let index = self.weapons.len() - 1;
        if self.equipped().is_none() && usable {
            self.equipped = Some(index);
        }
        Ok(index)
    }

    pub fn equip(&mut self, index: usize) -> Result<(), UnitError> {
        let weapon = self
            .weapons
            .get(index)
            .ok_or(UnitError::NoSuchWeapon { index })?;
        if weapon.is_broken() {
            return Err(UnitError::BrokenWeapon { index });
        }
        self.equipped = Some(index);
        Ok(())
    }

    pub fn unequip(&mut self) {
        self.equipped = None;
    }

    /// Removes a weapon, keeping the equipped index pointed at the same
    /// weapon or, if that was the one removed, at the first usable one.
    pub fn remove_weapon(&mut self, index: usize) -> Result<Weapon, UnitError> {
        if index >= self.weapons.len() {
            return Err(UnitError::NoSuchWeapon { index });
        }
        let weapon = self.weapons.remove(index);
        self.equipped = match self.equipped {
            Some(e) if e == index => self.first_usable(),
            Some(e) if e > index => Some(e - 1),
            other => other,
        };
        Ok(weapon)
    }

    /// Spends one use of the equipped weapon. A weapon that breaks is evicted.
    ///
    /// Returns `None` when nothing is equipped.
    pub fn use_equipped(&mut self) -> Option<WeaponUse> {
        let index = self.equipped?;
        let outcome = self.weapons.get_mut(index)?.use_once();
        if outcome == WeaponUse::Broken {
            self.weapons.remove(index);
            self.equipped = self.first_usable();
        }
        Some(outcome)
    }

    fn first_usable(&self) -> Option<usize> {
        self.weapons.iter().position(|w| !w.is_broken())
    }

    pub fn add_item(&mut self, item: Item) -> Result<usize, UnitError> {
        self.items
            .try_push(item)
            .map_err(|_| UnitError::ItemsFull {
                capacity: GameConfig::MAX_ITEMS,
            })?;
        Ok(self.items.len() - 1)
    }

    /// Spends one use of an item and returns a copy of it as it was used.
    /// Exhausted items are evicted.
    pub(crate) fn consume_item(&mut self, index: usize) -> Result<Item, UnitError> {
        let item = self
            .items
            .get_mut(index)
            .ok_or(UnitError::NoSuchItem { index })?;
        if !item.consume() {
            return Err(UnitError::NoSuchItem { index });
        }
        let used = item.clone();
        if used.is_exhausted() {
            self.items.remove(index);
        }
        Ok(used)
    }
}
