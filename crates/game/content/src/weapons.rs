//! Weapon, staff and consumable tables.

use std::collections::BTreeMap;

use tactics_core::env::DEFAULT_STAFF_HEAL;
use tactics_core::{Item, TablesOracle, UnitClass, Weapon, WeaponKind, WeaponRank};

/// Named equipment plus the loadout each class is issued when its spawn data
/// names no weapon.
///
/// Lookups hand out fresh copies at full durability.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeaponCatalog {
    weapons: BTreeMap<String, Weapon>,
    items: BTreeMap<String, Item>,
    class_defaults: BTreeMap<UnitClass, String>,
    staff_heals: BTreeMap<String, i32>,
}

impl WeaponCatalog {
    /// An empty catalog. Issues nothing and heals every staff for
    /// [`DEFAULT_STAFF_HEAL`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The campaign's standard armory.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        for weapon in standard_weapons() {
            catalog.insert_weapon(weapon);
        }
        for item in standard_items() {
            catalog.insert_item(item);
        }

        use UnitClass::*;
        let defaults = [
            (Lord, "Rapier"),
            (Knight, "Iron Lance"),
            (Archer, "Iron Bow"),
            (Mage, "Fire"),
            (Healer, "Heal"),
            (Thief, "Slim Sword"),
            (Cavalier, "Iron Lance"),
            (PegasusKnight, "Slim Lance"),
            (WyvernRider, "Iron Axe"),
        ];
        for (class, name) in defaults {
            catalog.class_defaults.insert(class, name.to_owned());
        }

        catalog.staff_heals.insert("Heal".to_owned(), 10);
        catalog.staff_heals.insert("Mend".to_owned(), 20);
        catalog.staff_heals.insert("Recover".to_owned(), 35);
        catalog
    }

    pub fn insert_weapon(&mut self, weapon: Weapon) {
        self.weapons.insert(weapon.name.clone(), weapon);
    }

    pub fn insert_item(&mut self, item: Item) {
        self.items.insert(item.name.clone(), item);
    }

    /// Names the weapon `class` is issued. Returns false, leaving the
    /// catalog unchanged, if no weapon by that name is known.
    pub fn set_class_default(&mut self, class: UnitClass, weapon: &str) -> bool {
        if !self.weapons.contains_key(weapon) {
            return false;
        }
        self.class_defaults.insert(class, weapon.to_owned());
        true
    }

    pub fn set_staff_heal(&mut self, staff: impl Into<String>, amount: i32) {
        self.staff_heals.insert(staff.into(), amount);
    }

    pub fn weapon(&self, name: &str) -> Option<Weapon> {
        self.weapons.get(name).cloned()
    }

    pub fn item(&self, name: &str) -> Option<Item> {
        self.items.get(name).cloned()
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Weapon> {
        self.weapons.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn default_weapon_name(&self, class: UnitClass) -> Option<&str> {
        self.class_defaults.get(&class).map(String::as_str)
    }
}

impl TablesOracle for WeaponCatalog {
    fn default_weapon(&self, class: UnitClass) -> Option<Weapon> {
        self.default_weapon_name(class)
            .and_then(|name| self.weapon(name))
    }

    fn staff_heal(&self, staff_name: &str) -> i32 {
        self.staff_heals
            .get(staff_name)
            .copied()
            .unwrap_or(DEFAULT_STAFF_HEAL)
    }
}

fn standard_weapons() -> Vec<Weapon> {
    use UnitClass::*;
    use WeaponKind::*;
    vec![
        // swords
        Weapon::new("Iron Sword", Sword, 5, (1, 1), 46).with_accuracy(90, 0, 5),
        Weapon::new("Slim Sword", Sword, 3, (1, 1), 30).with_accuracy(100, 5, 2),
        Weapon::new("Steel Sword", Sword, 8, (1, 1), 30)
            .with_rank(WeaponRank::D)
            .with_accuracy(75, 0, 10),
        Weapon::new("Rapier", Sword, 7, (1, 1), 40)
            .with_accuracy(95, 10, 5)
            .effective_against(&[Knight, Cavalier]),
        Weapon::new("Armorslayer", Sword, 8, (1, 1), 18)
            .with_rank(WeaponRank::D)
            .with_accuracy(80, 0, 11)
            .effective_against(&[Knight]),
        Weapon::new("Wyrmslayer", Sword, 7, (1, 1), 20)
            .with_rank(WeaponRank::C)
            .with_accuracy(75, 0, 5)
            .effective_against(&[Dragon, WyvernRider]),
        // lances
        Weapon::new("Iron Lance", Lance, 7, (1, 1), 45).with_accuracy(80, 0, 8),
        Weapon::new("Slim Lance", Lance, 4, (1, 1), 30).with_accuracy(85, 5, 4),
        Weapon::new("Steel Lance", Lance, 10, (1, 1), 30)
            .with_rank(WeaponRank::D)
            .with_accuracy(70, 0, 13),
        Weapon::new("Javelin", Lance, 6, (1, 2), 20)
            .with_rank(WeaponRank::D)
            .with_accuracy(65, 0, 11),
        Weapon::new("Silver Lance", Lance, 14, (1, 1), 20)
            .with_rank(WeaponRank::A)
            .with_accuracy(75, 0, 10),
        // axes
        Weapon::new("Iron Axe", Axe, 8, (1, 1), 45).with_accuracy(75, 0, 10),
        Weapon::new("Hand Axe", Axe, 7, (1, 2), 20)
            .with_rank(WeaponRank::D)
            .with_accuracy(60, 0, 12),
        Weapon::new("Hammer", Axe, 10, (1, 1), 20)
            .with_rank(WeaponRank::D)
            .with_accuracy(55, 0, 15)
            .effective_against(&[Knight]),
        // bows
        Weapon::new("Iron Bow", Bow, 6, (2, 2), 45)
            .with_accuracy(85, 0, 5)
            .effective_against(&[PegasusKnight, WyvernRider]),
        Weapon::new("Longbow", Bow, 5, (2, 3), 20)
            .with_rank(WeaponRank::C)
            .with_accuracy(65, 0, 10)
            .effective_against(&[PegasusKnight, WyvernRider]),
        // tomes
        Weapon::new("Fire", Tome, 5, (1, 2), 40).with_accuracy(90, 0, 4),
        Weapon::new("Thunder", Tome, 8, (1, 2), 35)
            .with_rank(WeaponRank::D)
            .with_accuracy(80, 5, 6),
        // staves
        Weapon::new("Heal", Staff, 0, (1, 1), 30).with_healing(),
        Weapon::new("Mend", Staff, 0, (1, 1), 20)
            .with_rank(WeaponRank::C)
            .with_healing(),
        Weapon::new("Recover", Staff, 0, (1, 1), 15)
            .with_rank(WeaponRank::B)
            .with_healing(),
    ]
}

fn standard_items() -> Vec<Item> {
    vec![
        Item::new("Vulnerary", 10, 0, 3),
        Item::new("Elixir", 99, 0, 1),
        Item::new("Ether", 0, 10, 2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_armed_class_gets_a_usable_default() {
        let catalog = WeaponCatalog::standard();
        for class in UnitClass::iter() {
            let Some(weapon) = catalog.default_weapon(class) else {
                assert!(
                    matches!(class, UnitClass::Manakete | UnitClass::Dragon),
                    "{class} has no default weapon"
                );
                continue;
            };
            assert_eq!(weapon.uses(), weapon.max_uses);
            assert_eq!(weapon.heals, class.is_healer());
        }
    }

    #[test]
    fn staff_heals_fall_back_to_the_default() {
        let catalog = WeaponCatalog::standard();
        assert_eq!(catalog.staff_heal("Heal"), 10);
        assert_eq!(catalog.staff_heal("Mend"), 20);
        assert_eq!(catalog.staff_heal("Warp"), DEFAULT_STAFF_HEAL);
        assert_eq!(WeaponCatalog::new().staff_heal("Mend"), DEFAULT_STAFF_HEAL);
    }

    #[test]
    fn class_defaults_must_name_known_weapons() {
        let mut catalog = WeaponCatalog::standard();
        assert!(!catalog.set_class_default(UnitClass::Lord, "Falchion"));
        assert_eq!(catalog.default_weapon_name(UnitClass::Lord), Some("Rapier"));

        assert!(catalog.set_class_default(UnitClass::Lord, "Steel Sword"));
        let weapon = catalog.default_weapon(UnitClass::Lord).unwrap();
        assert_eq!(weapon.might, 8);
    }

    #[test]
    fn lookups_hand_out_independent_copies() {
        let catalog = WeaponCatalog::standard();
        let mut first = catalog.weapon("Javelin").unwrap();
        first.use_once();
        assert_eq!(catalog.weapon("Javelin").unwrap().uses(), 20);
        assert!(catalog.item("Vulnerary").is_some());
        assert!(catalog.weapon("Vulnerary").is_none());
    }
}
