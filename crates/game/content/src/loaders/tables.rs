//! Weapon and item table loader.

use std::path::Path;

use serde::Deserialize;
use tactics_core::{Item, UnitClass, Weapon, WeaponKind, WeaponRank};

use crate::WeaponCatalog;
use crate::loaders::{LoadResult, read_file};

/// Table file structure for RON files.
#[derive(Debug, Clone, Deserialize)]
struct TablesRon {
    #[serde(default)]
    weapons: Vec<WeaponRon>,
    #[serde(default)]
    items: Vec<ItemRon>,
    /// (class, weapon name)
    #[serde(default)]
    class_defaults: Vec<(UnitClass, String)>,
    /// (staff name, hp restored)
    #[serde(default)]
    staff_heal: Vec<(String, i32)>,
}

#[derive(Debug, Clone, Deserialize)]
struct WeaponRon {
    name: String,
    kind: WeaponKind,
    might: i32,
    range: (u32, u32),
    uses: u32,
    #[serde(default)]
    rank: WeaponRank,
    #[serde(default = "default_hit")]
    hit: i32,
    #[serde(default)]
    critical: i32,
    #[serde(default = "default_weight")]
    weight: i32,
    #[serde(default)]
    heals: bool,
    #[serde(default)]
    effective_against: Vec<UnitClass>,
}

fn default_hit() -> i32 {
    80
}

fn default_weight() -> i32 {
    5
}

#[derive(Debug, Clone, Deserialize)]
struct ItemRon {
    name: String,
    #[serde(default)]
    heal: i32,
    #[serde(default)]
    mana: i32,
    uses: u32,
}

impl From<WeaponRon> for Weapon {
    fn from(data: WeaponRon) -> Self {
        let weapon = Weapon::new(data.name, data.kind, data.might, data.range, data.uses)
            .with_rank(data.rank)
            .with_accuracy(data.hit, data.critical, data.weight)
            .effective_against(&data.effective_against);
        if data.heals {
            weapon.with_healing()
        } else {
            weapon
        }
    }
}

/// Loader for [`WeaponCatalog`] from RON files.
pub struct TablesLoader;

impl TablesLoader {
    pub fn load(path: &Path) -> LoadResult<WeaponCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to load tables {}: {}", path.display(), e))
    }

    /// Parses a table file. A class default naming a weapon the file does
    /// not define is an error.
    pub fn parse(content: &str) -> LoadResult<WeaponCatalog> {
        let data: TablesRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse tables RON: {}", e))?;

        let mut catalog = WeaponCatalog::new();
        for weapon in data.weapons {
            if weapon.range.0 > weapon.range.1 {
                anyhow::bail!("Weapon {} has an inverted range {:?}", weapon.name, weapon.range);
            }
            catalog.insert_weapon(weapon.into());
        }
        for item in data.items {
            catalog.insert_item(Item::new(item.name, item.heal, item.mana, item.uses));
        }
        for (class, name) in data.class_defaults {
            if !catalog.set_class_default(class, &name) {
                anyhow::bail!("Default weapon for {} is unknown: {}", class, name);
            }
        }
        for (staff, amount) in data.staff_heal {
            catalog.set_staff_heal(staff, amount);
        }

        Ok(catalog)
    }
}
