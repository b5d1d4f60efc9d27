use crate::state::{UnitClass, Weapon};

/// Heal amount for staves the lookup table does not name.
pub const DEFAULT_STAFF_HEAL: i32 = 10;

/// Static balance tables supplied by the content layer.
///
/// The engine reads these and never mutates them.
pub trait TablesOracle: Send + Sync {
    /// Weapon a freshly spawned unit of `class` is issued when its spawn data
    /// names none.
    fn default_weapon(&self, class: UnitClass) -> Option<Weapon>;

    /// Hp restored by a staff, looked up by its name.
    fn staff_heal(&self, staff_name: &str) -> i32 {
        standard_staff_heal(staff_name)
    }
}

pub fn standard_staff_heal(staff_name: &str) -> i32 {
    match staff_name {
        "Heal" => 10,
        "Mend" => 20,
        _ => DEFAULT_STAFF_HEAL,
    }
}

/// Tables that issue no default weapons.
#[derive(Clone, Copy, Debug, Default)]
pub struct BareTables;

impl TablesOracle for BareTables {
    fn default_weapon(&self, _class: UnitClass) -> Option<Weapon> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_table_lookup() {
        assert_eq!(BareTables.staff_heal("Heal"), 10);
        assert_eq!(BareTables.staff_heal("Mend"), 20);
        assert_eq!(BareTables.staff_heal("Recover"), DEFAULT_STAFF_HEAL);
        assert!(BareTables.default_weapon(UnitClass::Knight).is_none());
    }
}
