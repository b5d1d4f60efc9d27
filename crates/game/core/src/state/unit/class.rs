//! Character classes and their static profiles.

use crate::stats::Stats;

/// Closed set of character classes.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitClass {
    Lord,
    Knight,
    Archer,
    Mage,
    Healer,
    Thief,
    Cavalier,
    PegasusKnight,
    WyvernRider,
    Manakete,
    Dragon,
}

/// Static per-class data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassProfile {
    pub base: Stats,
    pub movement: u32,
    /// Range the class can strike at without a weapon; `None` for classes that
    /// never fight bare-handed.
    pub attack_range: Option<(u32, u32)>,
    pub flying: bool,
    /// Canto: may move again after acting.
    pub canto: bool,
    pub transforms_into: Option<UnitClass>,
    pub healer: bool,
}

impl ClassProfile {
    const fn ground(base: Stats, movement: u32, attack_range: Option<(u32, u32)>) -> Self {
        Self {
            base,
            movement,
            attack_range,
            flying: false,
            canto: false,
            transforms_into: None,
            healer: false,
        }
    }
}

impl UnitClass {
    pub const fn profile(self) -> ClassProfile {
        use UnitClass::*;
        match self {
            Lord => ClassProfile::ground(Stats::new(20, 0, 7, 5, 7, 7, 7), 5, Some((1, 1))),
            Knight => ClassProfile::ground(Stats::new(22, 0, 12, 11, 4, 6, 3), 4, Some((1, 1))),
            Archer => ClassProfile::ground(Stats::new(18, 0, 9, 8, 6, 8, 4), 5, Some((2, 2))),
            Mage => ClassProfile::ground(Stats::new(16, 20, 10, 3, 6, 7, 4), 5, Some((1, 2))),
            Healer => ClassProfile {
                healer: true,
                ..ClassProfile::ground(Stats::new(16, 25, 4, 3, 6, 5, 6), 5, None)
            },
            Thief => ClassProfile::ground(Stats::new(16, 0, 6, 3, 11, 10, 8), 6, Some((1, 1))),
            Cavalier => ClassProfile {
                canto: true,
                ..ClassProfile::ground(Stats::new(20, 0, 9, 7, 7, 6, 5), 7, Some((1, 1)))
            },
            PegasusKnight => ClassProfile {
                flying: true,
                canto: true,
                ..ClassProfile::ground(Stats::new(17, 5, 7, 5, 11, 9, 8), 7, Some((1, 1)))
            },
            WyvernRider => ClassProfile {
                flying: true,
                canto: true,
                ..ClassProfile::ground(Stats::new(22, 0, 11, 10, 5, 6, 3), 6, Some((1, 1)))
            },
            Manakete => ClassProfile {
                transforms_into: Some(Dragon),
                ..ClassProfile::ground(Stats::new(16, 10, 4, 4, 5, 5, 6), 5, Some((1, 1)))
            },
            Dragon => ClassProfile {
                flying: true,
                ..ClassProfile::ground(Stats::new(30, 10, 16, 14, 6, 8, 6), 5, Some((1, 2)))
            },
        }
    }

    pub const fn base_stats(self) -> Stats {
        self.profile().base
    }

    pub const fn can_fly(self) -> bool {
        self.profile().flying
    }

    pub const fn has_canto(self) -> bool {
        self.profile().canto
    }

    pub const fn is_healer(self) -> bool {
        self.profile().healer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn fliers_have_canto_except_dragons() {
        for class in UnitClass::iter() {
            if class.can_fly() && class != UnitClass::Dragon {
                assert!(class.has_canto(), "{class} should have canto");
            }
        }
        assert!(UnitClass::Cavalier.has_canto());
        assert!(!UnitClass::Knight.has_canto());
    }

    #[test]
    fn only_manaketes_transform() {
        for class in UnitClass::iter() {
            let target = class.profile().transforms_into;
            assert_eq!(target.is_some(), class == UnitClass::Manakete);
        }
    }

    #[test]
    fn knight_and_archer_reference_values() {
        assert_eq!(UnitClass::Knight.base_stats().attack, 12);
        assert_eq!(UnitClass::Archer.base_stats().defense, 8);
        assert_eq!(UnitClass::Archer.profile().attack_range, Some((2, 2)));
    }

    #[test]
    fn parses_snake_case_names() {
        assert_eq!("pegasus_knight".parse(), Ok(UnitClass::PegasusKnight));
        assert_eq!(UnitClass::WyvernRider.to_string(), "wyvern_rider");
    }
}
