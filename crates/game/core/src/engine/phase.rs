/// Where the battle is in the current turn.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// Waiting for the player to pick a unit.
    #[default]
    UnitSelect,
    /// The selected unit may move (or attack from where it stands).
    Movement,
    /// The selected unit has moved and may still act.
    Action,
    /// The selected unit has acted and may still move (canto).
    CantoMovement,
    /// The selected unit has nothing left to do but wait.
    ConfirmWait,
    EnemyTurn,
    GameOver,
}

impl Phase {
    /// Phases in which a unit is selected.
    pub fn has_selection(self) -> bool {
        matches!(
            self,
            Phase::Movement | Phase::Action | Phase::CantoMovement | Phase::ConfirmWait
        )
    }
}

/// Player-facing commands, used to report which intent a phase rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    Select,
    Move,
    UndoMove,
    Attack,
    Heal,
    UseItem,
    Trade,
    Equip,
    Transform,
    Revert,
    Escape,
    Wait,
    EndTurn,
}
