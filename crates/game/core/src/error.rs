//! Common error infrastructure for tactics-core.
//!
//! Domain errors (`BoardError`, `UnitError`, `ActionError`) live next to the
//! code that produces them. Every one of them leaves state untouched: an
//! illegal intent is a rejected no-op, never a partial mutation.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The same intent may succeed later or with a different target
    /// (destination occupied, target out of range).
    Recoverable,

    /// The intent is invalid in the current state and should not be retried
    /// unchanged (wrong team, unit already acted).
    Validation,

    /// Unexpected inconsistency between board and roster.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }
}

/// Common trait for all tactics-core errors.
///
/// Gives the presentation layer a uniform way to decide whether to show a
/// hint ("out of range") or log a bug.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
