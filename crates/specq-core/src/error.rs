use std::fmt;
use thiserror::Error as ThisError;

///
/// SpecError
///
/// Build-time failures raised while assembling predicates, criteria chains,
/// and specifications. Every variant is surfaced before a query source is
/// touched; evaluation never produces a `SpecError`.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SpecError {
    #[error("argument '{argument}' must not be empty")]
    MissingArgument { argument: &'static str },

    #[error("argument '{argument}' is out of range (got {value}): {reason}")]
    ArgumentOutOfRange {
        argument: &'static str,
        value: u64,
        reason: &'static str,
    },

    #[error("{0}")]
    InvalidOperation(#[from] InvalidOperationError),

    #[error("{combinator} requires at least one specification")]
    EmptyOperandSet { combinator: &'static str },
}

impl SpecError {
    pub(crate) const fn out_of_range(
        argument: &'static str,
        value: u64,
        reason: &'static str,
    ) -> Self {
        Self::ArgumentOutOfRange {
            argument,
            value,
            reason,
        }
    }

    /// Stable classification for callers that map errors onto their own taxonomy.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::MissingArgument { .. } | Self::ArgumentOutOfRange { .. } => {
                ErrorClass::Argument
            }
            Self::InvalidOperation(_) => ErrorClass::InvalidOperation,
            Self::EmptyOperandSet { .. } => ErrorClass::EmptyOperandSet,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }
}

///
/// InvalidOperationError
///
/// Builder misuse: calls that are only valid after another call.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ThisError)]
pub enum InvalidOperationError {
    #[error("criteria chain must start with `filter` before `and`/`or`")]
    MissingStart,

    #[error("group clause produced no condition (empty clause)")]
    EmptyClause,

    #[error("`then_by` requires a primary sort key; call `order_by` first")]
    ThenByWithoutPrimary,

    #[error("null ordering requires a sort key; call `order_by` first")]
    NullOrderingWithoutSort,

    #[error("predicate body references a parameter the lambda does not bind")]
    UnboundParameter,
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Argument,
    InvalidOperation,
    EmptyOperandSet,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Argument => "argument",
            Self::InvalidOperation => "invalid_operation",
            Self::EmptyOperandSet => "empty_operand_set",
        };
        write!(f, "{label}")
    }
}
