//! The failure taxonomy shared by every reducer.
//!
//! Per the kernel's two-class failure model: structural bugs (the caller
//! built a malformed term, or registered a corrupt declaration) are fatal
//! and surface as a `CoreError`. Soft mismatches — an unknown reference, a
//! theorem with no rule to apply — are never errors; they show up as the
//! `reduced = false` branch of a step function's return value instead.

use thiserror::Error;

use crate::term::Term;

/// Every fatal condition the kernel can raise.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("expected a binder, found `{0}`")]
    BadTerm(Term),

    #[error("not a redex: `{0}`")]
    NotRedex(Term),

    #[error("not a reference: `{0}`")]
    NotReference(Term),

    #[error("too many arguments to `{name}`: expected at most {arity}, got {got}")]
    TooManyArgs { name: String, arity: usize, got: usize },

    #[error("definition `{0}` is missing a body")]
    CorruptDefinition(String),

    #[error("theorem `{0}` has not been proved")]
    UnprovenTheorem(String),

    #[error("special `{name}` has insufficient arguments: expected {arity}, got {got}")]
    InsufficientArgs { name: String, arity: usize, got: usize },

    #[error("special `{0}` was reached by delta reduction; specials only reduce via special-step")]
    UnexpectedSpecial(String),

    #[error("fuel exhausted while normalizing")]
    FuelExhausted,
}

pub type Result<T> = std::result::Result<T, CoreError>;
