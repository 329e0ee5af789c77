//! Shared error taxonomy and small utilities used by every layer of the
//! adaptive testing engine.
//!
//! Nothing in this crate is specific to item response theory: it exists so
//! that `cat-kernel`, `cat-optimize`, `cat-estimate`, `cat-select` and
//! `cat-engine` can all report failures the same way instead of each
//! re-deriving their own error enum.

mod rng;

pub use rng::RngSource;

/// All failures the engine can report, classified rather than chained.
///
/// Every public, fallible operation in the engine returns `Result<T,
/// CatError>`. Pool exhaustion is deliberately not represented here: it is
/// a normal outcome surfaced as `None` plus a `stopping_reason` string,
/// never an `Err`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatError {
    /// Unknown method/selector/start-selector name, unknown prior label,
    /// wrong prior parameter count, or bounds that don't make sense
    /// (`sigma <= 0`, `mu` outside `[theta_min, theta_max]`, uniform
    /// `min_support >= max_support` or support outside the theta range).
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Logical operator for an early-stopping controller was not one of
    /// `and`/`or`/`only`, or `only` was used without naming a construct.
    #[error("invalid stopping operator: {reason}")]
    InvalidOperator { reason: String },

    /// Two lists that must walk in lockstep had different lengths.
    #[error("argument mismatch in {context}: {left_len} vs {right_len}")]
    ArgumentMismatch {
        context: String,
        left_len: usize,
        right_len: usize,
    },

    /// An item carried both the symbolic (`a`/`b`/`c`/`d`) and semantic
    /// (`discrimination`/`difficulty`/`guessing`/`slipping`) spelling of
    /// the same quantity.
    #[error("item carries both spellings of '{field}'")]
    RedundantKeys { field: String },

    /// Strict parameter-validation mode was requested and a required
    /// quantity was absent from the item record.
    #[error("missing required field '{field}'")]
    MissingKeys { field: String },

    /// The same construct name appeared twice in one multi-zeta item's
    /// tuple list.
    #[error("duplicate cat name '{cat}' within one item")]
    DuplicateCatName { cat: String },

    /// A construct name was not registered with the multi-CAT controller.
    #[error("unknown cat '{cat}'")]
    UnknownCat { cat: String },
}

impl CatError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        CatError::InvalidConfig {
            reason: reason.into(),
        }
    }

    pub fn invalid_operator(reason: impl Into<String>) -> Self {
        CatError::InvalidOperator {
            reason: reason.into(),
        }
    }

    pub fn argument_mismatch(context: impl Into<String>, left_len: usize, right_len: usize) -> Self {
        CatError::ArgumentMismatch {
            context: context.into(),
            left_len,
            right_len,
        }
    }
}

/// Result alias used throughout the engine.
pub type CatResult<T> = Result<T, CatError>;
