//! The 4-parameter logistic item response kernel.
//!
//! This crate is the bottom layer (`L1` in the engine's layering): the
//! response function, Fisher information, log-likelihood of a response
//! pattern, prior grids used by the EAP estimator, and the closest-index
//! bisection used by several selectors. Nothing here knows about
//! estimation, selection policy, or sessions — those are the crates above.

mod item;
mod prior;
mod response;
mod search;

pub use item::{ItemParams, ItemParamsInput, ValidationMode};
pub use prior::{normal_distribution, uniform_distribution, Grid, Prior, PriorDist};
pub use response::{fisher_information, log_likelihood, response_probability};
pub use search::closest_index;

/// Clamp below which a probability is treated as numerically zero when
/// taking a logarithm, per spec: `eps = 1e-10`.
pub const LOG_EPS: f64 = 1e-10;

/// Grid step used by prior distributions: `0.1` theta units.
pub const GRID_STEP: f64 = 0.1;
