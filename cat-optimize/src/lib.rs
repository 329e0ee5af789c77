//! A bracketing, Brent-style single-variable minimizer.
//!
//! This is the engine's `L2` layer: a general-purpose 1-D minimizer with
//! no knowledge of IRT. The maximum-likelihood estimator in `cat-estimate`
//! is its only consumer, but nothing here depends on that crate.

mod bracket;
mod brent;

pub use bracket::bracket_minimum;
pub use brent::minimize;

/// `(3 - sqrt(5)) / 2`, the golden-section fallback step factor.
pub const GOLDEN_SECTION: f64 = 0.38196601125010515;

/// Convergence tolerance on the bracket width.
pub const BRENT_TOL: f64 = 1e-8;

/// Hard cap on refinement iterations; the optimizer is never allowed to
/// spin forever regardless of how pathological the objective is.
pub const BRENT_MAX_ITER: usize = 200;
