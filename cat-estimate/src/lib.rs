//! Ability estimators: Maximum Likelihood (multi-start bracketed
//! minimization) and Expected A Posteriori (grid quadrature).
//!
//! This is the engine's `L3` layer: it consumes `cat-kernel`'s response
//! function and `cat-optimize`'s minimizer, and has no notion of sessions,
//! selection, or pools.

mod eap;
mod method;
mod mle;
mod se;

pub use eap::eap_estimate;
pub use method::{Method, MethodName};
pub use mle::mle_estimate;
pub use se::standard_error;

use cat_kernel::ItemParams;

/// Run whichever estimator `method` names over the full administered
/// history, clamped to `[theta_min, theta_max]`.
pub fn estimate_theta(
    method: &Method,
    responses: &[(ItemParams, u8)],
    theta_min: f64,
    theta_max: f64,
) -> f64 {
    match method {
        Method::Mle => mle_estimate(responses, theta_min, theta_max),
        Method::Eap(prior) => eap_estimate(prior, responses).clamp(theta_min, theta_max),
    }
}
