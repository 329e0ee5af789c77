use cat_kernel::{log_likelihood, ItemParams};
use cat_optimize::minimize;

/// Maximum-likelihood ability estimate.
///
/// Builds `g(theta) = -logL(theta)` over the pooled responses and runs the
/// bracketed minimizer from four starting points — `0`, `theta_min / 2`,
/// `theta_max / 2`, `(theta_min + theta_max) / 2` — keeping the global best
/// of the four local minima found. Clamped into `[theta_min, theta_max]`.
pub fn mle_estimate(responses: &[(ItemParams, u8)], theta_min: f64, theta_max: f64) -> f64 {
    if responses.is_empty() {
        return 0.0_f64.clamp(theta_min, theta_max);
    }

    let starts = [
        0.0,
        theta_min / 2.0,
        theta_max / 2.0,
        (theta_min + theta_max) / 2.0,
    ];

    let neg_log_likelihood = |theta: f64| -log_likelihood(theta, responses);

    let mut best_theta = starts[0];
    let mut best_neg_ll = f64::INFINITY;
    for &x0 in &starts {
        let (theta, neg_ll) = minimize(neg_log_likelihood, x0);
        if neg_ll < best_neg_ll {
            best_neg_ll = neg_ll;
            best_theta = theta;
        }
    }

    best_theta.clamp(theta_min, theta_max)
}
