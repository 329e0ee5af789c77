use cat_kernel::{log_likelihood, ItemParams, Prior};

/// Expected a posteriori ability estimate: the posterior mean over the
/// prior's grid.
///
/// `theta_hat = sum_theta theta * L(theta) * pi(theta) / sum_theta L(theta)
/// * pi(theta)`, with `L(theta) = exp(logL(theta))` evaluated cell by cell.
/// Returns `0.0` if the denominator underflows to zero (impossible
/// support, or a response pattern the prior assigns no mass to).
pub fn eap_estimate(prior: &Prior, responses: &[(ItemParams, u8)]) -> f64 {
    let mut numerator = 0.0_f64;
    let mut denominator = 0.0_f64;
    for (theta, pi) in prior.grid.iter() {
        let likelihood = log_likelihood(theta, responses).exp();
        let weight = likelihood * pi;
        numerator += theta * weight;
        denominator += weight;
    }
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}
