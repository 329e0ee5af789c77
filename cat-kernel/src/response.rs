use crate::item::ItemParams;
use crate::LOG_EPS;

/// Four-parameter logistic response probability.
///
/// `P(theta; zeta) = c + (d - c) / (1 + exp(-a * (theta - b)))`
pub fn response_probability(theta: f64, zeta: ItemParams) -> f64 {
    zeta.c + (zeta.d - zeta.c) / (1.0 + (-zeta.a * (theta - zeta.b)).exp())
}

/// Fisher information of a single item at `theta`.
///
/// Guards against the numerically-at-or-past-asymptote case (`p <= c` or
/// `p >= d`) by returning `0.0` instead of propagating a `NaN`/`inf`.
pub fn fisher_information(theta: f64, zeta: ItemParams) -> f64 {
    let p = response_probability(theta, zeta);
    if p <= zeta.c || p >= zeta.d {
        return 0.0;
    }
    let q = 1.0 - p;
    let span = zeta.d - zeta.c;
    zeta.a * zeta.a * (q / p) * ((p - zeta.c) * (p - zeta.c) / (span * span))
}

/// Log-likelihood of a response pattern against a single ability value.
///
/// Sums `r * ln(max(p, eps)) + (1 - r) * ln(max(1 - p, eps))` over the
/// given `(zeta, response)` pairs, with `eps = 1e-10` guarding against
/// `ln(0)`.
pub fn log_likelihood(theta: f64, responses: &[(ItemParams, u8)]) -> f64 {
    responses
        .iter()
        .map(|&(zeta, r)| {
            let p = response_probability(theta, zeta);
            let p_hit = p.max(LOG_EPS);
            let p_miss = (1.0 - p).max(LOG_EPS);
            if r == 1 {
                p_hit.ln()
            } else {
                p_miss.ln()
            }
        })
        .sum()
}
