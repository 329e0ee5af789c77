use cat_kernel::{fisher_information, ItemParams};

/// Standard error of the ability estimate: `1 / sqrt(sum of item
/// information at theta)`. Returns `+infinity` when the administered
/// history carries no information at `theta` (no responses yet, or every
/// item's information curve has already vanished there).
pub fn standard_error(theta: f64, responses: &[(ItemParams, u8)]) -> f64 {
    let total_information: f64 = responses
        .iter()
        .map(|(zeta, _)| fisher_information(theta, *zeta))
        .sum();
    if total_information == 0.0 {
        return f64::INFINITY;
    }
    1.0 / total_information.sqrt()
}
