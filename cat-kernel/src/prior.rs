use cat_env::{CatError, CatResult};
use ndarray::Array1;

use crate::GRID_STEP;

/// A discrete `(theta, mass)` grid over `[theta_min, theta_max]` at a fixed
/// step. Not necessarily normalized — the EAP estimator consumes the
/// product `likelihood * prior`, so an un-normalized normal prior is
/// harmless (spec §4.1).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub theta: Array1<f64>,
    pub mass: Array1<f64>,
}

impl Grid {
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.theta.iter().copied().zip(self.mass.iter().copied())
    }
}

/// Which family a prior distribution belongs to, plus its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PriorDist {
    Normal { mu: f64, sigma: f64 },
    Uniform { min_support: f64, max_support: f64 },
}

impl PriorDist {
    /// Parse a `(label, params)` pair the way `CatSession::new` receives it
    /// from a host: `label` is `norm` or `unif` (case-insensitive),
    /// `params` must have exactly two entries.
    pub fn parse(label: &str, params: &[f64]) -> CatResult<Self> {
        if params.len() != 2 {
            return Err(CatError::invalid_config(format!(
                "prior parameter vector must have exactly 2 entries, got {}",
                params.len()
            )));
        }
        match label.to_lowercase().as_str() {
            "norm" => Ok(PriorDist::Normal {
                mu: params[0],
                sigma: params[1],
            }),
            "unif" => Ok(PriorDist::Uniform {
                min_support: params[0],
                max_support: params[1],
            }),
            other => Err(CatError::invalid_config(format!(
                "unknown prior distribution label '{other}'"
            ))),
        }
    }
}

/// A validated prior distribution together with its materialized grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Prior {
    pub dist: PriorDist,
    pub grid: Grid,
}

impl Prior {
    /// Validate `dist` against the session's theta bounds and build its
    /// grid. Bounds checks mirror spec §4.5's validation-failure list.
    pub fn new(dist: PriorDist, theta_min: f64, theta_max: f64) -> CatResult<Self> {
        match dist {
            PriorDist::Normal { mu, sigma } => {
                if sigma <= 0.0 {
                    return Err(CatError::invalid_config(
                        "normal prior sigma must be > 0",
                    ));
                }
                if mu < theta_min || mu > theta_max {
                    return Err(CatError::invalid_config(format!(
                        "normal prior mean {mu} outside bounds [{theta_min}, {theta_max}]"
                    )));
                }
            }
            PriorDist::Uniform {
                min_support,
                max_support,
            } => {
                if min_support >= max_support {
                    return Err(CatError::invalid_config(
                        "uniform prior requires min_support < max_support",
                    ));
                }
                if min_support < theta_min || max_support > theta_max {
                    return Err(CatError::invalid_config(format!(
                        "uniform prior support [{min_support}, {max_support}] outside bounds [{theta_min}, {theta_max}]"
                    )));
                }
            }
        }
        let grid = match dist {
            PriorDist::Normal { mu, sigma } => normal_distribution(mu, sigma, theta_min, theta_max, GRID_STEP),
            PriorDist::Uniform {
                min_support,
                max_support,
            } => uniform_distribution(min_support, max_support, theta_min, theta_max, GRID_STEP),
        };
        Ok(Prior { dist, grid })
    }
}

fn round10(x: f64) -> f64 {
    (x * 1e10).round() / 1e10
}

fn normal_pdf(x: f64, mu: f64, sigma: f64) -> f64 {
    let z = (x - mu) / sigma;
    (-0.5 * z * z).exp() / (sigma * (2.0 * std::f64::consts::PI).sqrt())
}

fn grid_thetas(min: f64, max: f64, step: f64) -> Vec<f64> {
    let n_steps = ((max - min) / step).round() as i64;
    (0..=n_steps).map(|i| round10(min + i as f64 * step)).collect()
}

/// Truncated-Gaussian grid `N(mu, sigma)` over `[min, max]` at `step`,
/// emitting `(theta, phi(theta; mu, sigma))` for each grid point. Not
/// renormalized.
pub fn normal_distribution(mu: f64, sigma: f64, min: f64, max: f64, step: f64) -> Grid {
    let theta = grid_thetas(min, max, step);
    let mass: Vec<f64> = theta.iter().map(|&t| normal_pdf(t, mu, sigma)).collect();
    Grid {
        theta: Array1::from(theta),
        mass: Array1::from(mass),
    }
}

/// Uniform grid over `[min_support, max_support]` (clamped to `[min, max]`):
/// equal nonzero mass on every cell inside the support, zero outside, with
/// the nonzero cells summing to exactly `1.0`.
pub fn uniform_distribution(min_support: f64, max_support: f64, min: f64, max: f64, step: f64) -> Grid {
    let theta = grid_thetas(min, max, step);
    let eps = 1e-9;
    let in_support: Vec<bool> = theta
        .iter()
        .map(|&t| t >= min_support - eps && t <= max_support + eps)
        .collect();
    let count = in_support.iter().filter(|&&b| b).count();
    let cell_mass = if count > 0 { 1.0 / count as f64 } else { 0.0 };
    let mass: Vec<f64> = in_support
        .iter()
        .map(|&b| if b { cell_mass } else { 0.0 })
        .collect();
    Grid {
        theta: Array1::from(theta),
        mass: Array1::from(mass),
    }
}
