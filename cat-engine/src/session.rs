use cat_env::{CatError, CatResult, RngSource};
use cat_estimate::{estimate_theta, standard_error, Method};
use cat_kernel::{ItemParams, Prior, PriorDist};
use cat_select::{effective_selector, select, Selector};

/// Default ability bounds, per spec §3.
pub const DEFAULT_THETA_MIN: f64 = -6.0;
pub const DEFAULT_THETA_MAX: f64 = 6.0;

/// Fully validated construction parameters for one [`CatSession`]. Build
/// one through [`CatSessionOptionsBuilder`] rather than constructing this
/// directly — the builder is what performs spec §4.5's validation.
#[derive(Debug, Clone)]
pub struct CatSessionOptions {
    method: Method,
    selector: Selector,
    theta_min: f64,
    theta_max: f64,
    n_start_items: usize,
    start_select: Selector,
}

/// Builds a [`CatSessionOptions`], mirroring the engine's other
/// `*Builder` types: every knob has a sensible default, and `build()` is
/// the single place string inputs are parsed and cross-checked.
#[derive(Debug, Clone)]
pub struct CatSessionOptionsBuilder {
    method: String,
    selector: String,
    theta_min: f64,
    theta_max: f64,
    n_start_items: usize,
    start_select: String,
    prior_label: Option<String>,
    prior_params: Option<[f64; 2]>,
}

impl Default for CatSessionOptionsBuilder {
    fn default() -> Self {
        CatSessionOptionsBuilder {
            method: "mle".to_string(),
            selector: "mfi".to_string(),
            theta_min: DEFAULT_THETA_MIN,
            theta_max: DEFAULT_THETA_MAX,
            n_start_items: 0,
            start_select: "random".to_string(),
            prior_label: None,
            prior_params: None,
        }
    }
}

impl CatSessionOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = selector.into();
        self
    }

    pub fn theta_bounds(mut self, theta_min: f64, theta_max: f64) -> Self {
        self.theta_min = theta_min;
        self.theta_max = theta_max;
        self
    }

    pub fn start_policy(mut self, n_start_items: usize, start_select: impl Into<String>) -> Self {
        self.n_start_items = n_start_items;
        self.start_select = start_select.into();
        self
    }

    /// Required when `method` is `"eap"`: `label` is `norm`/`unif`
    /// (case-insensitive), `params` holds the distribution's two
    /// parameters in the order `PriorDist::parse` expects.
    pub fn prior(mut self, label: impl Into<String>, params: [f64; 2]) -> Self {
        self.prior_label = Some(label.into());
        self.prior_params = Some(params);
        self
    }

    pub fn build(self) -> CatResult<CatSessionOptions> {
        let selector = Selector::parse_name(&self.selector)?;
        let start_select = Selector::parse_name(&self.start_select)?;
        let method_name = Method::parse_name(&self.method)?;
        let method = match method_name {
            cat_estimate::MethodName::Mle => Method::Mle,
            cat_estimate::MethodName::Eap => {
                let label = self.prior_label.as_deref().ok_or_else(|| {
                    CatError::invalid_config("eap method requires a prior")
                })?;
                let params = self.prior_params.ok_or_else(|| {
                    CatError::invalid_config("eap method requires a prior")
                })?;
                let dist = PriorDist::parse(label, &params)?;
                let prior = Prior::new(dist, self.theta_min, self.theta_max)?;
                Method::Eap(prior)
            }
        };
        Ok(CatSessionOptions {
            method,
            selector,
            theta_min: self.theta_min,
            theta_max: self.theta_max,
            n_start_items: self.n_start_items,
            start_select,
        })
    }
}

/// Per-construct adaptive-testing state: response history, current ability
/// estimate, current standard error, and the configuration used to refresh
/// them. Spec §3/§4.5.
#[derive(Debug, Clone)]
pub struct CatSession {
    method: Method,
    selector: Selector,
    theta_min: f64,
    theta_max: f64,
    n_start_items: usize,
    start_select: Selector,
    theta: f64,
    se: f64,
    history: Vec<(ItemParams, u8)>,
}

impl CatSession {
    /// Build a fresh session from validated options: empty history,
    /// `theta = 0`, `SE = +infinity`, per spec §4.5.
    pub fn new(options: CatSessionOptions) -> Self {
        CatSession {
            method: options.method,
            selector: options.selector,
            theta_min: options.theta_min,
            theta_max: options.theta_max,
            n_start_items: options.n_start_items,
            start_select: options.start_select,
            theta: 0.0,
            se: f64::INFINITY,
            history: Vec::new(),
        }
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn se(&self) -> f64 {
        self.se
    }

    pub fn n_items(&self) -> usize {
        self.history.len()
    }

    pub fn history(&self) -> &[(ItemParams, u8)] {
        &self.history
    }

    /// Append one `(item, response)` and refresh theta/SE.
    pub fn update(&mut self, item: ItemParams, response: u8) {
        self.history.push((item, response));
        self.refresh();
    }

    /// Append a batch of `(item, response)` pairs at once and refresh
    /// theta/SE a single time afterward. Fails with `ArgumentMismatch` if
    /// the two lists differ in length, per spec §4.5.
    pub fn update_batch(&mut self, items: &[ItemParams], responses: &[u8]) -> CatResult<()> {
        if items.len() != responses.len() {
            return Err(CatError::argument_mismatch(
                "CatSession::update_batch",
                items.len(),
                responses.len(),
            ));
        }
        self.history
            .extend(items.iter().copied().zip(responses.iter().copied()));
        self.refresh();
        Ok(())
    }

    fn refresh(&mut self) {
        self.theta = estimate_theta(&self.method, &self.history, self.theta_min, self.theta_max);
        self.se = standard_error(self.theta, &self.history);
        log::trace!("session refreshed: theta={:.4} se={:.4}", self.theta, self.se);
    }

    /// Apply the start-up policy then the resulting selector to `pool`.
    /// `zeta_of` projects a pool element to its item parameters;
    /// `selector_override` overrides both the normal and start selector
    /// for this call only.
    pub fn find_next<T: Clone>(
        &self,
        pool: &[T],
        zeta_of: impl Fn(&T) -> ItemParams,
        rng: &mut RngSource,
        selector_override: Option<Selector>,
    ) -> (Option<T>, Vec<T>) {
        let resolved = effective_selector(
            self.selector,
            self.start_select,
            self.n_start_items,
            self.history.len(),
            selector_override,
        );
        select(resolved, self.theta, pool, zeta_of, rng, self.n_start_items)
    }
}
