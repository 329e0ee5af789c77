use std::collections::HashMap;
use std::fmt;

use cat_env::{CatError, CatResult};

use crate::CatSession;

/// The boolean combinator applied across constructs' per-update firing
/// flags. Spec §4.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Only,
}

impl Operator {
    pub fn parse_name(s: &str) -> CatResult<Self> {
        match s.to_lowercase().as_str() {
            "and" => Ok(Operator::And),
            "or" => Ok(Operator::Or),
            "only" => Ok(Operator::Only),
            other => Err(CatError::invalid_operator(format!(
                "unknown stopping operator '{other}'"
            ))),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Only => "only",
        };
        f.write_str(name)
    }
}

/// Combine per-construct flags into one boolean per spec §4.7.
pub fn apply_operator(
    flags: &HashMap<String, bool>,
    operator: Operator,
    cat_to_evaluate: Option<&str>,
) -> CatResult<bool> {
    match operator {
        Operator::Or => Ok(flags.values().any(|&fired| fired)),
        Operator::And => Ok(!flags.is_empty() && flags.values().all(|&fired| fired)),
        Operator::Only => {
            let name = cat_to_evaluate.ok_or_else(|| {
                CatError::invalid_operator("'only' requires cat_to_evaluate_early_stopping")
            })?;
            Ok(flags.get(name).copied().unwrap_or(false))
        }
    }
}

/// A stateful early-stopping rule: incorporates the current session map
/// on every call and returns each construct's updated firing flag. Spec
/// §4.7's "polymorphic stopping controller" design note: one capability,
/// three concrete variants.
pub trait StoppingController {
    fn update(&mut self, sessions: &HashMap<String, &CatSession>) -> HashMap<String, bool>;
}

/// Fire once a construct's administered-item count reaches its configured
/// requirement.
#[derive(Debug, Clone, Default)]
pub struct StopAfterNItems {
    pub required: HashMap<String, usize>,
}

impl StopAfterNItems {
    pub fn new(required: HashMap<String, usize>) -> Self {
        StopAfterNItems { required }
    }
}

impl StoppingController for StopAfterNItems {
    fn update(&mut self, sessions: &HashMap<String, &CatSession>) -> HashMap<String, bool> {
        self.required
            .iter()
            .map(|(name, &required)| {
                let n = sessions.get(name).map(|s| s.n_items()).unwrap_or(0);
                (name.clone(), n >= required)
            })
            .collect()
    }
}

fn default_patience(map: &HashMap<String, usize>, name: &str) -> usize {
    map.get(name).copied().unwrap_or(1)
}

fn default_tolerance(map: &HashMap<String, f64>, name: &str) -> f64 {
    map.get(name).copied().unwrap_or(0.0)
}

/// Fire once a construct's last `patience` SE readings have all settled
/// within `tolerance` of their mean. A reading is only appended when the
/// session's item count strictly increased since the controller's last
/// update, so a construct left untouched this round isn't double-counted.
#[derive(Debug, Clone, Default)]
pub struct StopOnSEPlateau {
    pub patience: HashMap<String, usize>,
    pub tolerance: HashMap<String, f64>,
    history: HashMap<String, Vec<f64>>,
    last_n_items: HashMap<String, usize>,
}

impl StopOnSEPlateau {
    pub fn new(patience: HashMap<String, usize>, tolerance: HashMap<String, f64>) -> Self {
        StopOnSEPlateau {
            patience,
            tolerance,
            history: HashMap::new(),
            last_n_items: HashMap::new(),
        }
    }
}

impl StoppingController for StopOnSEPlateau {
    fn update(&mut self, sessions: &HashMap<String, &CatSession>) -> HashMap<String, bool> {
        let mut flags = HashMap::new();
        for (name, session) in sessions {
            let n = session.n_items();
            let last_n = self.last_n_items.get(name).copied().unwrap_or(0);
            if n > last_n {
                self.history.entry(name.clone()).or_default().push(session.se());
                self.last_n_items.insert(name.clone(), n);
            }

            let patience = default_patience(&self.patience, name);
            let tolerance = default_tolerance(&self.tolerance, name);
            let history = self.history.get(name).map(Vec::as_slice).unwrap_or(&[]);
            let fired = patience > 0 && history.len() >= patience && {
                let window = &history[history.len() - patience..];
                let mean = window.iter().sum::<f64>() / patience as f64;
                window.iter().all(|&se| (se - mean).abs() <= tolerance)
            };
            flags.insert(name.clone(), fired);
        }
        flags
    }
}

/// Fire once a construct's last `patience` SE readings have all dropped to
/// (or within `tolerance` of) `threshold`. Same history bookkeeping as
/// [`StopOnSEPlateau`].
#[derive(Debug, Clone, Default)]
pub struct StopIfSEBelowThreshold {
    pub threshold: HashMap<String, f64>,
    pub patience: HashMap<String, usize>,
    pub tolerance: HashMap<String, f64>,
    history: HashMap<String, Vec<f64>>,
    last_n_items: HashMap<String, usize>,
}

impl StopIfSEBelowThreshold {
    pub fn new(
        threshold: HashMap<String, f64>,
        patience: HashMap<String, usize>,
        tolerance: HashMap<String, f64>,
    ) -> Self {
        StopIfSEBelowThreshold {
            threshold,
            patience,
            tolerance,
            history: HashMap::new(),
            last_n_items: HashMap::new(),
        }
    }
}

impl StoppingController for StopIfSEBelowThreshold {
    fn update(&mut self, sessions: &HashMap<String, &CatSession>) -> HashMap<String, bool> {
        let mut flags = HashMap::new();
        for (name, session) in sessions {
            let n = session.n_items();
            let last_n = self.last_n_items.get(name).copied().unwrap_or(0);
            if n > last_n {
                self.history.entry(name.clone()).or_default().push(session.se());
                self.last_n_items.insert(name.clone(), n);
            }

            let patience = default_patience(&self.patience, name);
            let tolerance = default_tolerance(&self.tolerance, name);
            let threshold = self.threshold.get(name).copied().unwrap_or(0.0);
            let history = self.history.get(name).map(Vec::as_slice).unwrap_or(&[]);
            let fired = patience > 0
                && history.len() >= patience
                && history[history.len() - patience..]
                    .iter()
                    .all(|&se| se - threshold <= tolerance);
            flags.insert(name.clone(), fired);
        }
        flags
    }
}

/// A [`StoppingController`] paired with the logical operator that reduces
/// its per-construct flags to one boolean.
pub struct StoppingRule {
    controller: Box<dyn StoppingController + Send + Sync>,
    operator: Operator,
}

impl StoppingRule {
    pub fn new(controller: Box<dyn StoppingController + Send + Sync>, operator: Operator) -> Self {
        StoppingRule { controller, operator }
    }

    pub fn evaluate(
        &mut self,
        sessions: &HashMap<String, &CatSession>,
        cat_to_evaluate: Option<&str>,
    ) -> CatResult<bool> {
        let flags = self.controller.update(sessions);
        apply_operator(&flags, self.operator, cat_to_evaluate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CatSessionOptionsBuilder;
    use cat_kernel::ItemParams;

    fn session_with_items(n: usize) -> CatSession {
        let opts = CatSessionOptionsBuilder::new().build().unwrap();
        let mut session = CatSession::new(opts);
        for _ in 0..n {
            session.update(ItemParams { a: 1.0, b: 0.0, c: 0.0, d: 1.0 }, 1);
        }
        session
    }

    #[test]
    fn stop_after_n_items_fires_at_threshold() {
        let mut controller = StopAfterNItems::new(HashMap::from([("c1".to_string(), 2)]));
        let s = session_with_items(2);
        let sessions = HashMap::from([("c1".to_string(), &s)]);
        let flags = controller.update(&sessions);
        assert_eq!(flags.get("c1"), Some(&true));
    }

    #[test]
    fn stop_after_n_items_does_not_fire_below_threshold() {
        let mut controller = StopAfterNItems::new(HashMap::from([("c1".to_string(), 5)]));
        let s = session_with_items(2);
        let sessions = HashMap::from([("c1".to_string(), &s)]);
        let flags = controller.update(&sessions);
        assert_eq!(flags.get("c1"), Some(&false));
    }

    #[test]
    fn or_fires_when_any_construct_fires() {
        let flags = HashMap::from([("a".to_string(), false), ("b".to_string(), true)]);
        assert!(apply_operator(&flags, Operator::Or, None).unwrap());
    }

    #[test]
    fn and_requires_every_construct_to_fire() {
        let flags = HashMap::from([("a".to_string(), true), ("b".to_string(), false)]);
        assert!(!apply_operator(&flags, Operator::And, None).unwrap());
    }

    #[test]
    fn only_requires_cat_to_evaluate() {
        let flags = HashMap::from([("a".to_string(), true)]);
        assert!(apply_operator(&flags, Operator::Only, None).is_err());
        assert!(apply_operator(&flags, Operator::Only, Some("a")).unwrap());
    }

    #[test]
    fn se_plateau_only_records_when_item_count_increases() {
        let mut controller = StopOnSEPlateau::new(
            HashMap::from([("c1".to_string(), 2)]),
            HashMap::from([("c1".to_string(), 0.5)]),
        );
        let s = session_with_items(3);
        let sessions = HashMap::from([("c1".to_string(), &s)]);
        // Two updates without the session's item count changing must not
        // grow the history past one entry.
        controller.update(&sessions);
        controller.update(&sessions);
        assert_eq!(controller.history.get("c1").map(Vec::len), Some(1));
    }

    #[test]
    fn se_below_threshold_uses_default_patience_and_tolerance() {
        let mut controller = StopIfSEBelowThreshold::new(
            HashMap::from([("c1".to_string(), 100.0)]),
            HashMap::new(),
            HashMap::new(),
        );
        let s = session_with_items(1);
        let sessions = HashMap::from([("c1".to_string(), &s)]);
        let flags = controller.update(&sessions);
        // SE after one item is far below the generous threshold of 100.
        assert_eq!(flags.get("c1"), Some(&true));
    }
}
