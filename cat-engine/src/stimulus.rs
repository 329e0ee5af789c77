use std::collections::HashSet;

use cat_env::{CatError, CatResult};
use cat_kernel::ItemParams;
use serde::{Deserialize, Serialize};

/// One construct's parameter tuple within a [`MultiZetaStimulus`], tagged
/// with the construct names it is calibrated for. Spec §3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZetaTuple {
    pub cats: Vec<String>,
    pub zeta: ItemParams,
}

impl ZetaTuple {
    pub fn new(cats: Vec<String>, zeta: ItemParams) -> Self {
        ZetaTuple { cats, zeta }
    }
}

/// A stimulus carrying one or more construct-tagged `zeta` tuples plus
/// opaque caller metadata `M`.
///
/// `id` is a stable identifier assigned by the caller, used to re-locate
/// the original stimulus after a selector returns a flattened per-construct
/// candidate. Spec §9's design notes call the "find the original stimulus
/// by equality of non-zeta fields" approach fragile and O(pool size); using
/// a stable id sidesteps the structural re-match entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiZetaStimulus<M> {
    pub id: u64,
    pub zetas: Vec<ZetaTuple>,
    pub metadata: M,
}

impl<M> MultiZetaStimulus<M> {
    pub fn new(id: u64, zetas: Vec<ZetaTuple>, metadata: M) -> Self {
        MultiZetaStimulus { id, zetas, metadata }
    }

    /// Whether this stimulus carries no construct calibration at all: an
    /// empty zeta list, or every tuple's cat list is empty. Spec §4.6.
    pub fn is_unvalidated(&self) -> bool {
        self.zetas.is_empty() || self.zetas.iter().all(|z| z.cats.is_empty())
    }

    /// Whether this stimulus has a zeta tuple calibrated for `cat`.
    pub fn is_available_for(&self, cat: &str) -> bool {
        self.zetas.iter().any(|z| z.cats.iter().any(|c| c == cat))
    }

    /// The zeta tuple calibrated for `cat`, if any.
    pub fn zeta_for(&self, cat: &str) -> Option<ItemParams> {
        self.zetas
            .iter()
            .find(|z| z.cats.iter().any(|c| c == cat))
            .map(|z| z.zeta)
    }

    /// Check that no construct name repeats across this stimulus's zeta
    /// tuples, per spec §3/§4.6's invariant.
    pub fn validate_no_duplicate_cats(&self) -> CatResult<()> {
        let mut seen = HashSet::new();
        for tuple in &self.zetas {
            for cat in &tuple.cats {
                if !seen.insert(cat.clone()) {
                    return Err(CatError::DuplicateCatName { cat: cat.clone() });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zeta() -> ItemParams {
        ItemParams::default()
    }

    #[test]
    fn empty_zetas_is_unvalidated() {
        let s = MultiZetaStimulus::new(1, vec![], serde_json::json!({}));
        assert!(s.is_unvalidated());
    }

    #[test]
    fn tuple_with_empty_cats_is_unvalidated() {
        let s = MultiZetaStimulus::new(1, vec![ZetaTuple::new(vec![], zeta())], serde_json::json!({}));
        assert!(s.is_unvalidated());
    }

    #[test]
    fn tagged_tuple_is_available_for_its_cat() {
        let s = MultiZetaStimulus::new(
            1,
            vec![ZetaTuple::new(vec!["reading".to_string()], zeta())],
            serde_json::json!({}),
        );
        assert!(!s.is_unvalidated());
        assert!(s.is_available_for("reading"));
        assert!(!s.is_available_for("math"));
    }

    #[test]
    fn duplicate_cat_name_within_one_stimulus_is_rejected() {
        let s = MultiZetaStimulus::new(
            1,
            vec![
                ZetaTuple::new(vec!["reading".to_string()], zeta()),
                ZetaTuple::new(vec!["reading".to_string()], zeta()),
            ],
            serde_json::json!({}),
        );
        assert!(s.validate_no_duplicate_cats().is_err());
    }
}
