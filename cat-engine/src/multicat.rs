use std::collections::HashMap;

use cat_env::{CatError, CatResult, RngSource};
use cat_kernel::ItemParams;
use cat_select::Selector;

use crate::session::{CatSession, CatSessionOptions, CatSessionOptionsBuilder};
use crate::stimulus::MultiZetaStimulus;
use crate::stopping::StoppingRule;

/// The construct name always present on every [`MultiCat`]: the home for
/// stimuli calibrated for no construct at all. Spec §3/§4.6.
pub const UNVALIDATED_CAT: &str = "unvalidated";

/// Options for one [`MultiCat::update_and_select`] call. Only
/// `cat_to_select` is required; build via [`UpdateAndSelectOptions::new`]
/// and chain setters for the rest. Spec §4.6.
#[derive(Debug, Clone)]
pub struct UpdateAndSelectOptions {
    pub cat_to_select: String,
    pub cats_to_update: Vec<String>,
    pub items: Vec<u64>,
    pub answers: Vec<u8>,
    pub selector_override: Option<Selector>,
    pub corpus_to_select_from: Option<String>,
    pub cat_to_evaluate_early_stopping: Option<String>,
    pub return_undefined_on_exhaustion: bool,
}

impl UpdateAndSelectOptions {
    pub fn new(cat_to_select: impl Into<String>) -> Self {
        UpdateAndSelectOptions {
            cat_to_select: cat_to_select.into(),
            cats_to_update: Vec::new(),
            items: Vec::new(),
            answers: Vec::new(),
            selector_override: None,
            corpus_to_select_from: None,
            cat_to_evaluate_early_stopping: None,
            return_undefined_on_exhaustion: true,
        }
    }

    /// Administer `(items[i], answers[i])` to every construct named in
    /// `cats_to_update` before selecting the next item.
    pub fn batch(mut self, items: Vec<u64>, answers: Vec<u8>, cats_to_update: Vec<String>) -> Self {
        self.items = items;
        self.answers = answers;
        self.cats_to_update = cats_to_update;
        self
    }

    pub fn corpus_to_select_from(mut self, cat: impl Into<String>) -> Self {
        self.corpus_to_select_from = Some(cat.into());
        self
    }

    pub fn selector_override(mut self, selector: Selector) -> Self {
        self.selector_override = Some(selector);
        self
    }

    pub fn cat_to_evaluate_early_stopping(mut self, cat: impl Into<String>) -> Self {
        self.cat_to_evaluate_early_stopping = Some(cat.into());
        self
    }

    pub fn return_undefined_on_exhaustion(mut self, value: bool) -> Self {
        self.return_undefined_on_exhaustion = value;
        self
    }
}

/// Orchestrates several [`CatSession`]s over one shared multi-zeta corpus.
/// Spec §3/§4.6.
pub struct MultiCat<M> {
    sessions: HashMap<String, CatSession>,
    corpus: Vec<MultiZetaStimulus<M>>,
    remaining_items: Vec<MultiZetaStimulus<M>>,
    seen_items: Vec<MultiZetaStimulus<M>>,
    stopping: Option<StoppingRule>,
    stopping_reason: Option<String>,
    rng: RngSource,
}

/// Builds a [`MultiCat`], mirroring [`CatSessionOptionsBuilder`]'s shape:
/// set what's needed, call `build`.
pub struct MultiCatBuilder<M> {
    sessions: HashMap<String, CatSessionOptions>,
    corpus: Vec<MultiZetaStimulus<M>>,
    stopping: Option<StoppingRule>,
    seed: u64,
}

impl<M> MultiCatBuilder<M> {
    pub fn new() -> Self {
        MultiCatBuilder {
            sessions: HashMap::new(),
            corpus: Vec::new(),
            stopping: None,
            seed: 0,
        }
    }

    pub fn session(mut self, name: impl Into<String>, options: CatSessionOptions) -> Self {
        self.sessions.insert(name.into(), options);
        self
    }

    pub fn corpus(mut self, corpus: Vec<MultiZetaStimulus<M>>) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn stopping(mut self, stopping: StoppingRule) -> Self {
        self.stopping = Some(stopping);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self) -> CatResult<MultiCat<M>>
    where
        M: Clone,
    {
        MultiCat::new(self.sessions, self.corpus, self.stopping, self.seed)
    }
}

impl<M> Default for MultiCatBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: Clone> MultiCat<M> {
    /// Validate the corpus (no duplicate cat names within one stimulus)
    /// and construct sessions, always adding the internal `unvalidated`
    /// session with a `random` selector. Spec §4.6.
    pub fn new(
        sessions: HashMap<String, CatSessionOptions>,
        corpus: Vec<MultiZetaStimulus<M>>,
        stopping: Option<StoppingRule>,
        seed: u64,
    ) -> CatResult<Self> {
        if sessions.contains_key(UNVALIDATED_CAT) {
            return Err(CatError::invalid_config(format!(
                "'{UNVALIDATED_CAT}' is a reserved construct name"
            )));
        }
        for stimulus in &corpus {
            stimulus.validate_no_duplicate_cats()?;
        }

        let mut session_map: HashMap<String, CatSession> = sessions
            .into_iter()
            .map(|(name, options)| (name, CatSession::new(options)))
            .collect();
        let unvalidated_options = CatSessionOptionsBuilder::new().selector("random").build()?;
        session_map.insert(UNVALIDATED_CAT.to_string(), CatSession::new(unvalidated_options));

        Ok(MultiCat {
            sessions: session_map,
            remaining_items: corpus.clone(),
            corpus,
            seen_items: Vec::new(),
            stopping,
            stopping_reason: None,
            rng: RngSource::new(seed),
        })
    }

    pub fn thetas(&self) -> HashMap<String, f64> {
        self.sessions.iter().map(|(name, s)| (name.clone(), s.theta())).collect()
    }

    pub fn se_measurements(&self) -> HashMap<String, f64> {
        self.sessions.iter().map(|(name, s)| (name.clone(), s.se())).collect()
    }

    pub fn n_items(&self) -> HashMap<String, usize> {
        self.sessions.iter().map(|(name, s)| (name.clone(), s.n_items())).collect()
    }

    pub fn corpus(&self) -> &[MultiZetaStimulus<M>] {
        &self.corpus
    }

    pub fn seen_items(&self) -> &[MultiZetaStimulus<M>] {
        &self.seen_items
    }

    pub fn remaining_items(&self) -> &[MultiZetaStimulus<M>] {
        &self.remaining_items
    }

    pub fn stopping_reason(&self) -> Option<&str> {
        self.stopping_reason.as_deref()
    }

    pub fn session(&self, name: &str) -> Option<&CatSession> {
        self.sessions.get(name)
    }

    fn known(&self, name: &str) -> bool {
        name == UNVALIDATED_CAT || self.sessions.contains_key(name)
    }

    /// Route a response batch into the named constructs, consult early
    /// stopping, then pick the next item for `cat_to_select`. Spec §4.6's
    /// numbered contract.
    pub fn update_and_select(
        &mut self,
        opts: UpdateAndSelectOptions,
    ) -> CatResult<Option<MultiZetaStimulus<M>>> {
        self.stopping_reason = None;

        if !self.known(&opts.cat_to_select) {
            return Err(CatError::UnknownCat {
                cat: opts.cat_to_select.clone(),
            });
        }
        if let Some(name) = &opts.corpus_to_select_from {
            if !self.known(name) {
                return Err(CatError::UnknownCat { cat: name.clone() });
            }
        }
        for name in &opts.cats_to_update {
            if name == UNVALIDATED_CAT || !self.sessions.contains_key(name) {
                return Err(CatError::UnknownCat { cat: name.clone() });
            }
        }
        if opts.items.len() != opts.answers.len() {
            return Err(CatError::argument_mismatch(
                "MultiCat::update_and_select items/answers",
                opts.items.len(),
                opts.answers.len(),
            ));
        }

        self.route_batch(&opts)?;

        log::debug!(
            "update_and_select: batch_size={} cat_to_select={}",
            opts.items.len(),
            opts.cat_to_select
        );

        if self.check_early_stopping(&opts)? {
            return Ok(None);
        }

        Ok(self.select_next(&opts))
    }

    fn route_batch(&mut self, opts: &UpdateAndSelectOptions) -> CatResult<()> {
        let mut per_construct: HashMap<String, (Vec<ItemParams>, Vec<u8>)> = HashMap::new();
        for (&id, &answer) in opts.items.iter().zip(opts.answers.iter()) {
            if let Some(pos) = self.remaining_items.iter().position(|s| s.id == id) {
                let stimulus = self.remaining_items.remove(pos);
                for cat in &opts.cats_to_update {
                    if let Some(zeta) = stimulus.zeta_for(cat) {
                        let entry = per_construct.entry(cat.clone()).or_default();
                        entry.0.push(zeta);
                        entry.1.push(answer);
                    }
                }
                self.seen_items.push(stimulus);
            }
        }
        for (cat, (items, answers)) in per_construct {
            if let Some(session) = self.sessions.get_mut(&cat) {
                session.update_batch(&items, &answers)?;
            }
        }
        Ok(())
    }

    fn check_early_stopping(&mut self, opts: &UpdateAndSelectOptions) -> CatResult<bool> {
        let Some(rule) = &mut self.stopping else {
            return Ok(false);
        };
        let session_refs: HashMap<String, &CatSession> = self
            .sessions
            .iter()
            .filter(|(name, _)| name.as_str() != UNVALIDATED_CAT)
            .map(|(name, session)| (name.clone(), session))
            .collect();
        let fired = rule.evaluate(&session_refs, opts.cat_to_evaluate_early_stopping.as_deref())?;
        if fired {
            self.stopping_reason = Some("Early stopping".to_string());
            log::warn!(
                "early stopping fired while selecting for {}",
                opts.cat_to_select
            );
        }
        Ok(fired)
    }

    fn select_next(&mut self, opts: &UpdateAndSelectOptions) -> Option<MultiZetaStimulus<M>> {
        let cat_to_select = opts.cat_to_select.as_str();
        let unvalidated_branch = cat_to_select == UNVALIDATED_CAT;

        let passes_select = |item: &MultiZetaStimulus<M>| {
            if unvalidated_branch {
                item.is_unvalidated()
            } else {
                item.is_available_for(cat_to_select)
            }
        };
        let passes_corpus = |item: &MultiZetaStimulus<M>| {
            opts.corpus_to_select_from
                .as_deref()
                .map_or(true, |name| item.is_available_for(name))
        };

        let mut candidate_indices = Vec::new();
        let mut missing_indices = Vec::new();
        for (i, item) in self.remaining_items.iter().enumerate() {
            if passes_corpus(item) && passes_select(item) {
                candidate_indices.push(i);
            } else {
                missing_indices.push(i);
            }
        }

        let chosen = if unvalidated_branch {
            if candidate_indices.is_empty() {
                None
            } else {
                let pick = *self.rng.choose(&candidate_indices).expect("nonempty");
                Some(self.remaining_items[pick].clone())
            }
        } else if !candidate_indices.is_empty() {
            self.select_from_candidates(cat_to_select, &candidate_indices, opts.selector_override)
        } else {
            None
        };

        if chosen.is_some() {
            return chosen;
        }

        if opts.return_undefined_on_exhaustion {
            self.stopping_reason = Some(if unvalidated_branch {
                "No unvalidated items remaining".to_string()
            } else {
                format!("No validated items remaining for the requested corpus {cat_to_select}")
            });
            log::warn!("pool exhausted: {}", self.stopping_reason.as_deref().unwrap());
            None
        } else if missing_indices.is_empty() {
            None
        } else {
            let pick = *self.rng.choose(&missing_indices).expect("nonempty");
            Some(self.remaining_items[pick].clone())
        }
    }

    fn select_from_candidates(
        &mut self,
        cat_to_select: &str,
        candidate_indices: &[usize],
        selector_override: Option<Selector>,
    ) -> Option<MultiZetaStimulus<M>> {
        #[derive(Clone, Copy)]
        struct Candidate {
            id: u64,
            zeta: ItemParams,
        }

        let candidates: Vec<Candidate> = candidate_indices
            .iter()
            .map(|&i| {
                let item = &self.remaining_items[i];
                Candidate {
                    id: item.id,
                    zeta: item
                        .zeta_for(cat_to_select)
                        .expect("candidate index already passed the availability filter"),
                }
            })
            .collect();

        let session = self
            .sessions
            .get(cat_to_select)
            .expect("cat_to_select was validated known before reaching here");
        let (chosen, _rest) = session.find_next(&candidates, |c| c.zeta, &mut self.rng, selector_override);
        chosen.and_then(|c| self.remaining_items.iter().find(|s| s.id == c.id).cloned())
    }
}
