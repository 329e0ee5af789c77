//! Public façade of the adaptive testing engine.
//!
//! Re-exports everything a host needs: the math kernel's item-parameter
//! type, the per-construct [`CatSession`], the multi-construct
//! [`MultiCat`] orchestrator, and the early-stopping controllers. This is
//! the engine's `L5`+`L6` layer.

mod multicat;
mod session;
mod stimulus;
mod stopping;

pub use cat_kernel::{ItemParams, ItemParamsInput, Prior, PriorDist, ValidationMode};
pub use cat_select::{select, Selector};

pub use multicat::{MultiCat, MultiCatBuilder, UpdateAndSelectOptions, UNVALIDATED_CAT};
pub use session::{CatSession, CatSessionOptions, CatSessionOptionsBuilder, DEFAULT_THETA_MAX, DEFAULT_THETA_MIN};
pub use stimulus::{MultiZetaStimulus, ZetaTuple};
pub use stopping::{apply_operator, Operator, StopAfterNItems, StopIfSEBelowThreshold, StopOnSEPlateau, StoppingController, StoppingRule};

pub use cat_env::{CatError, CatResult};
pub use cat_estimate::Method;
