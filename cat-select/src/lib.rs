//! Item-selection strategies and non-adaptive start-up policy.
//!
//! This is the engine's `L4` layer: it consumes `cat-kernel`'s response
//! function and closest-index search, plus the engine's shared
//! [`cat_env::RngSource`], to pick the next stimulus from a remaining pool.
//! Nothing here knows about sessions, history, or multi-CAT bookkeeping —
//! a selector only ever sees "current theta" and "what's left".

mod selector;
mod startup;

pub use selector::{select, Selector};
pub use startup::effective_selector;
