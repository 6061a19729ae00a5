//! hostpool-autoscale — effective auto-scale rules for host pools.
//!
//! Rules are stored per metadata filter in a [`RuleStore`]. On top of the
//! stored rules sits one implicit "legacy" rule synthesized from the flat
//! `docker:auto-scale:*` configuration keys. The [`RuleRepository`] merges
//! the two and normalizes every rule it writes or returns.
//!
//! # Resolution
//!
//! ```text
//! list():
//!     rules  = store.find_all()
//!     legacy = config-derived rule
//!     drop legacy if any stored rule has the same filter
//!     normalize each rule, flag failures instead of aborting
//!     sort by metadata filter
//!
//! get(filter):
//!     stored rule, else legacy rule if its filter matches, else NotFound
//!     normalization failure is an error
//! ```
//!
//! Deleting a stored rule never hides the legacy rule; it reappears on the
//! next read.
//!
//! [`RuleStore`]: hostpool_state::RuleStore

pub mod error;
pub mod legacy;
pub mod normalize;
pub mod repository;

pub use error::{RuleError, RuleResult, ValidationError};
pub use legacy::LegacyRuleProvider;
pub use normalize::{DEFAULT_SCALE_DOWN_RATIO, normalize};
pub use repository::{ListedRule, RuleRepository};
