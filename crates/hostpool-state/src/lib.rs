//! hostpool-state — persistent store for auto-scale rules.
//!
//! Backed by [redb](https://docs.rs/redb). Rules are JSON-serialized into a
//! single `&str -> &[u8]` table keyed by the rule's metadata filter. The
//! table name is derived from a deployment-wide prefix so several
//! deployments can share one database file.
//!
//! Consumers program against the [`RuleStore`] trait; [`StateStore`] is the
//! redb implementation. It is `Clone` + `Send` + `Sync` (backed by
//! `Arc<Database>`).

pub mod error;
pub mod store;
pub mod tables;
pub mod types;

pub use error::{StateError, StateResult};
pub use store::{RuleStore, StateStore};
pub use types::*;
