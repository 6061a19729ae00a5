//! hostpool-config — process-wide configuration lookup.
//!
//! Configuration is a TOML document addressed with colon-separated keys
//! (`docker:scheduler:max-used-memory` walks `[docker.scheduler]`). Consumers
//! depend on the [`ConfigSource`] trait and treat a missing key as "not set",
//! never as an error.

pub mod error;
pub mod keys;
pub mod snapshot;
pub mod source;

pub use error::{ConfigError, ConfigResult};
pub use snapshot::ConfigSnapshot;
pub use source::ConfigSource;
