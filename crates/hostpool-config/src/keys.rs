//! Well-known configuration keys.

/// Prefix of the store namespace; rules live in `{prefix}_auto_scale_rule`.
pub const COLLECTION: &str = "docker:collection";

/// Global default for `max_memory_ratio` when a rule leaves it unset.
pub const MAX_USED_MEMORY: &str = "docker:scheduler:max-used-memory";

/// Host metadata key carrying the total memory of a node.
pub const TOTAL_MEMORY_METADATA: &str = "docker:scheduler:total-memory-metadata";

// Flat keys of the pre-rules auto-scale configuration.

pub const LEGACY_METADATA_FILTER: &str = "docker:auto-scale:metadata-filter";
pub const LEGACY_MAX_CONTAINER_COUNT: &str = "docker:auto-scale:max-container-count";
pub const LEGACY_SCALE_DOWN_RATIO: &str = "docker:auto-scale:scale-down-ratio";
pub const LEGACY_PREVENT_REBALANCE: &str = "docker:auto-scale:prevent-rebalance";
