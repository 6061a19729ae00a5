//! The implicit rule defined by the flat `docker:auto-scale:*` keys.
//!
//! Deployments configured before per-pool rules existed describe a single
//! rule in global configuration. It is never persisted and is rebuilt from
//! configuration on every read.

use std::sync::Arc;

use hostpool_config::{ConfigSource, keys};
use hostpool_state::AutoScaleRule;

/// Synthesizes the legacy rule from configuration.
#[derive(Clone)]
pub struct LegacyRuleProvider {
    config: Arc<dyn ConfigSource>,
}

impl LegacyRuleProvider {
    pub fn new(config: Arc<dyn ConfigSource>) -> Self {
        Self { config }
    }

    /// Build the legacy rule. Absent keys read as zero, empty, or `false`;
    /// the rule is always enabled and is returned un-normalized.
    pub fn legacy_rule(&self) -> AutoScaleRule {
        let config = &self.config;
        AutoScaleRule {
            metadata_filter: config
                .get_string(keys::LEGACY_METADATA_FILTER)
                .unwrap_or_default(),
            max_container_count: config
                .get_int(keys::LEGACY_MAX_CONTAINER_COUNT)
                .unwrap_or(0),
            scale_down_ratio: config.get_float(keys::LEGACY_SCALE_DOWN_RATIO).unwrap_or(0.0),
            max_memory_ratio: 0.0,
            enabled: true,
            prevent_rebalance: config
                .get_bool(keys::LEGACY_PREVENT_REBALANCE)
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostpool_config::ConfigSnapshot;

    #[test]
    fn rule_from_flat_keys() {
        let config = ConfigSnapshot::from_toml_str(
            r#"
[docker.auto-scale]
metadata-filter = "pool=legacy"
max-container-count = 10
scale-down-ratio = 1.5
prevent-rebalance = true
"#,
        )
        .unwrap();
        let provider = LegacyRuleProvider::new(Arc::new(config));

        let rule = provider.legacy_rule();
        assert_eq!(rule.metadata_filter, "pool=legacy");
        assert_eq!(rule.max_container_count, 10);
        assert_eq!(rule.scale_down_ratio, 1.5);
        assert!(rule.prevent_rebalance);
        assert!(rule.enabled);
        assert_eq!(rule.max_memory_ratio, 0.0);
    }

    #[test]
    fn empty_config_gives_zeroed_enabled_rule() {
        let provider = LegacyRuleProvider::new(Arc::new(ConfigSnapshot::empty()));
        let rule = provider.legacy_rule();
        assert_eq!(
            rule,
            AutoScaleRule {
                enabled: true,
                ..AutoScaleRule::default()
            }
        );
    }

    #[test]
    fn provider_does_not_normalize() {
        let config = ConfigSnapshot::empty()
            .with(keys::LEGACY_METADATA_FILTER, "pool=legacy")
            .with(keys::LEGACY_SCALE_DOWN_RATIO, 0.5)
            .with(keys::MAX_USED_MEMORY, 0.9);
        let rule = LegacyRuleProvider::new(Arc::new(config)).legacy_rule();
        assert_eq!(rule.scale_down_ratio, 0.5);
        assert_eq!(rule.max_memory_ratio, 0.0);
    }
}
