//! Domain types for the rule store.

use serde::{Deserialize, Serialize};

/// Host-pool metadata selector, e.g. `pool=frontend`. Unique per rule.
pub type MetadataFilter = String;

/// Scaling thresholds for the hosts matched by a metadata filter.
///
/// Zero-valued numeric fields mean "unset"; defaults are applied when the
/// rule is normalized, not when it is stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AutoScaleRule {
    pub metadata_filter: MetadataFilter,
    /// Cap on containers per host. `<= 0` means unset.
    pub max_container_count: i64,
    /// Ratio of free capacity that triggers a scale down. Must exceed 1.0.
    pub scale_down_ratio: f64,
    /// Fraction of host memory considered full. 0 falls back to the global default.
    pub max_memory_ratio: f64,
    pub enabled: bool,
    /// Suppress container rebalancing for hosts under this rule.
    pub prevent_rebalance: bool,
}

impl AutoScaleRule {
    /// An empty rule for the given filter.
    pub fn new(metadata_filter: impl Into<MetadataFilter>) -> Self {
        Self {
            metadata_filter: metadata_filter.into(),
            ..Self::default()
        }
    }

    /// Key under which this rule is stored.
    pub fn table_key(&self) -> &str {
        &self.metadata_filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_unset() {
        let rule: AutoScaleRule =
            serde_json::from_str(r#"{"metadata_filter":"pool=a","enabled":true}"#).unwrap();
        assert_eq!(rule.metadata_filter, "pool=a");
        assert!(rule.enabled);
        assert_eq!(rule.max_container_count, 0);
        assert_eq!(rule.scale_down_ratio, 0.0);
        assert!(!rule.prevent_rebalance);
    }
}
