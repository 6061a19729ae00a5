//! Rule defaulting and validation.
//!
//! Normalization runs before a rule is written and again whenever a rule is
//! read back, so reads report the same effective values a write would have
//! stored.

use hostpool_config::{ConfigSource, keys};
use hostpool_state::AutoScaleRule;

use crate::error::ValidationError;

/// Scale-down ratio applied when a rule leaves it unset.
pub const DEFAULT_SCALE_DOWN_RATIO: f64 = 1.333;

/// Apply defaults to `rule` in place and check that it is usable.
///
/// - An unset (`0`) scale-down ratio becomes [`DEFAULT_SCALE_DOWN_RATIO`];
///   any other value must be finite and greater than 1.0.
/// - An unset (`0`) max memory ratio takes `docker:scheduler:max-used-memory`.
///   The resulting ratio must be finite.
/// - An enabled rule needs either a positive max container count, or a
///   positive memory ratio together with `docker:scheduler:total-memory-metadata`.
///
/// Missing configuration keys read as zero or empty.
pub fn normalize(
    rule: &mut AutoScaleRule,
    config: &dyn ConfigSource,
) -> Result<(), ValidationError> {
    if rule.scale_down_ratio == 0.0 {
        rule.scale_down_ratio = DEFAULT_SCALE_DOWN_RATIO;
    } else if !rule.scale_down_ratio.is_finite() || rule.scale_down_ratio <= 1.0 {
        return Err(ValidationError::ScaleDownRatio(rule.scale_down_ratio));
    }

    if rule.max_memory_ratio == 0.0 {
        rule.max_memory_ratio = config.get_float(keys::MAX_USED_MEMORY).unwrap_or(0.0);
    }
    if !rule.max_memory_ratio.is_finite() {
        return Err(ValidationError::MaxMemoryRatio(rule.max_memory_ratio));
    }

    let total_memory_metadata = config
        .get_string(keys::TOTAL_MEMORY_METADATA)
        .unwrap_or_default();
    if rule.enabled
        && rule.max_container_count <= 0
        && (total_memory_metadata.is_empty() || rule.max_memory_ratio <= 0.0)
    {
        return Err(ValidationError::MissingCapacity);
    }

    Ok(())
}
