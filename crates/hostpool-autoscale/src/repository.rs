//! RuleRepository — effective rules over a store and the legacy rule.

use std::sync::Arc;

use hostpool_config::ConfigSource;
use hostpool_state::{AutoScaleRule, RuleStore, StateError};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{RuleError, RuleResult};
use crate::legacy::LegacyRuleProvider;
use crate::normalize::normalize;

/// A rule as returned by [`RuleRepository::list`].
///
/// `error` holds the validation failure from this listing, if any. It is
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedRule {
    #[serde(flatten)]
    pub rule: AutoScaleRule,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ListedRule {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// List/get/update/delete over stored rules merged with the legacy rule.
///
/// Holds no state of its own between calls: every operation re-reads the
/// store and configuration.
pub struct RuleRepository<S> {
    store: S,
    config: Arc<dyn ConfigSource>,
    legacy: LegacyRuleProvider,
}

impl<S: RuleStore> RuleRepository<S> {
    pub fn new(store: S, config: Arc<dyn ConfigSource>) -> Self {
        let legacy = LegacyRuleProvider::new(config.clone());
        Self {
            store,
            config,
            legacy,
        }
    }

    /// The underlying rule store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Normalize `rule` and store it, replacing any rule with the same filter.
    ///
    /// Nothing is written when validation fails. Returns the rule as stored.
    pub fn update(&self, mut rule: AutoScaleRule) -> RuleResult<AutoScaleRule> {
        normalize(&mut rule, self.config.as_ref())?;
        self.store.upsert(&rule)?;
        debug!(filter = %rule.metadata_filter, "auto scale rule updated");
        Ok(rule)
    }

    /// All effective rules, sorted by metadata filter.
    ///
    /// The legacy rule is included unless a stored rule has the same filter.
    /// Rules failing validation are still returned, with `error` set.
    pub fn list(&self) -> RuleResult<Vec<ListedRule>> {
        let stored = self.store.find_all()?;
        let legacy = self.legacy.legacy_rule();
        let overridden = stored
            .iter()
            .any(|rule| rule.metadata_filter == legacy.metadata_filter);

        let mut rules: Vec<ListedRule> = stored.into_iter().map(|rule| self.flag(rule)).collect();
        if overridden {
            debug!(filter = %legacy.metadata_filter, "legacy rule overridden by stored rule");
        } else {
            rules.push(self.flag(legacy));
        }
        rules.sort_by(|a, b| a.rule.metadata_filter.cmp(&b.rule.metadata_filter));
        Ok(rules)
    }

    /// The effective rule for `metadata_filter`.
    ///
    /// Falls back to the legacy rule when nothing is stored under that
    /// filter. A rule failing validation is an error here.
    pub fn get(&self, metadata_filter: &str) -> RuleResult<AutoScaleRule> {
        let mut rule = match self.store.find_by_key(metadata_filter)? {
            Some(rule) => rule,
            None => {
                let legacy = self.legacy.legacy_rule();
                if legacy.metadata_filter != metadata_filter {
                    return Err(RuleError::NotFound(metadata_filter.to_string()));
                }
                debug!(filter = %metadata_filter, "resolved legacy auto scale rule");
                legacy
            }
        };
        normalize(&mut rule, self.config.as_ref())?;
        Ok(rule)
    }

    /// Delete the stored rule for `metadata_filter`.
    ///
    /// A filter served only by the legacy rule is not found here, and the
    /// legacy rule keeps appearing in reads.
    pub fn delete(&self, metadata_filter: &str) -> RuleResult<()> {
        match self.store.delete_by_key(metadata_filter) {
            Ok(()) => Ok(()),
            Err(StateError::NotFound(key)) => Err(RuleError::NotFound(key)),
            Err(e) => Err(e.into()),
        }
    }

    fn flag(&self, mut rule: AutoScaleRule) -> ListedRule {
        let error = match normalize(&mut rule, self.config.as_ref()) {
            Ok(()) => None,
            Err(e) => {
                warn!(filter = %rule.metadata_filter, error = %e, "invalid auto scale rule");
                Some(e.to_string())
            }
        };
        ListedRule { rule, error }
    }
}
