//! StateStore — redb-backed rule persistence.
//!
//! Every call opens its own read or write transaction, which is released
//! when it goes out of scope on every exit path. An upsert is a single write
//! transaction, so concurrent writers to the same key never interleave.

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::{StateError, StateResult};
use crate::tables::{rule_table, rule_table_name};
use crate::types::AutoScaleRule;

/// Convert any `Display` error into a `StateError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StateError::$variant(e.to_string())
    };
}

/// Keyed document collection holding auto-scale rules.
///
/// "Not found" is always distinguishable from other failures: lookups return
/// `Ok(None)` and deletes return [`StateError::NotFound`].
pub trait RuleStore: Send + Sync {
    /// Insert or fully replace the rule stored under its metadata filter.
    fn upsert(&self, rule: &AutoScaleRule) -> StateResult<()>;

    /// Get a rule by metadata filter.
    fn find_by_key(&self, key: &str) -> StateResult<Option<AutoScaleRule>>;

    /// List all stored rules.
    fn find_all(&self) -> StateResult<Vec<AutoScaleRule>>;

    /// Delete a rule by metadata filter.
    fn delete_by_key(&self, key: &str) -> StateResult<()>;
}

/// Thread-safe rule store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
    table: String,
}

impl StateStore {
    /// Open (or create) a persistent store at `path`, using the rule table
    /// for the given collection prefix.
    pub fn open(path: &Path, prefix: &str) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self::with_database(db, prefix)?;
        debug!(?path, table = %store.table, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory(prefix: &str) -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self::with_database(db, prefix)?;
        debug!(table = %store.table, "in-memory state store opened");
        Ok(store)
    }

    fn with_database(db: Database, prefix: &str) -> StateResult<Self> {
        let store = Self {
            db: Arc::new(db),
            table: rule_table_name(prefix),
        };
        store.ensure_tables()?;
        Ok(store)
    }

    /// Name of the redb table holding this deployment's rules.
    pub fn table_name(&self) -> &str {
        &self.table
    }

    fn rules(&self) -> TableDefinition<'_, &'static str, &'static [u8]> {
        rule_table(&self.table)
    }

    /// Create the rule table if it doesn't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(self.rules()).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }
}

impl RuleStore for StateStore {
    fn upsert(&self, rule: &AutoScaleRule) -> StateResult<()> {
        let key = rule.table_key();
        let value = serde_json::to_vec(rule).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(self.rules()).map_err(map_err!(Table))?;
            table
                .insert(key, value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "auto scale rule stored");
        Ok(())
    }

    fn find_by_key(&self, key: &str) -> StateResult<Option<AutoScaleRule>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(self.rules()).map_err(map_err!(Table))?;
        match table.get(key).map_err(map_err!(Read))? {
            Some(guard) => {
                let rule: AutoScaleRule =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(rule))
            }
            None => Ok(None),
        }
    }

    fn find_all(&self) -> StateResult<Vec<AutoScaleRule>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(self.rules()).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let rule: AutoScaleRule =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(rule);
        }
        Ok(results)
    }

    fn delete_by_key(&self, key: &str) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(self.rules()).map_err(map_err!(Table))?;
            existed = table.remove(key).map_err(map_err!(Write))?.is_some();
        }
        if !existed {
            txn.abort().map_err(map_err!(Transaction))?;
            return Err(StateError::NotFound(key.to_string()));
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "auto scale rule deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_rule(filter: &str, max_container_count: i64) -> AutoScaleRule {
        AutoScaleRule {
            metadata_filter: filter.to_string(),
            max_container_count,
            scale_down_ratio: 1.5,
            max_memory_ratio: 0.0,
            enabled: true,
            prevent_rebalance: false,
        }
    }

    #[test]
    fn rule_upsert_and_find() {
        let store = StateStore::open_in_memory("docker").unwrap();
        let rule = test_rule("pool=a", 5);

        store.upsert(&rule).unwrap();
        let retrieved = store.find_by_key("pool=a").unwrap();

        assert_eq!(retrieved, Some(rule));
    }

    #[test]
    fn find_nonexistent_returns_none() {
        let store = StateStore::open_in_memory("docker").unwrap();
        assert!(store.find_by_key("pool=nothing").unwrap().is_none());
    }

    #[test]
    fn upsert_replaces_whole_document() {
        let store = StateStore::open_in_memory("docker").unwrap();
        let mut rule = test_rule("pool=a", 5);
        rule.prevent_rebalance = true;
        store.upsert(&rule).unwrap();

        let replacement = AutoScaleRule::new("pool=a");
        store.upsert(&replacement).unwrap();

        let retrieved = store.find_by_key("pool=a").unwrap().unwrap();
        assert_eq!(retrieved, replacement);
        assert_eq!(store.find_all().unwrap().len(), 1);
    }

    #[test]
    fn find_all_rules() {
        let store = StateStore::open_in_memory("docker").unwrap();
        store.upsert(&test_rule("pool=b", 1)).unwrap();
        store.upsert(&test_rule("pool=a", 2)).unwrap();
        store.upsert(&test_rule("pool=c", 3)).unwrap();

        let all = store.find_all().unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn delete_existing_then_not_found() {
        let store = StateStore::open_in_memory("docker").unwrap();
        store.upsert(&test_rule("pool=a", 5)).unwrap();

        store.delete_by_key("pool=a").unwrap();
        assert!(store.find_by_key("pool=a").unwrap().is_none());

        let err = store.delete_by_key("pool=a").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn empty_store_operations() {
        let store = StateStore::open_in_memory("docker").unwrap();

        assert!(store.find_all().unwrap().is_empty());
        assert!(matches!(
            store.delete_by_key("nope"),
            Err(StateError::NotFound(key)) if key == "nope"
        ));
    }

    #[test]
    fn prefixes_are_separate_namespaces() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rules.redb");

        {
            let store = StateStore::open(&db_path, "prod").unwrap();
            assert_eq!(store.table_name(), "prod_auto_scale_rule");
            store.upsert(&test_rule("pool=a", 5)).unwrap();
        }

        let store = StateStore::open(&db_path, "staging").unwrap();
        assert!(store.find_all().unwrap().is_empty());
    }

    #[test]
    fn persistence_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("rules.redb");

        {
            let store = StateStore::open(&db_path, "docker").unwrap();
            store.upsert(&test_rule("pool=a", 7)).unwrap();
        }

        // Reopen the same database file.
        let store = StateStore::open(&db_path, "docker").unwrap();
        let rule = store.find_by_key("pool=a").unwrap();
        assert!(rule.is_some());
        assert_eq!(rule.unwrap().max_container_count, 7);
    }

    #[test]
    fn clones_share_the_database() {
        let store = StateStore::open_in_memory("docker").unwrap();
        let clone = store.clone();
        store.upsert(&test_rule("pool=a", 5)).unwrap();
        assert!(clone.find_by_key("pool=a").unwrap().is_some());
    }
}
