pub mod rules;

use std::path::Path;
use std::sync::Arc;

use hostpool_autoscale::RuleRepository;
use hostpool_config::{ConfigSnapshot, ConfigSource, keys};
use hostpool_state::StateStore;
use tracing::debug;

/// Collection prefix used when `docker:collection` is not configured.
const DEFAULT_COLLECTION: &str = "docker";

/// Load configuration and open the rule store under `data_dir`.
pub fn open_repository(
    config_path: Option<&Path>,
    data_dir: &Path,
) -> anyhow::Result<RuleRepository<StateStore>> {
    let config = match config_path {
        Some(path) => ConfigSnapshot::from_file(path)?,
        None => ConfigSnapshot::empty(),
    };
    let prefix = config
        .get_string(keys::COLLECTION)
        .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

    std::fs::create_dir_all(data_dir)?;
    let db_path = data_dir.join("hostpool.redb");
    let store = StateStore::open(&db_path, &prefix)?;
    debug!(path = ?db_path, table = store.table_name(), "rule store ready");

    Ok(RuleRepository::new(store, Arc::new(config)))
}
