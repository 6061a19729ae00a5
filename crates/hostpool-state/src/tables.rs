//! redb table naming for the rule store.
//!
//! Rule tables use `&str` keys (the metadata filter) and `&[u8]` values
//! (JSON-serialized `AutoScaleRule`).

use redb::TableDefinition;

/// Fixed suffix appended to the configured collection prefix.
pub const RULE_TABLE_SUFFIX: &str = "_auto_scale_rule";

/// Build the rule table name for a collection prefix, e.g. `docker_auto_scale_rule`.
pub fn rule_table_name(prefix: &str) -> String {
    format!("{prefix}{RULE_TABLE_SUFFIX}")
}

/// Table definition for a rule table name.
pub fn rule_table(name: &str) -> TableDefinition<'_, &'static str, &'static [u8]> {
    TableDefinition::new(name)
}
