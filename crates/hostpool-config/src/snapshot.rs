//! TOML-backed configuration snapshot.

use std::path::Path;

use toml::{Table, Value};
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::source::ConfigSource;

/// An immutable view of a parsed TOML configuration document.
///
/// Values are read leniently: integers satisfy float lookups, and strings
/// holding a number or bool satisfy the numeric and bool getters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSnapshot {
    root: Table,
}

impl ConfigSnapshot {
    /// A snapshot with no keys set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a snapshot from TOML text.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let root: Table = content.parse()?;
        Ok(Self { root })
    }

    /// Load a snapshot from a TOML file on disk.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_toml_str(&content)?;
        debug!(?path, "config loaded");
        Ok(snapshot)
    }

    /// Set `key` to `value`, creating intermediate tables as needed.
    ///
    /// A non-table value sitting on the path is replaced by a table.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) {
        let mut segments: Vec<&str> = key.split(':').collect();
        let Some(last) = segments.pop() else {
            return;
        };
        let mut table = &mut self.root;
        for segment in segments {
            let entry = table
                .entry(segment.to_string())
                .or_insert(Value::Table(Table::new()));
            if !entry.is_table() {
                *entry = Value::Table(Table::new());
            }
            table = match entry {
                Value::Table(inner) => inner,
                _ => unreachable!("path segment was just made a table"),
            };
        }
        table.insert(last.to_string(), value.into());
    }

    /// Builder-style variant of [`ConfigSnapshot::set`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    fn lookup(&self, key: &str) -> Option<&Value> {
        let mut segments = key.split(':');
        let mut current = self.root.get(segments.next()?)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }
}

impl ConfigSource for ConfigSnapshot {
    fn get_string(&self, key: &str) -> Option<String> {
        match self.lookup(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Integer(i) => Some(i.to_string()),
            Value::Float(f) => Some(f.to_string()),
            Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn get_int(&self, key: &str) -> Option<i64> {
        match self.lookup(key)? {
            Value::Integer(i) => Some(*i),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_float(&self, key: &str) -> Option<f64> {
        match self.lookup(key)? {
            Value::Float(f) => Some(*f),
            Value::Integer(i) => Some(*i as f64),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn get_bool(&self, key: &str) -> Option<bool> {
        match self.lookup(key)? {
            Value::Boolean(b) => Some(*b),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}
