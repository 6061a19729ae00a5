//! The `ConfigSource` trait.

/// Typed read access to process-wide configuration.
///
/// Every getter returns `None` when the key is absent or holds a value that
/// cannot be read as the requested type.
pub trait ConfigSource: Send + Sync {
    fn get_string(&self, key: &str) -> Option<String>;

    fn get_int(&self, key: &str) -> Option<i64>;

    fn get_float(&self, key: &str) -> Option<f64>;

    fn get_bool(&self, key: &str) -> Option<bool>;
}
