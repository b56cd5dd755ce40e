//! The key/value capability shared by every configuration representation,
//! and the flat store.

use std::collections::BTreeMap;

use toml::{Table, Value};

use crate::error::StoreError;

/// The minimal surface the merge utilities operate through.
///
/// An implementation exposes its current key set, reads one value per
/// key, overwrites with [`set`](ConfigStore::set), and accumulates with
/// [`add`](ConfigStore::add). Values are opaque payloads — an
/// implementation must hold whatever it is given and never coerce.
pub trait ConfigStore {
    /// Every key currently present. No ordering is promised beyond
    /// whatever the implementation happens to expose.
    fn keys(&self) -> Vec<String>;

    /// The current value for `key`, if any. A key holding several
    /// accumulated values surfaces them as one array.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Overwrite the value for `key`.
    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Accumulate `value` under `key`, keeping anything already there.
    fn add(&mut self, key: &str, value: Value) -> Result<(), StoreError>;
}

/// A flat store: keys map straight to values, with no path
/// interpretation of any kind.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatConfig {
    entries: BTreeMap<String, Value>,
}

impl FlatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a nested table into dotted keys.
    ///
    /// `[database] url = "pg://"` becomes the single entry
    /// `database.url = "pg://"`.
    pub fn from_table(table: Table) -> Self {
        let mut conf = Self::new();
        flatten_into(&mut conf.entries, String::new(), table);
        conf
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn flatten_into(entries: &mut BTreeMap<String, Value>, prefix: String, table: Table) {
    for (key, value) in table {
        let dotted = if prefix.is_empty() {
            key
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Table(inner) => flatten_into(entries, dotted, inner),
            leaf => {
                entries.insert(dotted, leaf);
            }
        }
    }
}

impl ConfigStore for FlatConfig {
    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn add(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        match self.entries.remove(key) {
            None => {
                self.entries.insert(key.to_string(), value);
            }
            Some(Value::Array(mut values)) => {
                values.push(value);
                self.entries.insert(key.to_string(), Value::Array(values));
            }
            Some(single) => {
                self.entries
                    .insert(key.to_string(), Value::Array(vec![single, value]));
            }
        }
        Ok(())
    }
}
