//! The hierarchical store: keys as paths into a node tree.

use std::collections::BTreeMap;

use toml::Value;
use tracing::warn;

use crate::error::StoreError;
use crate::store::ConfigStore;

/// How a key string maps onto a path through the tree.
///
/// The delimiter splits a key into segments on the way in and joins
/// segment names back into keys on the way out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStrategy {
    delimiter: char,
}

impl PathStrategy {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn split<'k>(&self, key: &'k str) -> Vec<&'k str> {
        key.split(self.delimiter).collect()
    }
}

impl Default for PathStrategy {
    fn default() -> Self {
        Self { delimiter: '.' }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
struct Node {
    values: Vec<Value>,
    children: BTreeMap<String, Node>,
}

/// A tree-shaped store.
///
/// Keys are interpreted through the active [`PathStrategy`] unless
/// delimiter splitting is switched off, in which case a whole key is one
/// path segment. A key the strategy cannot interpret (empty, or with an
/// empty segment like `a..b`) is warn-logged and ignored by default;
/// [`set_fail_fast`](TreeConfig::set_fail_fast) escalates every such key
/// into a [`StoreError::InvalidKey`] instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeConfig {
    root: Node,
    strategy: PathStrategy,
    split_keys: bool,
    fail_fast: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root: Node::default(),
            strategy: PathStrategy::default(),
            split_keys: true,
            fail_fast: false,
        }
    }
}

impl TreeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_strategy(strategy: PathStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn strategy(&self) -> PathStrategy {
        self.strategy
    }

    /// Replace the active key-path strategy. Existing nodes keep their
    /// segment names; only the interpretation of future keys changes.
    pub fn set_strategy(&mut self, strategy: PathStrategy) {
        self.strategy = strategy;
    }

    /// Whether keys are currently split on the strategy delimiter.
    pub fn split_keys(&self) -> bool {
        self.split_keys
    }

    /// Switch delimiter splitting on or off. While off, a whole key is a
    /// single path segment, delimiters included.
    pub fn set_split_keys(&mut self, split: bool) {
        self.split_keys = split;
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    /// Escalate uninterpretable keys into hard errors for every future
    /// operation on this instance.
    pub fn set_fail_fast(&mut self, fail_fast: bool) {
        self.fail_fast = fail_fast;
    }

    pub fn is_empty(&self) -> bool {
        self.root.values.is_empty() && self.root.children.is_empty()
    }

    /// The names of the tree's top-level entries, in storage order.
    pub fn top_level_keys(&self) -> Vec<String> {
        self.root.children.keys().cloned().collect()
    }

    fn segments<'k>(&self, key: &'k str) -> Result<Vec<&'k str>, StoreError> {
        let segments: Vec<&str> = if self.split_keys {
            self.strategy.split(key)
        } else {
            vec![key]
        };
        if key.is_empty() || segments.iter().any(|segment| segment.is_empty()) {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
                reason: "empty path segment".into(),
            });
        }
        Ok(segments)
    }

    /// Lenient mode swallows the error with a warning; fail-fast returns it.
    fn reject(&self, err: StoreError) -> Result<(), StoreError> {
        if self.fail_fast {
            Err(err)
        } else {
            warn!(%err, "ignoring uninterpretable key");
            Ok(())
        }
    }

    fn node_mut(&mut self, segments: &[&str]) -> &mut Node {
        let mut node = &mut self.root;
        for segment in segments {
            node = node.children.entry(segment.to_string()).or_default();
        }
        node
    }
}

impl ConfigStore for TreeConfig {
    fn keys(&self) -> Vec<String> {
        let mut keys = Vec::new();
        collect_keys(&self.root, None, self.strategy.delimiter(), &mut keys);
        keys
    }

    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let segments = match self.segments(key) {
            Ok(segments) => segments,
            Err(err) => return self.reject(err).map(|()| None),
        };

        let mut node = &self.root;
        for segment in segments {
            match node.children.get(segment) {
                Some(child) => node = child,
                None => return Ok(None),
            }
        }
        Ok(match node.values.as_slice() {
            [] => None,
            [single] => Some(single.clone()),
            many => Some(Value::Array(many.to_vec())),
        })
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let segments = match self.segments(key) {
            Ok(segments) => segments,
            Err(err) => return self.reject(err),
        };
        self.node_mut(&segments).values = vec![value];
        Ok(())
    }

    fn add(&mut self, key: &str, value: Value) -> Result<(), StoreError> {
        let segments = match self.segments(key) {
            Ok(segments) => segments,
            Err(err) => return self.reject(err),
        };
        self.node_mut(&segments).values.push(value);
        Ok(())
    }
}

fn collect_keys(node: &Node, prefix: Option<&str>, delimiter: char, out: &mut Vec<String>) {
    for (name, child) in &node.children {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{delimiter}{name}"),
            None => name.clone(),
        };
        if !child.values.is_empty() {
            out.push(key.clone());
        }
        collect_keys(child, Some(&key), delimiter, out);
    }
}
