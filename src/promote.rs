//! Promotion of either configuration representation into the tree form.

use tracing::debug;

use crate::error::StoreError;
use crate::merge::append;
use crate::store::FlatConfig;
use crate::tree::{PathStrategy, TreeConfig};

/// A configuration in either representation.
#[derive(Debug, Clone)]
pub enum AnyConfig {
    Flat(FlatConfig),
    Tree(TreeConfig),
}

impl From<FlatConfig> for AnyConfig {
    fn from(conf: FlatConfig) -> Self {
        AnyConfig::Flat(conf)
    }
}

impl From<TreeConfig> for AnyConfig {
    fn from(conf: TreeConfig) -> Self {
        AnyConfig::Tree(conf)
    }
}

/// Promote `conf` to the tree representation.
///
/// A tree passes through unchanged, except that a supplied `strategy` is
/// installed on it. A flat store is appended into a fresh tree with
/// delimiter splitting suspended for the duration of the import, so a
/// flat key containing the delimiter lands as one path segment instead of
/// exploding into a nested subtree; the prior splitting setting is
/// restored afterwards.
pub fn to_tree(conf: AnyConfig, strategy: Option<PathStrategy>) -> Result<TreeConfig, StoreError> {
    match conf {
        AnyConfig::Tree(mut tree) => {
            if let Some(strategy) = strategy {
                tree.set_strategy(strategy);
            }
            Ok(tree)
        }
        AnyConfig::Flat(flat) => {
            let mut tree = TreeConfig::new();
            if let Some(strategy) = strategy {
                tree.set_strategy(strategy);
            }
            let prior = tree.split_keys();
            tree.set_split_keys(false);
            let imported = append(&flat, &mut tree);
            tree.set_split_keys(prior);
            imported?;
            debug!(keys = flat.len(), "promoted flat configuration to a tree");
            Ok(tree)
        }
    }
}
