//! Logical resource lookup through registered loaders.
//!
//! A loader maps logical names like `conf/app.toml` to URLs, independent
//! of any base path. Lookup runs in two tiers: a thread-scoped context
//! loader first, then a process-wide global loader. The first hit wins;
//! the tiers are never merged or deduplicated. [`DirLoader`] is the stock
//! loader — an ordered list of root directories searched for the named
//! entry.

use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;
use url::Url;

use crate::address::path_to_url;

/// Maps a logical resource name to a URL.
pub trait ResourceLoader: Send + Sync {
    /// Resolve `name`, or `None` when this loader does not know it.
    fn resource(&self, name: &str) -> Option<Url>;
}

/// A loader over an ordered list of root directories.
///
/// `name` is tried under each root in turn and the first existing entry
/// wins; later roots never shadow earlier ones.
#[derive(Debug, Clone)]
pub struct DirLoader {
    roots: Vec<PathBuf>,
}

impl DirLoader {
    pub fn new(roots: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            roots: roots.into_iter().collect(),
        }
    }
}

impl ResourceLoader for DirLoader {
    fn resource(&self, name: &str) -> Option<Url> {
        self.roots
            .iter()
            .map(|root| root.join(name))
            .find(|candidate| candidate.exists())
            .and_then(|found| path_to_url(&found))
    }
}

thread_local! {
    static CONTEXT: RefCell<Option<Arc<dyn ResourceLoader>>> = const { RefCell::new(None) };
}

static GLOBAL: RwLock<Option<Arc<dyn ResourceLoader>>> = RwLock::new(None);

/// Install (or clear, with `None`) the calling thread's context loader.
pub fn set_context_loader(loader: Option<Arc<dyn ResourceLoader>>) {
    CONTEXT.with(|context| *context.borrow_mut() = loader);
}

/// Install (or clear, with `None`) the process-wide loader.
pub fn set_global_loader(loader: Option<Arc<dyn ResourceLoader>>) {
    *GLOBAL.write() = loader;
}

/// Resolve a logical resource name: context tier first, then global.
pub fn resolve_resource(name: &str) -> Option<Url> {
    let context = CONTEXT.with(|context| context.borrow().clone());
    if let Some(loader) = context
        && let Some(url) = loader.resource(name)
    {
        debug!(name, %url, "resolved from the context loader");
        return Some(url);
    }

    let global = GLOBAL.read().clone();
    if let Some(loader) = global
        && let Some(url) = loader.resource(name)
    {
        debug!(name, %url, "resolved from the global loader");
        return Some(url);
    }

    None
}
