//! The filesystem abstraction: composing URLs and local paths from a
//! `(base, name)` pair.
//!
//! Everything here is pure construction — no method touches the disk.
//! Existence checks belong to the resolution chain, which probes the
//! addresses built here. The process-wide default instance is swappable
//! for environments that address resources through something other than
//! the local filesystem.

use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use tracing::warn;
use url::Url;

/// Composes addresses from a base path and a file name.
///
/// `name` may be a relative path, an absolute path, or a full URL; `base`
/// may be absent, a directory path, or a URL supplying scheme and host.
pub trait FileSystem: Send + Sync {
    /// Compose a URL directly from `base` and `name`.
    ///
    /// A fully qualified URL in `name` passes through as-is. Otherwise
    /// `name` is joined onto `base` when `base` itself parses as a URL.
    /// No filesystem access, no existence check.
    fn direct_url(&self, base: Option<&str>, name: &str) -> Option<Url>;

    /// Compose a local path from `base` and `name`.
    ///
    /// An absolute `name` wins over any base; with no base the path is
    /// relative to the process working directory. Whether a leading
    /// separator makes `name` absolute is the platform's call (it does on
    /// Unix and does not on Windows) — callers relying on either reading
    /// get their platform's answer. No filesystem access.
    fn build_path(&self, base: Option<&str>, name: &str) -> Option<PathBuf>;
}

/// The stock [`FileSystem`]: plain URL parsing and path joining.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFileSystem;

impl FileSystem for DefaultFileSystem {
    fn direct_url(&self, base: Option<&str>, name: &str) -> Option<Url> {
        if let Ok(url) = Url::parse(name)
            && url.scheme().len() > 1
        {
            // single-letter schemes are Windows drive letters, not URLs
            return Some(url);
        }
        let base = base?;
        let base_url = Url::parse(base).ok().filter(|u| u.scheme().len() > 1)?;
        match base_url.join(name) {
            Ok(url) => Some(url),
            Err(err) => {
                warn!(base, name, %err, "could not join name onto base URL");
                None
            }
        }
    }

    fn build_path(&self, base: Option<&str>, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let name_path = Path::new(name);
        if name_path.is_absolute() {
            return Some(name_path.to_path_buf());
        }
        match base {
            Some(base) if !base.is_empty() => Some(Path::new(base).join(name_path)),
            _ => Some(name_path.to_path_buf()),
        }
    }
}

static DEFAULT: LazyLock<RwLock<Arc<dyn FileSystem>>> =
    LazyLock::new(|| RwLock::new(Arc::new(DefaultFileSystem)));

/// The process-wide default filesystem, used by [`locate`](crate::locate()).
pub fn default_file_system() -> Arc<dyn FileSystem> {
    DEFAULT.read().clone()
}

/// Replace the process-wide default filesystem.
pub fn set_default_file_system(fs: Arc<dyn FileSystem>) {
    *DEFAULT.write() = fs;
}
