//! The resolution chain: one ordered walk over every way a configuration
//! resource can be addressed.
//!
//! [`locate`] reconciles direct URLs, absolute paths, base-relative paths,
//! the user home directory, and the registered resource loaders into a
//! single deterministic order. Each step is attempted exactly once per
//! call, the first hit wins, and a miss everywhere is `None` — absence is
//! an expected outcome, not an error. Nothing is cached between calls, so
//! two calls with the same arguments against the same disk and loader
//! state resolve identically.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use url::Url;

use crate::address::{Address, url_to_path};
use crate::fs::{FileSystem, default_file_system};
use crate::loader;

/// Locate `name` against the process-wide default filesystem.
///
/// See [`locate_with`] for the search order.
pub fn locate(base: Option<&str>, name: &str) -> Option<Url> {
    locate_with(&*default_file_system(), base, name)
}

/// Locate `name` using an explicit filesystem, trying in fixed order:
///
/// 1. A URL composed directly from `base` and `name`, trusted as-is with
///    no existence check.
/// 2. `name` as an absolute local path, when an entry exists there.
///    Whether a leading separator counts as absolute is the platform's
///    call — it does on Unix and does not on Windows — so a name like
///    `/subdir/app.toml` resolves here on one platform and falls through
///    to the base-relative step on the other.
/// 3. `name` relative to `base` (or to the working directory when `base`
///    is absent), when an entry exists there.
/// 4. `name` relative to the user home directory, when an entry exists.
/// 5. The registered resource loaders, context tier before global; `base`
///    plays no part in this step.
///
/// An empty `name` never resolves and attempts no step. A winning
/// candidate that cannot be expressed as a URL fails only its own step;
/// the chain always moves on to the next one.
pub fn locate_with(fs: &dyn FileSystem, base: Option<&str>, name: &str) -> Option<Url> {
    debug!(base = base.unwrap_or(""), name, "locating resource");
    if name.is_empty() {
        debug!("empty name never resolves");
        return None;
    }

    if let Some(url) = fs.direct_url(base, name)
        && let Some(url) = finish(Address::Url(url), "direct URL")
    {
        return Some(url);
    }

    let absolute = Path::new(name);
    if absolute.is_absolute()
        && absolute.exists()
        && let Some(url) = finish(Address::Local(absolute.to_path_buf()), "absolute path")
    {
        return Some(url);
    }

    if let Some(path) = fs.build_path(base, name)
        && path.exists()
        && let Some(url) = finish(Address::Local(path), "base directory")
    {
        return Some(url);
    }

    if let Some(home) = home_dir()
        && let Some(home) = home.to_str()
        && let Some(path) = fs.build_path(Some(home), name)
        && path.exists()
        && let Some(url) = finish(Address::Local(path), "home directory")
    {
        return Some(url);
    }

    if let Some(url) = loader::resolve_resource(name) {
        return Some(url);
    }

    debug!(name, "resource not found");
    None
}

/// Derive a local path for a `(base, name)` pair without touching the
/// filesystem.
///
/// An absolute `name` wins outright. When the pair composes a URL, the
/// result is that URL's decoded local path — `None` for non-`file`
/// schemes. Otherwise the default filesystem's path construction rule
/// applies. No existence check is performed at any point.
pub fn local_path(base: Option<&str>, name: &str) -> Option<PathBuf> {
    let direct = Path::new(name);
    if direct.is_absolute() {
        return Some(direct.to_path_buf());
    }

    let fs = default_file_system();
    if let Some(url) = fs.direct_url(base, name) {
        return url_to_path(&url);
    }
    fs.build_path(base, name)
}

/// Normalize a winning candidate, logging the step that produced it.
fn finish(candidate: Address, step: &str) -> Option<Url> {
    match candidate.into_url() {
        Some(url) => {
            debug!(%url, step, "resolved");
            Some(url)
        }
        None => {
            warn!(step, "winning candidate could not be converted to a URL");
            None
        }
    }
}

fn home_dir() -> Option<PathBuf> {
    let user = directories::UserDirs::new()?;
    Some(user.home_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::path_to_url;
    use crate::fs::DefaultFileSystem;
    use crate::loader::{DirLoader, ResourceLoader, set_context_loader};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    // Responds to exactly one name, to keep parallel tests out of each
    // other's way, and records nothing: reaching it at all is the signal.
    struct Marker {
        name: String,
    }

    impl ResourceLoader for Marker {
        fn resource(&self, name: &str) -> Option<Url> {
            (name == self.name).then(|| Url::parse("res://marker/hit").unwrap())
        }
    }

    fn marker(name: &str) -> Arc<dyn ResourceLoader> {
        Arc::new(Marker { name: name.into() })
    }

    #[test]
    fn empty_name_never_resolves() {
        assert_eq!(locate_with(&DefaultFileSystem, Some("/etc/app"), ""), None);
    }

    #[test]
    fn url_name_wins_regardless_of_existence() {
        let url = locate_with(
            &DefaultFileSystem,
            Some("/etc/app"),
            "http://example.com/missing/app.toml",
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://example.com/missing/app.toml");
    }

    #[test]
    fn url_base_composes_without_existence_check() {
        let url = locate_with(
            &DefaultFileSystem,
            Some("http://example.com/conf/"),
            "app.toml",
        )
        .unwrap();
        assert_eq!(url.as_str(), "http://example.com/conf/app.toml");
    }

    #[test]
    fn absolute_path_resolves_when_it_exists() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.toml");
        fs::write(&file, "port = 1\n").unwrap();

        let url = locate_with(&DefaultFileSystem, None, file.to_str().unwrap()).unwrap();
        assert_eq!(url, path_to_url(&file).unwrap());
    }

    #[test]
    fn absolute_path_precedes_resource_loaders() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ordered.toml");
        fs::write(&file, "port = 1\n").unwrap();
        let name = file.to_str().unwrap();

        set_context_loader(Some(marker(name)));
        let url = locate_with(&DefaultFileSystem, None, name).unwrap();
        set_context_loader(None);

        assert_eq!(url.scheme(), "file");
        assert_eq!(url, path_to_url(&file).unwrap());
    }

    #[test]
    fn base_relative_resolves_without_consulting_loaders() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("db.conf"), "x = 1\n").unwrap();

        set_context_loader(Some(marker("db.conf")));
        let url = locate_with(&DefaultFileSystem, dir.path().to_str(), "db.conf").unwrap();
        set_context_loader(None);

        assert_eq!(url, path_to_url(&dir.path().join("db.conf")).unwrap());
    }

    #[test]
    fn loader_is_the_last_resort() {
        let resources = TempDir::new().unwrap();
        fs::write(resources.path().join("settings.properties"), "a=1\n").unwrap();

        let loader = DirLoader::new([resources.path().to_path_buf()]);
        set_context_loader(Some(Arc::new(loader)));
        let url = locate_with(&DefaultFileSystem, None, "settings.properties").unwrap();
        set_context_loader(None);

        assert_eq!(
            url,
            path_to_url(&resources.path().join("settings.properties")).unwrap()
        );
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let dir = TempDir::new().unwrap();
        set_context_loader(None);
        assert_eq!(
            locate_with(&DefaultFileSystem, dir.path().to_str(), "no-such.toml"),
            None
        );
    }

    #[test]
    fn repeated_calls_resolve_identically() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("stable.toml"), "x = 1\n").unwrap();

        let base = dir.path().to_str();
        let first = locate_with(&DefaultFileSystem, base, "stable.toml");
        let second = locate_with(&DefaultFileSystem, base, "stable.toml");
        assert_eq!(first, second);
        assert!(first.is_some());
    }

    #[test]
    fn locate_uses_the_swappable_default_filesystem() {
        use crate::fs::{set_default_file_system, FileSystem};

        // Composes a URL for one magic name and otherwise behaves like the
        // stock filesystem, so concurrent tests are unaffected.
        struct Virtual;

        impl FileSystem for Virtual {
            fn direct_url(&self, base: Option<&str>, name: &str) -> Option<Url> {
                if name == "virtual.conf" {
                    return Some(Url::parse("res://virtual/virtual.conf").unwrap());
                }
                DefaultFileSystem.direct_url(base, name)
            }

            fn build_path(&self, base: Option<&str>, name: &str) -> Option<std::path::PathBuf> {
                DefaultFileSystem.build_path(base, name)
            }
        }

        set_default_file_system(Arc::new(Virtual));
        let url = locate(None, "virtual.conf");
        set_default_file_system(Arc::new(DefaultFileSystem));

        assert_eq!(url.unwrap().as_str(), "res://virtual/virtual.conf");
    }

    #[test]
    fn local_path_absolute_name_ignores_base() {
        assert_eq!(
            local_path(Some("/etc/app"), "/var/db.conf"),
            Some(PathBuf::from("/var/db.conf"))
        );
    }

    #[test]
    fn local_path_decodes_file_url_names() {
        assert_eq!(
            local_path(None, "file:///etc/my%20app/db.conf"),
            Some(PathBuf::from("/etc/my app/db.conf"))
        );
    }

    #[test]
    fn local_path_rejects_non_file_urls() {
        assert_eq!(local_path(None, "http://example.com/db.conf"), None);
    }

    #[test]
    fn local_path_joins_plain_pairs() {
        assert_eq!(
            local_path(Some("/etc/app"), "db.conf"),
            Some(PathBuf::from("/etc/app/db.conf"))
        );
    }
}
