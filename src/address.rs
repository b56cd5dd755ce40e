//! Resolved addresses and the path/URL boundary.
//!
//! The resolution chain works with two kinds of candidates: ready URLs and
//! local filesystem paths. Callers always receive a URL, so a winning path
//! is normalized through the platform's absolute-path-to-URL convention.
//! Coming back the other way, the path component of a `file` URL is
//! percent-decoded before it becomes a filesystem path.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

/// A resolution candidate: a ready URL, or a local path not yet expressed
/// as one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Address {
    Url(Url),
    Local(PathBuf),
}

impl Address {
    /// Normalize to the external URL form.
    ///
    /// Relative local paths are absolutized against the working directory
    /// first. `None` when the path cannot be expressed as a URL.
    pub fn into_url(self) -> Option<Url> {
        match self {
            Address::Url(url) => Some(url),
            Address::Local(path) => path_to_url(&path),
        }
    }
}

impl From<Url> for Address {
    fn from(url: Url) -> Self {
        Address::Url(url)
    }
}

impl From<PathBuf> for Address {
    fn from(path: PathBuf) -> Self {
        Address::Local(path)
    }
}

/// Convert a local path to a `file` URL.
///
/// Relative paths are resolved against the working directory before
/// conversion, since a `file` URL always carries an absolute path.
pub fn path_to_url(path: &Path) -> Option<Url> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(absolute).ok()
}

/// Convert a `file` URL back to a local path, percent-decoding the path
/// component. `None` for any other scheme.
pub fn url_to_path(url: &Url) -> Option<PathBuf> {
    if url.scheme() != "file" {
        return None;
    }
    let decoded = percent_decode_str(url.path()).decode_utf8().ok()?;
    Some(PathBuf::from(decoded.into_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_path_round_trips() {
        let url = path_to_url(Path::new("/etc/app/db.conf")).unwrap();
        assert_eq!(url.as_str(), "file:///etc/app/db.conf");
        assert_eq!(url_to_path(&url).unwrap(), PathBuf::from("/etc/app/db.conf"));
    }

    #[test]
    fn path_with_space_is_encoded_and_decoded() {
        let url = path_to_url(Path::new("/etc/my app/db.conf")).unwrap();
        assert_eq!(url.as_str(), "file:///etc/my%20app/db.conf");
        assert_eq!(
            url_to_path(&url).unwrap(),
            PathBuf::from("/etc/my app/db.conf")
        );
    }

    #[test]
    fn relative_path_is_absolutized() {
        let url = path_to_url(Path::new("db.conf")).unwrap();
        assert_eq!(url.scheme(), "file");
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(url_to_path(&url).unwrap(), cwd.join("db.conf"));
    }

    #[test]
    fn non_file_scheme_is_rejected() {
        let url = Url::parse("http://example.com/db.conf").unwrap();
        assert_eq!(url_to_path(&url), None);
    }

    #[test]
    fn url_address_passes_through() {
        let url = Url::parse("http://example.com/app.toml").unwrap();
        let address = Address::from(url.clone());
        assert_eq!(address.into_url(), Some(url));
    }

    #[test]
    fn local_address_becomes_file_url() {
        let address = Address::from(PathBuf::from("/etc/app/db.conf"));
        let url = address.into_url().unwrap();
        assert_eq!(url.as_str(), "file:///etc/app/db.conf");
    }
}
