//! Locate configuration resources across heterogeneous addressing
//! schemes, and merge key/value configuration trees through a minimal
//! capability interface.
//!
//! ```no_run
//! if let Some(url) = confloc::locate(Some("/etc/myapp"), "myapp.toml") {
//!     println!("loading configuration from {url}");
//! }
//! ```
//!
//! That single call tries `myapp.toml` as a direct URL, as an absolute
//! path, under `/etc/myapp/`, under the user's home directory, and
//! finally against any registered resource loaders — and returns the
//! first hit as a URL, or `None`.
//!
//! # Why confloc
//!
//! Applications take configuration names from many mouths: a CLI flag
//! holding an absolute path, a config file referencing a sibling by
//! relative name, a deployment manifest carrying a full URL, a default
//! baked in as a logical resource name. Handling each shape by hand means
//! scattered `if`-ladders that disagree about precedence from one call
//! site to the next.
//!
//! Confloc replaces that with one fixed resolution chain. Every addressing
//! scheme gets exactly one slot, the order never changes, and the caller
//! always gets back the same currency — a URL.
//!
//! # The resolution chain
//!
//! [`locate()`] (and [`locate_with`], for an explicit [`FileSystem`]) walks
//! these steps in order and stops at the first hit:
//!
//! 1. **Direct URL** — `name` is already a full URL, or joins onto a URL
//!    in `base`. Trusted as-is; nothing is probed.
//! 2. **Absolute path** — `name` is an absolute local path and an entry
//!    exists there.
//! 3. **Base directory** — `name` relative to `base` (or to the working
//!    directory when `base` is absent), existence-checked.
//! 4. **Home directory** — `name` relative to the user's home,
//!    existence-checked.
//! 5. **Resource loaders** — the thread's context loader, then the
//!    process-wide loader. See [`ResourceLoader`] and [`DirLoader`].
//!
//! Missing everywhere is `None`, never an error — a nonexistent resource
//! is an expected answer. Each step traces its outcome at debug level; a
//! candidate that cannot be expressed as a URL is logged as a warning and
//! the chain simply moves on.
//!
//! One step deserves a caveat: whether a leading separator makes a path
//! absolute differs by platform (Unix says yes, Windows says no), so a
//! name like `/subdir/app.toml` takes step 2 on one platform and step 3
//! on the other. That ambiguity is left as documented behavior rather
//! than papered over; callers on either platform may be relying on their
//! platform's reading.
//!
//! # Merging
//!
//! [`copy`] and [`append`] merge any two stores that expose the
//! [`ConfigStore`] capability — key enumeration, get, overwriting set,
//! accumulating add. [`copy`] overwrites per key and is idempotent;
//! [`append`] accumulates per key, so running it twice doubles the
//! values. Values are opaque payloads ([`toml::Value`]) and are never
//! coerced.
//!
//! # Flat and tree representations
//!
//! [`FlatConfig`] maps keys straight to values. [`TreeConfig`] interprets
//! keys as paths through a [`PathStrategy`] (delimiter-based, `.` by
//! default). [`to_tree`] promotes either representation — an existing
//! tree passes through, a flat store is imported with delimiter splitting
//! suspended so that a flat key like `a.b` stays one segment instead of
//! exploding into a subtree.
//!
//! # Fail-fast mode
//!
//! By default [`TreeConfig`] logs and ignores keys its strategy cannot
//! interpret. [`TreeConfig::set_fail_fast`] escalates every future such
//! key into a hard [`StoreError::InvalidKey`] — opt-in strictness,
//! installed once per instance.

pub mod error;

mod address;
mod fs;
mod loader;
mod locate;
mod merge;
mod promote;
mod store;
mod tree;

pub use address::{Address, path_to_url, url_to_path};
pub use error::StoreError;
pub use fs::{DefaultFileSystem, FileSystem, default_file_system, set_default_file_system};
pub use loader::{
    DirLoader, ResourceLoader, resolve_resource, set_context_loader, set_global_loader,
};
pub use locate::{local_path, locate, locate_with};
pub use merge::{append, copy};
pub use promote::{AnyConfig, to_tree};
pub use store::{ConfigStore, FlatConfig};
pub use tree::{PathStrategy, TreeConfig};
