//! Generic merge operations over any pair of configuration stores.
//!
//! Both operations work purely through the [`ConfigStore`] capability, so
//! any flat/tree pairing merges the same way. Each source key is read
//! exactly once per call and nothing is cached across calls. Values pass
//! through untouched, whatever type they hold.
//!
//! Neither operation guards against `source` and `target` being the same
//! store; avoiding that aliasing is the caller's obligation. (With these
//! signatures it takes interior mutability to construct at all.)

use crate::error::StoreError;
use crate::store::ConfigStore;

/// Copy every key from `source` into `target`, overwriting any existing
/// value under the same key.
///
/// Calling this twice leaves `target` exactly as one call does.
pub fn copy<S, T>(source: &S, target: &mut T) -> Result<(), StoreError>
where
    S: ConfigStore + ?Sized,
    T: ConfigStore + ?Sized,
{
    for key in source.keys() {
        if let Some(value) = source.get(&key)? {
            target.set(&key, value)?;
        }
    }
    Ok(())
}

/// Accumulate every key from `source` into `target`, keeping whatever the
/// target already holds under the same keys.
pub fn append<S, T>(source: &S, target: &mut T) -> Result<(), StoreError>
where
    S: ConfigStore + ?Sized,
    T: ConfigStore + ?Sized,
{
    for key in source.keys() {
        if let Some(value) = source.get(&key)? {
            target.add(&key, value)?;
        }
    }
    Ok(())
}
