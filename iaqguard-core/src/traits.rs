//! Core traits
//!
//! The seams between the engine and the platform: where calibration is
//! persisted, and how numbers are checked before they reach the algorithm.
//! Keep them simple - embedded devices don't need complex abstractions.

use crate::errors::StoreError;

/// Durable key-value store holding a handful of `u32` entries
///
/// Mirrors the shape of flash-backed stores such as ESP-IDF NVS: entries
/// live under a namespace, writes are staged until `commit`, and names are
/// at most [`MAX_KEY_LEN`](crate::constants::storage::MAX_KEY_LEN) bytes.
///
/// Implementations may block for as long as the medium needs; the engine
/// never calls into a store while holding its sampling lock.
///
/// ## Example
///
/// ```rust
/// use iaqguard_core::{MemoryStore, StateStore};
///
/// let mut store = MemoryStore::<8>::new();
/// store.write_u32("iaq_state", "samples", 42)?;
/// store.commit("iaq_state")?;
/// assert_eq!(store.read_u32("iaq_state", "samples")?, Some(42));
/// # Ok::<(), iaqguard_core::StoreError>(())
/// ```
pub trait StateStore {
    /// Read a committed value
    ///
    /// Returns `Ok(None)` when the namespace or key has never been written.
    fn read_u32(&mut self, namespace: &str, key: &str) -> Result<Option<u32>, StoreError>;

    /// Stage a value for the next `commit`
    fn write_u32(&mut self, namespace: &str, key: &str, value: u32) -> Result<(), StoreError>;

    /// Make every staged write in `namespace` durable
    fn commit(&mut self, namespace: &str) -> Result<(), StoreError>;
}

impl<T: StateStore + ?Sized> StateStore for &mut T {
    fn read_u32(&mut self, namespace: &str, key: &str) -> Result<Option<u32>, StoreError> {
        (**self).read_u32(namespace, key)
    }

    fn write_u32(&mut self, namespace: &str, key: &str, value: u32) -> Result<(), StoreError> {
        (**self).write_u32(namespace, key, value)
    }

    fn commit(&mut self, namespace: &str) -> Result<(), StoreError> {
        (**self).commit(namespace)
    }
}

/// Trait for values that can be validated
pub trait Validatable {
    /// Check if the value is physically valid (not NaN, infinite, etc)
    fn is_valid(&self) -> bool;
}

impl Validatable for f32 {
    fn is_valid(&self) -> bool {
        self.is_finite()
    }
}
