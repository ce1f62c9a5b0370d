//! Durable calibration storage
//!
//! The engine persists two `u32` values through the
//! [`StateStore`](crate::traits::StateStore) trait. Two backends ship with
//! the crate:
//!
//! | Backend       | Feature      | Medium                         |
//! |---------------|--------------|--------------------------------|
//! | `MemoryStore` | always       | fixed-capacity map, `no_std`   |
//! | `FileStore`   | `store-file` | JSON document on the host disk |
//!
//! On the device, wrap the platform's flash key-value API (NVS, sequential
//! storage) in a `StateStore` impl instead.
//!
//! Both backends follow flash-store semantics: writes are staged and only
//! become visible to reads after `commit` for their namespace.

use crate::constants::storage::MAX_KEY_LEN;
use crate::errors::StoreError;

mod memory;
pub use memory::MemoryStore;

#[cfg(feature = "store-file")]
mod file;
#[cfg(feature = "store-file")]
pub use file::FileStore;

/// Reject names the flash backends could not hold
pub(crate) fn check_name(name: &str) -> Result<(), StoreError> {
    if name.is_empty() || name.len() > MAX_KEY_LEN {
        return Err(StoreError::InvalidKey);
    }
    Ok(())
}
