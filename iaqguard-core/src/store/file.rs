//! JSON file-backed store for host deployments
//!
//! The whole store is one small JSON document:
//!
//! ```json
//! {
//!   "iaq_state": { "gas_base": 231877, "samples": 4120 }
//! }
//! ```
//!
//! The document is read once on open. `commit` writes the full document to
//! a sibling `*.tmp` file and renames it over the original, so a crash
//! mid-write leaves either the old or the new calibration, never half of
//! one.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::check_name;
use crate::errors::StoreError;
use crate::traits::StateStore;

type Document = BTreeMap<String, BTreeMap<String, u32>>;

/// [`StateStore`] persisted as a JSON document on disk
///
/// ## Example
///
/// ```rust,no_run
/// use iaqguard_core::{FileStore, IaqEngine, MonotonicClock};
///
/// let store = FileStore::open("/var/lib/iaqguard/state.json")?;
/// let engine = IaqEngine::new(store, MonotonicClock::new());
/// engine.initialize(None)?;
/// # Ok::<(), iaqguard_core::IaqError>(())
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    committed: Document,
    staged: Document,
}

impl FileStore {
    /// Open the store at `path`
    ///
    /// A missing file is an empty store; it is created on the first commit.
    ///
    /// # Errors
    ///
    /// `Corrupted` when the file is not a valid document, `Io` when it
    /// exists but cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let committed = match fs::read(&path) {
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                log_error!("State file {} is corrupted: {}", path.display(), e);
                StoreError::Corrupted
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log_debug!("No state file at {}, starting empty", path.display());
                Document::new()
            }
            Err(e) => {
                log_error!("Cannot read state file {}: {}", path.display(), e);
                return Err(StoreError::Io { reason: "read" });
            }
        };

        Ok(Self {
            path,
            committed,
            staged: Document::new(),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn persist(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(|_| StoreError::Io {
            reason: "serialize",
        })?;

        let temp = self.temp_path();
        fs::write(&temp, bytes).map_err(|e| {
            log_error!("Cannot write {}: {}", temp.display(), e);
            StoreError::Io { reason: "write" }
        })?;
        fs::rename(&temp, &self.path).map_err(|e| {
            log_error!("Cannot replace {}: {}", self.path.display(), e);
            StoreError::Io { reason: "rename" }
        })
    }
}

impl StateStore for FileStore {
    fn read_u32(&mut self, namespace: &str, key: &str) -> Result<Option<u32>, StoreError> {
        check_name(namespace)?;
        check_name(key)?;

        Ok(self
            .committed
            .get(namespace)
            .and_then(|entries| entries.get(key))
            .copied())
    }

    fn write_u32(&mut self, namespace: &str, key: &str, value: u32) -> Result<(), StoreError> {
        check_name(namespace)?;
        check_name(key)?;

        self.staged
            .entry(namespace.to_owned())
            .or_default()
            .insert(key.to_owned(), value);
        Ok(())
    }

    fn commit(&mut self, namespace: &str) -> Result<(), StoreError> {
        check_name(namespace)?;

        let Some(pending) = self.staged.get(namespace) else {
            return Ok(());
        };

        let mut next = self.committed.clone();
        next.entry(namespace.to_owned())
            .or_default()
            .extend(pending.iter().map(|(k, v)| (k.clone(), *v)));

        // Staged writes survive a failed commit so the caller can retry
        self.persist(&next)?;

        self.committed = next;
        self.staged.remove(namespace);
        Ok(())
    }
}
