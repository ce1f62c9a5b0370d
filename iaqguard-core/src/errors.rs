//! Error Types for the IAQ Engine
//!
//! ## Design Philosophy
//!
//! The engine runs inside a sampling loop on a microcontroller, so errors
//! follow the same rules as every other hot-path type in the firmware:
//!
//! 1. **Small Size**: variants carry at most a `&'static str` or an integer.
//!
//! 2. **No Heap Allocation**: no `String` payloads, messages are static.
//!
//! 3. **Copy Semantics**: errors can be logged, queued and returned freely.
//!
//! 4. **Recoverable**: nothing here is fatal. The surrounding loop logs the
//!    error and takes the next sample.
//!
//! ## Error Categories
//!
//! ### Caller Problems
//! - `InvalidState`: `calculate` before `initialize`
//! - `InvalidArgument`: gas heater not stable, non-positive resistance, or
//!   readings that compensate to a non-physical value
//!
//! ### Contention
//! - `Timeout`: the engine lock was not acquired within the bounded wait
//!
//! ### Persistence
//! - `NotFound`: no calibration has ever been saved (fresh install)
//! - `Store`: the key-value store failed to open, read, write or commit
//!
//! ### Start-up
//! - `Init`: the supplied configuration cannot drive the engine
//!
//! ## Handling Strategy
//!
//! ```rust
//! use iaqguard_core::{IaqEngine, IaqError, IaqOutput, MemoryStore, RawReading};
//!
//! fn sample<C: iaqguard_core::TimeSource>(
//!     engine: &IaqEngine<MemoryStore<8>, C>,
//!     reading: &RawReading,
//! ) -> IaqOutput {
//!     match engine.calculate(reading) {
//!         Ok(output) => output,
//!         Err(IaqError::InvalidArgument { .. }) => {
//!             // Heater still warming up - publish the "unknown" record
//!             IaqOutput::default()
//!         }
//!         Err(IaqError::Timeout { .. }) => {
//!             // Another task holds the engine - reuse the previous result
//!             engine.last_result().unwrap_or_default()
//!         }
//!         Err(_) => IaqOutput::default(),
//!     }
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for engine operations
pub type IaqResult<T> = Result<T, IaqError>;

/// Engine errors - kept small for embedded use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum IaqError {
    /// Engine used before `initialize`
    #[error("IAQ engine not initialized")]
    InvalidState,

    /// Rejected input
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the input
        reason: &'static str,
    },

    /// Engine lock not acquired within the bounded wait
    #[error("Engine lock not acquired within {timeout_ms} ms")]
    Timeout {
        /// How long the caller waited
        timeout_ms: u64,
    },

    /// No calibration state has been persisted yet
    #[error("No persisted calibration state")]
    NotFound,

    /// Underlying key-value store failure
    #[error("State store failure: {0}")]
    Store(StoreError),

    /// Engine could not be initialized
    #[error("Initialization failed: {reason}")]
    Init {
        /// Which part of the configuration was unusable
        reason: &'static str,
    },
}

/// Failures reported by a [`StateStore`](crate::traits::StateStore) backend
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Backend could not be opened or is not mounted
    #[error("Store unavailable")]
    Unavailable,

    /// Namespace or key is empty or longer than the backend allows
    #[error("Invalid namespace or key")]
    InvalidKey,

    /// No room left for another entry
    #[error("Store full")]
    Full,

    /// Persisted data could not be parsed
    #[error("Stored data corrupted")]
    Corrupted,

    /// I/O failure in the backend
    #[error("I/O failure: {reason}")]
    Io {
        /// Which operation failed
        reason: &'static str,
    },
}

impl From<StoreError> for IaqError {
    fn from(err: StoreError) -> Self {
        IaqError::Store(err)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for IaqError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidState =>
                defmt::write!(fmt, "Engine not initialized"),
            Self::InvalidArgument { reason } =>
                defmt::write!(fmt, "Invalid argument: {}", reason),
            Self::Timeout { timeout_ms } =>
                defmt::write!(fmt, "Lock timeout after {} ms", timeout_ms),
            Self::NotFound =>
                defmt::write!(fmt, "No persisted state"),
            Self::Store(err) =>
                defmt::write!(fmt, "Store: {}", err),
            Self::Init { reason } =>
                defmt::write!(fmt, "Init failed: {}", reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StoreError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unavailable => defmt::write!(fmt, "unavailable"),
            Self::InvalidKey => defmt::write!(fmt, "invalid key"),
            Self::Full => defmt::write!(fmt, "full"),
            Self::Corrupted => defmt::write!(fmt, "corrupted"),
            Self::Io { reason } => defmt::write!(fmt, "io: {}", reason),
        }
    }
}
