//! Self-calibrating indoor air quality engine for IAQGuard
//!
//! Turns raw metal-oxide gas resistance readings (BME680 and friends) into a
//! 0-500 IAQ index with an accuracy label and CO2/VOC equivalents.
//! Designed for the same constrained targets as the rest of the firmware.
//!
//! Key constraints:
//! - Runs without heap allocation (`no_std` with `default-features = false`)
//! - One lock guards all mutable state, acquired with a bounded wait
//! - Calibration survives reboots through a small key-value store
//!
//! ```no_run
//! use iaqguard_core::{IaqEngine, MemoryStore, MonotonicClock, RawReading};
//!
//! let engine = IaqEngine::new(MemoryStore::<8>::new(), MonotonicClock::new());
//! engine.initialize(None)?;
//!
//! let reading = RawReading::new(24.1, 43.0, 101_325.0, 182_000.0);
//! match engine.calculate(&reading) {
//!     Ok(output) => println!("IAQ {:.0} ({})", output.iaq_score, output.iaq_level),
//!     Err(e) => println!("skipped sample: {e}"),
//! }
//! # Ok::<(), iaqguard_core::IaqError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod logging;

pub mod algorithm;
pub mod buffer;
pub mod constants;
pub mod engine;
pub mod errors;
pub mod lock;
pub mod store;
pub mod time;
pub mod traits;
pub mod types;

// Public API
pub use engine::{CalibrationSnapshot, IaqEngine};
pub use errors::{IaqError, IaqResult, StoreError};
pub use store::MemoryStore;
#[cfg(feature = "store-file")]
pub use store::FileStore;
pub use time::{TimeSource, Timestamp};
#[cfg(feature = "std")]
pub use time::MonotonicClock;
pub use traits::StateStore;
pub use types::{EngineConfig, GasStatistics, IaqAccuracy, IaqLevel, IaqOutput, RawReading};

/// Crate version, reported at engine start-up
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
