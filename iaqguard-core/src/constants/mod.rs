//! Constants for IAQGuard Core
//!
//! Every number the IAQ algorithm depends on is defined here, with units in
//! the name and a note on where it comes from.
//!
//! ## Organization
//!
//! - **Compensation**: reference climate and sensitivity coefficients
//! - **Calibration**: baseline defaults, burn-in and adaptation
//! - **Scoring**: ratio breakpoints, level bounds, CO2/VOC estimates
//! - **Storage**: namespace and keys of the persisted calibration
//!
//! Changing a scoring constant moves level boundaries that downstream alert
//! thresholds depend on; keep the tests in `algorithm::scoring` in step.

/// Temperature/humidity compensation of the raw gas signal.
pub mod compensation;

/// Baseline tracking, burn-in and lock timing.
pub mod calibration;

/// IAQ curve, level bounds and equivalent estimates.
pub mod scoring;

/// Persisted state layout.
pub mod storage;

// Re-export commonly used constants for convenience
pub use calibration::{
    DEFAULT_BURN_IN_SAMPLES, DEFAULT_GAS_BASELINE_OHMS, DEFAULT_RECALIBRATION_RATE,
    GAS_HISTORY_SIZE, LOCK_TIMEOUT,
};

pub use compensation::{HUMIDITY_RANGE_PCT, REFERENCE_HUMIDITY_PCT, REFERENCE_TEMP_C};

pub use scoring::{IAQ_MAX, IAQ_MIN};

pub use storage::{KEY_GAS_BASELINE, KEY_SAMPLES, STATE_NAMESPACE};
