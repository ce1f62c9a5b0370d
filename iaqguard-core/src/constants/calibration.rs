//! Calibration Parameters
//!
//! Defaults for the clean-air baseline tracker and the accuracy stages.

use fugit::MillisDurationU64;

/// Clean-air gas resistance assumed before any calibration (Ω).
///
/// Typical BME680 reading at 25 °C / 40 %RH in fresh air. Also substituted
/// as the scoring divisor whenever the tracked baseline is not positive.
pub const DEFAULT_GAS_BASELINE_OHMS: f32 = 250_000.0;

/// Samples needed before the engine reports itself calibrated.
///
/// During burn-in the baseline is the plain average of every sample.
pub const DEFAULT_BURN_IN_SAMPLES: u32 = 50;

/// Baseline adaptation rate once burn-in is over.
///
/// Weight given to a cleaner-than-baseline reading in the moving average.
pub const DEFAULT_RECALIBRATION_RATE: f32 = 0.001;

/// Number of compensated readings kept in the history window.
pub const GAS_HISTORY_SIZE: usize = 10;

/// Bounded wait for the engine lock.
///
/// A stalled holder makes callers fail with `Timeout` instead of hanging
/// the sampling task.
pub const LOCK_TIMEOUT: MillisDurationU64 = MillisDurationU64::from_ticks(100);
