//! Clean-air baseline tracking
//!
//! ## Two Phases
//!
//! ```text
//! samples ≤ burn_in:  baseline = Σ readings / samples
//! samples > burn_in:  if reading > baseline:
//!                         baseline = baseline × (1 − rate) + reading × rate
//! ```
//!
//! The burn-in average is recomputed over *every* sample so far, not just
//! the history window. After burn-in the baseline only ratchets upward:
//! the sensor is assumed to see clean air at least occasionally, and a
//! long pollution episode must not be learned as the new normal.
//!
//! ## Bookkeeping
//!
//! Alongside the baseline the tracker keeps the running sum, minimum and
//! maximum of all accepted readings and a 10-entry history window. None of
//! them feed the score except the sum (during burn-in); they back the
//! diagnostics in [`GasStatistics`].

use crate::buffer::CircularBuffer;
use crate::constants::calibration::{DEFAULT_GAS_BASELINE_OHMS, GAS_HISTORY_SIZE};
use crate::types::GasStatistics;

/// Calibration state updated by every accepted reading
#[derive(Debug, Clone)]
pub struct BaselineTracker {
    gas_baseline: f32,
    samples_count: u32,
    gas_sum: f32,
    gas_min: Option<f32>,
    gas_max: f32,
    history: CircularBuffer<GAS_HISTORY_SIZE>,
}

impl BaselineTracker {
    /// Fresh tracker at the factory baseline
    pub const fn new() -> Self {
        Self {
            gas_baseline: DEFAULT_GAS_BASELINE_OHMS,
            samples_count: 0,
            gas_sum: 0.0,
            gas_min: None,
            gas_max: 0.0,
            history: CircularBuffer::new(),
        }
    }

    /// Current clean-air baseline (Ω)
    pub fn baseline(&self) -> f32 {
        self.gas_baseline
    }

    /// Accepted readings since reset or restore
    pub fn samples_count(&self) -> u32 {
        self.samples_count
    }

    /// Feed one compensated reading
    ///
    /// `burn_in` and `rate` come from the engine configuration.
    pub fn update(&mut self, compensated: f32, burn_in: u32, rate: f32) {
        self.history.push(compensated);

        self.gas_sum += compensated;
        if compensated > self.gas_max {
            self.gas_max = compensated;
        }
        match self.gas_min {
            Some(min) if compensated >= min => {}
            _ => self.gas_min = Some(compensated),
        }

        self.samples_count = self.samples_count.saturating_add(1);

        if self.samples_count <= burn_in {
            self.gas_baseline = self.gas_sum / self.samples_count as f32;
        } else if compensated > self.gas_baseline {
            self.gas_baseline = self.gas_baseline * (1.0 - rate) + compensated * rate;
        }
    }

    /// Back to the factory baseline with all counters and history cleared
    pub fn reset(&mut self) {
        self.gas_baseline = DEFAULT_GAS_BASELINE_OHMS;
        self.samples_count = 0;
        self.gas_sum = 0.0;
        self.gas_min = None;
        self.gas_max = 0.0;
        self.history.clear();
    }

    /// Adopt persisted values, each independently of the other
    ///
    /// A restored sample count re-seeds the running sum as
    /// `baseline × samples` so an interrupted burn-in keeps averaging from
    /// where it stopped instead of from zero.
    pub fn restore(&mut self, baseline: Option<f32>, samples: Option<u32>) {
        if let Some(baseline) = baseline {
            self.gas_baseline = baseline;
        }
        if let Some(samples) = samples {
            self.samples_count = samples;
        }
        self.gas_sum = self.gas_baseline * self.samples_count as f32;
    }

    /// Snapshot of the bookkeeping
    ///
    /// After a restore `mean` is the restored baseline until new readings
    /// arrive, while the window and min/max only cover readings seen since.
    pub fn statistics(&self) -> GasStatistics {
        let mean = if self.samples_count > 0 {
            Some(self.gas_sum / self.samples_count as f32)
        } else {
            None
        };

        GasStatistics {
            samples_count: self.samples_count,
            gas_baseline: self.gas_baseline,
            min: self.gas_min,
            max: self.gas_max,
            mean,
            recent_mean: self.history.mean(),
            recent_len: self.history.len(),
        }
    }
}

impl Default for BaselineTracker {
    fn default() -> Self {
        Self::new()
    }
}
