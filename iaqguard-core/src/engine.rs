//! IAQ Engine
//!
//! ## Overview
//!
//! The engine owns everything that changes between samples: the active
//! configuration, the baseline tracker and the last published result. One
//! engine is created at start-up and shared by reference with every task
//! that samples or persists calibration.
//!
//! ```text
//!                  ┌───────────────── BoundedLock<EngineState> ───────────┐
//! RawReading ──→ validate ──→ compensate ──→ tracker.update ──→ score ──→ IaqOutput
//!     │            │                                                    │
//!     │            └── InvalidArgument (lock never taken)               └── cached
//!     └── InvalidState (not initialized)                                    as last
//! ```
//!
//! ## Locking
//!
//! Two locks, never held together:
//!
//! | Lock    | Guards                       | Acquired by                         |
//! |---------|------------------------------|-------------------------------------|
//! | `state` | config, tracker, last output | bounded 100 ms, every operation     |
//! | `store` | the [`StateStore`] backend   | `save_state` / `load_state` only    |
//!
//! Every operation that needs `state` gives up after [`LOCK_TIMEOUT`] and
//! reports `Timeout` without touching any state; `reset` skips instead.
//! `is_calibrated` and `calibration_progress` never take the lock: they read
//! the sample count and burn-in length published after each change.
//! Persistence takes a snapshot under `state`, releases it, and only then
//! talks to the store, so slow flash never stalls sampling.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──→ Uninitialized ──initialize()──→ Ready ──initialize()──→ Ready
//!                                            │  ↑                 (new config,
//!                                        reset() │                 fresh tracker)
//!                                            └──┘
//! ```
//!
//! `initialize` attempts to restore persisted calibration. A fresh device
//! has nothing stored, which is not an error.
//!
//! ## Example
//!
//! ```rust
//! use iaqguard_core::{EngineConfig, IaqEngine, IaqLevel, MemoryStore, RawReading};
//!
//! let clock = || 0u64;
//! let engine = IaqEngine::new(MemoryStore::<4>::new(), clock);
//! engine.initialize(Some(EngineConfig::new().with_burn_in_samples(3)))?;
//!
//! for _ in 0..3 {
//!     engine.calculate(&RawReading::new(25.0, 40.0, 101_325.0, 200_000.0))?;
//! }
//! assert!(engine.is_calibrated());
//!
//! let output = engine.last_result()?;
//! assert_eq!(output.iaq_level, IaqLevel::Excellent);
//!
//! engine.save_state()?;
//! # Ok::<(), iaqguard_core::IaqError>(())
//! ```

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use spin::{Mutex, MutexGuard};

use crate::algorithm::{
    calibration_progress, classify_accuracy, classify_iaq, compensate_gas_resistance,
    estimate_co2, estimate_voc, iaq_from_gas, is_calibrated, BaselineTracker,
};
use crate::constants::{
    HUMIDITY_RANGE_PCT, KEY_GAS_BASELINE, KEY_SAMPLES, LOCK_TIMEOUT, STATE_NAMESPACE,
};
use crate::errors::{IaqError, IaqResult};
use crate::lock::BoundedLock;
use crate::time::TimeSource;
use crate::traits::{StateStore, Validatable};
use crate::types::{EngineConfig, GasStatistics, IaqOutput, RawReading};

/// Calibration values that survive a reboot
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationSnapshot {
    /// Clean-air baseline (Ω)
    pub gas_baseline: f32,
    /// Valid samples since the last reset
    pub samples_count: u32,
}

/// Everything behind the state lock
#[derive(Debug)]
struct EngineState {
    config: EngineConfig,
    tracker: BaselineTracker,
    last_output: Option<IaqOutput>,
}

impl EngineState {
    const fn new() -> Self {
        Self {
            config: EngineConfig::new(),
            tracker: BaselineTracker::new(),
            last_output: None,
        }
    }

    fn snapshot(&self) -> CalibrationSnapshot {
        CalibrationSnapshot {
            gas_baseline: self.tracker.baseline(),
            samples_count: self.tracker.samples_count(),
        }
    }
}

/// Self-calibrating IAQ engine
///
/// Generic over where calibration is persisted (`S`) and what measures the
/// bounded lock wait (`C`). Every operation takes `&self`; share the engine
/// through an `Arc` or a `static`.
pub struct IaqEngine<S, C> {
    state: BoundedLock<EngineState>,
    store: Mutex<S>,
    clock: C,
    initialized: AtomicBool,
    // Copies of tracker.samples_count() and config.burn_in_samples, stored
    // while `state` is held
    published_samples: AtomicU32,
    published_burn_in: AtomicU32,
}

impl<S: StateStore, C: TimeSource> IaqEngine<S, C> {
    /// Create an engine that must be initialized before use
    pub const fn new(store: S, clock: C) -> Self {
        Self {
            state: BoundedLock::new(EngineState::new()),
            store: Mutex::new(store),
            clock,
            initialized: AtomicBool::new(false),
            published_samples: AtomicU32::new(0),
            published_burn_in: AtomicU32::new(0),
        }
    }

    /// Set up calibration state and restore any persisted calibration
    ///
    /// `None` uses [`EngineConfig::default`]. Calling this again replaces
    /// the configuration and restarts calibration from what is persisted.
    ///
    /// # Errors
    ///
    /// `Init` when the configuration is unusable, `Timeout` when the lock is
    /// busy (the previous configuration stays active). A missing or
    /// unreadable persisted state is logged and otherwise ignored.
    pub fn initialize(&self, config: Option<EngineConfig>) -> IaqResult<()> {
        let config = config.unwrap_or_default();
        if let Err(e) = config.validate() {
            log_error!("IAQ engine configuration rejected: {}", e);
            return Err(e);
        }

        {
            let mut state = self.lock_state()?;
            state.config = config;
            state.tracker.reset();
            state.last_output = None;
            self.publish_progress(&state);
        }
        self.initialized.store(true, Ordering::Release);

        match self.apply_persisted() {
            Ok(_restored) => {
                log_info!(
                    "Loaded previous calibration state: baseline {:.0} Ohm, {} samples",
                    _restored.gas_baseline,
                    _restored.samples_count
                );
            }
            Err(IaqError::NotFound) => {
                log_info!("Starting fresh calibration");
            }
            Err(_e) => {
                log_warn!("Could not restore calibration, starting fresh: {}", _e);
            }
        }

        log_info!(
            "IAQ engine initialized (burn-in {} samples, recalibration rate {:.4})",
            config.burn_in_samples,
            config.gas_recalibration_rate
        );
        Ok(())
    }

    /// Whether `initialize` has succeeded
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Process one sensor reading
    ///
    /// On any error the caller should publish [`IaqOutput::default`] (or the
    /// previous result) rather than treat the sample as clean air.
    ///
    /// # Errors
    ///
    /// - `InvalidState` before `initialize`
    /// - `InvalidArgument` when the gas value is unusable; no state changes
    /// - `Timeout` when the engine lock is busy for longer than
    ///   [`LOCK_TIMEOUT`]; no state changes
    pub fn calculate(&self, raw: &RawReading) -> IaqResult<IaqOutput> {
        if !self.is_initialized() {
            log_error!("IAQ not initialized");
            return Err(IaqError::InvalidState);
        }

        let compensated = Self::validated_gas(raw)?;

        let mut state = self.lock_state()?;
        let config = state.config;

        state
            .tracker
            .update(compensated, config.burn_in_samples, config.gas_recalibration_rate);
        let baseline = state.tracker.baseline();
        let samples = state.tracker.samples_count();

        let iaq_score = iaq_from_gas(compensated, baseline);
        let output = IaqOutput {
            iaq_score,
            iaq_level: classify_iaq(iaq_score),
            accuracy: classify_accuracy(samples, config.burn_in_samples),
            co2_equivalent: estimate_co2(iaq_score),
            voc_equivalent: estimate_voc(compensated, baseline),
            static_iaq: iaq_score,
            comp_temperature: raw.temperature + config.temp_offset,
            comp_humidity: raw.humidity + config.humidity_offset,
            gas_baseline: baseline,
            samples_count: samples,
            is_calibrated: is_calibrated(samples, config.burn_in_samples),
        };

        state.last_output = Some(output);
        self.publish_progress(&state);
        Ok(output)
    }

    /// Most recent successful result
    ///
    /// Before the first successful `calculate` this is
    /// [`IaqOutput::default`].
    ///
    /// # Errors
    ///
    /// `InvalidArgument` before `initialize`, `Timeout` when the lock is busy.
    pub fn last_result(&self) -> IaqResult<IaqOutput> {
        if !self.is_initialized() {
            return Err(IaqError::InvalidArgument {
                reason: "engine not initialized",
            });
        }

        let state = self.lock_state()?;
        Ok(state.last_output.unwrap_or_default())
    }

    /// Forget the learned baseline and start burn-in again
    ///
    /// Best effort: does nothing before `initialize` or when the lock stays
    /// busy past the timeout. The configuration and last result are kept.
    pub fn reset(&self) {
        if !self.is_initialized() {
            return;
        }

        match self.state.acquire_within(&self.clock, LOCK_TIMEOUT) {
            Ok(mut state) => {
                state.tracker.reset();
                self.publish_progress(&state);
                drop(state);
                log_info!("IAQ algorithm reset");
            }
            Err(_timeout) => {
                log_warn!("IAQ reset skipped, engine busy for {} ms", _timeout.waited_ms);
            }
        }
    }

    /// Burn-in complete
    ///
    /// Lock-free; reflects the last completed `calculate`, `reset`,
    /// `load_state` or `initialize`.
    pub fn is_calibrated(&self) -> bool {
        if !self.is_initialized() {
            return false;
        }
        let (samples, burn_in) = self.published_progress();
        is_calibrated(samples, burn_in)
    }

    /// Burn-in progress in percent, 0..=100
    ///
    /// Lock-free, like [`is_calibrated`](Self::is_calibrated).
    pub fn calibration_progress(&self) -> u8 {
        if !self.is_initialized() {
            return 0;
        }
        let (samples, burn_in) = self.published_progress();
        calibration_progress(samples, burn_in)
    }

    /// Active configuration
    ///
    /// # Errors
    ///
    /// `Timeout` when the lock is busy.
    pub fn config(&self) -> IaqResult<EngineConfig> {
        Ok(self.lock_state()?.config)
    }

    /// Current baseline and sample count
    ///
    /// # Errors
    ///
    /// `Timeout` when the lock is busy.
    pub fn calibration(&self) -> IaqResult<CalibrationSnapshot> {
        Ok(self.lock_state()?.snapshot())
    }

    /// Running statistics over the compensated readings
    ///
    /// # Errors
    ///
    /// `Timeout` when the lock is busy.
    pub fn statistics(&self) -> IaqResult<GasStatistics> {
        let state = self.lock_state()?;
        Ok(state.tracker.statistics())
    }

    /// Persist baseline and sample count
    ///
    /// The baseline is stored as whole ohms, truncated toward zero.
    ///
    /// # Errors
    ///
    /// `InvalidState` before `initialize`, `Timeout` when the lock is busy,
    /// `Store` when a write or the commit fails.
    pub fn save_state(&self) -> IaqResult<()> {
        if !self.is_initialized() {
            return Err(IaqError::InvalidState);
        }

        let snapshot = self.calibration()?;
        // Float to int casts saturate, so a runaway baseline stores u32::MAX
        let baseline_ohms = snapshot.gas_baseline as u32;

        let mut store = self.store.lock();
        let result = Self::write_snapshot(&mut store, baseline_ohms, snapshot.samples_count);
        drop(store);

        match result {
            Ok(()) => {
                log_info!(
                    "IAQ state saved (baseline: {}, samples: {})",
                    baseline_ohms,
                    snapshot.samples_count
                );
                Ok(())
            }
            Err(e) => {
                log_error!("Failed to save IAQ state: {}", e);
                Err(e.into())
            }
        }
    }

    /// Restore baseline and sample count from the store
    ///
    /// Each value is applied on its own: a store holding only the baseline
    /// still restores the baseline.
    ///
    /// # Errors
    ///
    /// - `InvalidState` before `initialize`
    /// - `NotFound` when neither value was ever saved
    /// - `Store` when the backend fails
    /// - `Timeout` when the lock is busy; nothing is applied
    pub fn load_state(&self) -> IaqResult<()> {
        if !self.is_initialized() {
            return Err(IaqError::InvalidState);
        }
        self.apply_persisted().map(|_| ())
    }

    /// Read the store and hand what it holds to the tracker
    fn apply_persisted(&self) -> IaqResult<CalibrationSnapshot> {
        let (baseline, samples) = {
            let mut store = self.store.lock();
            let baseline = store.read_u32(STATE_NAMESPACE, KEY_GAS_BASELINE)?;
            let samples = store.read_u32(STATE_NAMESPACE, KEY_SAMPLES)?;
            (baseline, samples)
        };

        if baseline.is_none() && samples.is_none() {
            return Err(IaqError::NotFound);
        }
        if baseline.is_none() || samples.is_none() {
            log_warn!(
                "Partial IAQ state restored (baseline: {:?}, samples: {:?})",
                baseline,
                samples
            );
        } else {
            log_debug!("IAQ state loaded (baseline: {:?}, samples: {:?})", baseline, samples);
        }

        let mut state = self.lock_state()?;
        state.tracker.restore(baseline.map(|ohms| ohms as f32), samples);
        self.publish_progress(&state);
        Ok(state.snapshot())
    }

    /// Compensated gas resistance, or why the reading cannot be used
    fn validated_gas(raw: &RawReading) -> IaqResult<f32> {
        if !raw.has_usable_gas() {
            log_warn!("Invalid gas reading, skipping calculation");
            return Err(IaqError::InvalidArgument {
                reason: "gas measurement not valid",
            });
        }

        // The humidity factor nears zero at -26.7 %RH, so anything outside
        // the physical range would inflate the compensated value
        if !raw.temperature.is_valid()
            || !raw.humidity.is_valid()
            || !HUMIDITY_RANGE_PCT.contains(&raw.humidity)
        {
            log_warn!(
                "Climate reading out of range ({} C, {} %RH), skipping calculation",
                raw.temperature,
                raw.humidity
            );
            return Err(IaqError::InvalidArgument {
                reason: "temperature or humidity out of range",
            });
        }

        let compensated =
            compensate_gas_resistance(raw.gas_resistance, raw.temperature, raw.humidity);
        if !compensated.is_valid() || compensated <= 0.0 {
            log_warn!(
                "Gas reading does not compensate to a usable value ({} C, {} %RH)",
                raw.temperature,
                raw.humidity
            );
            return Err(IaqError::InvalidArgument {
                reason: "compensated gas resistance out of range",
            });
        }

        Ok(compensated)
    }

    fn publish_progress(&self, state: &EngineState) {
        self.published_burn_in
            .store(state.config.burn_in_samples, Ordering::Release);
        self.published_samples
            .store(state.tracker.samples_count(), Ordering::Release);
    }

    fn published_progress(&self) -> (u32, u32) {
        (
            self.published_samples.load(Ordering::Acquire),
            self.published_burn_in.load(Ordering::Acquire),
        )
    }

    fn lock_state(&self) -> IaqResult<MutexGuard<'_, EngineState>> {
        self.state
            .acquire_within(&self.clock, LOCK_TIMEOUT)
            .map_err(|_timeout| {
                log_warn!("IAQ engine lock busy for {} ms", _timeout.waited_ms);
                IaqError::Timeout {
                    timeout_ms: LOCK_TIMEOUT.ticks(),
                }
            })
    }

    fn write_snapshot(
        store: &mut S,
        baseline_ohms: u32,
        samples: u32,
    ) -> Result<(), crate::errors::StoreError> {
        store.write_u32(STATE_NAMESPACE, KEY_GAS_BASELINE, baseline_ohms)?;
        store.write_u32(STATE_NAMESPACE, KEY_SAMPLES, samples)?;
        store.commit(STATE_NAMESPACE)
    }
}

impl<S, C> core::fmt::Debug for IaqEngine<S, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IaqEngine")
            .field("initialized", &self.initialized.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}
