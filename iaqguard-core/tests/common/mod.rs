//! Common test utilities and reading generators for integration tests
//!
//! This module provides:
//! - Deterministic BME680-style reading generators (clean air, pollution
//!   episodes, heater warm-up)
//! - Engine fixtures with a controllable clock
//! - Assertion helpers for output ranges

#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use iaqguard_core::{EngineConfig, IaqEngine, IaqOutput, MemoryStore, RawReading};

/// Sea-level pressure used by every generated reading (Pa)
pub const PRESSURE_PA: f32 = 101_325.0;

/// Manually advanced millisecond clock shared with the engine
#[derive(Debug, Clone, Default)]
pub struct TestClock {
    ticks: Arc<AtomicU64>,
}

impl TestClock {
    /// Clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Closure the engine can use as its time source
    ///
    /// Every read advances the clock by `step_ms`, so bounded waits end
    /// after a predictable number of polls.
    pub fn source(&self, step_ms: u64) -> impl Fn() -> u64 + Send + Sync + 'static {
        let ticks = Arc::clone(&self.ticks);
        move || ticks.fetch_add(step_ms, Ordering::Relaxed)
    }

    /// Current reading without advancing
    pub fn now(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }
}

/// Engine type used by the integration tests
pub type TestEngine = IaqEngine<MemoryStore<8>, Box<dyn Fn() -> u64 + Send + Sync>>;

/// Initialized engine with an empty store and the given burn-in
pub fn engine_with_burn_in(burn_in: u32) -> TestEngine {
    let clock = TestClock::new();
    let engine: TestEngine = IaqEngine::new(MemoryStore::new(), Box::new(clock.source(1)));
    engine
        .initialize(Some(EngineConfig::new().with_burn_in_samples(burn_in)))
        .expect("default store cannot fail initialization");
    engine
}

/// Deterministic generator of sensor readings
///
/// Uses the same linear congruential sequence across runs so failures
/// reproduce exactly.
pub struct ReadingGenerator {
    seed: u32,
    temperature: f32,
    humidity: f32,
}

impl ReadingGenerator {
    /// Generator at the compensation reference climate (25 °C, 40 %RH)
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            temperature: 25.0,
            humidity: 40.0,
        }
    }

    /// Change the ambient climate for subsequent readings
    pub fn with_climate(mut self, temperature: f32, humidity: f32) -> Self {
        self.temperature = temperature;
        self.humidity = humidity;
        self
    }

    /// Reading with exactly the given gas resistance and no noise
    pub fn exact(&self, gas_resistance: f32) -> RawReading {
        RawReading::new(self.temperature, self.humidity, PRESSURE_PA, gas_resistance)
    }

    /// Clean air around `baseline` with ±`spread` relative noise
    pub fn clean_air(&mut self, baseline: f32, spread: f32, count: usize) -> Vec<RawReading> {
        (0..count)
            .map(|_| {
                let noise = self.random_noise(spread);
                self.exact(baseline * (1.0 + noise))
            })
            .collect()
    }

    /// Pollution episode: resistance falls from `baseline` to
    /// `baseline * depth` and recovers, over `count` samples
    pub fn pollution_episode(&mut self, baseline: f32, depth: f32, count: usize) -> Vec<RawReading> {
        let half = (count / 2).max(1) as f32;
        (0..count)
            .map(|i| {
                let distance = (i as f32 - half).abs() / half;
                let factor = depth + (1.0 - depth) * distance.min(1.0);
                self.exact(baseline * factor)
            })
            .collect()
    }

    /// Readings taken while the gas heater is still warming up
    pub fn warm_up(&self, count: usize) -> Vec<RawReading> {
        (0..count)
            .map(|_| RawReading::without_gas(self.temperature, self.humidity, PRESSURE_PA))
            .collect()
    }

    fn random_noise(&mut self, spread: f32) -> f32 {
        (self.random_float() - 0.5) * 2.0 * spread
    }

    fn random_float(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.seed as f32) / (u32::MAX as f32)
    }
}

/// Check every output field sits in its documented range
pub fn assert_output_in_range(output: &IaqOutput) {
    assert!(
        (0.0..=500.0).contains(&output.iaq_score),
        "iaq_score out of range: {}",
        output.iaq_score
    );
    assert!(
        (400.0..=2000.0).contains(&output.co2_equivalent),
        "co2_equivalent out of range: {}",
        output.co2_equivalent
    );
    assert!(
        (0.0..=10.0).contains(&output.voc_equivalent),
        "voc_equivalent out of range: {}",
        output.voc_equivalent
    );
    assert_eq!(output.static_iaq, output.iaq_score);
}
