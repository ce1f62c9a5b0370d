//! Data model for the IAQ engine
//!
//! Inputs, outputs and configuration exchanged with the engine. All types
//! are plain `Copy` values so they can cross task boundaries and sit in
//! fixed-size queues without allocation.

use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BURN_IN_SAMPLES, DEFAULT_GAS_BASELINE_OHMS, DEFAULT_RECALIBRATION_RATE,
};
use crate::errors::{IaqError, IaqResult};
use crate::traits::Validatable;

/// One raw sample from the environmental sensor
///
/// The sensor driver fills this at whatever cadence the application chooses.
/// `pressure` is carried through untouched; the algorithm does not use it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawReading {
    /// Air temperature (°C)
    pub temperature: f32,
    /// Relative humidity (%RH)
    pub humidity: f32,
    /// Barometric pressure (sensor units, pass-through)
    pub pressure: f32,
    /// Heater plate resistance (Ω), meaningful only when `gas_valid`
    pub gas_resistance: f32,
    /// Heater reached target temperature and the gas value is usable
    pub gas_valid: bool,
}

impl RawReading {
    /// Reading with a valid gas measurement
    pub const fn new(temperature: f32, humidity: f32, pressure: f32, gas_resistance: f32) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
            gas_resistance,
            gas_valid: true,
        }
    }

    /// Reading taken before the heater stabilized
    pub const fn without_gas(temperature: f32, humidity: f32, pressure: f32) -> Self {
        Self {
            temperature,
            humidity,
            pressure,
            gas_resistance: 0.0,
            gas_valid: false,
        }
    }

    /// Whether the gas part of this reading can feed the algorithm
    pub fn has_usable_gas(&self) -> bool {
        self.gas_valid && self.gas_resistance.is_valid() && self.gas_resistance > 0.0
    }
}

/// Air quality classification of an IAQ score
///
/// Bounds are inclusive upper limits: 50 is still Excellent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IaqLevel {
    /// 0-50
    Excellent = 0,
    /// 51-100
    Good = 1,
    /// 101-150
    LightlyPolluted = 2,
    /// 151-200
    ModeratelyPolluted = 3,
    /// 201-300
    HeavilyPolluted = 4,
    /// 301-500
    SeverelyPolluted = 5,
    /// No valid score (rejected reading, nothing computed yet)
    #[default]
    Unknown = 6,
}

impl IaqLevel {
    /// Human readable label
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::LightlyPolluted => "Lightly Polluted",
            Self::ModeratelyPolluted => "Moderately Polluted",
            Self::HeavilyPolluted => "Heavily Polluted",
            Self::SeverelyPolluted => "Severely Polluted",
            Self::Unknown => "Unknown",
        }
    }

    /// Display color as 0xRRGGBB
    pub const fn color(self) -> u32 {
        match self {
            Self::Excellent => 0x00E400,
            Self::Good => 0x92D050,
            Self::LightlyPolluted => 0xFFFF00,
            Self::ModeratelyPolluted => 0xFF8000,
            Self::HeavilyPolluted => 0xFF0000,
            Self::SeverelyPolluted => 0x800080,
            Self::Unknown => 0x808080,
        }
    }

    /// Numeric code published to the broker
    pub const fn as_index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for IaqLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Confidence in the reported score, driven by calibration progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum IaqAccuracy {
    /// First quarter of burn-in, sensor still stabilizing
    #[default]
    Unreliable = 0,
    /// Second quarter of burn-in
    Low = 1,
    /// Second half of burn-in
    Medium = 2,
    /// Burn-in complete
    High = 3,
}

impl IaqAccuracy {
    /// Human readable label
    pub const fn as_text(self) -> &'static str {
        match self {
            Self::Unreliable => "Unreliable (Stabilizing)",
            Self::Low => "Low (Calibrating)",
            Self::Medium => "Medium",
            Self::High => "High (Calibrated)",
        }
    }

    /// Numeric code published to the broker
    pub const fn as_index(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for IaqAccuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

/// Result of one IAQ calculation
///
/// `Default` is the record for a rejected reading: score 0, level
/// `Unknown`, accuracy `Unreliable`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IaqOutput {
    /// IAQ index, 0 (best) to 500 (worst)
    pub iaq_score: f32,
    /// Classification of `iaq_score`
    pub iaq_level: IaqLevel,
    /// Calibration confidence
    pub accuracy: IaqAccuracy,
    /// Estimated CO2 (ppm), 400-2000
    pub co2_equivalent: f32,
    /// Estimated VOC (ppm), 0-10
    pub voc_equivalent: f32,
    /// Slow-moving IAQ; equal to `iaq_score` in this engine
    pub static_iaq: f32,
    /// Temperature plus the configured offset (°C)
    pub comp_temperature: f32,
    /// Humidity plus the configured offset (%RH)
    pub comp_humidity: f32,
    /// Clean-air baseline after this sample (Ω)
    pub gas_baseline: f32,
    /// Valid samples since the last reset
    pub samples_count: u32,
    /// Burn-in complete
    pub is_calibrated: bool,
}

/// Engine configuration, fixed for the lifetime of an initialization
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Added to reported temperature (°C); does not affect scoring
    pub temp_offset: f32,
    /// Added to reported humidity (%RH); does not affect scoring
    pub humidity_offset: f32,
    /// Samples until the engine reports itself calibrated
    pub burn_in_samples: u32,
    /// Baseline adaptation speed after burn-in, in (0, 1]
    pub gas_recalibration_rate: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Default configuration: no offsets, 50-sample burn-in, rate 0.001
    pub const fn new() -> Self {
        Self {
            temp_offset: 0.0,
            humidity_offset: 0.0,
            burn_in_samples: DEFAULT_BURN_IN_SAMPLES,
            gas_recalibration_rate: DEFAULT_RECALIBRATION_RATE,
        }
    }

    /// Offset added to reported temperature
    pub fn with_temperature_offset(mut self, offset_c: f32) -> Self {
        self.temp_offset = offset_c;
        self
    }

    /// Offset added to reported humidity
    pub fn with_humidity_offset(mut self, offset_pct: f32) -> Self {
        self.humidity_offset = offset_pct;
        self
    }

    /// Burn-in length in samples
    pub fn with_burn_in_samples(mut self, samples: u32) -> Self {
        self.burn_in_samples = samples;
        self
    }

    /// Post burn-in baseline adaptation rate
    pub fn with_recalibration_rate(mut self, rate: f32) -> Self {
        self.gas_recalibration_rate = rate;
        self
    }

    /// Check the configuration can drive the engine
    pub fn validate(&self) -> IaqResult<()> {
        if !self.temp_offset.is_valid() {
            return Err(IaqError::Init { reason: "temperature offset is not finite" });
        }
        if !self.humidity_offset.is_valid() {
            return Err(IaqError::Init { reason: "humidity offset is not finite" });
        }
        let rate = self.gas_recalibration_rate;
        if !rate.is_valid() || rate <= 0.0 || rate > 1.0 {
            return Err(IaqError::Init { reason: "recalibration rate must be in (0, 1]" });
        }
        Ok(())
    }
}

/// Diagnostics over the compensated readings seen since the last reset
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GasStatistics {
    /// Valid samples since reset (or since restored state)
    pub samples_count: u32,
    /// Current clean-air baseline (Ω)
    pub gas_baseline: f32,
    /// Lowest compensated reading, if any
    pub min: Option<f32>,
    /// Highest compensated reading, 0 before the first sample
    pub max: f32,
    /// Cumulative mean, if any samples were taken
    pub mean: Option<f32>,
    /// Mean of the history window, if it holds any readings
    pub recent_mean: Option<f32>,
    /// Number of readings in the history window
    pub recent_len: usize,
}

impl Default for GasStatistics {
    fn default() -> Self {
        Self {
            samples_count: 0,
            gas_baseline: DEFAULT_GAS_BASELINE_OHMS,
            min: None,
            max: 0.0,
            mean: None,
            recent_mean: None,
            recent_len: 0,
        }
    }
}
