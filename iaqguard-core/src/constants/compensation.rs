//! Gas Resistance Compensation Coefficients
//!
//! Metal-oxide sensing layers read higher resistance when warm and lower
//! resistance when humid. These coefficients fold readings back to a
//! reference climate before they are compared with the baseline.

/// Reference temperature for compensation (°C).
///
/// Baseline resistance is specified for air at this temperature.
pub const REFERENCE_TEMP_C: f32 = 25.0;

/// Reference relative humidity for compensation (%RH).
pub const REFERENCE_HUMIDITY_PCT: f32 = 40.0;

/// Temperature sensitivity of the gas signal (fraction per °C).
///
/// 0.3% per degree away from the reference.
pub const TEMP_COMP_COEFF_PER_C: f32 = 0.003;

/// Humidity sensitivity of the gas signal (fraction per %RH).
///
/// 1.5% per percent RH away from the reference. Humidity dominates the
/// correction; the divisor reaches zero near -26.7 %RH.
pub const HUMIDITY_COMP_COEFF_PER_PCT: f32 = 0.015;

/// Relative humidity the engine accepts (%RH).
///
/// Readings outside this range are rejected before compensation, well clear
/// of the divisor's zero.
pub const HUMIDITY_RANGE_PCT: core::ops::RangeInclusive<f32> = 0.0..=100.0;
