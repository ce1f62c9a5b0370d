//! Temperature and humidity compensation of raw gas resistance

use crate::constants::compensation::{
    HUMIDITY_COMP_COEFF_PER_PCT, REFERENCE_HUMIDITY_PCT, REFERENCE_TEMP_C,
    TEMP_COMP_COEFF_PER_C,
};

/// Scale a raw gas resistance to the 25 °C / 40 %RH reference climate
///
/// ```text
/// temp_factor = 1 + 0.003 × (T − 25)
/// hum_factor  = 1 + 0.015 × (RH − 40)
/// compensated = R × temp_factor / hum_factor
/// ```
///
/// No clamping: the scorer clamps its output, and the engine rejects
/// results that are not finite and positive before they reach the tracker.
pub fn compensate_gas_resistance(gas_resistance: f32, temperature: f32, humidity: f32) -> f32 {
    let temp_factor = 1.0 + TEMP_COMP_COEFF_PER_C * (temperature - REFERENCE_TEMP_C);
    let hum_factor = 1.0 + HUMIDITY_COMP_COEFF_PER_PCT * (humidity - REFERENCE_HUMIDITY_PCT);

    gas_resistance * temp_factor / hum_factor
}
