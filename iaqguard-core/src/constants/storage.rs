//! Persisted Calibration Layout
//!
//! Two unsigned 32-bit values survive reboots. Names follow the NVS rule
//! of at most 15 bytes per namespace and key.

/// Namespace holding the calibration entries.
pub const STATE_NAMESPACE: &str = "iaq_state";

/// Baseline resistance, truncated to whole ohms.
pub const KEY_GAS_BASELINE: &str = "gas_base";

/// Cumulative sample count.
pub const KEY_SAMPLES: &str = "samples";

/// Longest namespace or key a store must accept (bytes).
pub const MAX_KEY_LEN: usize = 15;
