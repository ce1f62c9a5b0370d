//! IAQ Scoring Constants
//!
//! The IAQ scale runs from 0 (best) to 500 (worst). The score comes from
//! the ratio of the compensated reading to the clean-air baseline:
//!
//! ```text
//! ratio ≥ 1.0        →   0 ..  50   clean air
//! 0.5 ≤ ratio < 1.0  →  50 .. 150
//! 0.2 ≤ ratio < 0.5  → 150 .. 250
//! 0.1 ≤ ratio < 0.2  → 250 .. 350
//! ratio < 0.1        → 350 .. 500
//! ```

// ===== SCORE RANGE =====

/// Lowest (best) IAQ score.
pub const IAQ_MIN: f32 = 0.0;

/// Highest (worst) IAQ score.
pub const IAQ_MAX: f32 = 500.0;

// ===== RATIO BREAKPOINTS =====

/// Ratio at or above which air counts as clean.
pub const RATIO_CLEAN: f32 = 1.0;

/// Ratio cap for the clean segment; cleaner air cannot score below 0.
pub const RATIO_CLEAN_CAP: f32 = 2.0;

/// Lower bound of the lightly polluted segment.
pub const RATIO_LIGHT: f32 = 0.5;

/// Lower bound of the moderately polluted segment.
pub const RATIO_MODERATE: f32 = 0.2;

/// Lower bound of the heavily polluted segment.
pub const RATIO_HEAVY: f32 = 0.1;

// ===== LEVEL UPPER BOUNDS (inclusive) =====

/// Highest score classified as Excellent.
pub const LEVEL_EXCELLENT_MAX: f32 = 50.0;

/// Highest score classified as Good.
pub const LEVEL_GOOD_MAX: f32 = 100.0;

/// Highest score classified as Lightly Polluted.
pub const LEVEL_LIGHTLY_POLLUTED_MAX: f32 = 150.0;

/// Highest score classified as Moderately Polluted.
pub const LEVEL_MODERATELY_POLLUTED_MAX: f32 = 200.0;

/// Highest score classified as Heavily Polluted.
pub const LEVEL_HEAVILY_POLLUTED_MAX: f32 = 300.0;

// ===== EQUIVALENT ESTIMATES =====

/// Outdoor CO2 background, reported for IAQ 0 (ppm).
pub const CO2_BASE_PPM: f32 = 400.0;

/// Upper clamp of the CO2 estimate (ppm).
pub const CO2_MAX_PPM: f32 = 2000.0;

/// CO2 ppm added per IAQ point.
pub const CO2_PPM_PER_IAQ: f32 = 5.0;

/// Lower clamp of the VOC estimate (ppm).
pub const VOC_BASE_PPM: f32 = 0.0;

/// Upper clamp of the VOC estimate (ppm).
pub const VOC_MAX_PPM: f32 = 10.0;

/// VOC ppm per unit of baseline/reading ratio above 1.
pub const VOC_PPM_PER_RATIO: f32 = 1.5;
