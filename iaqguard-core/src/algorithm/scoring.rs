//! Ratio-to-score curve, level classification and equivalent estimates

use crate::constants::calibration::DEFAULT_GAS_BASELINE_OHMS;
use crate::constants::scoring::{
    CO2_BASE_PPM, CO2_MAX_PPM, CO2_PPM_PER_IAQ, IAQ_MAX, IAQ_MIN, LEVEL_EXCELLENT_MAX,
    LEVEL_GOOD_MAX, LEVEL_HEAVILY_POLLUTED_MAX, LEVEL_LIGHTLY_POLLUTED_MAX,
    LEVEL_MODERATELY_POLLUTED_MAX, RATIO_CLEAN, RATIO_CLEAN_CAP, RATIO_HEAVY, RATIO_LIGHT,
    RATIO_MODERATE, VOC_BASE_PPM, VOC_MAX_PPM, VOC_PPM_PER_RATIO,
};
use crate::types::IaqLevel;

/// IAQ score for a compensated reading against the current baseline
///
/// Segments are checked top-down and the first match wins:
///
/// | ratio            | score                                  |
/// |------------------|----------------------------------------|
/// | ≥ 1.0            | 50 × (2 − min(ratio, 2))               |
/// | 0.5 ..< 1.0      | 50 + 200 × (1 − ratio)                 |
/// | 0.2 ..< 0.5      | 150 + 100 × (0.5 − ratio) / 0.3        |
/// | 0.1 ..< 0.2      | 250 + 100 × (0.2 − ratio) / 0.1        |
/// | < 0.1            | 350 + 150 × min((0.1 − ratio) / 0.1, 1)|
///
/// Segment formulas are kept exactly as tabulated; level boundaries
/// downstream rely on them. They meet at every breakpoint (50, 150, 250,
/// 350), so the curve has no jumps, only changes of slope.
///
/// A baseline that is not positive is replaced by the factory default.
pub fn iaq_from_gas(compensated: f32, baseline: f32) -> f32 {
    let baseline = if baseline <= 0.0 { DEFAULT_GAS_BASELINE_OHMS } else { baseline };
    let ratio = compensated / baseline;

    let iaq = if ratio >= RATIO_CLEAN {
        50.0 * (RATIO_CLEAN_CAP - ratio.min(RATIO_CLEAN_CAP))
    } else if ratio >= RATIO_LIGHT {
        50.0 + 200.0 * (RATIO_CLEAN - ratio)
    } else if ratio >= RATIO_MODERATE {
        150.0 + 100.0 * ((RATIO_LIGHT - ratio) / 0.3)
    } else if ratio >= RATIO_HEAVY {
        250.0 + 100.0 * ((RATIO_MODERATE - ratio) / 0.1)
    } else {
        350.0 + 150.0 * ((RATIO_HEAVY - ratio) / 0.1).min(1.0)
    };

    iaq.clamp(IAQ_MIN, IAQ_MAX)
}

/// Level for a score, with inclusive upper bounds
pub fn classify_iaq(iaq_score: f32) -> IaqLevel {
    if iaq_score <= LEVEL_EXCELLENT_MAX {
        IaqLevel::Excellent
    } else if iaq_score <= LEVEL_GOOD_MAX {
        IaqLevel::Good
    } else if iaq_score <= LEVEL_LIGHTLY_POLLUTED_MAX {
        IaqLevel::LightlyPolluted
    } else if iaq_score <= LEVEL_MODERATELY_POLLUTED_MAX {
        IaqLevel::ModeratelyPolluted
    } else if iaq_score <= LEVEL_HEAVILY_POLLUTED_MAX {
        IaqLevel::HeavilyPolluted
    } else {
        IaqLevel::SeverelyPolluted
    }
}

/// CO2 equivalent (ppm): 400 + 5 × IAQ, clamped to 400..=2000
pub fn estimate_co2(iaq_score: f32) -> f32 {
    (CO2_BASE_PPM + iaq_score * CO2_PPM_PER_IAQ).clamp(CO2_BASE_PPM, CO2_MAX_PPM)
}

/// VOC equivalent (ppm): 1.5 × (baseline / reading − 1), clamped to 0..=10
///
/// Zero when either input is not positive.
pub fn estimate_voc(compensated: f32, baseline: f32) -> f32 {
    if compensated <= 0.0 || baseline <= 0.0 {
        return VOC_BASE_PPM;
    }

    let ratio = baseline / compensated;
    (VOC_BASE_PPM + (ratio - 1.0) * VOC_PPM_PER_RATIO).clamp(VOC_BASE_PPM, VOC_MAX_PPM)
}
