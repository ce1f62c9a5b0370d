//! Calibration accuracy stages

use crate::types::IaqAccuracy;

/// Accuracy stage for a sample count against the burn-in target
///
/// ```text
/// samples < burn_in / 4  → Unreliable
/// samples < burn_in / 2  → Low
/// samples < burn_in      → Medium
/// otherwise              → High
/// ```
///
/// Fractions are exact: with a burn-in of 50, sample 12 is still
/// Unreliable (12 < 12.5) and sample 13 is Low.
pub fn classify_accuracy(samples: u32, burn_in: u32) -> IaqAccuracy {
    let samples = u64::from(samples);
    let burn_in = u64::from(burn_in);

    if samples * 4 < burn_in {
        IaqAccuracy::Unreliable
    } else if samples * 2 < burn_in {
        IaqAccuracy::Low
    } else if samples < burn_in {
        IaqAccuracy::Medium
    } else {
        IaqAccuracy::High
    }
}

/// Burn-in complete
pub fn is_calibrated(samples: u32, burn_in: u32) -> bool {
    samples >= burn_in
}

/// Burn-in progress in percent, 0..=100
///
/// A zero-length burn-in is complete from the start.
pub fn calibration_progress(samples: u32, burn_in: u32) -> u8 {
    if burn_in == 0 {
        return 100;
    }

    let progress = u64::from(samples) * 100 / u64::from(burn_in);
    progress.min(100) as u8
}
