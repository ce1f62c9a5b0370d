//! Property tests for the scoring pipeline
//!
//! Ranges and orderings that must hold for any physically plausible
//! reading, not just the hand-picked scenarios.

mod common;

use proptest::prelude::*;

use iaqguard_core::algorithm::{
    calibration_progress, classify_accuracy, compensate_gas_resistance, estimate_co2,
    estimate_voc, iaq_from_gas, BaselineTracker,
};
use iaqguard_core::RawReading;

use common::{assert_output_in_range, engine_with_burn_in};

fn gas_resistance() -> impl Strategy<Value = f32> {
    1_000.0f32..2_000_000.0
}

fn baseline() -> impl Strategy<Value = f32> {
    10_000.0f32..1_000_000.0
}

/// Ratio breakpoints of the scoring curve
const SEGMENTS: [(f32, f32); 5] = [(1.0, 4.0), (0.5, 1.0), (0.2, 0.5), (0.1, 0.2), (0.0, 0.1)];

proptest! {
    #[test]
    fn score_and_equivalents_in_range(
        compensated in gas_resistance(),
        baseline in baseline(),
    ) {
        let score = iaq_from_gas(compensated, baseline);
        prop_assert!((0.0..=500.0).contains(&score));
        prop_assert!((400.0..=2000.0).contains(&estimate_co2(score)));
        prop_assert!((0.0..=10.0).contains(&estimate_voc(compensated, baseline)));
    }

    #[test]
    fn cleaner_air_never_scores_worse_within_segment(
        segment in 0usize..SEGMENTS.len(),
        a in 0.0f32..1.0,
        b in 0.0f32..1.0,
        baseline in baseline(),
    ) {
        let (low, high) = SEGMENTS[segment];
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let dirty = baseline * (low + (high - low) * lo);
        let clean = baseline * (low + (high - low) * hi);

        prop_assert!(iaq_from_gas(clean, baseline) <= iaq_from_gas(dirty, baseline) + 1e-3);
    }

    #[test]
    fn engine_outputs_in_range(
        readings in prop::collection::vec(
            (0.0f32..45.0, 5.0f32..95.0, gas_resistance()),
            1..120,
        ),
    ) {
        let engine = engine_with_burn_in(50);
        for (temperature, humidity, gas) in readings {
            let output = engine
                .calculate(&RawReading::new(temperature, humidity, 101_325.0, gas))
                .unwrap();
            assert_output_in_range(&output);
        }
    }

    #[test]
    fn compensation_positive_for_plausible_climate(
        gas in gas_resistance(),
        temperature in -20.0f32..60.0,
        humidity in 0.0f32..100.0,
    ) {
        let compensated = compensate_gas_resistance(gas, temperature, humidity);
        prop_assert!(compensated.is_finite() && compensated > 0.0);
    }

    #[test]
    fn accuracy_and_progress_never_regress(
        burn_in in 1u32..500,
        samples in 0u32..1_000,
    ) {
        prop_assert!(classify_accuracy(samples, burn_in) <= classify_accuracy(samples + 1, burn_in));
        prop_assert!(calibration_progress(samples, burn_in) <= calibration_progress(samples + 1, burn_in));
        prop_assert!(calibration_progress(samples, burn_in) <= 100);
    }

    #[test]
    fn baseline_never_falls_after_burn_in(
        readings in prop::collection::vec(gas_resistance(), 1..200),
    ) {
        let mut tracker = BaselineTracker::new();
        for _ in 0..5 {
            tracker.update(200_000.0, 5, 0.01);
        }

        let mut previous = tracker.baseline();
        for reading in readings {
            tracker.update(reading, 5, 0.01);
            prop_assert!(tracker.baseline() >= previous);
            previous = tracker.baseline();
        }
    }
}
