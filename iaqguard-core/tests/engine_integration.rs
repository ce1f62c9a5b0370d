//! Integration tests for the IAQ engine
//!
//! Drives the public API the way firmware does: initialize, feed a stream
//! of readings, persist, reboot, and share the engine across tasks.

mod common;

use std::sync::Arc;
use std::thread;

use iaqguard_core::{
    EngineConfig, IaqAccuracy, IaqEngine, IaqError, IaqLevel, IaqOutput, MemoryStore, RawReading,
    StateStore,
};

use common::{assert_output_in_range, engine_with_burn_in, ReadingGenerator, TestClock};

#[test]
fn burn_in_average_from_fresh_state() {
    let engine = engine_with_burn_in(50);
    let generator = ReadingGenerator::new(1);

    for gas in [200_000.0, 220_000.0, 240_000.0] {
        engine.calculate(&generator.exact(gas)).unwrap();
    }

    let calibration = engine.calibration().unwrap();
    assert_eq!(calibration.gas_baseline, 220_000.0);
    assert_eq!(calibration.samples_count, 3);
}

#[test]
fn calibration_completes_after_burn_in_and_holds() {
    let engine = engine_with_burn_in(50);
    let mut generator = ReadingGenerator::new(7);

    let readings = generator.clean_air(210_000.0, 0.02, 80);
    for (i, reading) in readings.iter().enumerate() {
        let output = engine.calculate(reading).unwrap();
        let taken = i as u32 + 1;

        assert_eq!(output.samples_count, taken);
        assert_eq!(output.is_calibrated, taken >= 50);
        assert_eq!(engine.is_calibrated(), taken >= 50);
    }

    assert_eq!(engine.calibration_progress(), 100);
    assert_eq!(engine.last_result().unwrap().accuracy, IaqAccuracy::High);
}

#[test]
fn accuracy_walks_through_every_stage() {
    let engine = engine_with_burn_in(50);
    let generator = ReadingGenerator::new(3);

    let mut stages = Vec::new();
    for _ in 0..50 {
        let output = engine.calculate(&generator.exact(200_000.0)).unwrap();
        stages.push(output.accuracy);
    }

    assert_eq!(stages[11], IaqAccuracy::Unreliable); // 12 samples
    assert_eq!(stages[12], IaqAccuracy::Low); // 13 samples
    assert_eq!(stages[24], IaqAccuracy::Medium); // 25 samples
    assert_eq!(stages[48], IaqAccuracy::Medium); // 49 samples
    assert_eq!(stages[49], IaqAccuracy::High); // 50 samples
    assert!(stages.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn outputs_stay_in_range_across_scenarios() {
    let engine = engine_with_burn_in(20);
    let mut generator = ReadingGenerator::new(11);

    let mut readings = generator.clean_air(250_000.0, 0.05, 30);
    readings.extend(generator.pollution_episode(250_000.0, 0.05, 40));
    readings.extend(generator.clean_air(600_000.0, 0.1, 20));

    let mut hot_humid = ReadingGenerator::new(12).with_climate(38.0, 85.0);
    readings.extend(hot_humid.clean_air(90_000.0, 0.1, 20));
    let mut cold_dry = ReadingGenerator::new(13).with_climate(5.0, 10.0);
    readings.extend(cold_dry.clean_air(400_000.0, 0.1, 20));

    for reading in &readings {
        let output = engine.calculate(reading).unwrap();
        assert_output_in_range(&output);
    }
}

#[test]
fn pollution_episode_does_not_drag_baseline_down() {
    let engine = engine_with_burn_in(10);
    let mut generator = ReadingGenerator::new(5);

    for reading in generator.clean_air(200_000.0, 0.0, 10) {
        engine.calculate(&reading).unwrap();
    }
    let calibrated = engine.calibration().unwrap().gas_baseline;

    let mut worst = 0.0f32;
    for reading in generator.pollution_episode(200_000.0, 0.05, 30) {
        let output = engine.calculate(&reading).unwrap();
        worst = worst.max(output.iaq_score);
    }

    assert_eq!(engine.calibration().unwrap().gas_baseline, calibrated);
    assert!((worst - 425.0).abs() < 0.01, "worst = {worst}");

    // Clean air again scores as it did before the episode
    let output = engine.calculate(&generator.exact(200_000.0)).unwrap();
    assert_eq!(output.iaq_level, IaqLevel::Excellent);
}

#[test]
fn scoring_scenarios_through_engine() {
    // Baseline pinned at 250 kΩ by a calibrated, persisted state
    let mut store = MemoryStore::<8>::new();
    store.write_u32("iaq_state", "gas_base", 250_000).unwrap();
    store.write_u32("iaq_state", "samples", 1_000).unwrap();
    store.commit("iaq_state").unwrap();

    let clock = TestClock::new();
    let engine = IaqEngine::new(store, clock.source(1));
    engine.initialize(None).unwrap();
    let generator = ReadingGenerator::new(0);

    let output = engine.calculate(&generator.exact(250_000.0)).unwrap();
    assert_eq!(output.iaq_score, 50.0);
    assert_eq!(output.iaq_level, IaqLevel::Excellent);

    let output = engine.calculate(&generator.exact(50_000.0)).unwrap();
    assert!((output.iaq_score - 250.0).abs() < 1e-3);
    assert_eq!(output.iaq_level, IaqLevel::HeavilyPolluted);
    assert!((output.co2_equivalent - 1_650.0).abs() < 0.01);
    assert_eq!(output.voc_equivalent, 6.0);
}

#[test]
fn rejected_readings_do_not_count() {
    let engine = engine_with_burn_in(50);
    let mut generator = ReadingGenerator::new(9);

    for reading in generator.clean_air(200_000.0, 0.01, 5) {
        engine.calculate(&reading).unwrap();
    }
    let before = engine.last_result().unwrap();

    for reading in generator.warm_up(10) {
        match engine.calculate(&reading) {
            Err(IaqError::InvalidArgument { .. }) => {}
            other => panic!("warm-up reading accepted: {other:?}"),
        }
    }

    assert_eq!(engine.calibration().unwrap().samples_count, 5);
    assert_eq!(engine.last_result().unwrap(), before);
}

#[test]
fn last_result_is_idempotent() {
    let engine = engine_with_burn_in(50);
    assert_eq!(engine.last_result().unwrap(), IaqOutput::default());

    let generator = ReadingGenerator::new(2);
    let computed = engine.calculate(&generator.exact(180_000.0)).unwrap();

    let first = engine.last_result().unwrap();
    let second = engine.last_result().unwrap();
    assert_eq!(first, second);
    assert_eq!(first, computed);
}

#[test]
fn reset_restores_defaults() {
    let engine = engine_with_burn_in(10);
    let mut generator = ReadingGenerator::new(4);
    for reading in generator.clean_air(150_000.0, 0.03, 25) {
        engine.calculate(&reading).unwrap();
    }
    assert!(engine.is_calibrated());

    engine.reset();

    let calibration = engine.calibration().unwrap();
    assert_eq!(calibration.gas_baseline, 250_000.0);
    assert_eq!(calibration.samples_count, 0);
    assert_eq!(engine.calibration_progress(), 0);
    assert!(!engine.is_calibrated());

    let stats = engine.statistics().unwrap();
    assert_eq!(stats.recent_len, 0);
    assert_eq!(stats.min, None);
}

#[test]
fn save_reset_load_round_trip() {
    let engine = engine_with_burn_in(50);
    let mut generator = ReadingGenerator::new(21);
    for reading in generator.clean_air(233_333.3, 0.04, 17) {
        engine.calculate(&reading).unwrap();
    }

    let saved = engine.calibration().unwrap();
    engine.save_state().unwrap();
    engine.reset();
    assert_eq!(engine.calibration().unwrap().samples_count, 0);

    engine.load_state().unwrap();
    let restored = engine.calibration().unwrap();
    assert_eq!(restored.samples_count, saved.samples_count);
    assert_eq!(restored.gas_baseline, saved.gas_baseline.trunc());
}

#[test]
fn calibration_survives_reboot() {
    let mut store = MemoryStore::<8>::new();
    let generator = ReadingGenerator::new(8);

    {
        let engine = IaqEngine::new(&mut store, TestClock::new().source(1));
        engine.initialize(None).unwrap();
        for _ in 0..60 {
            engine.calculate(&generator.exact(240_000.0)).unwrap();
        }
        engine.save_state().unwrap();
    }

    let engine = IaqEngine::new(&mut store, TestClock::new().source(1));
    engine.initialize(None).unwrap();

    assert!(engine.is_calibrated());
    assert_eq!(engine.calibration().unwrap().samples_count, 60);
    assert_eq!(engine.calibration().unwrap().gas_baseline, 240_000.0);

    let output = engine.calculate(&generator.exact(240_000.0)).unwrap();
    assert_eq!(output.accuracy, IaqAccuracy::High);
    assert_eq!(output.iaq_level, IaqLevel::Excellent);
}

#[test]
fn config_offsets_reach_output() {
    let clock = TestClock::new();
    let engine = IaqEngine::new(MemoryStore::<8>::new(), clock.source(1));
    engine
        .initialize(Some(
            EngineConfig::new()
                .with_temperature_offset(-2.0)
                .with_humidity_offset(3.0),
        ))
        .unwrap();

    let output = engine
        .calculate(&RawReading::new(26.0, 45.0, 101_325.0, 200_000.0))
        .unwrap();
    assert_eq!(output.comp_temperature, 24.0);
    assert_eq!(output.comp_humidity, 48.0);
}

#[test]
fn concurrent_sampling_is_serialized() {
    let engine = Arc::new(engine_with_burn_in(1_000));

    let workers: Vec<_> = (0..4)
        .map(|worker| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                let mut generator = ReadingGenerator::new(100 + worker);
                let mut accepted = 0u32;
                for reading in generator.clean_air(200_000.0, 0.05, 250) {
                    match engine.calculate(&reading) {
                        Ok(output) => {
                            assert_output_in_range(&output);
                            accepted += 1;
                        }
                        Err(IaqError::Timeout { .. }) => {}
                        Err(e) => panic!("unexpected error: {e}"),
                    }
                }
                accepted
            })
        })
        .collect();

    let accepted: u32 = workers.into_iter().map(|w| w.join().unwrap()).sum();

    // Every accepted sample was counted exactly once
    assert_eq!(engine.calibration().unwrap().samples_count, accepted);
    assert!(accepted > 0);
}

#[test]
fn humidity_glitch_cannot_inflate_baseline() {
    let engine = engine_with_burn_in(5);
    let mut generator = ReadingGenerator::new(21);

    for reading in generator.clean_air(200_000.0, 0.0, 5) {
        engine.calculate(&reading).unwrap();
    }
    let baseline = engine.calibration().unwrap().gas_baseline;

    // A corrupted humidity word just above the compensation pole
    let glitch = RawReading::new(25.0, -26.6, 101_325.0, 200_000.0);
    assert!(matches!(
        engine.calculate(&glitch),
        Err(IaqError::InvalidArgument { .. })
    ));
    assert_eq!(engine.calibration().unwrap().gas_baseline, baseline);

    // Clean air afterwards still scores as clean air
    let output = engine.calculate(&generator.exact(200_000.0)).unwrap();
    assert_eq!(output.iaq_level, IaqLevel::Excellent);
}
