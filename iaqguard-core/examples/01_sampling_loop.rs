//! Sampling Loop Example
//!
//! Drives the IAQ engine the way a sensor task does: one reading per
//! period, publish the result, fall back gracefully on errors.
//!
//! ## What You'll Learn
//!
//! - Creating and initializing an engine
//! - Handling warm-up readings and lock timeouts
//! - Following calibration progress through burn-in
//! - Presenting levels with text and colors
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_sampling_loop
//! ```

use iaqguard_core::{
    EngineConfig, IaqEngine, IaqError, IaqOutput, MemoryStore, MonotonicClock, RawReading,
};

/// Synthetic office day: heater warm-up, clean morning, a meeting, airing out
fn simulated_readings() -> Vec<RawReading> {
    let mut readings = Vec::new();

    // Heater not stable for the first three cycles
    for _ in 0..3 {
        readings.push(RawReading::without_gas(21.0, 45.0, 101_300.0));
    }

    // Clean morning air
    for i in 0..20 {
        let drift = (i % 5) as f32 * 1_500.0;
        readings.push(RawReading::new(21.5, 44.0, 101_300.0, 205_000.0 + drift));
    }

    // Meeting: VOCs build up, gas resistance falls
    for i in 0..15 {
        let gas = 200_000.0 - i as f32 * 11_000.0;
        readings.push(RawReading::new(23.0 + i as f32 * 0.1, 50.0, 101_280.0, gas));
    }

    // Windows open
    for i in 0..10 {
        let gas = 60_000.0 + i as f32 * 16_000.0;
        readings.push(RawReading::new(20.0, 42.0, 101_290.0, gas));
    }

    readings
}

fn publish(step: usize, output: &IaqOutput, progress: u8) {
    println!(
        "{:>3}  IAQ {:>5.1}  {:<20} #{:06X}  CO2 {:>6.0} ppm  VOC {:>4.2} ppm  {:<24} {:>3}%",
        step,
        output.iaq_score,
        output.iaq_level.as_text(),
        output.iaq_level.color(),
        output.co2_equivalent,
        output.voc_equivalent,
        output.accuracy.as_text(),
        progress,
    );
}

fn main() -> Result<(), IaqError> {
    println!("=== IAQGuard Sampling Loop ===\n");

    let engine = IaqEngine::new(MemoryStore::<4>::new(), MonotonicClock::new());

    // Short burn-in so the demo reaches High accuracy
    let config = EngineConfig::new()
        .with_burn_in_samples(20)
        .with_recalibration_rate(0.01)
        .with_temperature_offset(-0.8);
    engine.initialize(Some(config))?;

    for (step, reading) in simulated_readings().iter().enumerate() {
        match engine.calculate(reading) {
            Ok(output) => publish(step, &output, engine.calibration_progress()),
            Err(IaqError::InvalidArgument { reason }) => {
                println!("{:>3}  skipped: {}", step, reason);
                publish(step, &IaqOutput::default(), engine.calibration_progress());
            }
            Err(IaqError::Timeout { .. }) => {
                // Another task holds the engine; republish the last result
                let previous = engine.last_result().unwrap_or_default();
                publish(step, &previous, engine.calibration_progress());
            }
            Err(e) => return Err(e),
        }
    }

    let stats = engine.statistics()?;
    println!("\n=== Calibration ===");
    println!("Baseline:      {:.0} Ω", stats.gas_baseline);
    println!("Samples:       {}", stats.samples_count);
    println!("Calibrated:    {}", engine.is_calibrated());
    if let (Some(min), Some(mean)) = (stats.min, stats.mean) {
        println!("Range:         {:.0} .. {:.0} Ω (mean {:.0})", min, stats.max, mean);
    }
    if let Some(recent) = stats.recent_mean {
        println!("Recent mean:   {:.0} Ω over {} samples", recent, stats.recent_len);
    }

    Ok(())
}
