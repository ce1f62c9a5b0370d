//! Persistent Calibration Example
//!
//! Shows how the learned baseline survives a restart through the JSON
//! file store, so a rebooted device does not repeat its burn-in.
//!
//! ## What You'll Learn
//!
//! - Backing the engine with `FileStore`
//! - Saving calibration periodically
//! - Restoring it automatically on `initialize`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 02_persistent_calibration --features store-file
//! ```
//!
//! Run it twice: the second run starts calibrated.

use std::env;

use iaqguard_core::{
    EngineConfig, FileStore, IaqEngine, IaqError, MonotonicClock, RawReading,
};

/// Save every N accepted samples
const SAVE_INTERVAL: u32 = 10;

fn main() -> Result<(), IaqError> {
    let path = env::temp_dir().join("iaqguard_state.json");
    println!("=== IAQGuard Persistent Calibration ===");
    println!("State file: {}\n", path.display());

    let store = FileStore::open(&path)?;
    let engine = IaqEngine::new(store, MonotonicClock::new());
    engine.initialize(Some(EngineConfig::new().with_burn_in_samples(30)))?;

    let restored = engine.calibration()?;
    if restored.samples_count > 0 {
        println!(
            "Restored baseline {:.0} Ω after {} samples ({}% calibrated)",
            restored.gas_baseline,
            restored.samples_count,
            engine.calibration_progress()
        );
    } else {
        println!("No saved calibration, starting burn-in");
    }

    for i in 0..25u32 {
        let gas = 190_000.0 + (i % 7) as f32 * 2_000.0;
        let output = engine.calculate(&RawReading::new(22.0, 41.0, 101_325.0, gas))?;

        if output.samples_count % SAVE_INTERVAL == 0 {
            match engine.save_state() {
                Ok(()) => println!(
                    "saved at sample {} (baseline {:.0} Ω, {})",
                    output.samples_count, output.gas_baseline, output.accuracy
                ),
                Err(e) => println!("save failed, will retry: {e}"),
            }
        }
    }

    engine.save_state()?;
    let final_state = engine.calibration()?;
    println!(
        "\nFinal: baseline {:.0} Ω, {} samples, calibrated: {}",
        final_state.gas_baseline,
        final_state.samples_count,
        engine.is_calibrated()
    );

    Ok(())
}
