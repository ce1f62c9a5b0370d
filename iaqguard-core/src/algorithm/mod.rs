//! IAQ Estimation Algorithm
//!
//! ## Overview
//!
//! A metal-oxide gas sensor reports the resistance of a heated plate.
//! Reducing gases (VOCs from people, cooking, solvents) lower that
//! resistance; clean air raises it. The absolute value varies a lot from one
//! sensor to the next, so the engine scores air against a learned
//! "clean air" baseline instead of fixed thresholds.
//!
//! ## Stages
//!
//! Each accepted reading flows through four stages:
//!
//! ```text
//! raw Ω ──→ compensation ──→ baseline tracker ──→ scorer ──→ level, CO2, VOC
//!           (temp / RH)      (burn-in average,    (ratio → 0..500)
//!                             then upward EMA)
//!                                   │
//!                                   └──→ accuracy (sample count vs burn-in)
//! ```
//!
//! ### 1. Compensation
//! Folds the reading back to 25 °C / 40 %RH so humid or warm rooms are not
//! mistaken for polluted ones.
//!
//! ### 2. Baseline Tracking
//! Plain average during burn-in, then an exponential moving average that
//! only moves *up*. A pollution event cannot drag the clean-air reference
//! down; a cleaner-than-ever reading slowly pulls it up.
//!
//! ### 3. Scoring
//! Piecewise curve over `compensated / baseline`, followed by level
//! classification and CO2/VOC equivalents.
//!
//! ### 4. Accuracy
//! Four confidence stages over the burn-in window.
//!
//! All stages except the tracker are pure functions; the tracker owns the
//! calibration state that the engine protects with its lock.

mod accuracy;
mod baseline;
mod compensation;
mod scoring;

pub use accuracy::{calibration_progress, classify_accuracy, is_calibrated};
pub use baseline::BaselineTracker;
pub use compensation::compensate_gas_resistance;
pub use scoring::{classify_iaq, estimate_co2, estimate_voc, iaq_from_gas};
