//! Condition scorer implementations.

use crate::domain::{Condition, ConditionScorer, FaceArea, Signals};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex};

/// Upper bound on any region's severity.
pub const MAX_SEVERITY: f64 = 0.9;

/// Random base severity is drawn from `[BASE_MIN, BASE_MIN + BASE_SPAN)`.
const BASE_MIN: f64 = 0.3;
const BASE_SPAN: f64 = 0.4;

/// Severity the signal scorer assigns when no classifier signal applies.
const NEUTRAL_SEVERITY: f64 = 0.5;

/// Blend a base severity with an optional classifier signal, capped.
///
/// A zero signal counts as no signal.
pub fn blend_severity(base: f64, signal: Option<f64>) -> f64 {
    // ---
    let blended = match live_signal(signal) {
        Some(signal) => (base + signal) / 2.0,
        None => base,
    };
    blended.clamp(0.0, MAX_SEVERITY)
}

fn live_signal(signal: Option<f64>) -> Option<f64> {
    signal.filter(|s| *s > 0.0)
}

/// Picks a random candidate and a random base severity nudged by signals.
pub struct RandomHeuristicScorer {
    rng: Mutex<StdRng>,
}

impl RandomHeuristicScorer {
    // ---
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomHeuristicScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionScorer for RandomHeuristicScorer {
    fn score(
        &self,
        _area: FaceArea,
        candidates: &[Condition],
        signals: &Signals,
    ) -> (Condition, f64) {
        // ---
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());

        let condition = candidates[rng.gen_range(0..candidates.len())];
        let base = BASE_MIN + rng.gen::<f64>() * BASE_SPAN;

        (condition, blend_severity(base, signals.get(condition)))
    }
}

/// Deterministic scorer driven only by classifier signals.
///
/// Picks the candidate with the strongest signal (first candidate on ties or
/// when none has a signal). Severity is the signal itself, capped; without a
/// signal it is neutral.
pub struct SignalScorer;

impl ConditionScorer for SignalScorer {
    fn score(
        &self,
        _area: FaceArea,
        candidates: &[Condition],
        signals: &Signals,
    ) -> (Condition, f64) {
        // ---
        let mut best = (candidates[0], live_signal(signals.get(candidates[0])));
        for &candidate in &candidates[1..] {
            let signal = live_signal(signals.get(candidate));
            if signal.unwrap_or(f64::MIN) > best.1.unwrap_or(f64::MIN) {
                best = (candidate, signal);
            }
        }

        let (condition, signal) = best;
        let severity = signal.unwrap_or(NEUTRAL_SEVERITY);
        (condition, severity.clamp(0.0, MAX_SEVERITY))
    }
}

/// Build a scorer from its configured name.
pub fn create_scorer(kind: &str) -> anyhow::Result<Arc<dyn ConditionScorer>> {
    // ---
    match kind {
        "random" => Ok(Arc::new(RandomHeuristicScorer::new())),
        "model" => Ok(Arc::new(SignalScorer)),
        other => anyhow::bail!("Unknown condition scorer: {other}"),
    }
}
