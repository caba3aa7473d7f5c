use super::skin::{Condition, FaceArea};
use std::collections::HashMap;
use std::sync::Arc;

/// Per-condition strength extracted from classifier labels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signals(HashMap<Condition, f64>);

impl Signals {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signal for `condition`, replacing any earlier value.
    pub fn set(&mut self, condition: Condition, score: f64) {
        self.0.insert(condition, score);
    }

    pub fn get(&self, condition: Condition) -> Option<f64> {
        self.0.get(&condition).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Chooses a condition and severity for one face region.
///
/// Implementations: a random heuristic and a deterministic signal-driven
/// scorer. A real dermatology model can slot in here without touching
/// synthesis or recommendations.
pub trait ConditionScorer: Send + Sync {
    // ---
    /// `candidates` is never empty. Returned severity must lie in `[0, 1]`.
    fn score(&self, area: FaceArea, candidates: &[Condition], signals: &Signals)
        -> (Condition, f64);
}

/// Type alias for any implementation of ConditionScorer.
pub type ConditionScorerPtr = Arc<dyn ConditionScorer>;
