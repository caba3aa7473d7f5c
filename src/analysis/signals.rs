use crate::domain::{Condition, ImageClassification, Signals};

/// Keyword fragments in a classifier label and the condition they hint at.
const KEYWORDS: [(&[&str], Condition); 4] = [
    (&["skin", "face"], Condition::Sensitivity),
    (&["red", "pink"], Condition::Rosacea),
    (&["spot", "mark"], Condition::Pigmentation),
    (&["wrinkle", "line"], Condition::Wrinkles),
];

/// Map general-purpose classifier labels onto condition signals.
///
/// Matching is lowercase substring containment. Labels are visited in order
/// and a later match overwrites an earlier one for the same condition.
pub fn extract_signals(classifications: &[ImageClassification]) -> Signals {
    // ---
    let mut signals = Signals::new();

    for classification in classifications {
        let label = classification.label.to_lowercase();
        for (fragments, condition) in KEYWORDS {
            if fragments.iter().any(|f| label.contains(f)) {
                signals.set(condition, classification.score);
            }
        }
    }

    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(label: &str, score: f64) -> ImageClassification {
        ImageClassification {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn keywords_map_to_conditions() {
        // ---
        let signals = extract_signals(&[
            label("Red wine", 0.4),
            label("band-aid, spot plaster", 0.2),
            label("face powder", 0.1),
        ]);
        assert_eq!(signals.get(Condition::Rosacea), Some(0.4));
        assert_eq!(signals.get(Condition::Pigmentation), Some(0.2));
        assert_eq!(signals.get(Condition::Sensitivity), Some(0.1));
        assert_eq!(signals.get(Condition::Wrinkles), None);
    }

    #[test]
    fn later_labels_overwrite_earlier_ones() {
        let signals = extract_signals(&[label("pink", 0.9), label("redbone", 0.3)]);
        assert_eq!(signals.get(Condition::Rosacea), Some(0.3));
    }

    #[test]
    fn unrelated_labels_yield_nothing() {
        assert!(extract_signals(&[label("tabby cat", 0.8)]).is_empty());
    }
}
