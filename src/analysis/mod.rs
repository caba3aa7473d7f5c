//! Result synthesis: turns raw model outputs into a `SkinAnalysisData` report.
//!
//! The pipeline is fixed:
//! 1. partition the detected face into five regions (`regions`)
//! 2. extract condition signals from classifier labels (`signals`)
//! 3. let the configured `ConditionScorer` pick a condition and severity per region
//! 4. derive skin type, overall score, and concerns (`report`)
//! 5. look up product recommendations (`recommendations`)

mod conditions;
mod progress;
mod recommendations;
mod regions;
mod report;
mod scorer;
mod signals;

pub use conditions::about;
pub use progress::{summarize, ConcernTrend, ProgressConcern, ProgressPoint, ProgressSummary};
pub use recommendations::generate_recommendations;
pub use regions::{candidate_conditions, extract_face_regions, RegionBox, DEFAULT_LAYOUT};
pub use report::{calculate_overall_score, describe, determine_skin_type, generate_concerns};
pub use scorer::{blend_severity, create_scorer, RandomHeuristicScorer, SignalScorer};
pub use signals::extract_signals;

use crate::domain::{
    ConditionScorer, ImageClassification, ObjectDetection, SkinAnalysisData, SkinRegion,
};

/// Combine detection and classification outputs into a full report.
pub fn synthesize(
    detections: &[ObjectDetection],
    classifications: &[ImageClassification],
    scorer: &dyn ConditionScorer,
) -> SkinAnalysisData {
    // ---
    let signals = extract_signals(classifications);

    let regions: Vec<SkinRegion> = extract_face_regions(detections)
        .into_iter()
        .map(|b| {
            let (condition, severity) =
                scorer.score(b.area, candidate_conditions(b.area), &signals);
            SkinRegion {
                x: b.x,
                y: b.y,
                width: b.width,
                height: b.height,
                area: b.area,
                condition,
                severity,
            }
        })
        .collect();

    let skin_type = determine_skin_type(&regions);
    let overall_score = calculate_overall_score(&regions);
    let concerns = generate_concerns(&regions);
    let recommendations = generate_recommendations(&concerns, skin_type);

    SkinAnalysisData {
        overall_score,
        skin_type,
        concerns,
        recommendations,
        regions,
    }
}
