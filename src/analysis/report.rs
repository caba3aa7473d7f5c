//! Rule-based summaries derived from scored regions.

use crate::domain::{Condition, FaceArea, SkinConcern, SkinRegion, SkinType};

/// Score reported when there are no regions to average.
const EMPTY_SCORE: u32 = 75;
const MIN_SCORE: f64 = 60.0;
const MAX_SCORE: f64 = 95.0;

/// Classify skin type from per-region conditions.
///
/// Sensitivity (including rosacea) in two or more regions wins, then an oily
/// T-zone with a dry cheek, then whichever of oily or dry is more common.
pub fn determine_skin_type(regions: &[SkinRegion]) -> SkinType {
    // ---
    let count = |wanted: &[Condition]| {
        regions
            .iter()
            .filter(|r| wanted.contains(&r.condition))
            .count()
    };

    let dry = count(&[Condition::Dryness]);
    let oily = count(&[Condition::Oiliness]);
    let sensitive = count(&[Condition::Sensitivity, Condition::Rosacea]);

    let tzone_oily = regions
        .iter()
        .any(|r| r.area == FaceArea::Tzone && r.condition == Condition::Oiliness);
    let cheeks_dry = regions
        .iter()
        .any(|r| r.area.is_cheek() && r.condition == Condition::Dryness);

    if sensitive >= 2 {
        SkinType::Sensitive
    } else if tzone_oily && cheeks_dry {
        SkinType::Combination
    } else if oily > dry {
        SkinType::Oily
    } else if dry > oily {
        SkinType::Dry
    } else {
        SkinType::Normal
    }
}

/// `clamp(60, 95, round(100 - avgSeverity * 100 / 2))`.
pub fn calculate_overall_score(regions: &[SkinRegion]) -> u32 {
    // ---
    if regions.is_empty() {
        return EMPTY_SCORE;
    }

    let total: f64 = regions.iter().map(|r| r.severity).sum();
    let avg = total / regions.len() as f64;
    let score = (100.0 - avg * 100.0 / 2.0).round();

    score.clamp(MIN_SCORE, MAX_SCORE) as u32
}

/// One concern per distinct condition, mean severity, most severe first.
pub fn generate_concerns(regions: &[SkinRegion]) -> Vec<SkinConcern> {
    // ---
    // (condition, count, total severity) in order of first appearance
    let mut tally: Vec<(Condition, u32, f64)> = Vec::new();

    for region in regions {
        match tally.iter_mut().find(|(c, _, _)| *c == region.condition) {
            Some((_, count, total)) => {
                *count += 1;
                *total += region.severity;
            }
            None => tally.push((region.condition, 1, region.severity)),
        }
    }

    let mut concerns: Vec<SkinConcern> = tally
        .into_iter()
        .map(|(condition, count, total)| {
            let severity = total / f64::from(count);
            SkinConcern {
                name: condition.display_name().to_string(),
                severity,
                description: describe(condition, severity),
            }
        })
        .collect();

    concerns.sort_by(|a, b| b.severity.total_cmp(&a.severity));
    concerns
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeverityLevel {
    Mild,
    Moderate,
    Severe,
}

impl SeverityLevel {
    fn of(severity: f64) -> Self {
        if severity < 0.3 {
            SeverityLevel::Mild
        } else if severity < 0.7 {
            SeverityLevel::Moderate
        } else {
            SeverityLevel::Severe
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            SeverityLevel::Mild => "Mild",
            SeverityLevel::Moderate => "Moderate",
            SeverityLevel::Severe => "Severe",
        }
    }
}

/// Short severity-banded description of a concern.
pub fn describe(condition: Condition, severity: f64) -> String {
    // ---
    use Condition::*;
    use SeverityLevel::*;

    let level = SeverityLevel::of(severity);
    let canned = match (condition, level) {
        (Acne, Mild) => Some("Mild acne with few visible blemishes"),
        (Acne, Moderate) => Some("Moderate acne present, particularly in the T-zone"),
        (Acne, Severe) => Some("Significant acne with multiple inflamed blemishes"),
        (Dryness, Mild) => Some("Slight dryness with occasional tightness"),
        (Dryness, Moderate) => Some("Noticeable dryness with some flaking"),
        (Dryness, Severe) => Some("Pronounced dryness with rough, flaking patches"),
        (Oiliness, Mild) => Some("Slight shine, mostly around the nose"),
        (Oiliness, Moderate) => Some("Visible shine across the T-zone"),
        (Oiliness, Severe) => Some("Excess oil with enlarged pores"),
        (Wrinkles, Mild) => Some("Fine lines beginning to form"),
        (Wrinkles, Moderate) => Some("Visible lines around the eyes and forehead"),
        (Wrinkles, Severe) => Some("Deep wrinkles with reduced elasticity"),
        (Pigmentation, Mild) => Some("A few faint dark spots"),
        (Pigmentation, Moderate) => Some("Uneven tone with noticeable dark spots"),
        (Pigmentation, Severe) => Some("Widespread hyperpigmentation"),
        (Rosacea, Mild) => Some("Occasional flushing on the cheeks"),
        (Rosacea, Moderate) => Some("Persistent redness with visible blood vessels"),
        (Rosacea, Severe) => Some("Intense redness with inflamed bumps"),
        (Sensitivity, Mild) => Some("Skin reacts occasionally to products"),
        (Sensitivity, Moderate) => Some("Frequent redness or stinging after products"),
        (Sensitivity, Severe) => Some("Highly reactive skin prone to irritation"),
        _ => None,
    };

    match canned {
        Some(text) => text.to_string(),
        None => format!("{} {} detected", level.as_str(), condition.as_str()),
    }
}
