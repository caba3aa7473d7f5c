use crate::domain::SkinAnalysisData;
use serde::{Deserialize, Serialize};

/// The parts of a stored report that progress tracking reads.
///
/// Stored reports are client-supplied, so only the score and concern
/// names/severities are required; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressPoint {
    pub overall_score: f64,
    #[serde(default)]
    pub concerns: Vec<ProgressConcern>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressConcern {
    pub name: String,
    pub severity: f64,
}

impl From<&SkinAnalysisData> for ProgressPoint {
    fn from(report: &SkinAnalysisData) -> Self {
        // ---
        ProgressPoint {
            overall_score: f64::from(report.overall_score),
            concerns: report
                .concerns
                .iter()
                .map(|c| ProgressConcern {
                    name: c.name.clone(),
                    severity: c.severity,
                })
                .collect(),
        }
    }
}

/// Trend of one concern across a history, as percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConcernTrend {
    pub name: String,
    /// One entry per analysis; 0 where the concern was absent
    pub severities: Vec<u32>,
}

/// Score and concern trends over a user's history, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    pub scores: Vec<u32>,
    /// Last score minus first; absent with fewer than two analyses
    pub score_change: Option<i64>,
    /// Ordered by first appearance
    pub concerns: Vec<ConcernTrend>,
}

pub fn summarize(analyses: &[ProgressPoint]) -> ProgressSummary {
    // ---
    let scores: Vec<u32> = analyses
        .iter()
        .map(|a| a.overall_score.round().max(0.0) as u32)
        .collect();

    let score_change = match (scores.first(), scores.last()) {
        (Some(first), Some(last)) if scores.len() > 1 => Some(i64::from(*last) - i64::from(*first)),
        _ => None,
    };

    let mut names: Vec<&str> = Vec::new();
    for concern in analyses.iter().flat_map(|a| &a.concerns) {
        if !names.contains(&concern.name.as_str()) {
            names.push(&concern.name);
        }
    }

    let concerns = names
        .into_iter()
        .map(|name| ConcernTrend {
            name: name.to_string(),
            severities: analyses
                .iter()
                .map(|a| {
                    a.concerns
                        .iter()
                        .find(|c| c.name == name)
                        .map(|c| (c.severity * 100.0).round().max(0.0) as u32)
                        .unwrap_or(0)
                })
                .collect(),
        })
        .collect();

    ProgressSummary {
        scores,
        score_change,
        concerns,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::domain::{SkinConcern, SkinType};

    fn analysis(score: u32, concerns: &[(&str, f64)]) -> ProgressPoint {
        ProgressPoint::from(&SkinAnalysisData {
            overall_score: score,
            skin_type: SkinType::Normal,
            concerns: concerns
                .iter()
                .map(|(name, severity)| SkinConcern {
                    name: name.to_string(),
                    severity: *severity,
                    description: String::new(),
                })
                .collect(),
            recommendations: Vec::new(),
            regions: Vec::new(),
        })
    }

    #[test]
    fn trends_across_history() {
        // ---
        let history = [
            analysis(70, &[("Acne", 0.6)]),
            analysis(78, &[("Dryness", 0.3), ("Acne", 0.42)]),
        ];
        let summary = summarize(&history);

        assert_eq!(summary.scores, vec![70, 78]);
        assert_eq!(summary.score_change, Some(8));
        assert_eq!(summary.concerns.len(), 2);
        assert_eq!(summary.concerns[0].name, "Acne");
        assert_eq!(summary.concerns[0].severities, vec![60, 42]);
        assert_eq!(summary.concerns[1].name, "Dryness");
        assert_eq!(summary.concerns[1].severities, vec![0, 30]);
    }

    #[test]
    fn single_entry_has_no_change() {
        let summary = summarize(&[analysis(90, &[])]);
        assert_eq!(summary.score_change, None);
        assert!(summary.concerns.is_empty());
    }

    #[test]
    fn reads_reports_without_region_areas() {
        // ---
        let stored = serde_json::json!({
            "overallScore": 79.6,
            "skinType": "combination",
            "concerns": [{ "name": "Acne", "severity": 0.4, "description": "" }],
            "recommendations": [],
            "regions": [
                { "x": 1, "y": 2, "width": 3, "height": 4, "condition": "acne", "severity": 0.4 }
            ]
        });
        let point: ProgressPoint = serde_json::from_value(stored).unwrap();
        let summary = summarize(&[point]);

        assert_eq!(summary.scores, vec![80]);
        assert_eq!(summary.concerns[0].severities, vec![40]);

        let bare: ProgressPoint =
            serde_json::from_value(serde_json::json!({ "overallScore": 55 })).unwrap();
        assert!(bare.concerns.is_empty());
    }
}
