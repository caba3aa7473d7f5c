//! Skin analysis vocabulary shared by the synthesizer, the HTTP layer, and
//! stored history.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed taxonomy of detectable skin conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Acne,
    Dryness,
    Oiliness,
    Wrinkles,
    Pigmentation,
    Rosacea,
    Eczema,
    Psoriasis,
    Melasma,
    Sensitivity,
}

impl Condition {
    // ---
    pub const ALL: [Condition; 10] = [
        Condition::Acne,
        Condition::Dryness,
        Condition::Oiliness,
        Condition::Wrinkles,
        Condition::Pigmentation,
        Condition::Rosacea,
        Condition::Eczema,
        Condition::Psoriasis,
        Condition::Melasma,
        Condition::Sensitivity,
    ];

    /// Lowercase key, as used on the wire and in lookup tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Acne => "acne",
            Condition::Dryness => "dryness",
            Condition::Oiliness => "oiliness",
            Condition::Wrinkles => "wrinkles",
            Condition::Pigmentation => "pigmentation",
            Condition::Rosacea => "rosacea",
            Condition::Eczema => "eczema",
            Condition::Psoriasis => "psoriasis",
            Condition::Melasma => "melasma",
            Condition::Sensitivity => "sensitivity",
        }
    }

    /// Capitalized name shown in concerns.
    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Acne => "Acne",
            Condition::Dryness => "Dryness",
            Condition::Oiliness => "Oiliness",
            Condition::Wrinkles => "Wrinkles",
            Condition::Pigmentation => "Pigmentation",
            Condition::Rosacea => "Rosacea",
            Condition::Eczema => "Eczema",
            Condition::Psoriasis => "Psoriasis",
            Condition::Melasma => "Melasma",
            Condition::Sensitivity => "Sensitivity",
        }
    }

    /// Case-insensitive lookup by name.
    pub fn parse(name: &str) -> Option<Condition> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anatomical sub-region of a detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FaceArea {
    Forehead,
    Tzone,
    LeftCheek,
    RightCheek,
    Chin,
}

impl FaceArea {
    pub fn is_cheek(&self) -> bool {
        matches!(self, FaceArea::LeftCheek | FaceArea::RightCheek)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkinType {
    Dry,
    Oily,
    Combination,
    Normal,
    Sensitive,
}

impl SkinType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinType::Dry => "Dry",
            SkinType::Oily => "Oily",
            SkinType::Combination => "Combination",
            SkinType::Normal => "Normal",
            SkinType::Sensitive => "Sensitive",
        }
    }
}

impl fmt::Display for SkinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rectangle of the face with the condition found there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub area: FaceArea,
    pub condition: Condition,
    pub severity: f64,
}

/// A condition aggregated over every region where it was found.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinConcern {
    pub name: String,
    pub severity: f64,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecommendationKind {
    Cleanser,
    Moisturizer,
    Treatment,
    Sunscreen,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub product: String,
    pub reason: String,
}

/// The full report returned by `/analyze-skin` and kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinAnalysisData {
    pub overall_score: u32,
    pub skin_type: SkinType,
    pub concerns: Vec<SkinConcern>,
    pub recommendations: Vec<Recommendation>,
    pub regions: Vec<SkinRegion>,
}
