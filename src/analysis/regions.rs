//! Face partitioning into the five scored regions.

use crate::domain::{Condition, FaceArea, ObjectDetection};

/// Minimum detector confidence for a box to count as the face.
const MIN_FACE_SCORE: f64 = 0.7;

/// Label the detector uses for the box we treat as the face.
const FACE_LABEL: &str = "person";

/// An unscored rectangle of the face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionBox {
    pub area: FaceArea,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl RegionBox {
    const fn new(area: FaceArea, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            area,
            x,
            y,
            width,
            height,
        }
    }
}

/// Layout used when the detector finds no confident face.
pub const DEFAULT_LAYOUT: [RegionBox; 5] = [
    RegionBox::new(FaceArea::Forehead, 150.0, 50.0, 200.0, 100.0),
    RegionBox::new(FaceArea::Tzone, 200.0, 150.0, 100.0, 150.0),
    RegionBox::new(FaceArea::LeftCheek, 100.0, 150.0, 100.0, 100.0),
    RegionBox::new(FaceArea::RightCheek, 300.0, 150.0, 100.0, 100.0),
    RegionBox::new(FaceArea::Chin, 200.0, 300.0, 100.0, 80.0),
];

/// Conditions each area may be assigned.
pub fn candidate_conditions(area: FaceArea) -> &'static [Condition] {
    // ---
    use Condition::*;
    match area {
        FaceArea::Forehead => &[Acne, Oiliness, Wrinkles],
        FaceArea::Tzone => &[Oiliness, Acne, Pigmentation],
        FaceArea::LeftCheek | FaceArea::RightCheek => {
            &[Rosacea, Dryness, Pigmentation, Sensitivity]
        }
        FaceArea::Chin => &[Acne, Oiliness, Melasma],
    }
}

/// Split the first confident face box into fixed anatomical proportions.
///
/// Falls back to [`DEFAULT_LAYOUT`] when nothing qualifies.
pub fn extract_face_regions(detections: &[ObjectDetection]) -> Vec<RegionBox> {
    // ---
    let face = detections
        .iter()
        .find(|d| d.score > MIN_FACE_SCORE && d.label == FACE_LABEL);

    let Some(face) = face else {
        return DEFAULT_LAYOUT.to_vec();
    };

    let b = face.bbox;
    let (w, h) = (b.width(), b.height());

    vec![
        RegionBox::new(FaceArea::Forehead, b.xmin, b.ymin, w, h * 0.3),
        RegionBox::new(
            FaceArea::Tzone,
            b.xmin + w * 0.4,
            b.ymin + h * 0.2,
            w * 0.2,
            h * 0.6,
        ),
        RegionBox::new(FaceArea::LeftCheek, b.xmin, b.ymin + h * 0.3, w * 0.35, h * 0.4),
        RegionBox::new(
            FaceArea::RightCheek,
            b.xmin + w * 0.65,
            b.ymin + h * 0.3,
            w * 0.35,
            h * 0.4,
        ),
        RegionBox::new(
            FaceArea::Chin,
            b.xmin + w * 0.3,
            b.ymin + h * 0.7,
            w * 0.4,
            h * 0.3,
        ),
    ]
}
