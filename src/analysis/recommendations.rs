//! Static product lookup tables.

use crate::domain::{Condition, Recommendation, RecommendationKind, SkinConcern, SkinType};

/// Top-concern key used when there are no concerns at all.
const NO_CONCERN: &str = "normal";

/// Four recommendations (cleanser, moisturizer, treatment, sunscreen) for
/// the most severe concern and the skin type.
pub fn generate_recommendations(concerns: &[SkinConcern], skin_type: SkinType) -> Vec<Recommendation> {
    // ---
    let top = concerns
        .iter()
        .reduce(|best, c| if c.severity > best.severity { c } else { best })
        .map(|c| c.name.to_lowercase())
        .unwrap_or_else(|| NO_CONCERN.to_string());
    let top_condition = Condition::parse(&top);
    let skin = skin_type.as_str().to_lowercase();

    vec![
        Recommendation {
            kind: RecommendationKind::Cleanser,
            product: cleanser(top_condition, skin_type).to_string(),
            reason: format!("Formulated for {skin} skin with {top} concerns"),
        },
        Recommendation {
            kind: RecommendationKind::Moisturizer,
            product: moisturizer(top_condition, skin_type).to_string(),
            reason: format!(
                "Provides optimal hydration for {skin} skin while addressing {top}"
            ),
        },
        Recommendation {
            kind: RecommendationKind::Treatment,
            product: treatment(top_condition).to_string(),
            reason: format!("Targets {top} with specialized active ingredients"),
        },
        Recommendation {
            kind: RecommendationKind::Sunscreen,
            product: sunscreen(skin_type).to_string(),
            reason: "Protects against UV damage and prevents further skin issues".to_string(),
        },
    ]
}

fn cleanser(top: Option<Condition>, skin_type: SkinType) -> &'static str {
    // ---
    use SkinType::*;
    match (top, skin_type) {
        (Some(Condition::Acne), Oily) => "Salicylic Acid Foaming Cleanser",
        (Some(Condition::Acne), Combination) => "Gentle Balancing Cleanser with BHA",
        (Some(Condition::Acne), Dry) => "Cream Cleanser with Salicylic Acid",
        (Some(Condition::Acne), Sensitive) => "Gentle Non-Foaming Acne Cleanser",
        (Some(Condition::Acne), Normal) => "Balancing Cleanser with Salicylic Acid",
        _ => "Gentle pH-Balanced Cleanser",
    }
}

fn moisturizer(top: Option<Condition>, skin_type: SkinType) -> &'static str {
    // ---
    use SkinType::*;
    match (top, skin_type) {
        (Some(Condition::Dryness), Dry) => "Rich Ceramide Barrier Cream",
        (Some(Condition::Oiliness), Oily) => "Oil-Free Gel Moisturizer",
        (Some(Condition::Rosacea | Condition::Sensitivity), Sensitive) => {
            "Fragrance-Free Soothing Moisturizer"
        }
        _ => "Balanced Hydration Moisturizer",
    }
}

fn treatment(top: Option<Condition>) -> &'static str {
    // ---
    match top {
        Some(Condition::Acne) => "Benzoyl Peroxide Spot Treatment",
        Some(Condition::Dryness) => "Hyaluronic Acid Serum",
        Some(Condition::Oiliness) => "Niacinamide Serum",
        Some(Condition::Wrinkles) => "Retinol Night Serum",
        Some(Condition::Pigmentation) => "Vitamin C Brightening Serum",
        Some(Condition::Rosacea) => "Azelaic Acid Treatment",
        Some(Condition::Eczema) => "Colloidal Oatmeal Treatment",
        Some(Condition::Psoriasis) => "Salicylic Acid Exfoliating Serum",
        Some(Condition::Melasma) => "Alpha Arbutin Dark Spot Corrector",
        Some(Condition::Sensitivity) => "Centella Asiatica Calming Serum",
        None => "Antioxidant Serum",
    }
}

fn sunscreen(skin_type: SkinType) -> &'static str {
    // ---
    match skin_type {
        SkinType::Oily => "Oil-Free Matte Broad Spectrum SPF 50",
        SkinType::Combination => "Lightweight Broad Spectrum SPF 50",
        SkinType::Dry => "Hydrating Broad Spectrum SPF 50",
        SkinType::Sensitive => "Mineral Broad Spectrum SPF 30-50",
        SkinType::Normal => "Broad Spectrum SPF 50",
    }
}
