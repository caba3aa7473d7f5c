use crate::domain::Condition;

/// Long-form explanation of a condition for the reference endpoint.
pub fn about(condition: Condition) -> &'static str {
    // ---
    match condition {
        Condition::Acne => "Acne occurs when hair follicles become clogged with oil and dead skin cells. It causes whiteheads, blackheads, or pimples and affects people of all ages.",
        Condition::Dryness => "Dry skin lacks moisture. It can feel tight and rough and may flake, scale, or crack.",
        Condition::Oiliness => "Oily skin comes from excess sebum production. It looks shiny, shows enlarged pores, and is more prone to acne.",
        Condition::Wrinkles => "Wrinkles are creases or ridges in the skin driven by aging, sun exposure, smoking, and repeated facial expressions.",
        Condition::Pigmentation => "Hyperpigmentation is patches of skin darker than their surroundings due to excess melanin, often after sun damage, inflammation, or hormonal changes.",
        Condition::Rosacea => "Rosacea is a chronic inflammatory condition of the face causing redness, visible blood vessels, and sometimes small red bumps.",
        Condition::Eczema => "Eczema (atopic dermatitis) is a chronic condition of itchy, inflamed, dry, red patches.",
        Condition::Psoriasis => "Psoriasis is an autoimmune condition that speeds up skin cell turnover, leaving raised red patches covered with silvery scales.",
        Condition::Melasma => "Melasma causes brown or grayish-brown facial patches, commonly triggered by hormonal changes and sun exposure.",
        Condition::Sensitivity => "Sensitive skin is easily irritated by environmental factors or skincare products and may turn red, itch, burn, or feel tight.",
    }
}
