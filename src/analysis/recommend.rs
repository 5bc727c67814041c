//! Static skincare recommendations per skin type

use super::classify::SkinType;

const SENSITIVE: [&str; 4] = [
    "Use gentle, fragrance-free products",
    "Avoid harsh exfoliants",
    "Always patch test new products",
    "Use sunscreen daily",
];

const OILY: [&str; 4] = [
    "Use oil-free products",
    "Try salicylic acid cleansers",
    "Don't skip moisturizer",
    "Use clay masks weekly",
];

const DRY: [&str; 4] = [
    "Use cream-based cleansers",
    "Apply moisturizer to damp skin",
    "Consider using facial oils",
    "Avoid hot water when washing",
];

const COMBINATION: [&str; 4] = [
    "Use different products for different areas",
    "Focus on balance",
    "Try gel-based moisturizers",
    "Use mild cleansers",
];

const NORMAL: [&str; 4] = [
    "Maintain current routine",
    "Use sunscreen daily",
    "Stay hydrated",
    "Regular gentle exfoliation",
];

/// The four fixed recommendations for `skin_type`
pub const fn recommendations(skin_type: SkinType) -> &'static [&'static str; 4] {
    match skin_type {
        SkinType::Sensitive => &SENSITIVE,
        SkinType::Oily => &OILY,
        SkinType::Dry => &DRY,
        SkinType::Combination => &COMBINATION,
        SkinType::Normal => &NORMAL,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_has_four() {
        for skin_type in SkinType::ALL {
            let list = recommendations(skin_type);
            assert_eq!(list.len(), 4);
            assert!(list.iter().all(|r| !r.is_empty()));
        }
    }

    #[test]
    fn test_exact_lists() {
        let expected: [(SkinType, [&str; 4]); 5] = [
            (
                SkinType::Sensitive,
                [
                    "Use gentle, fragrance-free products",
                    "Avoid harsh exfoliants",
                    "Always patch test new products",
                    "Use sunscreen daily",
                ],
            ),
            (
                SkinType::Oily,
                [
                    "Use oil-free products",
                    "Try salicylic acid cleansers",
                    "Don't skip moisturizer",
                    "Use clay masks weekly",
                ],
            ),
            (
                SkinType::Dry,
                [
                    "Use cream-based cleansers",
                    "Apply moisturizer to damp skin",
                    "Consider using facial oils",
                    "Avoid hot water when washing",
                ],
            ),
            (
                SkinType::Combination,
                [
                    "Use different products for different areas",
                    "Focus on balance",
                    "Try gel-based moisturizers",
                    "Use mild cleansers",
                ],
            ),
            (
                SkinType::Normal,
                [
                    "Maintain current routine",
                    "Use sunscreen daily",
                    "Stay hydrated",
                    "Regular gentle exfoliation",
                ],
            ),
        ];
        for (skin_type, list) in &expected {
            assert_eq!(recommendations(*skin_type), list, "{skin_type}");
        }
    }
}
