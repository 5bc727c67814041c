//! Skin-type classification

use serde::Serialize;

use super::sample::SkinMetrics;

/// Redness above this reads as sensitive skin
pub const SENSITIVE_REDNESS: f64 = 0.6;
/// Oiliness above this reads as oily skin
pub const OILY_OILINESS: f64 = 0.5;
/// Brightness below this reads as dry skin
pub const DRY_BRIGHTNESS: f64 = 0.4;
/// Centre of the combination band
pub const COMBINATION_CENTER: f64 = 0.5;
/// Half-width of the combination band
pub const COMBINATION_BAND: f64 = 0.1;

/// Final classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SkinType {
    Sensitive,
    Oily,
    Dry,
    Combination,
    Normal,
}

impl SkinType {
    pub const ALL: [Self; 5] = [
        Self::Sensitive,
        Self::Oily,
        Self::Dry,
        Self::Combination,
        Self::Normal,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sensitive => "Sensitive",
            Self::Oily => "Oily",
            Self::Dry => "Dry",
            Self::Combination => "Combination",
            Self::Normal => "Normal",
        }
    }
}

impl std::fmt::Display for SkinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify averaged metrics; the first matching rule wins.
///
/// Oiliness in (0.4, 0.5] satisfies both the oily band check and the
/// combination band; rule order decides, and 0.5 exactly is not oily.
pub fn classify(metrics: &SkinMetrics) -> SkinType {
    if metrics.redness > SENSITIVE_REDNESS {
        SkinType::Sensitive
    } else if metrics.oiliness > OILY_OILINESS {
        SkinType::Oily
    } else if metrics.brightness < DRY_BRIGHTNESS {
        SkinType::Dry
    } else if (metrics.oiliness - COMBINATION_CENTER).abs() < COMBINATION_BAND {
        SkinType::Combination
    } else {
        SkinType::Normal
    }
}
