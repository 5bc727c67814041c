//! Per-pixel skin metrics and their three-region mean

use serde::Serialize;

use super::error::AnalysisError;
use super::frame::{BoundsPolicy, Frame};
use super::landmarks::Point;

/// Brightness/redness/oiliness triple taken at one pixel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RegionSample {
    /// `(R+G+B) / (3*255)`, in [0, 1]
    pub brightness: f64,
    /// `R / (G+B+1)`, unbounded above
    pub redness: f64,
    /// `G / (R+B+1)`, unbounded above
    pub oiliness: f64,
}

impl RegionSample {
    /// Metrics for one RGB triple. The `+1` keeps both ratios finite at black.
    pub fn from_rgb([r, g, b]: [u8; 3]) -> Self {
        let (r, g, b) = (f64::from(r), f64::from(g), f64::from(b));
        Self {
            brightness: (r + g + b) / (3.0 * 255.0),
            redness: r / (g + b + 1.0),
            oiliness: g / (r + b + 1.0),
        }
    }

    /// Metrics of the pixel under `point`
    pub fn at(frame: &Frame, point: Point, policy: BoundsPolicy) -> Result<Self, AnalysisError> {
        frame.rgb_at(point, policy).map(Self::from_rgb)
    }
}

/// Averaged metrics over the forehead, cheek and chin samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkinMetrics {
    pub brightness: f64,
    pub redness: f64,
    pub oiliness: f64,
}

impl SkinMetrics {
    pub const fn new(brightness: f64, redness: f64, oiliness: f64) -> Self {
        Self {
            brightness,
            redness,
            oiliness,
        }
    }

    /// Unweighted mean of exactly three region samples
    pub fn mean(samples: &[RegionSample; 3]) -> Self {
        let [a, b, c] = samples;
        Self {
            brightness: (a.brightness + b.brightness + c.brightness) / 3.0,
            redness: (a.redness + b.redness + c.redness) / 3.0,
            oiliness: (a.oiliness + b.oiliness + c.oiliness) / 3.0,
        }
    }
}
