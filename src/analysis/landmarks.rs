//! Face detections and landmark regions
//!
//! Points follow the 68-point facial landmark scheme used by face-api.js
//! (`faceLandmark68Net`):
//!
//! - 0-16: Jaw outline
//! - 17-21: Right eyebrow
//! - 22-26: Left eyebrow
//! - 27-35: Nose
//! - 36-47: Eyes
//! - 48-67: Lips

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;

/// Number of landmarks a full detection carries
pub const NUM_FACIAL_LANDMARKS: usize = 68;

/// Jaw outline point just below the right ear, sampled as cheek skin
pub const CHEEK_LANDMARK: usize = 1;

/// Bottom of the jaw outline
pub const CHIN_LANDMARK: usize = 8;

/// Inner end of the right eyebrow, sampled as forehead skin
pub const FOREHEAD_LANDMARK: usize = 20;

/// 2D point in frame pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Detector bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FaceBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One detected face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "box", default)]
    pub face_box: FaceBox,
    pub landmarks: Vec<Point>,
}

impl Detection {
    pub const fn new(face_box: FaceBox, landmarks: Vec<Point>) -> Self {
        Self {
            face_box,
            landmarks,
        }
    }

    /// Landmark at `index`, failing when the set is too short
    pub fn landmark(&self, index: usize) -> Result<Point, AnalysisError> {
        self.landmarks
            .get(index)
            .copied()
            .ok_or(AnalysisError::MissingLandmark {
                index,
                len: self.landmarks.len(),
            })
    }
}

/// Facial region a sample is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Forehead,
    Cheek,
    Chin,
}

impl Region {
    /// Sampling order
    pub const ALL: [Self; 3] = [Self::Forehead, Self::Cheek, Self::Chin];
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forehead => write!(f, "forehead"),
            Self::Cheek => write!(f, "cheek"),
            Self::Chin => write!(f, "chin"),
        }
    }
}

/// Landmark index sampled for each region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RegionMap {
    pub forehead: usize,
    pub cheek: usize,
    pub chin: usize,
}

impl RegionMap {
    pub const fn index(&self, region: Region) -> usize {
        match region {
            Region::Forehead => self.forehead,
            Region::Cheek => self.cheek,
            Region::Chin => self.chin,
        }
    }
}

impl Default for RegionMap {
    fn default() -> Self {
        Self {
            forehead: FOREHEAD_LANDMARK,
            cheek: CHEEK_LANDMARK,
            chin: CHIN_LANDMARK,
        }
    }
}
