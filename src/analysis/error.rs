//! Analysis error types
//!
//! One enum covers the whole capture → detect → sample chain so the HTTP layer
//! and the capture session report failures the same way.

use thiserror::Error;

/// Errors raised while capturing or analysing a frame
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// The frame source could not deliver a frame (camera permission refused or device missing)
    #[error("camera access denied: {0}")]
    CameraAccessDenied(String),

    /// Detection ran on the still frame and returned zero faces
    #[error("no face detected in the captured image")]
    NoFaceDetected,

    /// Capture was requested while the live preview shows no face
    #[error("capture is disabled until a face is visible")]
    CaptureDisabled,

    /// Analyze was requested before any still frame was captured
    #[error("no frame has been captured yet")]
    NoFrameCaptured,

    /// Analyze was requested while a previous analysis is still running
    #[error("an analysis is already running")]
    Busy,

    /// The external face detector failed
    #[error("face detector failed: {0}")]
    Detector(String),

    /// RGBA buffer length does not match the declared dimensions
    #[error("invalid frame: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidFrame {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Landmark set too short for a configured region index
    #[error("landmark {index} missing (face has {len} landmarks)")]
    MissingLandmark { index: usize, len: usize },

    /// Sample point outside the frame under the `reject` bounds policy
    #[error("point ({x}, {y}) lies outside the {width}x{height} frame")]
    PointOutOfBounds {
        x: f64,
        y: f64,
        width: u32,
        height: u32,
    },
}

impl AnalysisError {
    /// Stable machine-readable name, used in API error bodies
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CameraAccessDenied(_) => "camera_access_denied",
            Self::NoFaceDetected => "no_face_detected",
            Self::CaptureDisabled => "capture_disabled",
            Self::NoFrameCaptured => "no_frame_captured",
            Self::Busy => "busy",
            Self::Detector(_) => "detector_failed",
            Self::InvalidFrame { .. } => "invalid_frame",
            Self::MissingLandmark { .. } => "missing_landmark",
            Self::PointOutOfBounds { .. } => "point_out_of_bounds",
        }
    }
}
