//! Face detector seam
//!
//! Detection itself belongs to an external landmark model (face-api.js in the
//! browser). The crate only consumes its contract: given a frame, return the
//! detected faces in the detector's own order.

use std::future::Future;

use super::error::AnalysisError;
use super::frame::Frame;
use super::landmarks::Detection;

/// External face landmark detector
pub trait FaceDetector {
    /// All faces found in `frame`, in detector output order
    fn detect(&self, frame: &Frame)
        -> impl Future<Output = Result<Vec<Detection>, AnalysisError>>;
}

/// Detections computed elsewhere and handed over with the frame
///
/// The browser runs the landmark model and posts its output together with the
/// captured pixels; this replays those faces for any frame it is asked about.
#[derive(Debug, Clone, Default)]
pub struct SuppliedDetections {
    faces: Vec<Detection>,
}

impl SuppliedDetections {
    pub const fn new(faces: Vec<Detection>) -> Self {
        Self { faces }
    }
}

impl FaceDetector for SuppliedDetections {
    async fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, AnalysisError> {
        Ok(self.faces.clone())
    }
}
