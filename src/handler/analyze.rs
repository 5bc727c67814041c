//! Skin analysis endpoint
//!
//! The page posts the captured still (RGBA bytes from the canvas) together
//! with the faces its landmark detector found; the report comes back as JSON.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Deserialize;

use crate::analysis::{self, AnalysisError, AnalysisSettings, Detection, Frame, SuppliedDetections};
use crate::http;
use crate::logger;

/// Analysis route
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Request body of `POST /api/analyze`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub width: u32,
    pub height: u32,
    /// Flattened RGBA pixels, row-major
    pub data: Vec<u8>,
    /// Detector output for the still, in detector order
    #[serde(default)]
    pub faces: Vec<Detection>,
}

/// Run the analysis for a raw JSON body
pub async fn handle_analyze(
    body: &[u8],
    settings: &AnalysisSettings,
    enable_cors: bool,
) -> Response<Full<Bytes>> {
    let request: AnalyzeRequest = match serde_json::from_slice(body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_warning(&format!("Rejected analysis request: {e}"));
            return http::build_json_error(
                StatusCode::BAD_REQUEST,
                "invalid_json",
                &format!("Invalid JSON: {e}"),
                enable_cors,
            );
        }
    };

    match analyze_request(request, settings).await {
        Ok(report) => {
            logger::log_analysis(&report);
            http::build_json_response(StatusCode::OK, &report, enable_cors)
        }
        Err(e) => {
            logger::log_analysis_failed(&e);
            http::build_json_error(status_for(&e), e.kind(), &e.to_string(), enable_cors)
        }
    }
}

async fn analyze_request(
    request: AnalyzeRequest,
    settings: &AnalysisSettings,
) -> Result<analysis::SkinReport, AnalysisError> {
    let frame = Frame::new(request.width, request.height, request.data)?;
    let detector = SuppliedDetections::new(request.faces);
    analysis::analyze_still(&detector, &frame, settings).await
}

/// HTTP status for an analysis failure
pub const fn status_for(err: &AnalysisError) -> StatusCode {
    match err {
        AnalysisError::InvalidFrame { .. } => StatusCode::BAD_REQUEST,
        AnalysisError::NoFaceDetected
        | AnalysisError::MissingLandmark { .. }
        | AnalysisError::PointOutOfBounds { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        AnalysisError::Busy | AnalysisError::CaptureDisabled => StatusCode::CONFLICT,
        AnalysisError::CameraAccessDenied(_)
        | AnalysisError::NoFrameCaptured
        | AnalysisError::Detector(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
