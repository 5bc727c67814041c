//! Capture session module
//!
//! Drives the page flow outside the browser: a live preview that enables the
//! capture control while a face is visible, a still capture, and the analysis
//! of that still. Camera and detector are injected through traits.

pub mod preview;
pub mod source;
pub mod state;

pub use preview::{PreviewLoop, PreviewStats, DEFAULT_PREVIEW_INTERVAL};
pub use source::{FrameSource, PushedFrameSource};
pub use state::{AnalysisGuard, SessionState};

use crate::analysis::{self, AnalysisError, AnalysisSettings, FaceDetector, SkinReport};
use crate::logger;

/// One user's capture flow
pub struct CaptureSession<D, S> {
    detector: D,
    source: S,
    settings: AnalysisSettings,
    state: SessionState,
}

impl<D, S> CaptureSession<D, S>
where
    D: FaceDetector,
    S: FrameSource,
{
    pub fn new(detector: D, source: S, settings: AnalysisSettings) -> Self {
        Self {
            detector,
            source,
            settings,
            state: SessionState::new(),
        }
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Run detection on the live frame and toggle the capture control
    ///
    /// Returns the number of faces found. Any failure disables capture.
    pub async fn preview_tick(&self) -> Result<usize, AnalysisError> {
        let result = match self.source.current_frame() {
            Ok(frame) => self.detector.detect(&frame).await.map(|faces| faces.len()),
            Err(e) => Err(e),
        };
        self.state
            .set_capture_enabled(matches!(result, Ok(count) if count > 0));
        result
    }

    /// Copy the live frame into the still buffer
    ///
    /// Only allowed while the last preview tick saw a face.
    pub async fn capture(&self) -> Result<(), AnalysisError> {
        if !self.state.capture_enabled() {
            return Err(AnalysisError::CaptureDisabled);
        }
        let frame = self.source.current_frame()?;
        self.state.store_still(frame).await;
        Ok(())
    }

    /// Detect again on the still and analyse the first face
    ///
    /// The still is kept whatever the outcome so the user can retry.
    pub async fn analyze(&self) -> Result<SkinReport, AnalysisError> {
        let frame = self.state.still().await.ok_or(AnalysisError::NoFrameCaptured)?;
        let Some(_busy) = self.state.try_begin_analysis() else {
            return Err(AnalysisError::Busy);
        };

        let result = analysis::analyze_still(&self.detector, &frame, &self.settings).await;

        match &result {
            Ok(report) => logger::log_analysis(report),
            Err(e) => logger::log_analysis_failed(e),
        }
        result
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::cell::Cell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::analysis::{AnalysisError, Detection, FaceDetector, Frame};

    /// Detector returning a scripted face list, with an optional delay
    ///
    /// Tracks how many detections overlap so tests can check single-flight.
    #[derive(Clone, Default)]
    pub struct ScriptedDetector {
        pub faces: Rc<std::cell::RefCell<Vec<Detection>>>,
        pub delay: Duration,
        pub calls: Rc<Cell<usize>>,
        pub in_flight: Rc<Cell<usize>>,
        pub max_in_flight: Rc<Cell<usize>>,
        pub fail: Rc<Cell<bool>>,
    }

    impl ScriptedDetector {
        pub fn returning(faces: Vec<Detection>) -> Self {
            let detector = Self::default();
            *detector.faces.borrow_mut() = faces;
            detector
        }

        pub fn set_faces(&self, faces: Vec<Detection>) {
            *self.faces.borrow_mut() = faces;
        }
    }

    impl FaceDetector for ScriptedDetector {
        async fn detect(&self, _frame: &Frame) -> Result<Vec<Detection>, AnalysisError> {
            self.calls.set(self.calls.get() + 1);
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.in_flight.set(self.in_flight.get() - 1);
            if self.fail.get() {
                return Err(AnalysisError::Detector("model not loaded".to_string()));
            }
            Ok(self.faces.borrow().clone())
        }
    }
}
