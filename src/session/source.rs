// Frame source module
// Abstracts the live camera stream the session copies stills from

use std::sync::Mutex;

use crate::analysis::{AnalysisError, Frame};

/// Live video feed
pub trait FrameSource {
    /// The frame currently on screen; `CameraAccessDenied` if the stream never opened
    fn current_frame(&self) -> Result<Frame, AnalysisError>;
}

/// Source that replays whatever frame was last pushed into it
///
/// Stands in for a camera when frames arrive from outside (uploads, tests).
#[derive(Debug, Default)]
pub struct PushedFrameSource {
    frame: Mutex<Option<Frame>>,
}

impl PushedFrameSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_frame(frame: Frame) -> Self {
        Self {
            frame: Mutex::new(Some(frame)),
        }
    }

    pub fn push(&self, frame: Frame) {
        if let Ok(mut current) = self.frame.lock() {
            *current = Some(frame);
        }
    }
}

impl FrameSource for PushedFrameSource {
    fn current_frame(&self) -> Result<Frame, AnalysisError> {
        self.frame
            .lock()
            .ok()
            .and_then(|frame| frame.clone())
            .ok_or_else(|| AnalysisError::CameraAccessDenied("no frame available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_source_denies() {
        let source = PushedFrameSource::new();
        assert_eq!(source.current_frame().unwrap_err().kind(), "camera_access_denied");
    }

    #[test]
    fn test_push_replaces_frame() {
        let source = PushedFrameSource::with_frame(Frame::solid(1, 1, [0, 0, 0]).unwrap());
        let next = Frame::solid(1, 1, [9, 9, 9]).unwrap();
        source.push(next.clone());
        assert_eq!(source.current_frame().unwrap(), next);
    }
}
