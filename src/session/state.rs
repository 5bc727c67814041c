// Session state module
// Control flags and the captured still, shared between the preview loop and user actions

use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::analysis::Frame;

/// Capture session state
///
/// Flags are lock-free; the still frame sits behind an async lock because
/// analysis reads it across an await.
#[derive(Debug, Default)]
pub struct SessionState {
    capture_enabled: AtomicBool,
    analyze_enabled: AtomicBool,
    busy: AtomicBool,
    still: RwLock<Option<Frame>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the live preview currently shows at least one face
    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled.load(Ordering::Relaxed)
    }

    pub fn set_capture_enabled(&self, enabled: bool) {
        self.capture_enabled.store(enabled, Ordering::Relaxed);
    }

    /// Whether a still has been captured
    pub fn analyze_enabled(&self) -> bool {
        self.analyze_enabled.load(Ordering::Relaxed)
    }

    /// Whether an analysis is running (the page shows its loading indicator)
    pub fn busy(&self) -> bool {
        self.busy.load(Ordering::Relaxed)
    }

    /// Mark analysis started; `None` if one is already running
    ///
    /// The flag clears when the returned guard drops, including when the
    /// analysis future is dropped mid-await.
    pub fn try_begin_analysis(&self) -> Option<AnalysisGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| AnalysisGuard { busy: &self.busy })
    }

    /// Replace the still frame and enable analysis
    pub async fn store_still(&self, frame: Frame) {
        let mut still = self.still.write().await;
        *still = Some(frame);
        self.analyze_enabled.store(true, Ordering::Relaxed);
    }

    /// Copy of the current still frame
    pub async fn still(&self) -> Option<Frame> {
        self.still.read().await.clone()
    }
}

/// Holds the busy flag for one running analysis
#[must_use = "the analysis counts as finished once the guard drops"]
pub struct AnalysisGuard<'a> {
    busy: &'a AtomicBool,
}

impl Drop for AnalysisGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_still_enables_analysis() {
        let state = SessionState::new();
        assert!(!state.analyze_enabled());
        assert!(state.still().await.is_none());

        let frame = Frame::solid(2, 2, [1, 2, 3]).unwrap();
        state.store_still(frame.clone()).await;
        assert!(state.analyze_enabled());
        assert_eq!(state.still().await, Some(frame));
    }

    #[test]
    fn test_busy_guard() {
        let state = SessionState::new();
        let guard = state.try_begin_analysis();
        assert!(guard.is_some());
        assert!(state.try_begin_analysis().is_none());
        assert!(state.busy());
        drop(guard);
        assert!(!state.busy());
        assert!(state.try_begin_analysis().is_some());
        assert!(!state.busy());
    }
}
