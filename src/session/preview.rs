// Preview loop module
// Periodic face detection on the live feed, single-flight and cancellable

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::source::FrameSource;
use super::CaptureSession;
use crate::analysis::FaceDetector;
use crate::logger;

/// Live preview detection interval
pub const DEFAULT_PREVIEW_INTERVAL: Duration = Duration::from_millis(100);

/// Counters reported when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewStats {
    /// Detections that completed (with or without faces)
    pub detections: u64,
    /// Detections that returned an error
    pub failures: u64,
    /// Detections that found at least one face
    pub with_faces: u64,
}

/// Handle to a running preview loop
///
/// Dropping the handle cancels the loop.
pub struct PreviewLoop {
    cancel: Arc<Notify>,
    handle: Option<JoinHandle<PreviewStats>>,
    stats: Rc<Cell<PreviewStats>>,
}

impl PreviewLoop {
    /// Start the loop on the current `LocalSet`
    ///
    /// Each tick awaits its detection before the next one may start; ticks
    /// that come due meanwhile are skipped rather than queued, so at most one
    /// detection is ever in flight.
    pub fn spawn<D, S>(session: Arc<CaptureSession<D, S>>, interval: Duration) -> Self
    where
        D: FaceDetector + 'static,
        S: FrameSource + 'static,
    {
        let cancel = Arc::new(Notify::new());
        let stats = Rc::new(Cell::new(PreviewStats::default()));

        let loop_cancel = Arc::clone(&cancel);
        let loop_stats = Rc::clone(&stats);
        let handle = tokio::task::spawn_local(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    () = loop_cancel.notified() => break,
                    _ = ticker.tick() => {}
                }

                let result = tokio::select! {
                    () = loop_cancel.notified() => break,
                    result = session.preview_tick() => result,
                };

                let mut current = loop_stats.get();
                current.detections += 1;
                match result {
                    Ok(0) => {}
                    Ok(_) => current.with_faces += 1,
                    Err(e) => {
                        current.failures += 1;
                        logger::log_warning(&format!("Preview detection failed: {e}"));
                    }
                }
                loop_stats.set(current);
            }

            loop_stats.get()
        });

        Self {
            cancel,
            handle: Some(handle),
            stats,
        }
    }

    /// Counters so far
    pub fn stats(&self) -> PreviewStats {
        self.stats.get()
    }

    /// Cancel the loop and wait for it to wind down
    pub async fn stop(mut self) -> PreviewStats {
        self.cancel.notify_one();
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or_else(|e| {
                logger::log_error(&format!("Preview loop task failed: {e}"));
                self.stats.get()
            }),
            None => self.stats.get(),
        }
    }
}

impl Drop for PreviewLoop {
    fn drop(&mut self) {
        if self.handle.is_some() {
            self.cancel.notify_one();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::test_support::painted_frame;
    use crate::analysis::AnalysisSettings;
    use crate::session::test_support::ScriptedDetector;
    use crate::session::PushedFrameSource;
    use tokio::task::LocalSet;

    fn session(detector: ScriptedDetector) -> Arc<CaptureSession<ScriptedDetector, PushedFrameSource>> {
        let (frame, _) = painted_frame([200, 100, 100], [200, 100, 100], [200, 100, 100]);
        Arc::new(CaptureSession::new(
            detector,
            PushedFrameSource::with_frame(frame),
            AnalysisSettings::default(),
        ))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_enable_capture() {
        LocalSet::new()
            .run_until(async {
                let (_, face) = painted_frame([0, 0, 0], [0, 0, 0], [0, 0, 0]);
                let detector = ScriptedDetector::returning(vec![face]);
                let session = session(detector.clone());

                let preview = PreviewLoop::spawn(Arc::clone(&session), DEFAULT_PREVIEW_INTERVAL);
                tokio::time::sleep(Duration::from_millis(350)).await;
                assert!(session.state().capture_enabled());

                detector.set_faces(Vec::new());
                tokio::time::sleep(Duration::from_millis(200)).await;
                assert!(!session.state().capture_enabled());

                let stats = preview.stop().await;
                assert!(stats.detections >= 5);
                assert!(stats.with_faces >= 3);
                assert_eq!(stats.failures, 0);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_detector_never_overlaps() {
        LocalSet::new()
            .run_until(async {
                let detector = ScriptedDetector {
                    delay: Duration::from_millis(250),
                    ..ScriptedDetector::default()
                };
                let session = session(detector.clone());

                let preview = PreviewLoop::spawn(session, DEFAULT_PREVIEW_INTERVAL);
                tokio::time::sleep(Duration::from_millis(1_000)).await;
                let stats = preview.stop().await;

                assert_eq!(detector.max_in_flight.get(), 1);
                // 250ms detections at a 100ms interval: far fewer than 10 ticks ran
                assert!(detector.calls.get() <= 5);
                assert!(stats.detections <= 4);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_in_flight_detection() {
        LocalSet::new()
            .run_until(async {
                let detector = ScriptedDetector {
                    delay: Duration::from_secs(60),
                    ..ScriptedDetector::default()
                };
                let session = session(detector.clone());

                let preview = PreviewLoop::spawn(session, DEFAULT_PREVIEW_INTERVAL);
                tokio::time::sleep(Duration::from_millis(10)).await;
                assert_eq!(detector.calls.get(), 1);

                let stats = preview.stop().await;
                assert_eq!(stats.detections, 0);

                tokio::time::sleep(Duration::from_secs(1)).await;
                assert_eq!(detector.calls.get(), 1);
            })
            .await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_are_counted() {
        LocalSet::new()
            .run_until(async {
                let detector = ScriptedDetector::default();
                detector.fail.set(true);
                let session = session(detector);

                let preview = PreviewLoop::spawn(Arc::clone(&session), DEFAULT_PREVIEW_INTERVAL);
                tokio::time::sleep(Duration::from_millis(250)).await;
                assert!(preview.stats().failures >= 2);
                assert!(!session.state().capture_enabled());
                drop(preview);
            })
            .await;
    }
}
