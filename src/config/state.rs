// Application state module
// Read-only state shared by every connection task

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;

use super::types::Config;
use crate::analysis::AnalysisSettings;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Analysis tunables resolved once from `config.analysis`
    pub analysis: AnalysisSettings,
    /// Fired once when the process should stop accepting connections
    pub shutdown_signal: Arc<Notify>,
    pub shutdown_requested: AtomicBool,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            analysis: config.analysis.settings(),
            shutdown_signal: Arc::new(Notify::new()),
            shutdown_requested: AtomicBool::new(false),
        }
    }

    /// Ask the accept loop to stop
    pub fn request_shutdown(&self) {
        if !self.shutdown_requested.swap(true, Ordering::SeqCst) {
            self.shutdown_signal.notify_one();
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }
}
