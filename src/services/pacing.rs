//! Waiting between outbound batch requests.
//!
//! The matrix client pauses through a [`Pacer`] rather than calling the
//! timer directly, so tests can count pauses without sleeping.

use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub trait Pacer: Send + Sync {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Real wall-clock pacing on the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

/// Records requested pauses and returns immediately
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pauses: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pauses requested so far, in order
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses
            .lock()
            .map(|pauses| pauses.clone())
            .unwrap_or_default()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push(duration);
        }
        std::future::ready(())
    }
}
