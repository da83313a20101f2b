use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use anyhow::anyhow;

use crate::data::loader;
use crate::data::model::{MetricRecord, Observation};

// ---------------------------------------------------------------------------
// Background file loading
// ---------------------------------------------------------------------------

/// Which half of the dataset a file provides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Predictions,
    Metrics,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub kind: UploadKind,
    pub path: PathBuf,
    pub max_bytes: u64,
}

#[derive(Debug)]
pub enum UploadPayload {
    Observations(Vec<Observation>),
    Metrics(Vec<MetricRecord>),
}

/// Result of a finished load, paired with what was asked for.
#[derive(Debug)]
pub struct UploadOutcome {
    pub request: UploadRequest,
    pub result: anyhow::Result<UploadPayload>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("a load of {} is already in progress", .0.display())]
    InFlight(PathBuf),
    #[error("failed to start loader thread: {0}")]
    Spawn(#[from] std::io::Error),
}

impl UploadRequest {
    fn run(&self) -> anyhow::Result<UploadPayload> {
        match self.kind {
            UploadKind::Predictions => {
                loader::load_observations(&self.path, self.max_bytes).map(UploadPayload::Observations)
            }
            UploadKind::Metrics => {
                loader::load_metrics(&self.path, self.max_bytes).map(UploadPayload::Metrics)
            }
        }
    }
}

struct Pending {
    request: UploadRequest,
    rx: Receiver<UploadOutcome>,
}

/// Runs at most one load at a time on a worker thread.
#[derive(Default)]
pub struct UploadTracker {
    pending: Option<Pending>,
}

impl UploadTracker {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_path(&self) -> Option<&Path> {
        self.pending.as_ref().map(|p| p.request.path.as_path())
    }

    /// Start loading `request` in the background. Refused while another
    /// load has not been collected by [`poll`](Self::poll) yet.
    pub fn start(&mut self, request: UploadRequest) -> Result<(), UploadError> {
        if let Some(p) = &self.pending {
            return Err(UploadError::InFlight(p.request.path.clone()));
        }

        let (tx, rx) = mpsc::channel();
        let job = request.clone();
        thread::Builder::new()
            .name("dataset-loader".into())
            .spawn(move || {
                let result = job.run();
                // The receiver is gone only if the app is shutting down.
                let _ = tx.send(UploadOutcome {
                    request: job,
                    result,
                });
            })?;

        log::info!("Loading {:?} from {}", request.kind, request.path.display());
        self.pending = Some(Pending { request, rx });
        Ok(())
    }

    /// Collect a finished load, if any. Non-blocking; call once per frame.
    pub fn poll(&mut self) -> Option<UploadOutcome> {
        let pending = self.pending.as_ref()?;
        let outcome = match pending.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => UploadOutcome {
                request: pending.request.clone(),
                result: Err(anyhow!("loader thread exited without a result")),
            },
        };
        self.pending = None;
        Some(outcome)
    }
}
