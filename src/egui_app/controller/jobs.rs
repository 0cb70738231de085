use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::Instant;

use tracing::warn;

use crate::api::{ApiError, GenerateResponse, QuizBackend};
use crate::export::{self, ExportError};
use crate::quiz::{GenerationConfig, Problem, SystemStatus};
use crate::store::RequestSeq;

/// Why a background export did not produce a file.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ExportJobError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Write(#[from] ExportError),
}

pub(crate) enum JobMessage {
    Generated {
        seq: RequestSeq,
        result: Result<GenerateResponse, ApiError>,
    },
    ProblemsFetched {
        seq: RequestSeq,
        result: Result<Vec<Problem>, ApiError>,
    },
    StatusPolled {
        seq: RequestSeq,
        result: Result<SystemStatus, ApiError>,
    },
    Exported {
        seq: RequestSeq,
        path: PathBuf,
        result: Result<u64, ExportJobError>,
    },
}

/// Worker threads and the channel they report back on.
pub(crate) struct ControllerJobs {
    backend: Arc<dyn QuizBackend>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    pub(super) status_poll_in_flight: bool,
    pub(super) last_status_poll: Option<Instant>,
}

impl ControllerJobs {
    pub(super) fn new(backend: Arc<dyn QuizBackend>) -> Self {
        let (message_tx, message_rx) = mpsc::channel();
        Self {
            backend,
            message_tx,
            message_rx,
            status_poll_in_flight: false,
            last_status_poll: None,
        }
    }

    pub(super) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(super) fn spawn_generate(&self, seq: RequestSeq, config: GenerationConfig) {
        self.spawn(move |backend| JobMessage::Generated {
            seq,
            result: backend.generate_problems(&config),
        });
    }

    pub(super) fn spawn_fetch(&self, seq: RequestSeq) {
        self.spawn(move |backend| JobMessage::ProblemsFetched {
            seq,
            result: backend.get_problems(),
        });
    }

    pub(super) fn spawn_status_poll(&mut self, seq: RequestSeq, now: Instant) {
        self.status_poll_in_flight = true;
        self.last_status_poll = Some(now);
        self.spawn(move |backend| JobMessage::StatusPolled {
            seq,
            result: backend.get_status(),
        });
    }

    pub(super) fn spawn_export(&self, seq: RequestSeq, problems: Vec<Problem>, path: PathBuf) {
        self.spawn(move |backend| {
            let result = backend
                .export_html(&problems)
                .map_err(ExportJobError::from)
                .and_then(|quiz| export::write_export(&path, &quiz.html).map_err(Into::into));
            JobMessage::Exported { seq, path, result }
        });
    }

    fn spawn<F>(&self, job: F)
    where
        F: FnOnce(&dyn QuizBackend) -> JobMessage + Send + 'static,
    {
        let backend = Arc::clone(&self.backend);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            if tx.send(job(backend.as_ref())).is_err() {
                warn!("controller dropped before background job finished");
            }
        });
    }
}
