//! Owns the quiz store and UI state and runs backend requests off the UI thread.

mod jobs;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use rfd::FileDialog;
use tracing::{debug, info, warn};

use crate::api::{ApiError, GenerateResponse, QuizBackend};
use crate::config::{self, AppConfig, ConfigError};
use crate::egui_app::state::{Notice, StatusTone, UiState};
use crate::export;
use crate::quiz::{OptionLabel, Problem};
use crate::store::{Action, Dispatch, QuizStore, RequestSeq};
use jobs::{ControllerJobs, JobMessage};

pub struct EguiController {
    pub ui: UiState,
    store: QuizStore,
    config: AppConfig,
    jobs: ControllerJobs,
}

impl EguiController {
    pub fn new(config: AppConfig, backend: Arc<dyn QuizBackend>) -> Self {
        Self {
            ui: UiState::from_config(&config),
            store: QuizStore::new(),
            config,
            jobs: ControllerJobs::new(backend),
        }
    }

    pub fn store(&self) -> &QuizStore {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Start a generate request from the current form values.
    pub fn generate(&mut self) {
        if self.store.is_loading() {
            self.set_status("A request is already running", StatusTone::Warning);
            return;
        }
        let request = match self.ui.form.to_config() {
            Ok(request) => request,
            Err(err) => {
                self.set_status(err.to_string(), StatusTone::Warning);
                return;
            }
        };
        let seq = self.store.next_seq();
        self.store.dispatch(Action::StartGenerate { seq });
        self.ui.viewer.reset();
        self.jobs.last_status_poll = None;
        self.set_status(
            format!(
                "Generating {} problem(s): {}",
                request.num_problems,
                request.category.label()
            ),
            StatusTone::Busy,
        );
        self.jobs.spawn_generate(seq, request);
    }

    /// Reload the backend's most recent batch.
    pub fn fetch_latest(&mut self) {
        if self.store.is_loading() {
            self.set_status("A request is already running", StatusTone::Warning);
            return;
        }
        let seq = self.store.next_seq();
        self.store.dispatch(Action::StartFetch { seq });
        self.set_status("Loading latest problems", StatusTone::Busy);
        self.jobs.spawn_fetch(seq);
    }

    /// Abandon the in-flight request; its response is dropped on arrival.
    pub fn cancel_generate(&mut self) {
        if self.store.dispatch(Action::CancelGenerate) == Dispatch::Applied {
            info!("generation cancelled by user");
            self.set_status("Request cancelled", StatusTone::Warning);
        }
    }

    /// Ask for a destination, then export.
    pub fn request_export_via_dialog(&mut self) {
        if !self.guard_export() {
            return;
        }
        let mut dialog = FileDialog::new()
            .set_title("Export quiz")
            .set_file_name(&self.config.export.file_name)
            .add_filter("HTML", &["html", "htm"]);
        match export::default_destination(&self.config.export) {
            Ok(default) => {
                if let Some(dir) = default.parent() {
                    dialog = dialog.set_directory(dir);
                }
            }
            Err(err) => debug!(error = %err, "no default export folder"),
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.export_to(path);
    }

    /// Export the current problems to `path`.
    ///
    /// With no problems this raises a notice and sends nothing.
    pub fn export_to(&mut self, path: PathBuf) {
        if !self.guard_export() {
            return;
        }
        let seq = self.store.next_seq();
        self.store.dispatch(Action::StartExport { seq });
        self.set_status(
            format!("Exporting quiz to {}", path.display()),
            StatusTone::Busy,
        );
        self.jobs
            .spawn_export(seq, self.store.problems().to_vec(), path);
    }

    /// Whether the export control should accept clicks.
    pub fn export_enabled(&self) -> bool {
        !self.store.is_exporting() && self.store.can_export()
    }

    fn guard_export(&mut self) -> bool {
        if self.store.can_export() {
            return true;
        }
        self.ui.notice = Some(Notice::new(
            "Nothing to export",
            "Generate problems before exporting a quiz.",
        ));
        self.set_status("No problems to export", StatusTone::Warning);
        false
    }

    pub fn open_last_export(&mut self) {
        let Some(path) = self.store.last_export_path().cloned() else {
            return;
        };
        if let Err(err) = open::that(&path) {
            self.set_status(
                format!("Could not open {}: {err}", path.display()),
                StatusTone::Warning,
            );
        }
    }

    pub fn select_answer(&mut self, problem_id: &str, label: OptionLabel) {
        self.ui.viewer.select(problem_id, label);
    }

    pub fn toggle_reveal(&mut self, problem_id: &str) {
        self.ui.viewer.toggle_reveal(problem_id);
    }

    pub fn set_review_mode(&mut self, enabled: bool) {
        self.ui.viewer.review_mode = enabled;
    }

    pub fn dismiss_notice(&mut self) {
        self.ui.notice = None;
    }

    pub fn dismiss_error(&mut self) {
        self.store.dispatch(Action::DismissError);
    }

    pub fn has_pending_work(&self) -> bool {
        self.store.is_loading() || self.store.is_exporting()
    }

    /// Drain finished background jobs; returns how many were handled.
    pub fn poll_background_jobs(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(message) = self.jobs.try_recv_message() {
            handled += 1;
            match message {
                JobMessage::Generated { seq, result } => self.apply_generated(seq, result),
                JobMessage::ProblemsFetched { seq, result } => self.apply_fetched(seq, result),
                JobMessage::StatusPolled { seq, result } => {
                    self.jobs.status_poll_in_flight = false;
                    match result {
                        Ok(status) => {
                            self.store.dispatch(Action::AgentsPolled {
                                seq,
                                agents: status.agents,
                            });
                        }
                        Err(err) => debug!(error = %err, "status poll failed"),
                    }
                }
                JobMessage::Exported { seq, path, result } => {
                    self.apply_exported(seq, path, result)
                }
            }
        }
        handled
    }

    /// Poll `/api/status` while a generate is running, one request at a time.
    pub fn maybe_poll_status(&mut self, now: Instant) {
        let Some(interval) = self.config.backend.status_poll_interval() else {
            return;
        };
        let Some(pending) = self.store.pending_load() else {
            return;
        };
        if !self.store.is_generating() || self.jobs.status_poll_in_flight {
            return;
        }
        let due = self
            .jobs
            .last_status_poll
            .is_none_or(|last| now.duration_since(last) >= interval);
        if due {
            self.jobs.spawn_status_poll(pending.seq, now);
        }
    }

    /// Save the form as the next launch's defaults when it changed.
    pub fn persist_form_defaults(&mut self) -> Result<bool, ConfigError> {
        let mut updated = self.config.clone();
        self.ui.form.store_defaults(&mut updated.generation);
        if updated == self.config {
            return Ok(false);
        }
        config::save(&updated)?;
        self.config = updated;
        Ok(true)
    }

    fn apply_generated(&mut self, seq: RequestSeq, result: Result<GenerateResponse, ApiError>) {
        match result {
            Ok(response) => {
                let count = response.problems.len();
                let valid = response.stats.as_ref().map(|stats| stats.total_valid);
                let outcome = self.store.dispatch(Action::GenerateSucceeded {
                    seq,
                    problems: response.problems,
                    stats: response.stats,
                });
                if outcome == Dispatch::Applied {
                    info!(count, "generation finished");
                    let text = match valid {
                        Some(valid) => format!("Generated {count} problem(s), {valid} valid"),
                        None => format!("Generated {count} problem(s)"),
                    };
                    self.set_status(text, StatusTone::Info);
                }
            }
            Err(err) => {
                let message = format!("Generation failed: {err}");
                if self.store.dispatch(Action::GenerateFailed {
                    seq,
                    message: message.clone(),
                }) == Dispatch::Applied
                {
                    warn!(error = %err, "generation failed");
                    if self.config.ui.alert_on_generate_error {
                        self.ui.notice = Some(Notice::new("Generation failed", err.to_string()));
                    }
                    self.set_status(message, StatusTone::Error);
                }
            }
        }
    }

    fn apply_fetched(&mut self, seq: RequestSeq, result: Result<Vec<Problem>, ApiError>) {
        match result {
            Ok(problems) => {
                let count = problems.len();
                if self.store.dispatch(Action::ProblemsLoaded { seq, problems }) == Dispatch::Applied
                {
                    self.ui.viewer.reset();
                    self.set_status(format!("Loaded {count} problem(s)"), StatusTone::Info);
                }
            }
            Err(err) => {
                let message = format!("Could not load problems: {err}");
                if self.store.dispatch(Action::GenerateFailed {
                    seq,
                    message: message.clone(),
                }) == Dispatch::Applied
                {
                    self.set_status(message, StatusTone::Error);
                }
            }
        }
    }

    fn apply_exported(
        &mut self,
        seq: RequestSeq,
        path: PathBuf,
        result: Result<u64, jobs::ExportJobError>,
    ) {
        match result {
            Ok(bytes) => {
                if self.store.dispatch(Action::ExportSucceeded {
                    seq,
                    path: path.clone(),
                }) == Dispatch::Stale
                {
                    return;
                }
                self.set_status(
                    format!("Exported quiz to {} ({bytes} bytes)", path.display()),
                    StatusTone::Info,
                );
                if self.config.export.open_after_export {
                    self.open_last_export();
                }
            }
            Err(err) => {
                let message = format!("Export failed: {err}");
                if self.store.dispatch(Action::ExportFailed {
                    seq,
                    message: message.clone(),
                }) == Dispatch::Stale
                {
                    return;
                }
                warn!(error = %err, path = %path.display(), "export failed");
                self.ui.notice = Some(Notice::new("Export failed", err.to_string()));
                self.set_status(message, StatusTone::Error);
            }
        }
    }

    fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status.set(text, tone);
    }
}
