//! Single source of truth for quiz data and in-flight requests.
//!
//! The controller allocates a sequence number for every request it starts and
//! tags the completion with it. Completions whose number no longer matches the
//! pending request are dropped, so a slow or cancelled response can never
//! overwrite newer state.

use std::path::PathBuf;

use tracing::debug;

use crate::quiz::{AgentStatus, Problem, Stats};

/// Identifies one backend request.
pub type RequestSeq = u64;

/// What the pending problem request will produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    /// `POST /api/generate`.
    Generate,
    /// `GET /api/problems`.
    Fetch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingLoad {
    pub seq: RequestSeq,
    pub kind: LoadKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    StartGenerate {
        seq: RequestSeq,
    },
    GenerateSucceeded {
        seq: RequestSeq,
        problems: Vec<Problem>,
        stats: Option<Stats>,
    },
    GenerateFailed {
        seq: RequestSeq,
        message: String,
    },
    StartFetch {
        seq: RequestSeq,
    },
    ProblemsLoaded {
        seq: RequestSeq,
        problems: Vec<Problem>,
    },
    AgentsPolled {
        seq: RequestSeq,
        agents: Vec<AgentStatus>,
    },
    CancelGenerate,
    StartExport {
        seq: RequestSeq,
    },
    ExportSucceeded {
        seq: RequestSeq,
        path: PathBuf,
    },
    ExportFailed {
        seq: RequestSeq,
        message: String,
    },
    DismissError,
}

/// Outcome of [`QuizStore::dispatch`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    /// The action referred to a request that is no longer pending.
    Stale,
}

#[derive(Debug)]
pub struct QuizStore {
    next_seq: RequestSeq,
    pending_load: Option<PendingLoad>,
    pending_export: Option<RequestSeq>,
    problems: Vec<Problem>,
    stats: Option<Stats>,
    agents: Vec<AgentStatus>,
    error: Option<String>,
    export_error: Option<String>,
    last_export_path: Option<PathBuf>,
}

impl Default for QuizStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizStore {
    pub fn new() -> Self {
        Self {
            next_seq: 1,
            pending_load: None,
            pending_export: None,
            problems: Vec::new(),
            stats: None,
            agents: Vec::new(),
            error: None,
            export_error: None,
            last_export_path: None,
        }
    }

    /// Allocate the number for the next request.
    pub fn next_seq(&mut self) -> RequestSeq {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1).max(1);
        seq
    }

    pub fn dispatch(&mut self, action: Action) -> Dispatch {
        let outcome = self.apply(action);
        if outcome == Dispatch::Stale {
            debug!("discarded stale store action");
        }
        outcome
    }

    fn apply(&mut self, action: Action) -> Dispatch {
        match action {
            Action::StartGenerate { seq } => {
                self.pending_load = Some(PendingLoad {
                    seq,
                    kind: LoadKind::Generate,
                });
                self.problems.clear();
                self.stats = None;
                self.agents.clear();
                self.error = None;
                Dispatch::Applied
            }
            Action::StartFetch { seq } => {
                self.pending_load = Some(PendingLoad {
                    seq,
                    kind: LoadKind::Fetch,
                });
                self.error = None;
                Dispatch::Applied
            }
            Action::GenerateSucceeded {
                seq,
                problems,
                stats,
            } => {
                if !self.take_load(seq) {
                    return Dispatch::Stale;
                }
                self.problems = problems;
                self.stats = stats;
                self.agents.clear();
                Dispatch::Applied
            }
            Action::ProblemsLoaded { seq, problems } => {
                if !self.take_load(seq) {
                    return Dispatch::Stale;
                }
                self.problems = problems;
                Dispatch::Applied
            }
            Action::GenerateFailed { seq, message } => {
                let Some(pending) = self.pending_load.filter(|pending| pending.seq == seq) else {
                    return Dispatch::Stale;
                };
                self.pending_load = None;
                if pending.kind == LoadKind::Generate {
                    self.problems.clear();
                    self.stats = None;
                }
                self.agents.clear();
                self.error = Some(message);
                Dispatch::Applied
            }
            Action::AgentsPolled { seq, agents } => {
                if self.pending_load.map(|pending| pending.seq) != Some(seq) {
                    return Dispatch::Stale;
                }
                self.agents = agents;
                Dispatch::Applied
            }
            Action::CancelGenerate => {
                if self.pending_load.take().is_none() {
                    return Dispatch::Stale;
                }
                self.agents.clear();
                Dispatch::Applied
            }
            Action::StartExport { seq } => {
                self.pending_export = Some(seq);
                self.export_error = None;
                Dispatch::Applied
            }
            Action::ExportSucceeded { seq, path } => {
                if !self.take_export(seq) {
                    return Dispatch::Stale;
                }
                self.last_export_path = Some(path);
                Dispatch::Applied
            }
            Action::ExportFailed { seq, message } => {
                if !self.take_export(seq) {
                    return Dispatch::Stale;
                }
                self.export_error = Some(message);
                Dispatch::Applied
            }
            Action::DismissError => {
                self.error = None;
                self.export_error = None;
                Dispatch::Applied
            }
        }
    }

    fn take_load(&mut self, seq: RequestSeq) -> bool {
        if self.pending_load.is_some_and(|pending| pending.seq == seq) {
            self.pending_load = None;
            true
        } else {
            false
        }
    }

    fn take_export(&mut self, seq: RequestSeq) -> bool {
        if self.pending_export == Some(seq) {
            self.pending_export = None;
            true
        } else {
            false
        }
    }

    pub fn pending_load(&self) -> Option<PendingLoad> {
        self.pending_load
    }

    pub fn is_loading(&self) -> bool {
        self.pending_load.is_some()
    }

    pub fn is_generating(&self) -> bool {
        self.pending_load
            .is_some_and(|pending| pending.kind == LoadKind::Generate)
    }

    pub fn is_exporting(&self) -> bool {
        self.pending_export.is_some()
    }

    pub fn can_export(&self) -> bool {
        !self.problems.is_empty()
    }

    pub fn problems(&self) -> &[Problem] {
        &self.problems
    }

    pub fn stats(&self) -> Option<&Stats> {
        self.stats.as_ref()
    }

    pub fn agents(&self) -> &[AgentStatus] {
        &self.agents
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn export_error(&self) -> Option<&str> {
        self.export_error.as_deref()
    }

    pub fn last_export_path(&self) -> Option<&PathBuf> {
        self.last_export_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn problem(id: &str) -> Problem {
        Problem {
            id: id.to_string(),
            ..Problem::default()
        }
    }

    fn stats(total: u32) -> Stats {
        Stats {
            total_generated: total,
            ..Stats::default()
        }
    }

    #[test]
    fn sequence_numbers_increase() {
        let mut store = QuizStore::new();
        let first = store.next_seq();
        let second = store.next_seq();
        assert!(second > first);
    }

    #[test]
    fn generate_success_populates_problems_and_stats() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        assert!(store.is_generating());
        let outcome = store.dispatch(Action::GenerateSucceeded {
            seq,
            problems: vec![problem("P1")],
            stats: Some(stats(1)),
        });
        assert_eq!(outcome, Dispatch::Applied);
        assert!(!store.is_loading());
        assert_eq!(store.problems().len(), 1);
        assert_eq!(store.stats().map(|s| s.total_generated), Some(1));
        assert!(store.can_export());
    }

    #[test]
    fn start_generate_clears_previous_results() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        store.dispatch(Action::GenerateSucceeded {
            seq,
            problems: vec![problem("P1")],
            stats: Some(stats(1)),
        });
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        assert!(store.problems().is_empty());
        assert!(store.stats().is_none());
        assert!(!store.can_export());
    }

    #[test]
    fn generate_failure_leaves_problems_empty_and_stats_unset() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        store.dispatch(Action::GenerateFailed {
            seq,
            message: "HTTP 500".into(),
        });
        assert!(store.problems().is_empty());
        assert!(store.stats().is_none());
        assert_eq!(store.error(), Some("HTTP 500"));
        assert!(!store.is_loading());
    }

    #[test]
    fn superseded_response_is_stale() {
        let mut store = QuizStore::new();
        let old = store.next_seq();
        store.dispatch(Action::StartGenerate { seq: old });
        let new = store.next_seq();
        store.dispatch(Action::StartGenerate { seq: new });
        let outcome = store.dispatch(Action::GenerateSucceeded {
            seq: old,
            problems: vec![problem("old")],
            stats: Some(stats(9)),
        });
        assert_eq!(outcome, Dispatch::Stale);
        assert!(store.problems().is_empty());
        assert!(store.is_loading());
        store.dispatch(Action::GenerateSucceeded {
            seq: new,
            problems: vec![problem("new")],
            stats: None,
        });
        assert_eq!(store.problems()[0].id, "new");
    }

    #[test]
    fn cancelled_generate_ignores_late_response() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        assert_eq!(store.dispatch(Action::CancelGenerate), Dispatch::Applied);
        assert!(!store.is_loading());
        let late = store.dispatch(Action::GenerateFailed {
            seq,
            message: "timeout".into(),
        });
        assert_eq!(late, Dispatch::Stale);
        assert!(store.error().is_none());
        assert_eq!(store.dispatch(Action::CancelGenerate), Dispatch::Stale);
    }

    #[test]
    fn agent_polls_apply_only_to_pending_load() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        let agents = vec![AgentStatus {
            name: "Generator".into(),
            ..AgentStatus::default()
        }];
        assert_eq!(
            store.dispatch(Action::AgentsPolled {
                seq,
                agents: agents.clone()
            }),
            Dispatch::Applied
        );
        assert_eq!(store.agents().len(), 1);
        store.dispatch(Action::GenerateSucceeded {
            seq,
            problems: Vec::new(),
            stats: None,
        });
        assert!(store.agents().is_empty());
        assert_eq!(
            store.dispatch(Action::AgentsPolled { seq, agents }),
            Dispatch::Stale
        );
    }

    #[test]
    fn failed_fetch_keeps_existing_problems() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartGenerate { seq });
        store.dispatch(Action::GenerateSucceeded {
            seq,
            problems: vec![problem("P1")],
            stats: Some(stats(1)),
        });
        let seq = store.next_seq();
        store.dispatch(Action::StartFetch { seq });
        assert!(store.is_loading());
        assert!(!store.is_generating());
        store.dispatch(Action::GenerateFailed {
            seq,
            message: "offline".into(),
        });
        assert_eq!(store.problems().len(), 1);
        assert!(store.stats().is_some());
        assert_eq!(store.error(), Some("offline"));
    }

    #[test]
    fn export_lifecycle_tracks_path_and_errors() {
        let mut store = QuizStore::new();
        let seq = store.next_seq();
        store.dispatch(Action::StartExport { seq });
        assert!(store.is_exporting());
        store.dispatch(Action::ExportFailed {
            seq,
            message: "disk full".into(),
        });
        assert_eq!(store.export_error(), Some("disk full"));
        let seq = store.next_seq();
        store.dispatch(Action::StartExport { seq });
        assert!(store.export_error().is_none());
        store.dispatch(Action::ExportSucceeded {
            seq,
            path: PathBuf::from("quiz.html"),
        });
        assert_eq!(store.last_export_path(), Some(&PathBuf::from("quiz.html")));
        assert!(!store.is_exporting());
        assert_eq!(
            store.dispatch(Action::ExportSucceeded {
                seq,
                path: PathBuf::from("again.html"),
            }),
            Dispatch::Stale
        );
    }
}
