use std::collections::{HashMap, HashSet};

use crate::quiz::OptionLabel;

/// Per-problem interaction in the problem viewer, keyed by problem id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub selections: HashMap<String, OptionLabel>,
    pub revealed: HashSet<String>,
    /// Read-only variant: show answers and solver picks for every problem.
    pub review_mode: bool,
}

impl ViewerState {
    pub fn select(&mut self, problem_id: &str, label: OptionLabel) {
        self.selections.insert(problem_id.to_string(), label);
    }

    pub fn selection(&self, problem_id: &str) -> Option<OptionLabel> {
        self.selections.get(problem_id).copied()
    }

    /// Revealing needs a selection first.
    pub fn toggle_reveal(&mut self, problem_id: &str) {
        if self.revealed.remove(problem_id) {
            return;
        }
        if self.selections.contains_key(problem_id) {
            self.revealed.insert(problem_id.to_string());
        }
    }

    pub fn is_revealed(&self, problem_id: &str) -> bool {
        self.revealed.contains(problem_id)
    }

    /// Forget picks from a previous batch; the review toggle survives.
    pub fn reset(&mut self) {
        self.selections.clear();
        self.revealed.clear();
    }
}
