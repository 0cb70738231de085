use crate::quiz::{OptionLabel, Problem, SolverSlot};

use super::answers::resolve_selection;
use super::format::percent_of;

/// Disagreements listed before the "+N more" line.
pub const MAX_VISIBLE_DISAGREEMENTS: usize = 3;

/// A solver picked an option other than the answer key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    pub id: String,
    pub expected: OptionLabel,
    pub got: OptionLabel,
}

/// Both solvers resolved to different options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Disagreement {
    pub id: String,
    pub category: String,
    pub solver_a: OptionLabel,
    pub solver_b: OptionLabel,
    pub correct: OptionLabel,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverTally {
    pub slot: SolverSlot,
    pub correct: usize,
    /// Problems where the solver's choice could not be determined.
    pub unresolved: usize,
    pub errors: Vec<ErrorRecord>,
    /// Correct picks over all problems, 0-100.
    pub accuracy: f64,
}

impl SolverTally {
    fn new(slot: SolverSlot) -> Self {
        Self {
            slot,
            correct: 0,
            unresolved: 0,
            errors: Vec::new(),
            accuracy: 0.0,
        }
    }

    fn record(&mut self, problem: &Problem, selection: Option<OptionLabel>) {
        match selection {
            Some(label) if label == problem.correct_answer => self.correct += 1,
            Some(label) => self.errors.push(ErrorRecord {
                id: problem.id.clone(),
                expected: problem.correct_answer,
                got: label,
            }),
            None => self.unresolved += 1,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HallucinationReport {
    pub total: usize,
    pub solver_a: SolverTally,
    pub solver_b: SolverTally,
    /// Correct picks of both solvers over `2 * total`, 0-100.
    pub system_accuracy: f64,
    pub disagreements: Vec<Disagreement>,
}

impl HallucinationReport {
    pub fn visible_disagreements(&self) -> &[Disagreement] {
        let end = self.disagreements.len().min(MAX_VISIBLE_DISAGREEMENTS);
        &self.disagreements[..end]
    }

    pub fn hidden_disagreements(&self) -> usize {
        self.disagreements
            .len()
            .saturating_sub(MAX_VISIBLE_DISAGREEMENTS)
    }

    pub fn tallies(&self) -> [&SolverTally; 2] {
        [&self.solver_a, &self.solver_b]
    }
}

/// Score both solvers against the answer key; `None` for an empty batch.
pub fn hallucination_report(problems: &[Problem]) -> Option<HallucinationReport> {
    if problems.is_empty() {
        return None;
    }
    let mut solver_a = SolverTally::new(SolverSlot::A);
    let mut solver_b = SolverTally::new(SolverSlot::B);
    let mut disagreements = Vec::new();

    for problem in problems {
        let a = resolve_selection(problem, SolverSlot::A).map(|(label, _)| label);
        let b = resolve_selection(problem, SolverSlot::B).map(|(label, _)| label);
        solver_a.record(problem, a);
        solver_b.record(problem, b);
        if let (Some(a), Some(b)) = (a, b)
            && a != b
        {
            disagreements.push(Disagreement {
                id: problem.id.clone(),
                category: problem.category.clone(),
                solver_a: a,
                solver_b: b,
                correct: problem.correct_answer,
            });
        }
    }

    let total = problems.len();
    solver_a.accuracy = percent_of(solver_a.correct, total);
    solver_b.accuracy = percent_of(solver_b.correct, total);
    let system_accuracy = percent_of(solver_a.correct + solver_b.correct, total * 2);
    Some(HallucinationReport {
        total,
        solver_a,
        solver_b,
        system_accuracy,
        disagreements,
    })
}
