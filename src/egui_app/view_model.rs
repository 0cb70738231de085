//! Helpers to convert quiz data into egui-facing view structs.

use crate::egui_app::state::ViewerState;
use crate::insights::{self, AnswerFeedback, SelectionSource};
use crate::quiz::{AgentState, AgentStatus, OptionLabel, Problem, SolverSlot};

/// One card in the agent status grid.
#[derive(Clone, Debug, PartialEq)]
pub struct AgentRow {
    pub name: String,
    pub state: AgentState,
    pub fraction: f32,
    pub message: Option<String>,
}

pub fn agent_rows(agents: &[AgentStatus]) -> Vec<AgentRow> {
    agents
        .iter()
        .map(|agent| AgentRow {
            name: agent.name.clone(),
            state: agent.status,
            fraction: agent.progress_fraction(),
            message: Some(agent.message.trim())
                .filter(|message| !message.is_empty())
                .map(str::to_string),
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMarker {
    Plain,
    Correct,
    /// The user's pick, revealed as wrong.
    WrongPick,
}

#[derive(Clone, Debug, PartialEq)]
pub struct OptionRow {
    pub label: OptionLabel,
    pub text: String,
    pub marker: OptionMarker,
    /// Solvers whose resolved pick is this option; filled in review mode.
    pub picked_by: Vec<SolverSlot>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverColumn {
    pub title: &'static str,
    pub approach: &'static str,
    pub answer: String,
    pub confidence: String,
    pub selected: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SolverComparison {
    pub solver_a: SolverColumn,
    pub solver_b: SolverColumn,
    pub validated: bool,
    pub agreement: String,
    pub ground_truth: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProblemCard {
    pub id: String,
    pub category: String,
    pub difficulty: String,
    pub validation_status: String,
    pub question: String,
    pub options: Vec<OptionRow>,
    pub choice: Option<OptionLabel>,
    pub revealed: bool,
    pub feedback: Option<AnswerFeedback>,
    pub explanation: Option<String>,
    pub comparison: Option<SolverComparison>,
}

/// Cards for the problem viewer; empty when there are no problems.
///
/// Interactive mode keeps the answer key, explanation and solver comparison
/// hidden until the user has picked an option and asked to check it. Review
/// mode shows all of them.
pub fn problem_cards(problems: &[Problem], viewer: &ViewerState) -> Vec<ProblemCard> {
    problems
        .iter()
        .map(|problem| problem_card(problem, viewer))
        .collect()
}

fn problem_card(problem: &Problem, viewer: &ViewerState) -> ProblemCard {
    let choice = viewer.selection(&problem.id);
    let revealed = viewer.is_revealed(&problem.id) && choice.is_some();
    let show_key = viewer.review_mode || revealed;
    let feedback = if revealed {
        choice.map(|label| insights::check_answer(problem, label))
    } else {
        None
    };
    let picks: Vec<(SolverSlot, OptionLabel)> = if viewer.review_mode {
        SolverSlot::BOTH
            .into_iter()
            .filter_map(|slot| {
                insights::resolve_selection(problem, slot).map(|(label, _)| (slot, label))
            })
            .collect()
    } else {
        Vec::new()
    };
    let options = problem
        .options
        .iter()
        .map(|(label, text)| {
            let marker = if show_key && label == problem.correct_answer {
                OptionMarker::Correct
            } else if revealed && choice == Some(label) {
                OptionMarker::WrongPick
            } else {
                OptionMarker::Plain
            };
            OptionRow {
                label,
                text: text.to_string(),
                marker,
                picked_by: picks
                    .iter()
                    .filter(|(_, pick)| *pick == label)
                    .map(|(slot, _)| *slot)
                    .collect(),
            }
        })
        .collect();
    ProblemCard {
        id: problem.id.clone(),
        category: problem.category.clone(),
        difficulty: problem.difficulty.clone(),
        validation_status: problem.validation_status.clone(),
        question: problem.question.clone(),
        options,
        choice,
        revealed,
        feedback,
        explanation: (show_key && !problem.explanation.trim().is_empty())
            .then(|| problem.explanation.clone()),
        comparison: show_key.then(|| solver_comparison(problem)).flatten(),
    }
}

fn solver_comparison(problem: &Problem) -> Option<SolverComparison> {
    if problem.solver_a_result.is_none() && problem.solver_b_result.is_none() {
        return None;
    }
    let (validated, agreement) = match problem.validation_score {
        Some(score) if score > 0.0 => (true, format!("{} Match", insights::percent(score))),
        _ => (false, "Validating".to_string()),
    };
    Some(SolverComparison {
        solver_a: solver_column(problem, SolverSlot::A),
        solver_b: solver_column(problem, SolverSlot::B),
        validated,
        agreement,
        ground_truth: problem.ground_truth.map(format_answer),
    })
}

fn solver_column(problem: &Problem, slot: SolverSlot) -> SolverColumn {
    let approach = match slot {
        SolverSlot::A => "Algebraic approach",
        SolverSlot::B => "Logical approach",
    };
    let Some(result) = problem.solver(slot) else {
        return SolverColumn {
            title: slot.label(),
            approach,
            answer: "n/a".into(),
            confidence: "No result".into(),
            selected: "Selected: n/a".into(),
        };
    };
    let selected = match insights::resolve_selection(problem, slot) {
        Some((label, SelectionSource::Reported)) => format!("Selected: {label}"),
        Some((label, SelectionSource::Inferred)) => format!("Selected: {label} (inferred)"),
        None => "Selected: unresolved".to_string(),
    };
    SolverColumn {
        title: slot.label(),
        approach,
        answer: format_answer(result.answer),
        confidence: format!("Confidence: {}", insights::percent(result.confidence)),
        selected,
    }
}

fn format_answer(value: f64) -> String {
    format!("{value:.3}")
}
