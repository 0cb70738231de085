use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One of the four multiple-choice labels.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum OptionLabel {
    #[default]
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const ALL: [OptionLabel; 4] = [Self::A, Self::B, Self::C, Self::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The four answer texts, always keyed A-D on the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct McqOptions {
    #[serde(rename = "A")]
    pub a: String,
    #[serde(rename = "B")]
    pub b: String,
    #[serde(rename = "C")]
    pub c: String,
    #[serde(rename = "D")]
    pub d: String,
}

impl McqOptions {
    pub fn get(&self, label: OptionLabel) -> &str {
        match label {
            OptionLabel::A => &self.a,
            OptionLabel::B => &self.b,
            OptionLabel::C => &self.c,
            OptionLabel::D => &self.d,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        OptionLabel::ALL
            .into_iter()
            .map(move |label| (label, self.get(label)))
    }
}

/// Which of the two independent solvers a result came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolverSlot {
    A,
    B,
}

impl SolverSlot {
    pub const BOTH: [SolverSlot; 2] = [Self::A, Self::B];

    pub fn label(self) -> &'static str {
        match self {
            Self::A => "Solver A",
            Self::B => "Solver B",
        }
    }
}

/// One solver's numeric answer for a problem.
///
/// Fields the client does not interpret (`reasoning`, `approach`) are kept in
/// `extra` so an export sends them back untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SolverResult {
    pub answer: f64,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<OptionLabel>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A generated multiple-choice problem with its validation results.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
    pub question: String,
    pub options: McqOptions,
    pub correct_answer: OptionLabel,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub validation_status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground_truth: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver_a_result: Option<SolverResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solver_b_result: Option<SolverResult>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A value in a parsed problem that breaks the entity invariants.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaViolation {
    #[error("problem {id}: {slot} confidence {value} is outside [0, 1]")]
    Confidence {
        id: String,
        slot: &'static str,
        value: f64,
    },
    #[error("problem {id}: {slot} answer is not a finite number")]
    Answer { id: String, slot: &'static str },
    #[error("problem {id}: validation score {value} is outside [0, 1]")]
    ValidationScore { id: String, value: f64 },
}

impl Problem {
    pub fn solver(&self, slot: SolverSlot) -> Option<&SolverResult> {
        match slot {
            SolverSlot::A => self.solver_a_result.as_ref(),
            SolverSlot::B => self.solver_b_result.as_ref(),
        }
    }

    pub fn correct_option_text(&self) -> &str {
        self.options.get(self.correct_answer)
    }

    /// Check the numeric invariants serde cannot express.
    pub fn validate(&self) -> Result<(), SchemaViolation> {
        if let Some(score) = self.validation_score
            && !is_unit_interval(score)
        {
            return Err(SchemaViolation::ValidationScore {
                id: self.id.clone(),
                value: score,
            });
        }
        for slot in SolverSlot::BOTH {
            let Some(result) = self.solver(slot) else {
                continue;
            };
            if !result.answer.is_finite() {
                return Err(SchemaViolation::Answer {
                    id: self.id.clone(),
                    slot: slot.label(),
                });
            }
            if !is_unit_interval(result.confidence) {
                return Err(SchemaViolation::Confidence {
                    id: self.id.clone(),
                    slot: slot.label(),
                    value: result.confidence,
                });
            }
        }
        Ok(())
    }
}

fn is_unit_interval(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}
