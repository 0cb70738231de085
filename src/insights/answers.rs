use crate::quiz::{McqOptions, OptionLabel, Problem, SolverSlot};

/// Relative tolerance when matching a solver's number to an option.
const RELATIVE_TOLERANCE: f64 = 0.01;
const ABSOLUTE_TOLERANCE: f64 = 1e-6;

/// How a solver's option was determined.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionSource {
    /// The backend sent `selected_option`.
    Reported,
    /// Matched from the solver's numeric answer against the option texts.
    Inferred,
}

/// Which option a solver picked, if that can be determined.
///
/// An explicit `selected_option` wins. Otherwise the solver's numeric answer
/// is matched to the closest option value. A solver that cannot be resolved
/// returns `None`; it is never assumed to have picked the correct answer.
pub fn resolve_selection(
    problem: &Problem,
    slot: SolverSlot,
) -> Option<(OptionLabel, SelectionSource)> {
    let result = problem.solver(slot)?;
    if let Some(label) = result.selected_option {
        return Some((label, SelectionSource::Reported));
    }
    infer_option(&problem.options, result.answer).map(|label| (label, SelectionSource::Inferred))
}

fn infer_option(options: &McqOptions, answer: f64) -> Option<OptionLabel> {
    if !answer.is_finite() {
        return None;
    }
    let tolerance = (answer.abs() * RELATIVE_TOLERANCE).max(ABSOLUTE_TOLERANCE);
    options
        .iter()
        .filter_map(|(label, text)| {
            let value = parse_option_value(text)?;
            let distance = (value - answer).abs();
            (distance <= tolerance).then_some((label, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(label, _)| label)
}

/// Leading numeric value of an option text.
///
/// Accepts a currency or other symbol prefix, thousands separators and a
/// simple `a/b` fraction: `"₹1,200"`, `"60 km/h"`, `"-2.5"`, `"3/4 hours"`.
pub fn parse_option_value(text: &str) -> Option<f64> {
    let start = number_start(text)?;
    let rest = &text[start..];
    let (numerator, consumed) = leading_number(rest)?;
    let tail = rest[consumed..].trim_start();
    if let Some(denominator_text) = tail.strip_prefix('/')
        && let Some((denominator, _)) = leading_number(denominator_text.trim_start())
        && denominator != 0.0
    {
        return Some(numerator / denominator);
    }
    Some(numerator)
}

/// Byte offset of the first digit, or of a `.`, `-` or `-.` directly before one.
fn number_start(text: &str) -> Option<usize> {
    let starts_with_digit =
        |rest: &str| rest.chars().next().is_some_and(|ch| ch.is_ascii_digit());
    for (index, ch) in text.char_indices() {
        let rest = &text[index + ch.len_utf8()..];
        let starts_here = match ch {
            '0'..='9' => true,
            '.' => starts_with_digit(rest),
            '-' => {
                starts_with_digit(rest)
                    || rest
                        .strip_prefix('.')
                        .is_some_and(|after_dot| starts_with_digit(after_dot))
            }
            _ => false,
        };
        if starts_here {
            return Some(index);
        }
    }
    None
}

fn leading_number(text: &str) -> Option<(f64, usize)> {
    let mut digits = String::new();
    let mut consumed = 0;
    let mut seen_dot = false;
    let mut seen_digit = false;
    for (index, ch) in text.char_indices() {
        match ch {
            '-' if index == 0 => digits.push(ch),
            '0'..='9' => {
                seen_digit = true;
                digits.push(ch);
            }
            '.' if !seen_dot => {
                seen_dot = true;
                digits.push(ch);
            }
            ',' if seen_digit && !seen_dot => {}
            _ => break,
        }
        consumed = index + ch.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    digits.parse().ok().map(|value| (value, consumed))
}

/// Result of checking the user's pick against the answer key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerFeedback {
    Correct,
    Incorrect {
        correct: OptionLabel,
        correct_text: String,
    },
}

pub fn check_answer(problem: &Problem, choice: OptionLabel) -> AnswerFeedback {
    if choice == problem.correct_answer {
        AnswerFeedback::Correct
    } else {
        AnswerFeedback::Incorrect {
            correct: problem.correct_answer,
            correct_text: problem.correct_option_text().to_string(),
        }
    }
}
