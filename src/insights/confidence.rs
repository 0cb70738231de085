use std::cmp::Ordering;

use crate::quiz::{Problem, SolverSlot};

/// Colour band for a combined confidence percentage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Moderate,
    Low,
    Critical,
}

impl ConfidenceTier {
    pub fn for_percent(value: f64) -> Self {
        if value >= 90.0 {
            Self::High
        } else if value >= 75.0 {
            Self::Moderate
        } else if value >= 60.0 {
            Self::Low
        } else {
            Self::Critical
        }
    }
}

/// One heatmap row.
#[derive(Clone, Debug, PartialEq)]
pub struct CategoryConfidence {
    pub category: String,
    pub count: usize,
    /// Mean solver A confidence, 0-100.
    pub solver_a: f64,
    /// Mean solver B confidence, 0-100.
    pub solver_b: f64,
    /// Mean over every reading in the category, 0-100.
    pub combined: f64,
    pub tier: ConfidenceTier,
}

#[derive(Default)]
struct Readings {
    sum: f64,
    count: usize,
}

impl Readings {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean_percent(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum * 100.0 / self.count as f64
        }
    }
}

struct Group {
    category: String,
    count: usize,
    a: Readings,
    b: Readings,
}

/// Group problems by category and rank by combined solver confidence.
///
/// Categories keep first-seen order among equal averages. Averages cover the
/// solver readings actually present; a problem without a solver result adds
/// nothing for that solver.
pub fn confidence_by_category(problems: &[Problem]) -> Vec<CategoryConfidence> {
    let mut groups: Vec<Group> = Vec::new();
    for problem in problems {
        let index = match groups.iter().position(|g| g.category == problem.category) {
            Some(index) => index,
            None => {
                groups.push(Group {
                    category: problem.category.clone(),
                    count: 0,
                    a: Readings::default(),
                    b: Readings::default(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.count += 1;
        for slot in SolverSlot::BOTH {
            if let Some(result) = problem.solver(slot) {
                match slot {
                    SolverSlot::A => group.a.push(result.confidence),
                    SolverSlot::B => group.b.push(result.confidence),
                }
            }
        }
    }

    let mut rows: Vec<CategoryConfidence> = groups
        .into_iter()
        .map(|group| {
            let all = Readings {
                sum: group.a.sum + group.b.sum,
                count: group.a.count + group.b.count,
            };
            let combined = all.mean_percent();
            CategoryConfidence {
                category: group.category,
                count: group.count,
                solver_a: group.a.mean_percent(),
                solver_b: group.b.mean_percent(),
                combined,
                tier: ConfidenceTier::for_percent(combined),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.combined.partial_cmp(&a.combined).unwrap_or(Ordering::Equal));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::SolverResult;

    fn problem(category: &str, a: Option<f64>, b: Option<f64>) -> Problem {
        let result = |confidence| SolverResult {
            answer: 1.0,
            confidence,
            ..SolverResult::default()
        };
        Problem {
            category: category.to_string(),
            solver_a_result: a.map(result),
            solver_b_result: b.map(result),
            ..Problem::default()
        }
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(confidence_by_category(&[]).is_empty());
    }

    #[test]
    fn combined_average_is_mean_of_all_readings() {
        let rows = confidence_by_category(&[
            problem("Work & Time", Some(0.8), Some(0.9)),
            problem("Work & Time", Some(0.6), Some(0.7)),
        ]);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.count, 2);
        assert!((row.combined - 75.0).abs() < 1e-9);
        assert!((row.solver_a - 70.0).abs() < 1e-9);
        assert!((row.solver_b - 80.0).abs() < 1e-9);
        assert_eq!(row.tier, ConfidenceTier::Moderate);
    }

    #[test]
    fn rows_sort_descending_and_ties_keep_first_seen_order() {
        let rows = confidence_by_category(&[
            problem("Age Problems", Some(0.5), Some(0.5)),
            problem("Boats & Streams", Some(0.95), Some(0.95)),
            problem("Pipes & Cisterns", Some(0.5), Some(0.5)),
        ]);
        let order: Vec<_> = rows.iter().map(|row| row.category.as_str()).collect();
        assert_eq!(order, vec!["Boats & Streams", "Age Problems", "Pipes & Cisterns"]);
        assert_eq!(rows[0].tier, ConfidenceTier::High);
        assert_eq!(rows[1].tier, ConfidenceTier::Critical);
    }

    #[test]
    fn missing_solver_results_do_not_drag_the_average() {
        let rows = confidence_by_category(&[
            problem("Age Problems", Some(0.8), None),
            problem("Age Problems", None, None),
        ]);
        assert!((rows[0].solver_a - 80.0).abs() < 1e-9);
        assert_eq!(rows[0].solver_b, 0.0);
        assert!((rows[0].combined - 80.0).abs() < 1e-9);
    }

    #[test]
    fn tier_thresholds_are_inclusive() {
        assert_eq!(ConfidenceTier::for_percent(90.0), ConfidenceTier::High);
        assert_eq!(ConfidenceTier::for_percent(89.9), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::for_percent(75.0), ConfidenceTier::Moderate);
        assert_eq!(ConfidenceTier::for_percent(60.0), ConfidenceTier::Low);
        assert_eq!(ConfidenceTier::for_percent(59.9), ConfidenceTier::Critical);
    }
}
