use std::collections::BTreeMap;

use crate::quiz::Stats;

use super::format::{humanize_key, percent};

/// One headline counter in the stats panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatCard {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BreakdownRow {
    pub label: String,
    pub count: u32,
}

/// Everything the stats panel shows for one generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsSummary {
    pub cards: Vec<StatCard>,
    /// Empty when the backend reported no errors; the table is then hidden.
    pub errors: Vec<BreakdownRow>,
    pub failures: Vec<BreakdownRow>,
    pub difficulty: Vec<BreakdownRow>,
}

pub fn stats_summary(stats: &Stats) -> StatsSummary {
    let mut cards = vec![
        StatCard {
            label: "Generated",
            value: stats.total_generated.to_string(),
        },
        StatCard {
            label: "Valid",
            value: stats.total_valid.to_string(),
        },
        StatCard {
            label: "Solver Agreement",
            value: percent(stats.solver_agreement_rate),
        },
        StatCard {
            label: "Ground Truth Accuracy",
            value: percent(stats.ground_truth_accuracy),
        },
    ];
    if stats.total_rejected > 0 {
        cards.push(StatCard {
            label: "Rejected",
            value: stats.total_rejected.to_string(),
        });
    }
    if stats.api_calls > 0 {
        cards.push(StatCard {
            label: "API Calls",
            value: stats.api_calls.to_string(),
        });
    }
    StatsSummary {
        cards,
        errors: breakdown_rows(&stats.error_breakdown),
        failures: breakdown_rows(&stats.failure_breakdown),
        difficulty: stats
            .difficulty_distribution
            .iter()
            .map(|(label, count)| BreakdownRow {
                label: label.clone(),
                count: *count,
            })
            .collect(),
    }
}

fn breakdown_rows(map: &BTreeMap<String, u32>) -> Vec<BreakdownRow> {
    map.iter()
        .map(|(key, count)| BreakdownRow {
            label: humanize_key(key),
            count: *count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stats_render_zero_counters() {
        let summary = stats_summary(&Stats::default());
        let values: Vec<_> = summary.cards.iter().map(|card| card.value.as_str()).collect();
        assert_eq!(values, vec!["0", "0", "0%", "0%"]);
        assert!(summary.errors.is_empty());
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn breakdowns_are_humanized_and_optional_cards_appear() {
        let mut stats = Stats {
            total_generated: 12,
            total_valid: 10,
            total_rejected: 2,
            api_calls: 41,
            solver_agreement_rate: 0.8333,
            ground_truth_accuracy: 0.9167,
            ..Stats::default()
        };
        stats.error_breakdown.insert("solver_disagreement".into(), 1);
        stats.failure_breakdown.insert("ground_truth_mismatch".into(), 2);
        let summary = stats_summary(&stats);
        assert_eq!(summary.cards.len(), 6);
        assert_eq!(summary.cards[2].value, "83%");
        assert_eq!(
            summary.errors,
            vec![BreakdownRow {
                label: "solver disagreement".into(),
                count: 1
            }]
        );
        assert_eq!(summary.failures[0].label, "ground truth mismatch");
    }
}
