use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Aggregate counters the backend reports after a generation run.
///
/// Every field is optional on the wire; absent counters read as zero.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_generated: u32,
    pub total_valid: u32,
    pub total_rejected: u32,
    #[serde(alias = "total_api_calls")]
    pub api_calls: u32,
    pub solver_agreement_rate: f64,
    pub ground_truth_accuracy: f64,
    pub error_breakdown: BTreeMap<String, u32>,
    pub failure_breakdown: BTreeMap<String, u32>,
    pub difficulty_distribution: BTreeMap<String, u32>,
}
