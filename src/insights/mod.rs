//! Pure aggregations from quiz entities to display values.
//!
//! Nothing here touches egui or the network; renderers and tests call these
//! directly.

mod answers;
mod confidence;
mod format;
mod hallucination;
mod summary;

pub use answers::{
    AnswerFeedback, SelectionSource, check_answer, parse_option_value, resolve_selection,
};
pub use confidence::{CategoryConfidence, ConfidenceTier, confidence_by_category};
pub use format::{humanize_key, percent, percent_of, plural};
pub use hallucination::{
    Disagreement, ErrorRecord, HallucinationReport, MAX_VISIBLE_DISAGREEMENTS, SolverTally,
    hallucination_report,
};
pub use summary::{BreakdownRow, StatCard, StatsSummary, stats_summary};
