//! Quiz entities exchanged with the generation backend.

mod generation;
mod problem;
mod stats;
mod status;

pub use generation::{
    Category, CategorySelection, DifficultyDistribution, GenerateRequest,
    GenerationConfig, GenerationConfigError, MAX_PROBLEMS, MIN_PROBLEMS, clamp_problem_count,
};
pub use problem::{McqOptions, OptionLabel, Problem, SchemaViolation, SolverResult, SolverSlot};
pub use stats::Stats;
pub use status::{AgentState, AgentStatus, SystemStatus};
