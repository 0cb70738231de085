use serde::{Deserialize, Serialize};

use super::Problem;

/// Lifecycle state the backend reports for one pipeline agent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentState {
    #[default]
    Idle,
    Running,
    Completed,
    Error,
    #[serde(other)]
    Unknown,
}

impl AgentState {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

/// Progress of one agent in the backend pipeline.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentStatus {
    pub name: String,
    #[serde(default)]
    pub status: AgentState,
    /// Percent complete; the backend promises 0-100 but is not trusted to.
    #[serde(default)]
    pub progress: f32,
    #[serde(default)]
    pub message: String,
}

impl AgentStatus {
    pub fn progress_fraction(&self) -> f32 {
        if self.progress.is_finite() {
            (self.progress / 100.0).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Body of `GET /api/status`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemStatus {
    pub agents: Vec<AgentStatus>,
    pub current_problem: Option<Problem>,
    pub total_generated: u32,
    pub total_valid: u32,
}
