//! Pipeline settings: per-role model selection and shared generation knobs.

use serde::{Deserialize, Serialize};

use super::message::AgentRole;

/// Process-wide pipeline settings, read by the orchestrator when
/// constructing the stage agents for a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Settings {
    /// Model identifier used by the Planner stage
    #[serde(default = "default_model")]
    pub planner_model: String,

    /// Model identifier used by the Researcher stage
    #[serde(default = "default_model")]
    pub researcher_model: String,

    /// Model identifier used by the Executive stage.
    /// The Refiner reuses this model by design.
    #[serde(default = "default_model")]
    pub executive_model: String,

    /// Model identifier used by the Critic stage
    #[serde(default = "default_model")]
    pub critic_model: String,

    /// Sampling temperature shared by every stage
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Upper bound hint for plan length. Carried in settings but not
    /// consulted by the orchestration logic.
    #[serde(default = "default_max_steps")]
    pub max_steps: u32,

    /// Print per-stage narration while running
    #[serde(default = "default_verbose")]
    pub verbose: bool,
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_max_steps() -> u32 {
    10
}

const fn default_verbose() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            planner_model: default_model(),
            researcher_model: default_model(),
            executive_model: default_model(),
            critic_model: default_model(),
            temperature: default_temperature(),
            max_steps: default_max_steps(),
            verbose: default_verbose(),
        }
    }
}

impl Settings {
    /// Model identifier for a role. The Refiner maps to the executive
    /// model rather than carrying its own setting.
    pub fn model_for(&self, role: AgentRole) -> &str {
        match role {
            AgentRole::Planner => &self.planner_model,
            AgentRole::Researcher => &self.researcher_model,
            AgentRole::Executive | AgentRole::Refiner => &self.executive_model,
            AgentRole::Critic => &self.critic_model,
        }
    }
}
