//! Task record domain model.
//!
//! A task record is the aggregate produced by one pipeline run: the source
//! task text, one artifact per stage, and timing. Stage fields are
//! write-once and populated strictly in stage order; a failed stage stores
//! an error-marker string rather than leaving its field absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::message::AgentRole;

/// Generate a short, collision-resistant run identifier.
///
/// Eight hex characters of a v4 UUID, matching the id width used in the
/// persisted history format.
pub fn generate_task_id() -> String {
    Uuid::new_v4().to_string()[..8].to_string()
}

/// The aggregate of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Short unique identifier for the run
    pub id: String,
    /// Original free-text request, immutable for the life of the record
    pub task: String,
    /// When the run started
    pub created_at: DateTime<Utc>,
    /// Planner output: numbered step list
    #[serde(default)]
    pub steps: String,
    /// Researcher output: supporting facts and data
    #[serde(default)]
    pub research: String,
    /// Executive output: the full solution
    #[serde(default)]
    pub execution: String,
    /// Critic output: constructive evaluation of the solution
    #[serde(default)]
    pub critique: String,
    /// Refiner output: improved solution addressing the critique
    #[serde(default)]
    pub refinement: String,
    /// Wall-clock seconds from run start to the end of the final stage
    #[serde(default)]
    pub completion_time: f64,
}

impl TaskRecord {
    /// Create a fresh record for a run. Stage fields start empty and
    /// `completion_time` is zero until the final stage completes.
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            id: generate_task_id(),
            task: task.into(),
            created_at: Utc::now(),
            steps: String::new(),
            research: String::new(),
            execution: String::new(),
            critique: String::new(),
            refinement: String::new(),
            completion_time: 0.0,
        }
    }

    /// The artifact owned by `role`.
    pub fn artifact(&self, role: AgentRole) -> &str {
        match role {
            AgentRole::Planner => &self.steps,
            AgentRole::Researcher => &self.research,
            AgentRole::Executive => &self.execution,
            AgentRole::Critic => &self.critique,
            AgentRole::Refiner => &self.refinement,
        }
    }

    /// Write the artifact owned by `role`. Each stage field is set exactly
    /// once per run, in stage order; the orchestrator enforces the order.
    pub fn set_artifact(&mut self, role: AgentRole, text: String) {
        match role {
            AgentRole::Planner => self.steps = text,
            AgentRole::Researcher => self.research = text,
            AgentRole::Executive => self.execution = text,
            AgentRole::Critic => self.critique = text,
            AgentRole::Refiner => self.refinement = text,
        }
    }

    /// Record the elapsed run time, rounded to centiseconds.
    pub fn set_completion_time(&mut self, seconds: f64) {
        self.completion_time = (seconds * 100.0).round() / 100.0;
    }

    /// True once every stage field holds text.
    pub fn is_complete(&self) -> bool {
        AgentRole::ALL
            .iter()
            .all(|role| !self.artifact(*role).is_empty())
    }
}
