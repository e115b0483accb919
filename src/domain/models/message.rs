//! Agent roles and the per-run message log.
//!
//! The message log is an ephemeral, append-only narration of each stage's
//! completion. It is cleared at the start of every run and is never
//! persisted with the task record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five fixed pipeline roles, in stage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Planner,
    Researcher,
    Executive,
    Critic,
    Refiner,
}

impl AgentRole {
    /// All roles in pipeline execution order.
    pub const ALL: [Self; 5] = [
        Self::Planner,
        Self::Researcher,
        Self::Executive,
        Self::Critic,
        Self::Refiner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planner => "Planner",
            Self::Researcher => "Researcher",
            Self::Executive => "Executive",
            Self::Critic => "Critic",
            Self::Refiner => "Refiner",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "planner" => Some(Self::Planner),
            "researcher" => Some(Self::Researcher),
            "executive" => Some(Self::Executive),
            "critic" => Some(Self::Critic),
            "refiner" => Some(Self::Refiner),
            _ => None,
        }
    }

    /// Position of this role in the pipeline (0-based).
    pub fn stage_index(&self) -> usize {
        match self {
            Self::Planner => 0,
            Self::Researcher => 1,
            Self::Executive => 2,
            Self::Critic => 3,
            Self::Refiner => 4,
        }
    }
}

impl std::fmt::Display for AgentRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One narration entry, produced when a stage completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMessage {
    /// Role that produced the message
    pub role: AgentRole,
    /// Human-readable narration of the stage output
    pub message: String,
    /// When the stage completed
    pub timestamp: DateTime<Utc>,
}

/// Append-only, per-run ordered sequence of agent messages.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<AgentMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one entry, stamped with the current time.
    pub fn append(&mut self, role: AgentRole, message: impl Into<String>) {
        self.entries.push(AgentMessage {
            role,
            message: message.into(),
            timestamp: Utc::now(),
        });
    }

    /// Read-only view of the entries, in append order.
    pub fn entries(&self) -> &[AgentMessage] {
        &self.entries
    }

    /// Drop all entries. Called at the start of every run.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
