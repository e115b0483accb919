//! Stage agents: one shared capability, five role-tagged prompt builders.
//!
//! An agent is not a distinct implementation per role. It is a role tag
//! plus the model id and temperature it will invoke with; prompt
//! construction and narration are matches on the tag. Each prompt is built
//! strictly from the stage's declared inputs: the task text plus the
//! upstream artifacts that precede it in stage order, never anything later.

use crate::domain::models::{AgentRole, Settings};

/// Upstream artifacts as a later stage's prompt sees them.
///
/// The orchestrator fills these in stage order, applying its failure
/// policy, so a prompt can only ever contain what the policy admitted.
#[derive(Debug, Clone, Default)]
pub struct StageInputs {
    pub steps: String,
    pub research: String,
    pub execution: String,
    pub critique: String,
}

impl StageInputs {
    /// Record the view of a completed stage's output.
    pub fn set(&mut self, role: AgentRole, text: String) {
        match role {
            AgentRole::Planner => self.steps = text,
            AgentRole::Researcher => self.research = text,
            AgentRole::Executive => self.execution = text,
            AgentRole::Critic => self.critique = text,
            // Nothing consumes the refinement downstream.
            AgentRole::Refiner => {}
        }
    }
}

/// One pipeline stage: a role tag bound to its model and temperature.
#[derive(Debug, Clone)]
pub struct StageAgent {
    pub role: AgentRole,
    pub model: String,
    pub temperature: f32,
}

impl StageAgent {
    /// Construct the five agents for a run from a settings snapshot,
    /// in pipeline order.
    pub fn for_run(settings: &Settings) -> [Self; 5] {
        AgentRole::ALL.map(|role| Self {
            role,
            model: settings.model_for(role).to_string(),
            temperature: settings.temperature,
        })
    }

    /// Build this stage's prompt from the task and its declared inputs.
    pub fn build_prompt(&self, task: &str, inputs: &StageInputs) -> String {
        match self.role {
            AgentRole::Planner => format!(
                "As a Task Planning Agent, break down this task into detailed, executable steps.\n\
                 Format the steps as a numbered list with clear instructions.\n\n\
                 Task: {task}\n\n\
                 Provide a comprehensive plan that covers all aspects of the task."
            ),
            AgentRole::Researcher => format!(
                "As a Research Agent, gather relevant information to help complete this task.\n\n\
                 Task: {task}\n\
                 Steps: {steps}\n\n\
                 Provide key information, facts, or data that would be helpful for executing this task.",
                steps = inputs.steps
            ),
            AgentRole::Executive => format!(
                "As an Executive Agent, execute the given steps based on the task description and research provided.\n\n\
                 Task: {task}\n\
                 Steps: {steps}\n\
                 Research: {research}\n\n\
                 Provide the complete solution with detailed execution of each step.",
                steps = inputs.steps,
                research = inputs.research
            ),
            AgentRole::Critic => format!(
                "As a Critic Agent, evaluate the solution provided by the Executive Agent.\n\n\
                 Task: {task}\n\
                 Steps: {steps}\n\
                 Research: {research}\n\
                 Execution: {execution}\n\n\
                 Provide constructive feedback, identify any issues or areas for improvement, and suggest refinements.",
                steps = inputs.steps,
                research = inputs.research,
                execution = inputs.execution
            ),
            AgentRole::Refiner => format!(
                "As a Refiner Agent, improve the solution based on the critique provided.\n\n\
                 Task: {task}\n\
                 Current Solution: {execution}\n\
                 Critique: {critique}\n\n\
                 Provide an improved and refined solution that addresses the issues identified in the critique.",
                execution = inputs.execution,
                critique = inputs.critique
            ),
        }
    }

    /// Role-prefixed narration of a completed stage, for the message log.
    pub fn narrate(&self, artifact: &str) -> String {
        let lead = match self.role {
            AgentRole::Planner => "I've broken down the task into these steps:",
            AgentRole::Researcher => "I've gathered this relevant information:",
            AgentRole::Executive => "I've executed the task. Here's the result:",
            AgentRole::Critic => "Here's my evaluation of the solution:",
            AgentRole::Refiner => "I've refined the solution:",
        };
        format!("{}: {lead}\n\n{artifact}", self.role)
    }
}
