//! Crucible - Five-Stage Agentic Task Pipeline
//!
//! Crucible automates a user-supplied task by driving it through a fixed
//! chain of reasoning stages (plan, research, execute, critique, refine),
//! each stage a single generative-model invocation with a role-specific
//! prompt built from the accumulated outputs of prior stages.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic and domain models
//! - **Service Layer** (`services`): Pipeline orchestration and stage agents
//! - **Infrastructure Layer** (`infrastructure`): Provider client, history
//!   persistence, and configuration loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use crucible::infrastructure::gemini::{GeminiClient, GeminiClientConfig};
//! use crucible::infrastructure::history::HistoryStore;
//! use crucible::services::PipelineOrchestrator;
//! use crucible::Settings;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let invoker = Arc::new(GeminiClient::new(GeminiClientConfig::default())?);
//!     let history = HistoryStore::open(".crucible/history.json");
//!     let orchestrator = PipelineOrchestrator::new(invoker, Settings::default(), history);
//!     let record = orchestrator.run("Summarize photosynthesis in two sentences").await?;
//!     println!("{}", record.refinement);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DomainError, DomainResult};
pub use domain::models::{
    AgentMessage, AgentRole, Config, HistoryConfig, LoggingConfig, MessageLog, ProviderConfig,
    Settings, TaskRecord,
};
pub use domain::ports::{InvokeError, InvokeRequest, ModelInvoker};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::history::HistoryStore;
pub use services::{FailurePolicy, PipelineOrchestrator};
