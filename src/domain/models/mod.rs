//! Domain models for the Crucible pipeline.

pub mod config;
pub mod message;
pub mod record;
pub mod settings;

pub use config::{Config, HistoryConfig, LoggingConfig, ProviderConfig};
pub use message::{AgentMessage, AgentRole, MessageLog};
pub use record::TaskRecord;
pub use settings::Settings;
