//! CLI command handlers.

pub mod history;
pub mod run;
pub mod settings;
