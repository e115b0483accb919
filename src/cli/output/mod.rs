//! Terminal output formatting.

pub mod table;
