//! Domain layer: pure models, errors, and ports with no I/O.

pub mod errors;
pub mod models;
pub mod ports;
