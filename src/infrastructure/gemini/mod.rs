//! Gemini provider integration.
//!
//! HTTP adapter for the Google Generative Language API, implementing the
//! `ModelInvoker` port. One request per stage invocation; failures are
//! classified into typed `InvokeError` variants at this boundary.

pub mod client;
pub mod types;

pub use client::{GeminiClient, GeminiClientConfig};
