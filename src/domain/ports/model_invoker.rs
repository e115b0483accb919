//! Model invoker port: one generation request to an external provider.
//!
//! The invoker returns an explicit success/failure variant instead of
//! folding failures into the generated text. How a failure enters the
//! pipeline is the orchestrator's policy decision, not the invoker's.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;

use crate::domain::models::AgentRole;

/// A single generation request.
#[derive(Debug, Clone)]
pub struct InvokeRequest {
    /// Role this invocation serves; used for observability only
    pub role: AgentRole,
    /// Provider model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Fully constructed stage prompt
    pub prompt: String,
    /// Optional per-call deadline. `None` means the provider client's
    /// own request timeout is the only bound.
    pub deadline: Option<Duration>,
    /// Cooperative cancellation signal for this run
    pub cancel: CancellationToken,
}

impl InvokeRequest {
    pub fn new(
        role: AgentRole,
        model: impl Into<String>,
        temperature: f32,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            role,
            model: model.into(),
            temperature,
            prompt: prompt.into(),
            deadline: None,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Typed provider-level failures.
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("invalid or missing API key")]
    InvalidApiKey,

    #[error("rate limit exceeded")]
    RateLimitExceeded,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request exceeded deadline of {0}s")]
    Timeout(u64),

    #[error("invocation cancelled")]
    Cancelled,

    #[error("provider error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("provider returned no generated text")]
    EmptyResponse,
}

/// Boundary trait for issuing one generation request.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    /// Request a completion for `req.prompt` from `req.model`.
    async fn invoke(&self, req: InvokeRequest) -> Result<String, InvokeError>;
}
