//! Ports: boundary traits implemented by the infrastructure layer.

pub mod model_invoker;

pub use model_invoker::{InvokeError, InvokeRequest, ModelInvoker};
