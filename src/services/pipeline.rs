//! Pipeline orchestrator.
//!
//! Drives the five stages in fixed order, folds each stage's result into
//! the task record, narrates progress in the message log, and hands the
//! finished record to the history store. The run is strictly linear:
//! Planning -> Research -> Execution -> Critique -> Refinement -> Complete.
//! A failed model invocation degrades that stage's artifact but never
//! diverts the run; cancellation is the one early exit.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::agents::{StageAgent, StageInputs};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{AgentMessage, MessageLog, Settings, TaskRecord};
use crate::domain::ports::{InvokeError, InvokeRequest, ModelInvoker};
use crate::infrastructure::history::HistoryStore;

/// What a failed stage's downstream consumers see.
///
/// The task record always stores the `Error in <role> agent: ...` marker
/// for a failed stage; the policy only decides what later prompts consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Later prompts see the raw error marker verbatim. This matches the
    /// original contract: downstream stages reason over the error text as
    /// if it were content.
    #[default]
    PassThrough,
    /// Later prompts see a neutral `[stage unavailable: <role>]` marker
    /// instead of the error text.
    Placeholder,
}

/// Releases the single-flight guard when a run finishes, however it exits.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Drives pipeline runs. One orchestrator supports exactly one in-flight
/// run at a time; a second `run` fails fast with `RunInProgress`.
pub struct PipelineOrchestrator {
    invoker: Arc<dyn ModelInvoker>,
    settings: std::sync::RwLock<Settings>,
    history: tokio::sync::Mutex<HistoryStore>,
    log: std::sync::Mutex<MessageLog>,
    policy: FailurePolicy,
    stage_deadline: Option<Duration>,
    running: AtomicBool,
}

impl PipelineOrchestrator {
    pub fn new(invoker: Arc<dyn ModelInvoker>, settings: Settings, history: HistoryStore) -> Self {
        Self {
            invoker,
            settings: std::sync::RwLock::new(settings),
            history: tokio::sync::Mutex::new(history),
            log: std::sync::Mutex::new(MessageLog::new()),
            policy: FailurePolicy::default(),
            stage_deadline: None,
            running: AtomicBool::new(false),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Bound every stage invocation by `deadline`.
    pub fn with_stage_deadline(mut self, deadline: Duration) -> Self {
        self.stage_deadline = Some(deadline);
        self
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Replace the settings used by subsequent runs. The active run, if
    /// any, keeps the snapshot it took at start.
    pub fn update_settings(&self, settings: Settings) {
        *self
            .settings
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = settings;
    }

    /// Read-only snapshot of the current run's message log, for the
    /// display layer.
    pub fn messages(&self) -> Vec<AgentMessage> {
        self.log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .entries()
            .to_vec()
    }

    /// Access the history store (read for display, clear on demand).
    pub async fn history(&self) -> tokio::sync::MutexGuard<'_, HistoryStore> {
        self.history.lock().await
    }

    /// Execute one full pipeline run for `task_text`.
    ///
    /// The orchestrator does not validate emptiness; that is the caller's
    /// contract. Returns an error only for a concurrent run, cancellation,
    /// or a history persistence failure -- never for a failed stage.
    pub async fn run(&self, task_text: &str) -> DomainResult<TaskRecord> {
        self.run_with_cancel(task_text, CancellationToken::new())
            .await
    }

    /// `run`, honoring a cooperative cancellation token between stages
    /// (and inside each invocation).
    pub async fn run_with_cancel(
        &self,
        task_text: &str,
        cancel: CancellationToken,
    ) -> DomainResult<TaskRecord> {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(DomainError::RunInProgress);
        }
        let _guard = RunGuard(&self.running);

        self.execute(task_text, cancel).await
    }

    async fn execute(
        &self,
        task_text: &str,
        cancel: CancellationToken,
    ) -> DomainResult<TaskRecord> {
        let settings = self.settings();
        let mut record = TaskRecord::new(task_text);

        self.log
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clear();

        let started = Instant::now();
        info!(id = %record.id, "Starting pipeline run");

        let agents = StageAgent::for_run(&settings);
        let mut inputs = StageInputs::default();

        for agent in &agents {
            if cancel.is_cancelled() {
                warn!(id = %record.id, stage = %agent.role, "Run cancelled before stage");
                return Err(DomainError::Cancelled);
            }

            info!(id = %record.id, stage = %agent.role, model = %agent.model, "Running stage");

            let prompt = agent.build_prompt(&record.task, &inputs);
            let mut request =
                InvokeRequest::new(agent.role, &agent.model, agent.temperature, prompt)
                    .with_cancel(cancel.clone());
            if let Some(deadline) = self.stage_deadline {
                request = request.with_deadline(deadline);
            }

            let (artifact, view) = match self.invoker.invoke(request).await {
                Ok(text) => {
                    let view = text.clone();
                    (text, view)
                }
                Err(InvokeError::Cancelled) => {
                    warn!(id = %record.id, stage = %agent.role, "Run cancelled mid-stage");
                    return Err(DomainError::Cancelled);
                }
                Err(err) => {
                    // Fail-soft: the failure becomes the stage artifact and
                    // the run keeps moving.
                    error!(id = %record.id, stage = %agent.role, %err, "Stage invocation failed");
                    let marker = format!("Error in {} agent: {err}", agent.role);
                    let view = match self.policy {
                        FailurePolicy::PassThrough => marker.clone(),
                        FailurePolicy::Placeholder => {
                            format!("[stage unavailable: {}]", agent.role)
                        }
                    };
                    (marker, view)
                }
            };

            self.log
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .append(agent.role, agent.narrate(&artifact));
            record.set_artifact(agent.role, artifact);
            inputs.set(agent.role, view);
        }

        record.set_completion_time(started.elapsed().as_secs_f64());
        info!(
            id = %record.id,
            completion_time = record.completion_time,
            "Pipeline run complete"
        );

        // Hand the finished record to history. Persistence is the one
        // loud failure: the in-memory history keeps the record either way.
        let mut history = self.history.lock().await;
        history.append(record.clone())?;

        Ok(record)
    }
}
