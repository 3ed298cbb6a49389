//! Sequential pipeline runner
//!
//! Logs in once, then runs each operation in order against the threaded
//! [`State`]. Only a failed login stops the run; every other failure is
//! recorded against its step and the next operation proceeds with the state
//! left unchanged.

use chrono::{DateTime, Utc};
use godata_domain::{Credentials, GoDataError, Result};
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::operation::Operation;
use super::state::State;
use crate::resources::GoDataService;
use crate::session::ports::SessionProvider;

/// Outcome of one step, tagged so callers never inspect payloads to tell
/// success from failure.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Succeeded,
    Failed(GoDataError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub operation: &'static str,
    /// Position within an `each` step's elements.
    pub element: Option<usize>,
    pub outcome: StepOutcome,
}

/// Final state plus per-step outcomes of a completed run.
#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub state: State,
    pub steps: Vec<StepReport>,
}

impl PipelineReport {
    pub fn succeeded(&self) -> usize {
        self.steps.iter().filter(|s| s.outcome == StepOutcome::Succeeded).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &GoDataError)> {
        self.steps.iter().filter_map(|step| match &step.outcome {
            StepOutcome::Failed(err) => Some((step.operation, err)),
            StepOutcome::Succeeded => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// An ordered list of operations run under one session.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    operations: Vec<Operation>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation.
    pub fn then(mut self, operation: Operation) -> Self {
        self.operations.push(operation);
        self
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Log in and run every operation in order.
    ///
    /// An `each` step contributes one report per element.
    ///
    /// # Errors
    ///
    /// Returns `GoDataError::Auth` if login fails; no resource call is made
    /// in that case. Per-operation failures are reported in the returned
    /// [`PipelineReport`] instead.
    #[instrument(skip_all, fields(operations = self.operations.len()))]
    pub async fn run(
        &self,
        sessions: &dyn SessionProvider,
        credentials: &Credentials,
        service: &GoDataService,
        initial: State,
    ) -> Result<PipelineReport> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();

        let session = sessions.login(credentials).await.map_err(|err| {
            error!(%run_id, error = %err, "Authentication failed; aborting pipeline");
            match err {
                GoDataError::Auth(_) => err,
                other => GoDataError::Auth(other.to_string()),
            }
        })?;
        info!(%run_id, base_url = session.base_url(), "Authentication succeeded");

        let mut state = initial;
        let mut steps = Vec::with_capacity(self.operations.len());

        for (index, operation) in self.operations.iter().enumerate() {
            let Some(fanout) = operation.fanout(&state) else {
                let outcome = match operation.execute(service, &session, &state).await {
                    Ok(value) => {
                        state = state.compose_next(value);
                        StepOutcome::Succeeded
                    }
                    Err(err) => {
                        warn!(
                            %run_id,
                            step = index,
                            operation = operation.name(),
                            error_type = err.label(),
                            error = %err,
                            "Operation failed; continuing with unchanged state"
                        );
                        StepOutcome::Failed(err)
                    }
                };
                steps.push(StepReport { operation: operation.name(), element: None, outcome });
                continue;
            };

            let elements = match fanout.elements {
                Ok(elements) => elements,
                Err(err) => {
                    warn!(
                        %run_id,
                        step = index,
                        error_type = err.label(),
                        error = %err,
                        "Could not select elements; skipping step"
                    );
                    steps.push(StepReport {
                        operation: operation.name(),
                        element: None,
                        outcome: StepOutcome::Failed(err),
                    });
                    continue;
                }
            };

            let inner = fanout.inner;
            let mut results = Vec::with_capacity(elements.len());
            for (element, data) in elements.into_iter().enumerate() {
                let scoped = State { data, references: state.references.clone() };
                let outcome = match inner.execute(service, &session, &scoped).await {
                    Ok(value) => {
                        results.push(value);
                        StepOutcome::Succeeded
                    }
                    Err(err) => {
                        warn!(
                            %run_id,
                            step = index,
                            element,
                            operation = inner.name(),
                            error_type = err.label(),
                            error = %err,
                            "Element failed; continuing with the next one"
                        );
                        StepOutcome::Failed(err)
                    }
                };
                steps.push(StepReport { operation: inner.name(), element: Some(element), outcome });
            }
            state = state.compose_next(Value::Array(results));
        }

        let report =
            PipelineReport { run_id, started_at, finished_at: Utc::now(), state, steps };
        info!(
            %run_id,
            succeeded = report.succeeded(),
            failed = report.steps.len() - report.succeeded(),
            "Pipeline finished"
        );
        Ok(report)
    }
}
