use std::future::Future;

use tokio::task::{AbortHandle, JoinError, JoinSet};
use tracing::{debug, error};

use crate::EngineError;

type TaskOutput = (&'static str, Result<(), EngineError>);

/// Detached background work owned by the state machine.
///
/// Failures and panics are logged when the task is reaped, they never reach
/// the event loop. Dropping the set aborts what is still running.
#[derive(Default)]
pub struct TaskSet {
    tasks: JoinSet<TaskOutput>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` in the background. The returned handle cancels it.
    pub fn spawn<F>(&mut self, name: &'static str, task: F) -> AbortHandle
    where
        F: Future<Output = Result<(), EngineError>> + Send + 'static,
    {
        self.reap();
        debug!(task = name, "🧵 Spawning background task");
        self.tasks.spawn(async move { (name, task.await) })
    }

    /// Collect the tasks that already finished.
    pub fn reap(&mut self) {
        while let Some(result) = self.tasks.try_join_next() {
            Self::report(result);
        }
    }

    /// Wait for every running task.
    pub async fn join_all(&mut self) {
        while let Some(result) = self.tasks.join_next().await {
            Self::report(result);
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    fn report(result: Result<TaskOutput, JoinError>) {
        match result {
            Ok((name, Ok(()))) => debug!(task = name, "🧵 Background task finished"),
            Ok((name, Err(e))) => error!(task = name, error = %e, "🧵 ❌ Background task failed"),
            Err(e) if e.is_panic() => error!(error = %e, "🧵 ❌ Background task panicked"),
            Err(e) => debug!(error = %e, "🧵 Background task cancelled"),
        }
    }
}
