//! Named repeating background tasks.
//!
//! Each registered task runs in its own tokio task: invoke the callback,
//! log any error tagged with the task name, sleep for the configured
//! interval, repeat. A failing callback never terminates its loop. Tasks
//! run independently of each other and of request handling; the only
//! lifecycle control is [`TaskRunner::shutdown`], which cancels all loops
//! at their next sleep point.

use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

type TaskCallback = Box<dyn Fn() -> BoxFuture<'static, anyhow::Result<()>> + Send + Sync>;

struct TaskDef {
    name: String,
    interval: Duration,
    callback: TaskCallback,
}

/// A set of named background tasks, registered before the server starts.
#[derive(Default)]
pub struct TaskSet {
    tasks: Vec<TaskDef>,
}

impl TaskSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a named task that reruns `callback` every `interval`.
    pub fn register<F, Fut>(mut self, name: impl Into<String>, interval: Duration, callback: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        self.tasks.push(TaskDef {
            name: name.into(),
            interval,
            callback: Box::new(move || Box::pin(callback())),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Spawns one independent tokio task per registered entry and returns
    /// the runner handle used for shutdown.
    pub fn spawn(self) -> TaskRunner {
        let cancel = CancellationToken::new();
        let mut handles = Vec::with_capacity(self.tasks.len());

        for task in self.tasks {
            let token = cancel.clone();
            handles.push(tokio::spawn(async move {
                info!("Starting background task {}", task.name);
                loop {
                    if let Err(e) = (task.callback)().await {
                        error!("Encountered error in background task {}: {:#}", task.name, e);
                    }
                    tokio::select! {
                        _ = token.cancelled() => {
                            debug!("Background task {} stopped", task.name);
                            break;
                        }
                        _ = tokio::time::sleep(task.interval) => {}
                    }
                }
            }));
        }

        TaskRunner { cancel, handles }
    }
}

/// Handle to the spawned background tasks.
pub struct TaskRunner {
    cancel: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl TaskRunner {
    /// Cancels all task loops and waits for them to finish. A task that is
    /// mid-callback completes its current iteration first.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        for handle in self.handles {
            let _ = handle.await;
        }
    }
}
