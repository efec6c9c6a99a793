//! Worker runner: a pool of independent workers claiming jobs one at a time.

use std::any::Any;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinSet;

use jobhub_core::config::WorkerConfig;
use jobhub_entity::job::JobMessage;

use crate::executor::JobHandler;
use crate::queue::JobQueue;

/// Pause after a transport error before polling again.
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Main worker runner that claims and executes jobs
#[derive(Debug, Clone)]
pub struct WorkerRunner {
    /// Job queue for claiming and recording
    queue: Arc<JobQueue>,
    /// Handler that runs each job
    handler: Arc<dyn JobHandler>,
    /// Worker configuration
    config: WorkerConfig,
    /// Identifier prefix for this pool
    worker_id: String,
}

impl WorkerRunner {
    /// Create a new worker runner
    pub fn new(
        queue: Arc<JobQueue>,
        handler: Arc<dyn JobHandler>,
        config: WorkerConfig,
        worker_id: String,
    ) -> Self {
        Self {
            queue,
            handler,
            config,
            worker_id,
        }
    }

    /// Run the pool until the cancel signal is received.
    ///
    /// Each worker finishes its in-flight job before exiting, so this returns
    /// only once every claimed job has a terminal record.
    pub async fn run(&self, cancel: watch::Receiver<bool>) {
        let concurrency = self.config.concurrency.max(1);
        tracing::info!(
            worker_id = %self.worker_id,
            concurrency,
            poll_interval_seconds = self.config.poll_interval_seconds,
            "Worker pool started"
        );

        let mut workers = JoinSet::new();
        for n in 1..=concurrency {
            let runner = self.clone();
            let cancel = cancel.clone();
            let id = format!("{}-{n}", self.worker_id);
            workers.spawn(async move { runner.worker_loop(id, cancel).await });
        }

        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                tracing::error!(error = %e, "Worker loop terminated abnormally");
            }
        }

        tracing::info!(worker_id = %self.worker_id, "Worker pool shut down complete");
    }

    /// One worker: poll, claim, execute, record, repeat.
    async fn worker_loop(&self, worker_id: String, cancel: watch::Receiver<bool>) {
        let poll_timeout = Duration::from_secs(self.config.poll_interval_seconds.max(1));
        tracing::debug!(worker_id = %worker_id, "Worker started");

        // The pop itself is never cancelled mid-flight: a claimed message
        // always runs to a terminal record.
        while !*cancel.borrow() {
            match self.queue.dequeue(poll_timeout).await {
                Ok(Some(message)) => self.process(&worker_id, message).await,
                Ok(None) => tracing::trace!(worker_id = %worker_id, "No jobs available"),
                Err(e) if e.is_transport_unavailable() => {
                    tracing::warn!(worker_id = %worker_id, error = %e, "Job transport unavailable, backing off");
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
                Err(e) => {
                    tracing::error!(worker_id = %worker_id, error = %e, "Failed to dequeue job");
                    tokio::time::sleep(ERROR_BACKOFF).await;
                }
            }
        }

        tracing::info!(worker_id = %worker_id, "Worker received shutdown signal");
    }

    /// Execute one claimed job behind a failure boundary.
    pub async fn process(&self, worker_id: &str, message: JobMessage) {
        let job_id = message.id;
        let task_type = message.task.task_type();

        match self.queue.mark_started(&message, worker_id).await {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(job_id = %job_id, "Job already claimed or finished, skipping");
                return;
            }
            Err(e) => {
                // Execution still proceeds: the terminal write below will
                // retry the transport.
                tracing::error!(job_id = %job_id, error = %e, "Failed to mark job as started");
            }
        }

        tracing::info!(job_id = %job_id, task_type = %task_type, worker_id, "Processing job");

        let handler = Arc::clone(&self.handler);
        let job = message.clone();
        let outcome = tokio::spawn(async move { handler.execute(&job).await }).await;

        let written = match outcome {
            Ok(Ok(result)) => {
                tracing::info!(job_id = %job_id, task_type = %task_type, "Job completed successfully");
                self.queue.complete(&message, result).await
            }
            Ok(Err(e)) => {
                tracing::error!(job_id = %job_id, task_type = %task_type, error = %e, "Job failed");
                self.queue.fail(&message, &e.failure_message()).await
            }
            Err(join_err) => {
                let reason = if join_err.is_panic() {
                    format!("Task panicked: {}", panic_message(join_err.into_panic()))
                } else {
                    "Task was cancelled".to_string()
                };
                tracing::error!(job_id = %job_id, task_type = %task_type, %reason, "Job aborted");
                self.queue.fail(&message, &reason).await
            }
        };

        if let Err(e) = written {
            tracing::error!(job_id = %job_id, error = %e, "Failed to record job outcome");
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
