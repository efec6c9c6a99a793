//! Job queue: the broker's FIFO plus the result store, with forward-only writes.

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use jobhub_broker::{BrokerManager, keys};
use jobhub_core::config::BrokerConfig;
use jobhub_core::result::AppResult;
use jobhub_core::traits::broker::BrokerProvider;
use jobhub_core::types::id::JobId;
use jobhub_entity::job::{JobMessage, JobRecord, JobState};

/// Job queue for enqueuing, claiming, and recording jobs
#[derive(Debug, Clone)]
pub struct JobQueue {
    /// Transport holding both the queue and the records
    broker: BrokerManager,
    /// Queue name
    queue_name: String,
    /// Retention of job records
    result_ttl: Duration,
}

impl JobQueue {
    /// Create a new job queue
    pub fn new(broker: BrokerManager, config: &BrokerConfig) -> Self {
        Self {
            broker,
            queue_name: config.queue_name.clone(),
            result_ttl: Duration::from_secs(config.result_ttl_seconds),
        }
    }

    /// The underlying transport.
    pub fn broker(&self) -> &BrokerManager {
        &self.broker
    }

    /// Enqueue a job.
    ///
    /// The `PENDING` record is written before the message is pushed, so any
    /// id a client receives already has a record. If the push fails the
    /// record is removed and the transport error is returned.
    pub async fn enqueue(&self, message: &JobMessage) -> AppResult<JobRecord> {
        let record = JobRecord::pending(message);
        self.write(&record).await?;

        let payload = serde_json::to_string(message)?;
        if let Err(e) = self
            .broker
            .push(&keys::queue(&self.queue_name), &payload)
            .await
        {
            // No id is handed out, so the record must not outlive the failed push.
            if let Err(cleanup) = self.broker.delete(&keys::task_meta(message.id)).await {
                warn!(job_id = %message.id, error = %cleanup, "Failed to remove orphaned job record");
            }
            return Err(e);
        }

        debug!(
            job_id = %message.id,
            task_type = %record.task_type,
            queue = %self.queue_name,
            "Enqueued job"
        );
        Ok(record)
    }

    /// Claim the next message, waiting up to `timeout`.
    ///
    /// Messages that fail to decode are dropped with a warning.
    pub async fn dequeue(&self, timeout: Duration) -> AppResult<Option<JobMessage>> {
        let Some(raw) = self
            .broker
            .pop(&keys::queue(&self.queue_name), timeout)
            .await?
        else {
            return Ok(None);
        };

        match serde_json::from_str::<JobMessage>(&raw) {
            Ok(message) => Ok(Some(message)),
            Err(e) => {
                warn!(error = %e, "Skipping undecodable queue message");
                Ok(None)
            }
        }
    }

    /// Number of messages waiting.
    pub async fn queue_len(&self) -> AppResult<u64> {
        self.broker.queue_len(&keys::queue(&self.queue_name)).await
    }

    /// Load a job record.
    pub async fn get_record(&self, id: JobId) -> AppResult<Option<JobRecord>> {
        self.broker.get_json(&keys::task_meta(id)).await
    }

    /// Mark a claimed job as started. Returns `false` if the record had
    /// already moved past `PENDING`, in which case the job must not run.
    pub async fn mark_started(&self, message: &JobMessage, worker_id: &str) -> AppResult<bool> {
        // A record lost to TTL eviction is recreated from the message.
        let current = self
            .get_record(message.id)
            .await?
            .unwrap_or_else(|| JobRecord::pending(message));
        self.advance(current, JobState::Started, |r| r.started(worker_id))
            .await
    }

    /// Record a successful result.
    pub async fn complete(&self, message: &JobMessage, result: Value) -> AppResult<bool> {
        let current = self.current_or_started(message).await?;
        self.advance(current, JobState::Success, |r| r.succeeded(result))
            .await
    }

    /// Record a failure.
    pub async fn fail(&self, message: &JobMessage, error: &str) -> AppResult<bool> {
        let current = self.current_or_started(message).await?;
        self.advance(current, JobState::Failure, |r| r.failed(error))
            .await
    }

    async fn current_or_started(&self, message: &JobMessage) -> AppResult<JobRecord> {
        Ok(self
            .get_record(message.id)
            .await?
            .unwrap_or_else(|| JobRecord::pending(message).started("unknown")))
    }

    async fn advance(
        &self,
        current: JobRecord,
        next: JobState,
        apply: impl FnOnce(JobRecord) -> JobRecord,
    ) -> AppResult<bool> {
        if !current.state.can_transition_to(next) {
            warn!(
                job_id = %current.id,
                from = %current.state,
                to = %next,
                "Refusing job state regression"
            );
            return Ok(false);
        }
        let id = current.id;
        self.write(&apply(current)).await?;
        debug!(job_id = %id, state = %next, "Job state updated");
        Ok(true)
    }

    async fn write(&self, record: &JobRecord) -> AppResult<()> {
        self.broker
            .set_json(&keys::task_meta(record.id), record, self.result_ttl)
            .await
    }
}
