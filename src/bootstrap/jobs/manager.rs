use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// A named background job.
#[derive(Debug)]
pub struct Job {
    name: String,
    handle: JoinHandle<()>,
}

impl Job {
    pub fn new<N: Into<String>>(name: N, handle: JoinHandle<()>) -> Self {
        Self {
            name: name.into(),
            handle,
        }
    }
}

/// Keeps track of the running background jobs and shuts them down together.
#[derive(Debug, Default)]
pub struct JobManager {
    jobs: Vec<Job>,
    cancellation_token: CancellationToken,
}

impl JobManager {
    #[must_use]
    pub fn new() -> Self {
        Self {
            jobs: Vec::new(),
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn push<N: Into<String>>(&mut self, name: N, handle: JoinHandle<()>) {
        self.jobs.push(Job::new(name, handle));
    }

    /// A child token of the shared cancellation token, to hand to a job.
    #[must_use]
    pub fn new_cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Signals all jobs to stop, through the shared cancellation token.
    ///
    /// The jobs do not stop immediately; each one notices the token at its
    /// next await point and winds down on its own.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    /// Waits sequentially for all jobs to complete, with a grace timeout per
    /// job.
    pub async fn wait_for_all(mut self, grace_period: Duration) {
        for job in self.jobs.drain(..) {
            let name = job.name.clone();

            info!(job = %name, "Waiting for job to finish (timeout of {} seconds) ...", grace_period.as_secs());

            if let Ok(result) = timeout(grace_period, job.handle).await {
                if let Err(e) = result {
                    warn!(job = %name, "Job returned an error: {:?}", e);
                } else {
                    info!(job = %name, "Job completed gracefully");
                }
            } else {
                warn!(job = %name, "Job did not complete in time");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Duration;

    use super::*;

    #[tokio::test]
    async fn it_should_wait_for_all_jobs_to_finish() {
        let mut manager = JobManager::new();

        manager.push("job1", tokio::spawn(async {}));
        manager.push("job2", tokio::spawn(async {}));

        manager.wait_for_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn it_should_stop_a_job_listening_for_the_cancellation_token() {
        let mut manager = JobManager::new();

        let token = manager.new_cancellation_token();

        manager.push(
            "cancellable_job",
            tokio::spawn(async move {
                token.cancelled().await;
            }),
        );

        manager.cancel();

        manager.wait_for_all(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn it_should_survive_a_job_that_panics() {
        let mut manager = JobManager::new();

        manager.push(
            "panic_job",
            tokio::spawn(async {
                panic!("expected panic");
            }),
        );

        manager.wait_for_all(Duration::from_secs(1)).await;
    }
}
