//! Waiting for solver runs to finish

use std::time::Duration;

use tokio::time::Instant;

use crate::ShiftboardClient;
use crate::error::Error;
use crate::model::RunStatus;
use crate::model::SolverRun;

/// Default delay between polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default overall deadline.
pub const DEFAULT_WATCH_TIMEOUT: Duration = Duration::from_secs(300);

/// Outcome of a single poll.
#[derive(Debug, Clone, PartialEq)]
pub enum PollResult {
    /// The run is still pending or running.
    Pending(SolverRun),
    /// The run completed or failed.
    Finished(SolverRun),
}

/// Polls a solver run until it reaches a terminal status.
///
/// # Example
///
/// ```ignore
/// let run = RunWatcher::new(&client, &run_id)
///     .interval(Duration::from_secs(1))
///     .on_status(|run| println!("{}", run.status))
///     .wait()
///     .await?;
/// ```
pub struct RunWatcher<'a> {
    client: &'a ShiftboardClient,
    run_id: String,
    interval: Duration,
    timeout: Duration,
    on_status: Option<Box<dyn FnMut(&SolverRun) + Send + 'a>>,
}

impl<'a> RunWatcher<'a> {
    pub fn new(client: &'a ShiftboardClient, run_id: impl Into<String>) -> Self {
        Self {
            client,
            run_id: run_id.into(),
            interval: DEFAULT_POLL_INTERVAL,
            timeout: DEFAULT_WATCH_TIMEOUT,
            on_status: None,
        }
    }

    /// Sets the delay between polls.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets the overall deadline for [`wait`](Self::wait).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Called with the run each time its status changes, including the
    /// first observation and the terminal one.
    pub fn on_status<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&SolverRun) + Send + 'a,
    {
        self.on_status = Some(Box::new(callback));
        self
    }

    /// Polls the run once.
    pub async fn poll(&self) -> Result<PollResult, Error> {
        let run = self.client.get_run(&self.run_id).await?;
        if run.status.is_terminal() {
            Ok(PollResult::Finished(run))
        } else {
            Ok(PollResult::Pending(run))
        }
    }

    /// Waits for the run to complete or fail and returns its final state.
    ///
    /// # Errors
    ///
    /// [`Error::Timeout`] when the run is still going after the deadline.
    pub async fn wait(mut self) -> Result<SolverRun, Error> {
        let deadline = Instant::now() + self.timeout;
        let mut last_status: Option<RunStatus> = None;

        loop {
            let result = self.poll().await?;
            let run = match &result {
                PollResult::Pending(run) | PollResult::Finished(run) => run,
            };

            if last_status.as_ref() != Some(&run.status) {
                log::info!("[watch] run {} is {}", self.run_id, run.status);
                if let Some(callback) = self.on_status.as_mut() {
                    callback(run);
                }
                last_status = Some(run.status.clone());
            }

            match result {
                PollResult::Finished(run) => return Ok(run),
                PollResult::Pending(_) => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(Error::Timeout(self.timeout));
                    }
                    tokio::time::sleep(self.interval.min(deadline - now)).await;
                }
            }
        }
    }
}

impl std::fmt::Debug for RunWatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunWatcher")
            .field("run_id", &self.run_id)
            .field("interval", &self.interval)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl ShiftboardClient {
    /// Creates a [`RunWatcher`] for `run_id`.
    pub fn watch_run(&self, run_id: impl Into<String>) -> RunWatcher<'_> {
        RunWatcher::new(self, run_id)
    }
}
