//! The [`Backend`] trait and backend configuration.
//!
//! A circuit goes through
//!
//! ```text
//!   validate() ──→ submit() ──→ status() ...──→ result()
//! ```
//!
//! and [`Backend::run`] chains `submit` and [`Backend::wait`] for callers
//! that just want counts.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::time::{Instant, sleep};
use tracing::trace;

use qsweep_ir::Circuit;

use crate::capability::Capabilities;
use crate::error::{HalError, HalResult};
use crate::job::{JobId, JobStatus};
use crate::result::ExecutionResult;

/// First poll delay of [`Backend::wait`]; doubles up to [`MAX_POLL_INTERVAL`].
const INITIAL_POLL_INTERVAL: Duration = Duration::from_millis(1);
const MAX_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// How long [`Backend::wait`] polls before giving up.
pub const WAIT_TIMEOUT: Duration = Duration::from_secs(300);

/// Name plus free-form backend options.
///
/// Options are flattened when (de)serialized, so a YAML block such as
///
/// ```yaml
/// name: simulator
/// method: stabilizer
/// seed: 7
/// ```
///
/// maps straight onto a config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl BackendConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Map::new(),
        }
    }

    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Unsigned integer option; absent and `null` both read as `None`.
    pub fn option_u64(&self, key: &str) -> HalResult<Option<u64>> {
        self.option(key, Value::as_u64, "a non-negative integer")
    }

    /// String option; absent and `null` both read as `None`.
    pub fn option_str(&self, key: &str) -> HalResult<Option<&str>> {
        self.option(key, Value::as_str, "a string")
    }

    fn option<'a, T>(
        &'a self,
        key: &str,
        read: impl FnOnce(&'a Value) -> Option<T>,
        expected: &str,
    ) -> HalResult<Option<T>> {
        match self.options.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => read(value).map(Some).ok_or_else(|| {
                HalError::Configuration(format!("option '{key}' must be {expected}, got {value}"))
            }),
        }
    }
}

/// A device or simulator that runs circuits as jobs.
///
/// `capabilities()` is fixed for the lifetime of the backend. `submit()`
/// returns once the job is at least `Queued`; a local backend may already
/// have finished it.
#[async_trait]
pub trait Backend: Send + Sync {
    fn name(&self) -> &str;

    fn capabilities(&self) -> &Capabilities;

    /// Check `circuit` against the backend's limits without submitting it.
    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult>;

    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId>;

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus>;

    /// Counts of a `Completed` job.
    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult>;

    async fn cancel(&self, job_id: &JobId) -> HalResult<()>;

    /// Poll until the job finishes, backing off from 1 ms to 250 ms between
    /// polls, and fail with [`HalError::Timeout`] after [`WAIT_TIMEOUT`].
    async fn wait(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let deadline = Instant::now() + WAIT_TIMEOUT;
        let mut interval = INITIAL_POLL_INTERVAL;
        loop {
            let status = self.status(job_id).await?;
            trace!(job = %job_id, %status, "polled job");
            match status {
                JobStatus::Completed => return self.result(job_id).await,
                JobStatus::Failed(reason) => return Err(HalError::JobFailed(reason)),
                JobStatus::Cancelled => return Err(HalError::JobCancelled),
                JobStatus::Queued | JobStatus::Running => {}
            }
            if Instant::now() + interval > deadline {
                return Err(HalError::Timeout(job_id.clone()));
            }
            sleep(interval).await;
            interval = (interval * 2).min(MAX_POLL_INTERVAL);
        }
    }

    /// Submit and wait.
    async fn run(&self, circuit: &Circuit, shots: u32) -> HalResult<ExecutionResult> {
        let job_id = self.submit(circuit, shots).await?;
        self.wait(&job_id).await
    }
}

/// Outcome of [`Backend::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid { reasons: Vec<String> },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Construction of a backend from a [`BackendConfig`].
pub trait BackendFactory: Backend + Sized {
    fn from_config(config: BackendConfig) -> HalResult<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::Counts;
    use std::sync::Mutex;

    #[test]
    fn test_typed_options() {
        let config = BackendConfig::new("sim")
            .with_option("max_qubits", 24)
            .with_option("method", "stabilizer")
            .with_option("seed", Value::Null);

        assert_eq!(config.option_u64("max_qubits").unwrap(), Some(24));
        assert_eq!(config.option_str("method").unwrap(), Some("stabilizer"));
        assert_eq!(config.option_u64("seed").unwrap(), None);
        assert_eq!(config.option_u64("missing").unwrap(), None);
        assert!(matches!(
            config.option_u64("method"),
            Err(HalError::Configuration(_))
        ));
    }

    #[test]
    fn test_config_flattens_options() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"name": "sim", "method": "statevector", "seed": 3}"#).unwrap();
        assert_eq!(config.name, "sim");
        assert_eq!(config.option_str("method").unwrap(), Some("statevector"));
        assert_eq!(config.option_u64("seed").unwrap(), Some(3));
    }

    /// Reports `Running` until `finish_after` polls, then `terminal`.
    struct ScriptedBackend {
        caps: Capabilities,
        polls: Mutex<u32>,
        finish_after: u32,
        terminal: JobStatus,
    }

    impl ScriptedBackend {
        fn new(finish_after: u32, terminal: JobStatus) -> Self {
            Self {
                caps: Capabilities::simulator(1),
                polls: Mutex::new(0),
                finish_after,
                terminal,
            }
        }
    }

    #[async_trait]
    impl Backend for ScriptedBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        fn capabilities(&self) -> &Capabilities {
            &self.caps
        }

        async fn validate(&self, _circuit: &Circuit) -> HalResult<ValidationResult> {
            Ok(ValidationResult::Valid)
        }

        async fn submit(&self, _circuit: &Circuit, _shots: u32) -> HalResult<JobId> {
            Ok(JobId::from("job-1"))
        }

        async fn status(&self, _job_id: &JobId) -> HalResult<JobStatus> {
            let mut polls = self.polls.lock().unwrap();
            *polls += 1;
            Ok(if *polls >= self.finish_after {
                self.terminal.clone()
            } else {
                JobStatus::Running
            })
        }

        async fn result(&self, _job_id: &JobId) -> HalResult<ExecutionResult> {
            Ok(ExecutionResult::new(Counts::from_pairs([("0", 8)]), 8))
        }

        async fn cancel(&self, _job_id: &JobId) -> HalResult<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_until_completed() {
        let backend = ScriptedBackend::new(4, JobStatus::Completed);
        let circuit = Circuit::with_size("c", 1, 1);
        let result = backend.run(&circuit, 8).await.unwrap();
        assert_eq!(result.counts.get("0"), 8);
        assert_eq!(*backend.polls.lock().unwrap(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_surfaces_failure() {
        let backend = ScriptedBackend::new(2, JobStatus::Failed("diverged".into()));
        let err = backend.wait(&JobId::from("job-1")).await.unwrap_err();
        assert!(matches!(err, HalError::JobFailed(reason) if reason == "diverged"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wait_times_out() {
        let backend = ScriptedBackend::new(u32::MAX, JobStatus::Completed);
        let err = backend.wait(&JobId::from("job-1")).await.unwrap_err();
        assert!(matches!(err, HalError::Timeout(_)));
    }
}
