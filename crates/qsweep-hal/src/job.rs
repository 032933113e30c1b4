//! Job identifiers and lifecycle.
//!
//! ```text
//!   submit() ──→ Queued ──→ Running ──→ Completed
//!                  │           ├──────→ Failed(reason)
//!                  └───────────┴──────→ Cancelled
//! ```
//!
//! A job never leaves `Completed`, `Failed` or `Cancelled`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Opaque job handle issued by `Backend::submit`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    /// Wrap a backend-issued identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as issued.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for JobId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Where a job is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// Accepted, not started.
    Queued,
    /// Executing on the backend.
    Running,
    /// Finished; the result can be fetched.
    Completed,
    /// Finished with an error, carrying the backend's reason.
    Failed(String),
    /// Stopped by `Backend::cancel`.
    Cancelled,
}

impl JobStatus {
    /// Completed, failed or cancelled.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued | Self::Running)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Queued => f.write_str("queued"),
            Self::Running => f.write_str("running"),
            Self::Completed => f.write_str("completed"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Book-keeping for one submitted circuit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub status: JobStatus,
    /// Shots requested at submission.
    pub shots: u32,
    pub submitted_at: DateTime<Utc>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl Job {
    /// A queued job, stamped with the current time.
    pub fn new(id: JobId, shots: u32) -> Self {
        Self {
            id,
            status: JobStatus::Queued,
            shots,
            submitted_at: Utc::now(),
            started_at: None,
            finished_at: None,
        }
    }

    /// Move to `next` and stamp the time. Returns `false`, leaving the job
    /// untouched, when it has already finished.
    pub fn transition(&mut self, next: JobStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let now = Utc::now();
        if next == JobStatus::Running {
            self.started_at.get_or_insert(now);
        }
        if next.is_terminal() {
            self.finished_at = Some(now);
        }
        self.status = next;
        true
    }

    /// Time spent running, once the job has finished.
    pub fn run_time(&self) -> Option<chrono::Duration> {
        Some(self.finished_at? - self.started_at?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_queued_and_running_are_pending() {
        assert!(!JobStatus::Queued.is_terminal());
        assert!(!JobStatus::Running.is_terminal());
        assert!(JobStatus::Completed.is_terminal());
        assert!(JobStatus::Failed("boom".into()).is_terminal());
        assert!(JobStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_run_time_needs_start_and_finish() {
        let mut job = Job::new(JobId::from("a"), 16);
        assert!(job.run_time().is_none());

        assert!(job.transition(JobStatus::Running));
        assert!(job.run_time().is_none());

        assert!(job.transition(JobStatus::Completed));
        assert!(job.run_time().is_some_and(|d| d >= chrono::Duration::zero()));
    }

    #[test]
    fn test_finished_job_ignores_transitions() {
        let mut job = Job::new(JobId::from("b"), 1);
        job.transition(JobStatus::Cancelled);
        assert!(!job.transition(JobStatus::Running));
        assert_eq!(job.status, JobStatus::Cancelled);
        assert!(job.started_at.is_none());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(JobStatus::Running.to_string(), "running");
        assert_eq!(JobStatus::Failed("oom".into()).to_string(), "failed (oom)");
    }
}
