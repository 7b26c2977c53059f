use std::fmt;

use serde::Deserialize;

/// Lifecycle state of an asynchronous media job.
///
/// Only [`Success`](JobStatus::Success) and [`Failed`](JobStatus::Failed)
/// are terminal. Values this client does not recognize are preserved in
/// [`Other`](JobStatus::Other) and treated as still in progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Pending,
    Running,
    Success,
    Failed,
    /// A status value this client does not recognize.
    Other(String),
}

impl JobStatus {
    /// Terminal = polling stops (`Success` or `Failed`).
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Success | JobStatus::Failed)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Success)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, JobStatus::Failed)
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "Pending" => JobStatus::Pending,
            "Running" => JobStatus::Running,
            "Success" => JobStatus::Success,
            "Failed" => JobStatus::Failed,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Pending => f.write_str("Pending"),
            JobStatus::Running => f.write_str("Running"),
            JobStatus::Success => f.write_str("Success"),
            JobStatus::Failed => f.write_str("Failed"),
            JobStatus::Other(s) => f.write_str(s),
        }
    }
}

/// One observation of a job's state, as returned by a status query.
#[derive(Debug, Clone)]
pub struct JobSnapshot {
    pub status: JobStatus,
    /// Percent complete (0-100), when the service reports it.
    pub progress: Option<u64>,
    /// Service-specific result payload, present once the job succeeds.
    pub result: Option<serde_json::Value>,
    /// Full status response JSON.
    pub raw: serde_json::Value,
}

impl JobSnapshot {
    /// The `media_info` object inside `result`, produced by the Diagnose API.
    ///
    /// `None` if the job hasn't succeeded yet or the response carried no
    /// result payload.
    pub fn media_info(&self) -> Option<&serde_json::Value> {
        self.result.as_ref()?.get("media_info")
    }

    /// Human-readable failure detail from the response's `error` object.
    pub fn error_detail(&self) -> Option<&str> {
        let error = self.raw.get("error")?;
        error
            .get("detail")
            .or_else(|| error.get("title"))
            .and_then(|v| v.as_str())
    }
}

/// Polling config for [`wait_for_job`](crate::Client::wait_for_job) and the
/// one-shot `transcode` / `diagnose` methods.
pub struct PollOptions {
    /// Time between status queries. Default: 10s.
    pub interval: std::time::Duration,
    /// Give up after this long without a terminal status. Default: 24h.
    pub timeout: std::time::Duration,
    /// Called with every snapshot observed while waiting.
    #[allow(clippy::type_complexity)]
    pub on_progress: Option<Box<dyn Fn(&JobSnapshot) + Send>>,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            interval: std::time::Duration::from_secs(10),
            timeout: std::time::Duration::from_secs(24 * 60 * 60),
            on_progress: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal deserialization helpers (not part of the public API surface)
// ---------------------------------------------------------------------------

/// Response to a job-creation POST.
#[derive(Deserialize)]
pub(crate) struct CreateJobResponse {
    pub job_id: String,
}

/// POST /media/input response.
#[derive(Deserialize)]
pub(crate) struct MediaInputResponse {
    pub url: String,
}

/// Pull a string out of a JSON value, or `""` if missing.
pub(crate) fn json_str(val: &serde_json::Value, key: &str) -> String {
    val.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

/// Parse a raw status response into a [`JobSnapshot`].
pub(crate) fn snapshot_from_value(val: serde_json::Value) -> JobSnapshot {
    JobSnapshot {
        status: JobStatus::from(json_str(&val, "status").as_str()),
        progress: val.get("progress").and_then(|v| v.as_u64()),
        result: val.get("result").cloned(),
        raw: val,
    }
}
