//! Paths of the Dolby.io Media API endpoints.
//!
//! The job endpoints ([`TRANSCODE`], [`DIAGNOSE`], [`ENHANCE`], [`ANALYZE`])
//! all follow the same protocol: POST a request body to create a job, then
//! GET the same path with a `job_id` query parameter to check on it. Pass
//! them to [`Client::submit_job`](crate::Client::submit_job),
//! [`Client::job_status`](crate::Client::job_status), and
//! [`Client::wait_for_job`](crate::Client::wait_for_job).

/// Media Input API: exchange a `dlb://` location for a presigned upload URL.
pub const INPUT: &str = "/media/input";

/// Media Output API: stream a processed file down from a `dlb://` location.
pub const OUTPUT: &str = "/media/output";

/// Media Transcode API.
pub const TRANSCODE: &str = "/media/transcode";

/// Media Diagnose API.
pub const DIAGNOSE: &str = "/media/diagnose";

/// Media Enhance API.
pub const ENHANCE: &str = "/media/enhance";

/// Media Analyze API.
pub const ANALYZE: &str = "/media/analyze";
