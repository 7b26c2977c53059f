//! # Dolby.io Media client for Rust
//!
//! Rust client for the [Dolby.io](https://dolby.io) Media Processing APIs.
//! Upload media to temporary cloud storage, submit transcode and diagnose
//! jobs, poll for completion, and download results -- all with idiomatic
//! async Rust.
//!
//! ## Quick start
//!
//! ```no_run
//! use dolby_media::Client;
//!
//! #[tokio::main]
//! async fn main() -> dolby_media::Result<()> {
//!     let client = Client::new("a1b2c3d4e5f6");
//!
//!     // Stage a local file at a dlb:// location, then inspect it
//!     client.upload("interview.mp4", "dlb://in/interview.mp4").await?;
//!     let media_info = client.diagnose("dlb://in/interview.mp4", None).await?;
//!
//!     println!("{media_info:#}");
//!     Ok(())
//! }
//! ```
//!
//! ## Builder pattern
//!
//! ```no_run
//! use dolby_media::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> dolby_media::Result<()> {
//! let client = ClientBuilder::new()
//!     .api_key("a1b2c3d4e5f6")
//!     .base_url("https://api.dolby.com")
//!     .request_timeout(Duration::from_secs(120))
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How jobs work
//!
//! Processing is asynchronous on the service side: creating a job returns a
//! `job_id`, and the client checks on it by querying the same endpoint until
//! the job reports `Success`. The one-shot [`Client::transcode`] and
//! [`Client::diagnose`] methods wrap the whole submit/poll/finish cycle;
//! [`Client::submit_job`], [`Client::job_status`], and
//! [`Client::wait_for_job`] expose the pieces for any job endpoint in
//! [`endpoints`].

mod client;
mod errors;
mod models;

pub mod endpoints;

pub use client::{Client, ClientBuilder};
pub use errors::{DolbyMediaError, Result};
pub use models::{JobSnapshot, JobStatus, PollOptions};
