use std::path::Path;
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderValue, ACCEPT, CONTENT_LENGTH, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tokio::io::AsyncWriteExt;
use tokio::time::Instant;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use crate::endpoints;
use crate::errors::{DolbyMediaError, Result};
use crate::models::{
    snapshot_from_value, CreateJobResponse, JobSnapshot, MediaInputResponse, PollOptions,
};

const DEFAULT_BASE_URL: &str = "https://api.dolby.com";
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const API_KEY_HEADER: &str = "x-api-key";
const API_KEY_ENV: &str = "DOLBYIO_API_KEY";

/// Builder for constructing a [`Client`] with custom configuration.
///
/// # Example
///
/// ```no_run
/// use dolby_media::ClientBuilder;
/// use std::time::Duration;
///
/// # fn example() -> dolby_media::Result<()> {
/// let client = ClientBuilder::new()
///     .api_key("a1b2c3d4e5f6")
///     .base_url("https://api.dolby.com")
///     .request_timeout(Duration::from_secs(120))
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    api_key: Option<String>,
    base_url: String,
    request_timeout: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Set the API key for authentication.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Override the base URL (defaults to `https://api.dolby.com`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the timeout for JSON API requests (defaults to 60 seconds).
    ///
    /// Streamed media transfers are not bounded by it; they run until the
    /// body is exhausted or the transport fails.
    pub fn request_timeout(mut self, d: Duration) -> Self {
        self.request_timeout = d;
        self
    }

    /// Build the [`Client`].
    ///
    /// If no API key was set via [`api_key`](Self::api_key), the builder will
    /// attempt to read the `DOLBYIO_API_KEY` environment variable.
    ///
    /// Returns [`DolbyMediaError::Authentication`] if no key is available.
    pub fn build(self) -> Result<Client> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| DolbyMediaError::Authentication {
                message: format!(
                    "API key is required. Pass it to ClientBuilder::api_key() \
                     or set the {API_KEY_ENV} environment variable."
                ),
            })?;

        let api_key =
            HeaderValue::from_str(&api_key).map_err(|_| DolbyMediaError::Authentication {
                message: "API key contains characters that cannot appear in a header".into(),
            })?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(DolbyMediaError::Http)?;

        Ok(Client {
            base_url: self.base_url.trim_end_matches('/').to_string(),
            api_key,
            http,
            request_timeout: self.request_timeout,
        })
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The Dolby.io Media API client.
///
/// Use [`Client::new`] for quick construction or [`ClientBuilder`] for full
/// control.
///
/// # Example
///
/// ```no_run
/// use dolby_media::Client;
///
/// # async fn example() -> dolby_media::Result<()> {
/// let client = Client::new("a1b2c3d4e5f6");
///
/// // Stage a local file at a dlb:// location, then inspect it
/// client.upload("interview.mp4", "dlb://in/interview.mp4").await?;
/// let media_info = client.diagnose("dlb://in/interview.mp4", None).await?;
/// println!("{media_info:#}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    base_url: String,
    api_key: HeaderValue,
    http: reqwest::Client,
    request_timeout: Duration,
}

impl Client {
    /// Create a new client with the given API key and default settings.
    ///
    /// For customization, use [`ClientBuilder`] instead.
    ///
    /// # Panics
    ///
    /// Panics if `api_key` contains characters that cannot appear in an HTTP
    /// header.
    pub fn new(api_key: impl Into<String>) -> Self {
        let api_key =
            HeaderValue::from_str(&api_key.into()).expect("invalid API key characters");
        let http = reqwest::Client::builder()
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            http,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Upload a local media file to Dolby.io temporary storage.
    ///
    /// This is the Media Input API. It performs two HTTP calls:
    /// 1. `POST /media/input` to register `dlb_url` (a `dlb://` location of
    ///    your choosing) and obtain a presigned upload URL.
    /// 2. `PUT` the file to the presigned URL, streamed from disk.
    ///
    /// The presigned request carries no credentials. Subsequent jobs
    /// reference the file by `dlb_url`.
    ///
    /// # Errors
    ///
    /// - [`DolbyMediaError::Io`] if the file cannot be read.
    /// - [`DolbyMediaError::Api`] if either call is rejected.
    pub async fn upload(&self, path: impl AsRef<Path>, dlb_url: &str) -> Result<()> {
        let path = path.as_ref();

        // Step 1: register the location and obtain the presigned URL.
        let resp: MediaInputResponse = self
            .post_json(endpoints::INPUT, &json!({ "url": dlb_url }))
            .await?;

        info!(file = %path.display(), url = %dlb_url, "uploading media");

        // Step 2: PUT the file to the presigned URL.
        let len = tokio::fs::metadata(path).await?.len();
        let file = tokio::fs::File::open(path).await?;

        let upload_resp = self
            .http
            .put(&resp.url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, len)
            .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
            .send()
            .await
            .map_err(DolbyMediaError::Http)?;

        if !upload_resp.status().is_success() {
            return Err(api_error(upload_resp).await);
        }

        debug!(bytes = len, "upload complete");
        Ok(())
    }

    /// Submit a transcode job and download the finished output.
    ///
    /// This is the highest-level method for the Media Transcode API: it
    /// creates the job, polls until it reaches a terminal status, then
    /// streams the processed file at `output_url` (a `dlb://` destination
    /// named in the request) to `dest`. `request` is the service-specific
    /// request body and is passed through unmodified. Use [`PollOptions`]
    /// to configure polling behavior and receive progress callbacks.
    ///
    /// Returns the number of bytes written to `dest`.
    ///
    /// # Errors
    ///
    /// - [`DolbyMediaError::Api`] if submission or a status query is rejected.
    /// - [`DolbyMediaError::JobFailed`] if the job reaches `Failed` status.
    /// - [`DolbyMediaError::Timeout`] if polling exceeds the configured timeout.
    pub async fn transcode<R>(
        &self,
        request: &R,
        output_url: &str,
        dest: impl AsRef<Path>,
        opts: Option<PollOptions>,
    ) -> Result<u64>
    where
        R: Serialize + ?Sized,
    {
        let job_id = self.submit_job(endpoints::TRANSCODE, request).await?;
        info!(%job_id, "transcode job submitted");

        let opts = opts.unwrap_or_default();
        self.wait_for_job(endpoints::TRANSCODE, &job_id, &opts)
            .await?;

        self.download(output_url, dest).await
    }

    /// Submit a diagnosis job and return the resulting `media_info`.
    ///
    /// The Media Diagnose API inspects the file at `input_url` (a previously
    /// uploaded `dlb://` location, or any URL the service can fetch) and
    /// reports container and stream details inline; there is nothing to
    /// download afterwards. The returned JSON is the service's `media_info`
    /// object, untouched.
    ///
    /// # Errors
    ///
    /// Same as [`transcode`](Self::transcode), plus
    /// [`DolbyMediaError::UnexpectedResponse`] if a successful job carries no
    /// `result.media_info`.
    pub async fn diagnose(
        &self,
        input_url: &str,
        opts: Option<PollOptions>,
    ) -> Result<serde_json::Value> {
        let job_id = self
            .submit_job(endpoints::DIAGNOSE, &json!({ "input": input_url }))
            .await?;
        info!(%job_id, "diagnosis job submitted");

        let opts = opts.unwrap_or_default();
        let snapshot = self
            .wait_for_job(endpoints::DIAGNOSE, &job_id, &opts)
            .await?;

        snapshot.media_info().cloned().ok_or_else(|| {
            DolbyMediaError::UnexpectedResponse(
                "diagnosis succeeded but the response carried no result.media_info".into(),
            )
        })
    }

    /// Create a job on any of the asynchronous job endpoints.
    ///
    /// `body` is the service-specific request and is passed through
    /// unmodified. Returns the new job's identifier; the service assigns it
    /// once and it addresses the job for its whole lifetime.
    pub async fn submit_job<B>(&self, endpoint: &str, body: &B) -> Result<String>
    where
        B: Serialize + ?Sized,
    {
        let resp: CreateJobResponse = self.post_json(endpoint, body).await?;
        Ok(resp.job_id)
    }

    /// Fetch the current state of a job from the endpoint that created it.
    pub async fn job_status(&self, endpoint: &str, job_id: &str) -> Result<JobSnapshot> {
        let raw: serde_json::Value = self.get_json(endpoint, &[("job_id", job_id)]).await?;
        Ok(snapshot_from_value(raw))
    }

    /// Poll a job at a fixed interval until it reaches a terminal status.
    ///
    /// Queries [`job_status`](Self::job_status) every `opts.interval`
    /// (default 10 seconds). Returns the final snapshot on `Success`; fails
    /// with [`DolbyMediaError::JobFailed`] on `Failed`. Any other status --
    /// including values this client does not recognize -- counts as still in
    /// progress: the observation is logged, handed to `opts.on_progress`,
    /// and the job is polled again until `opts.timeout` expires. At least
    /// one status query is always made.
    pub async fn wait_for_job(
        &self,
        endpoint: &str,
        job_id: &str,
        opts: &PollOptions,
    ) -> Result<JobSnapshot> {
        let deadline = Instant::now() + opts.timeout;

        loop {
            let snapshot = self.job_status(endpoint, job_id).await?;

            if let Some(ref cb) = opts.on_progress {
                cb(&snapshot);
            }

            if snapshot.status.is_failed() {
                let detail = snapshot
                    .error_detail()
                    .unwrap_or("no error detail in the status response");
                return Err(DolbyMediaError::JobFailed(format!(
                    "job {job_id} reached Failed status: {detail}"
                )));
            }

            if snapshot.status.is_success() {
                return Ok(snapshot);
            }

            if Instant::now() >= deadline {
                return Err(DolbyMediaError::Timeout(opts.timeout));
            }

            info!(
                %job_id,
                status = %snapshot.status,
                progress = snapshot.progress,
                "job not finished yet; polling again"
            );
            tokio::time::sleep(opts.interval).await;
        }
    }

    /// Download a processed file from Dolby.io temporary storage.
    ///
    /// This is the Media Output API: the response body is streamed to `dest`
    /// chunk by chunk, so arbitrarily large files never sit in memory. Any
    /// existing file at `dest` is overwritten.
    ///
    /// Returns the number of bytes written.
    pub async fn download(&self, media_url: &str, dest: impl AsRef<Path>) -> Result<u64> {
        let dest = dest.as_ref();

        let response = self
            .api_request(Method::GET, endpoints::OUTPUT)
            .query(&[("url", media_url)])
            .send()
            .await
            .map_err(DolbyMediaError::Http)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        info!(url = %media_url, dest = %dest.display(), "downloading media");

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(DolbyMediaError::Http)?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(bytes = written, "download complete");
        Ok(written)
    }

    // -----------------------------------------------------------------------
    // Private helpers
    // -----------------------------------------------------------------------

    /// Start a request to an API endpoint with the standard headers attached.
    ///
    /// Every call to the service carries the `x-api-key` credential plus
    /// JSON content-type and accept headers. Presigned transfers go through
    /// `self.http` directly and carry none of them.
    fn api_request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .header(API_KEY_HEADER, self.api_key.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
    }

    /// GET a JSON endpoint. A non-2xx response becomes
    /// [`DolbyMediaError::Api`] carrying the raw body text.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let response = self
            .api_request(Method::GET, path)
            .query(query)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(DolbyMediaError::Http)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response.json().await.map_err(DolbyMediaError::Http)
    }

    /// POST a JSON body and parse a JSON response. Error mapping as in
    /// [`get_json`](Self::get_json).
    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .api_request(Method::POST, path)
            .timeout(self.request_timeout)
            .json(body)
            .send()
            .await
            .map_err(DolbyMediaError::Http)?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response.json().await.map_err(DolbyMediaError::Http)
    }
}

/// Turn a non-2xx response into [`DolbyMediaError::Api`], preserving the
/// body text exactly as the service sent it.
async fn api_error(response: reqwest::Response) -> DolbyMediaError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    DolbyMediaError::Api { status, body }
}
