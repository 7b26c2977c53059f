//! Quick-start walkthrough for the Dolby.io Media client.
//!
//! Run with:
//!   DOLBYIO_API_KEY=... cargo run --example quickstart
//!
//! A .env file in the working directory is also honored. Or pass the key
//! directly in code (not recommended for production).

use dolby_media::{endpoints, ClientBuilder, PollOptions};
use std::time::Duration;

#[tokio::main]
async fn main() -> dolby_media::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    // -----------------------------------------------------------------------
    // 1. Create a client (reads DOLBYIO_API_KEY from the environment)
    // -----------------------------------------------------------------------
    let client = ClientBuilder::new().build()?;

    // Or provide the key directly:
    // let client = dolby_media::Client::new("a1b2c3d4e5f6");

    // -----------------------------------------------------------------------
    // 2. Upload a local file to Dolby.io temporary storage
    // -----------------------------------------------------------------------
    client
        .upload("videos/airplane-landing.mp4", "dlb://in/airplane-landing.mp4")
        .await?;

    // -----------------------------------------------------------------------
    // 3. Diagnose it (the result comes back inline)
    // -----------------------------------------------------------------------
    let media_info = client
        .diagnose("dlb://in/airplane-landing.mp4", None)
        .await?;
    println!("Media info: {media_info:#}");

    // -----------------------------------------------------------------------
    // 4. Transcode to 720p with a progress callback, download the output
    // -----------------------------------------------------------------------
    let request = serde_json::json!({
        "inputs": [{ "source": "dlb://in/airplane-landing.mp4" }],
        "outputs": [{
            "id": "mp4_720p",
            "destination": "dlb://out/airplane-landing-720p.mp4",
            "kind": "mp4",
            "video": { "codec": "h264", "height": 720 }
        }]
    });

    let opts = PollOptions {
        interval: Duration::from_secs(10),
        timeout: Duration::from_secs(30 * 60),
        on_progress: Some(Box::new(|snapshot| match snapshot.progress {
            Some(pct) => println!("  {} ({pct}%)", snapshot.status),
            None => println!("  {}", snapshot.status),
        })),
    };

    let bytes = client
        .transcode(
            &request,
            "dlb://out/airplane-landing-720p.mp4",
            "videos/airplane-landing-720p.mp4",
            Some(opts),
        )
        .await?;
    println!("Transcoded file downloaded ({bytes} bytes).");

    // -----------------------------------------------------------------------
    // 5. The job-level API, for endpoints without a one-shot wrapper
    // -----------------------------------------------------------------------
    let job_id = client
        .submit_job(
            endpoints::ENHANCE,
            &serde_json::json!({
                "input": "dlb://in/airplane-landing.mp4",
                "output": "dlb://out/airplane-landing-enhanced.mp4"
            }),
        )
        .await?;
    println!("Enhance job ID: {job_id}");

    let snapshot = client
        .wait_for_job(endpoints::ENHANCE, &job_id, &PollOptions::default())
        .await?;
    println!("Enhance finished: {}", snapshot.status);

    client
        .download(
            "dlb://out/airplane-landing-enhanced.mp4",
            "videos/airplane-landing-enhanced.mp4",
        )
        .await?;

    Ok(())
}
