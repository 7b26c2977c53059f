//! Request/response behavior of the job APIs: header policy, job-id
//! extraction, and error mapping.

use dolby_media::{endpoints, Client, ClientBuilder, DolbyMediaError, JobStatus};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    ClientBuilder::new()
        .api_key("test-key")
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

#[tokio::test]
async fn submit_job_returns_the_job_id_field() {
    let server = MockServer::start().await;
    let request = json!({ "input": "dlb://in/airplane.mp4" });

    Mock::given(method("POST"))
        .and(path("/media/diagnose"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "91747d4a-2c26-4ca5-b6b3-ee26a1ec1844"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let job_id = client
        .submit_job(endpoints::DIAGNOSE, &request)
        .await
        .expect("submission should succeed");

    assert_eq!(job_id, "91747d4a-2c26-4ca5-b6b3-ee26a1ec1844");
}

#[tokio::test]
async fn every_api_request_carries_the_standard_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/transcode"))
        .and(query_param("job_id", "abc"))
        .and(header("x-api-key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "Running" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let snapshot = client
        .job_status(endpoints::TRANSCODE, "abc")
        .await
        .expect("status query should succeed");

    assert_eq!(snapshot.status, JobStatus::Running);
}

#[tokio::test]
async fn rejected_submission_carries_the_raw_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/media/transcode"))
        .respond_with(ResponseTemplate::new(422).set_body_string(r#"{"error":"invalid url"}"#))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .submit_job(endpoints::TRANSCODE, &json!({ "inputs": [] }))
        .await
        .expect_err("submission should fail");

    match err {
        DolbyMediaError::Api { status, body } => {
            assert_eq!(status, 422);
            assert_eq!(body, r#"{"error":"invalid url"}"#);
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_status_query_carries_the_raw_body_text() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/media/diagnose"))
        .and(query_param("job_id", "missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("job not found"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .job_status(endpoints::DIAGNOSE, "missing")
        .await
        .expect_err("status query should fail");

    match err {
        DolbyMediaError::Api { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "job not found");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}
