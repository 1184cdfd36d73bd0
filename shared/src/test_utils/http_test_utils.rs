use axum::response::Response;
use http_body_util::BodyExt;

/// Collects a response body and parses it as JSON.
pub async fn response_to_json(response: Response) -> serde_json::Value {
    let body = response
        .into_body()
        .collect()
        .await
        .expect("failed to collect response body")
        .to_bytes();
    serde_json::from_slice(&body).expect("response body was not valid JSON")
}
