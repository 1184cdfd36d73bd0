use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::warn;
use serde::{Deserialize, Serialize};

/// Claims carried by the bearer token. The API gateway in front of the
/// service verifies the signature; here we only extract the subject.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
}

/// Extracts the authenticated user id from the `Authorization: Bearer` header
/// and inserts it as a request extension, so handlers can take
/// `Extension<String>`. Requests without a decodable token are rejected with
/// the standard error envelope.
pub async fn auth_middleware(mut req: Request, next: Next) -> Response {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    let token = match token {
        Some(token) => token,
        None => {
            warn!("Request rejected: missing bearer token");
            return unauthorized("Missing authorization token");
        }
    };

    match decode_user_id(token) {
        Ok(user_id) => {
            req.extensions_mut().insert(user_id);
            next.run(req).await
        }
        Err(e) => {
            warn!("Request rejected: invalid bearer token: {}", e);
            unauthorized("Invalid authorization token")
        }
    }
}

fn decode_user_id(token: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Signature and expiry are enforced upstream by the gateway.
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let token_data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(token_data.claims.sub)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "success": false,
            "message": message,
            "data": {}
        })),
    )
        .into_response()
}

/// Builds an authenticated request for handler tests, with the given user id
/// baked into a bearer token.
#[cfg(any(test, feature = "test_utils"))]
pub fn create_test_request(
    method: &str,
    path: &str,
    user_id: &str,
    body: Option<serde_json::Value>,
) -> Request<axum::body::Body> {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use jsonwebtoken::{encode, EncodingKey, Header};

    let claims = Claims {
        sub: user_id.to_string(),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("failed to encode test token");

    let mut builder = axum::http::Request::builder()
        .method(method)
        .uri(path)
        .header(AUTHORIZATION, format!("Bearer {}", token));

    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize test body"))
        }
        None => Body::empty(),
    };

    builder.body(body).expect("failed to build test request")
}
