use axum::{
    Json,
    http::{HeaderMap, header::ORIGIN},
};
use serde::Serialize;

use super::timestamp;

#[derive(Serialize)]
pub struct EchoResponse {
    pub message: &'static str,
    pub timestamp: String,
    pub client: String,
    pub success: bool,
}

/// Greets the caller and reports which origin it declared.
pub async fn handle_echo(headers: HeaderMap) -> Json<EchoResponse> {
    let client = headers
        .get(ORIGIN)
        .and_then(|origin| origin.to_str().ok())
        .filter(|origin| !origin.is_empty())
        .unwrap_or("unknown")
        .to_owned();

    Json(EchoResponse {
        message: "Hello from Backend!",
        timestamp: timestamp(),
        client,
        success: true,
    })
}
