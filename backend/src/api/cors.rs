use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Request, State},
    http::{
        HeaderValue, Method,
        header::{CONTENT_TYPE, ORIGIN},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use super::error::ApiError;

const DEFAULT_FRONTEND_URL: &str = "https://YOUR_VERCEL_APP.vercel.app";

const STATIC_ORIGINS: [&str; 3] = [
    "http://localhost:8080",
    "http://127.0.0.1:8080",
    // Docker compose service name
    "http://backend",
];

const LOOPBACK_ORIGINS: [&str; 2] = ["http://localhost", "http://127.0.0.1"];

const TRUSTED_SUFFIXES: [&str; 1] = [".vercel.app"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CorsDecision {
    Allow,
    Deny,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allowed_origins: Vec<String>,
    pub trusted_suffixes: Vec<String>,
}

impl CorsPolicy {
    pub fn from_vars(vars: &HashMap<String, String>) -> CorsPolicy {
        let frontend_url = vars
            .get("FRONTEND_URL")
            .filter(|url| !url.is_empty())
            .map(String::as_str)
            .unwrap_or(DEFAULT_FRONTEND_URL);

        let allowed_origins = STATIC_ORIGINS
            .into_iter()
            .chain([frontend_url])
            .map(str::to_owned)
            .collect();

        CorsPolicy {
            allowed_origins,
            trusted_suffixes: TRUSTED_SUFFIXES.into_iter().map(str::to_owned).collect(),
        }
    }

    pub fn evaluate(&self, origin: Option<&str>) -> CorsDecision {
        evaluate_origin(self, origin)
    }
}

/// Response headers for admitted origins. Rejection is left to [`cors_gate`].
pub fn cors_layer(policy: Arc<CorsPolicy>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            origin
                .to_str()
                .is_ok_and(|origin| policy.evaluate(Some(origin)) == CorsDecision::Allow)
        }))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}

/// Decides whether a browser calling from `origin` may read our responses.
///
/// Requests without an origin come from non-browser clients and are always
/// admitted. Loopback origins are admitted on any port.
pub fn evaluate_origin(policy: &CorsPolicy, origin: Option<&str>) -> CorsDecision {
    let Some(origin) = origin.filter(|origin| !origin.is_empty()) else {
        return CorsDecision::Allow;
    };

    let listed = policy.allowed_origins.iter().any(|allowed| allowed == origin);
    let loopback = LOOPBACK_ORIGINS.iter().any(|loopback| {
        origin
            .strip_prefix(loopback)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with(':'))
    });
    let trusted = policy
        .trusted_suffixes
        .iter()
        .any(|suffix| origin.ends_with(suffix.as_str()));

    if listed || loopback || trusted {
        CorsDecision::Allow
    } else {
        CorsDecision::Deny
    }
}

/// Stops requests from disallowed origins before they reach a handler.
pub async fn cors_gate(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = match request.headers().get(ORIGIN).map(HeaderValue::to_str) {
        None => None,
        Some(Ok(origin)) => Some(origin.to_owned()),
        Some(Err(_)) => {
            tracing::warn!("Rejected request with a non-text origin header");
            return ApiError::Cors("origin header is not valid text".to_owned()).into_response();
        }
    };

    match policy.evaluate(origin.as_deref()) {
        CorsDecision::Allow => next.run(request).await,
        CorsDecision::Deny => {
            let origin = origin.unwrap_or_default();
            tracing::warn!(%origin, "Rejected request from disallowed origin");
            ApiError::Cors(format!("origin {origin} is not allowed")).into_response()
        }
    }
}
