mod cors;
mod echo;
mod error;
mod state;
mod users;

use axum::{Router, middleware, routing::get};
use chrono::{SecondsFormat, Utc};
use domain::Repositories;
use std::{io, net::SocketAddr, sync::Arc};
use tokio::signal::{self, unix::SignalKind};
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub use cors::{CorsDecision, CorsPolicy, evaluate_origin};
pub use error::ApiError;

use cors::{cors_gate, cors_layer};
use echo::handle_echo;
use state::RequestState;
use users::handle_list_users;

pub struct Server {
    app: Router,
    port: u16,
}

impl Server {
    pub fn new(config: AppConfig, repositories: Repositories) -> Self {
        let app = build_router(config.cors, repositories);

        Self {
            app,
            port: config.port,
        }
    }

    pub async fn start(self) -> Result<(), io::Error> {
        let address = SocketAddr::from(([0, 0, 0, 0], self.port));
        let listener = tokio::net::TcpListener::bind(address).await?;
        let port = listener.local_addr()?.port();

        tracing::info!("Backend listening on port {port}");
        tracing::info!("API endpoint: http://localhost:{port}/api");
        tracing::info!("DB endpoint: http://localhost:{port}/db");

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

/// Routes plus the CORS gate. Requests from rejected origins never reach a
/// handler.
pub fn build_router(cors: CorsPolicy, repositories: Repositories) -> Router {
    let cors = Arc::new(cors);

    Router::new()
        .route("/api", get(handle_echo))
        .route("/db", get(handle_list_users))
        .with_state(RequestState { repositories })
        .layer(cors_layer(Arc::clone(&cors)))
        .layer(middleware::from_fn_with_state(cors, cors_gate))
        .layer(TraceLayer::new_for_http())
}

/// Current time as ISO-8601 in UTC with millisecond precision.
fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");

        tracing::info!("Received SIGINT, shutting down");
    };

    let terminate = async {
        signal::unix::signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        tracing::info!("Received SIGTERM, shutting down");
    };

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {}
    }
}
