use axum::{Json, extract::State};
use domain::User;
use serde::Serialize;

use super::{error::ApiError, state::RequestState, timestamp};

#[derive(Serialize)]
pub struct UsersResponse {
    pub message: &'static str,
    pub data: Vec<User>,
    pub timestamp: String,
    pub success: bool,
}

pub async fn handle_list_users(
    State(RequestState { repositories }): State<RequestState>,
) -> Result<Json<UsersResponse>, ApiError> {
    let users = repositories.users;

    // diesel blocks, keep it off the async workers
    let result = tokio::task::spawn_blocking(move || users.list_all())
        .await
        .map_err(|e| ApiError::Database(format!("Query task failed: {e}")))?;

    let data = result.map_err(|e| {
        tracing::error!(error = %e, "Failed to load users");
        ApiError::Database(e.to_string())
    })?;

    Ok(Json(UsersResponse {
        message: "Data from Database",
        data,
        timestamp: timestamp(),
        success: true,
    }))
}
