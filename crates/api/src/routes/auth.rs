//! Authentication routes for login and the current-client lookup.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{error, info};

use crate::{AppState, error::ApiError, middleware::AuthClient};
use sarraf_core::auth::verify_password;
use sarraf_db::ClientRepository;
use sarraf_shared::{AppError, ClientInfo, LoginRequest, LoginResponse};

/// Creates the public auth routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Creates the auth routes that require a valid token.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/auth/user", get(current_client))
}

/// POST /auth/login - Authenticate a client and return a token.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    if payload.username.len() < 3 || payload.password.len() < 6 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "validation_error",
                "message": "Invalid username or password format"
            })),
        )
            .into_response();
    }

    let client_repo = ClientRepository::new((*state.db).clone());

    let client = match client_repo.find_by_username(&payload.username).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            info!(username = %payload.username, "Login attempt for non-existent client");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return internal_error();
        }
    };

    match verify_password(&payload.password, &client.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(client_id = %client.id, "Failed login attempt - invalid password");
            return invalid_credentials();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return internal_error();
        }
    }

    let token = match state.jwt_service.generate_token(client.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return internal_error();
        }
    };

    info!(client_id = %client.id, "Client logged in successfully");

    let response = LoginResponse {
        token,
        client: ClientInfo {
            id: client.id,
            username: client.username,
            name: client.name,
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// GET /auth/user - Return the authenticated client's identity.
async fn current_client(
    State(state): State<AppState>,
    auth: AuthClient,
) -> Result<Json<ClientInfo>, ApiError> {
    let client_repo = ClientRepository::new((*state.db).clone());

    let client = client_repo
        .find_by_id(auth.client_id())
        .await?
        .ok_or_else(|| AppError::NotFound("Client not found".to_string()))?;

    Ok(Json(ClientInfo {
        id: client.id,
        username: client.username,
        name: client.name,
    }))
}

fn invalid_credentials() -> axum::response::Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "invalid_credentials",
            "message": "Invalid username or password"
        })),
    )
        .into_response()
}

fn internal_error() -> axum::response::Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "internal_error",
            "message": "An error occurred during login"
        })),
    )
        .into_response()
}
