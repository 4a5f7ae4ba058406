//! API route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::auth::auth_middleware};

pub mod accounts;
pub mod analytics;
pub mod auth;
pub mod clients;
pub mod exchange;
pub mod exchange_rates;
pub mod health;
pub mod transactions;
pub mod transfer;

/// Creates the API router with public and protected routes.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    // Protected routes that require authentication
    let protected_routes = Router::new()
        .merge(auth::protected_routes())
        .merge(accounts::routes())
        .merge(exchange::routes())
        .merge(transfer::routes())
        .merge(clients::routes())
        .merge(transactions::routes())
        .merge(analytics::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Combine public and protected routes
    Router::new()
        .merge(health::routes())
        .merge(auth::routes())
        .merge(exchange_rates::routes())
        .merge(protected_routes)
}
