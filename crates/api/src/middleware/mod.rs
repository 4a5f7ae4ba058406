//! HTTP middleware.

pub mod auth;

pub use auth::{AuthClient, auth_middleware};
