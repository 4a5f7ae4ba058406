//! Shared types, errors, and configuration for Sarraf.
//!
//! This crate provides common types used across all other crates:
//! - The closed currency set and money rounding rules
//! - Authentication payloads and JWT handling
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::{Claims, ClientInfo, LoginRequest, LoginResponse};
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtService};
pub use types::Currency;
