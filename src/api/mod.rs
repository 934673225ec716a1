//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and maps typed
//! failures to status codes through [`crate::error::AppError`].
//!
//! # Modules
//!
//! - [`dto`] - Query and health structures specific to HTTP
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
