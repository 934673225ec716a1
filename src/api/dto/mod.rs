//! Data Transfer Objects specific to the HTTP boundary.
//!
//! Request bodies and responses for the use cases are the application DTOs
//! in [`crate::application::dto`]; this module only adds what is shaped by
//! HTTP itself (query strings, health output).

pub mod health;
pub mod search;
