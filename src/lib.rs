#![deny(missing_docs)]

//! Core library for the School API server.

/// HTTP routing and REST handlers.
pub mod api;
/// Environment-driven configuration management.
pub mod config;
/// Structured logging and tracing setup.
pub mod logging;
/// CRUD outcome metrics helpers.
pub mod metrics;
/// Student records, store, and service.
pub mod students;
