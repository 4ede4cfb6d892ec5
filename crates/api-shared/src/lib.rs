//! # API Shared
//!
//! Shared definitions for the PFT APIs.
//!
//! Contains:
//! - Request/response types (`dto` module), serialisable and documented for OpenAPI
//! - Shared services like `HealthService`
//!
//! Gender and ethnicity travel as strings and are parsed by the API layer, so a bad value is
//! reported as a client error rather than a deserialisation failure.

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
