//! API client module
//!
//! HTTP client for the portal backend.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{ApiClient, ResponseMode};
pub use types::*;
