//! Portal Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared, network-free building blocks for the data portal client.
//!
//! # Overview
//!
//! - **Validation**: field format predicates and issue lists used by every form
//! - **Logging**: tracing subscriber bootstrap shared by the binaries
//! - **Error Handling**: common error and result types
//!
//! # Example
//!
//! ```
//! use portal_common::validation::{is_valid_year, normalize_month};
//!
//! assert!(is_valid_year("2025"));
//! assert_eq!(normalize_month("3"), "March");
//! ```

pub mod error;
pub mod logging;
pub mod validation;

// Re-export commonly used types
pub use error::{CommonError, Result};
pub use validation::ValidationIssue;
