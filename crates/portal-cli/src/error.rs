//! Error types for the portal CLI
//!
//! Every variant renders as the user-facing message shown in the error panel,
//! so the `Display` text is part of the contract with the user.

use portal_common::ValidationIssue;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Comprehensive error type for CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Form fields failed validation; nothing was sent
    #[error("{}", join_issues(.0))]
    Validation(Vec<ValidationIssue>),

    /// Submit was called on a component without an endpoint
    #[error("No upload endpoint configured.")]
    NoEndpoint,

    /// Submit was called with an empty selection
    #[error("Please select a file first.")]
    NoFileSelected,

    /// A selected file is larger than the component allows
    #[error("File \"{name}\" exceeds {limit_mb} MB.")]
    FileTooLarge { name: String, limit_mb: u64 },

    /// More than one file was given to a single-file component
    #[error("This field accepts only one file.")]
    TooManyFiles,

    /// A selected file's extension is not in the accept list
    #[error("File \"{name}\" is not an accepted type ({accept}).")]
    UnsupportedFileType { name: String, accept: String },

    /// A page submission failed; carries the message shown in the error panel
    #[error("{0}")]
    Submission(String),

    /// Required local file is missing or not a regular file
    #[error("File not found: '{0}'. Verify the file path exists and you have read permissions.")]
    FileNotFound(String),

    /// Backend answered with a non-2xx status
    #[error("HTTP {status} {reason}: {excerpt}")]
    HttpStatus {
        status: u16,
        reason: String,
        excerpt: String,
    },

    /// Backend answered 2xx but not with JSON where JSON was required
    #[error("Expected JSON but got '{content_type}'. First 200 chars:\n{excerpt}")]
    UnexpectedContentType {
        content_type: String,
        excerpt: String,
    },

    /// HTTP request failed at the transport level
    #[error("Network request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system operation failed
    #[error("File operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing failed
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// TOML config file could not be parsed
    #[error("Failed to parse config file: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Logging or other shared infrastructure failed
    #[error(transparent)]
    Common(#[from] portal_common::CommonError),
}

fn join_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a file-too-large error
    pub fn file_too_large(name: impl Into<String>, limit_mb: u64) -> Self {
        Self::FileTooLarge {
            name: name.into(),
            limit_mb,
        }
    }

    /// Create an HTTP status error from the raw response parts
    pub fn http_status(status: reqwest::StatusCode, body: &str) -> Self {
        Self::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            excerpt: excerpt(body),
        }
    }

    /// Create an unexpected content type error
    pub fn unexpected_content_type(content_type: impl Into<String>, body: &str) -> Self {
        Self::UnexpectedContentType {
            content_type: content_type.into(),
            excerpt: excerpt(body),
        }
    }
}

/// Maximum number of body characters quoted in an error message
pub const EXCERPT_CHARS: usize = 200;

/// First [`EXCERPT_CHARS`] characters of a response body
pub fn excerpt(body: &str) -> String {
    body.chars().take(EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_validation_joins_issues() {
        let err = CliError::Validation(vec![
            ValidationIssue::new("Source is required."),
            ValidationIssue::new("Month is required."),
        ]);
        assert_eq!(err.to_string(), "Source is required.\nMonth is required.");
    }

    #[test]
    fn test_http_status_message() {
        let err = CliError::http_status(StatusCode::PAYLOAD_TOO_LARGE, "too big");
        assert_eq!(err.to_string(), "HTTP 413 Payload Too Large: too big");
    }

    #[test]
    fn test_excerpt_counts_characters_not_bytes() {
        let body = "é".repeat(300);
        let cut = excerpt(&body);
        assert_eq!(cut.chars().count(), EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }

    #[test]
    fn test_file_errors() {
        assert_eq!(
            CliError::file_too_large("big.xlsx", 50).to_string(),
            "File \"big.xlsx\" exceeds 50 MB."
        );
        assert_eq!(
            CliError::NoFileSelected.to_string(),
            "Please select a file first."
        );
        assert_eq!(
            CliError::TooManyFiles.to_string(),
            "This field accepts only one file."
        );
    }

    #[test]
    fn test_unexpected_content_type_message() {
        let err = CliError::unexpected_content_type("text/html", "<html>");
        assert_eq!(
            err.to_string(),
            "Expected JSON but got 'text/html'. First 200 chars:\n<html>"
        );
    }
}
