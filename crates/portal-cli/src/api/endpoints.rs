//! API endpoint paths and URL builders

/// Health check
pub const PING: &str = "/api/ping";

/// IRI category-brand mapping (multipart upload or JSON trigger)
pub const IRI_CATEGORY_BRAND: &str = "/api/upload/iri/category-brand";

/// IRI items (multipart upload or JSON trigger)
pub const IRI_ITEMS: &str = "/api/upload/iri/items";

/// POS ingestion trigger
pub const POS_TRIGGER: &str = "/api/upload/pos/trigger";

/// PMR ingestion trigger
pub const PMR_TRIGGER: &str = "/api/upload/pmr/trigger";

/// Populate a new table from an uploaded file
pub const NEW_TABLE_UPLOAD: &str = "/api/upload/new-table";

/// Create a table schema
pub const TABLE_CREATE: &str = "/api/tables/create";

/// Join a base URL and an endpoint path
///
/// Absolute `http(s)` URLs are returned as-is so a component can be pointed
/// at a different host.
pub fn resolve_url(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }

    let base = base_url.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_relative_path() {
        assert_eq!(
            resolve_url("http://127.0.0.1:5001", PING),
            "http://127.0.0.1:5001/api/ping"
        );
        assert_eq!(
            resolve_url("http://127.0.0.1:5001/", "api/ping"),
            "http://127.0.0.1:5001/api/ping"
        );
    }

    #[test]
    fn test_resolve_absolute_url() {
        assert_eq!(
            resolve_url("http://127.0.0.1:5001", "https://other.example.com/api/ping"),
            "https://other.example.com/api/ping"
        );
    }
}
