//! API request and response types
//!
//! Response payloads of the processing endpoints are opaque to the client and
//! kept as `serde_json::Value`; only the bodies we send and the ping reply
//! are typed.

use serde::{Deserialize, Serialize};

/// Reply of `GET /api/ping`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResponse {
    pub ok: bool,
}

/// JSON trigger body shared by the IRI pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IriTriggerRequest {
    pub kind: String,
    pub source: String,
    pub year: String,
    pub month: String,
}

/// JSON trigger body for POS ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PosTriggerRequest {
    /// Inclusive start date, `YYYY-MM-DD`
    pub since: String,
}

/// JSON trigger body for PMR ingestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PmrTriggerRequest {
    /// Inclusive range start, `YYYY-MM-DD`
    pub from: String,
    /// Inclusive range end, `YYYY-MM-DD`
    pub to: String,
}

/// A column in a table schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    pub nullable: bool,
}

/// Table schema sent to `/api/tables/create` and, serialized to a string,
/// alongside new-table uploads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnDef>,
}
