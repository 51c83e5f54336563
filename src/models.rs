//! Read-only snapshots decoded from server JSON responses.

use serde::Deserialize;

/// Database-level statistics returned by `GET /{db}`.
///
/// Decoded once per [`info`](crate::context::DatabaseContext::info) call and
/// discarded after use; nothing here is written back to the server.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseInfo {
    pub db_name: String,
    #[serde(default)]
    pub doc_count: i64,
    #[serde(default)]
    pub doc_del_count: i64,
    #[serde(default)]
    pub update_seq: i64,
    #[serde(default)]
    pub purge_seq: i64,
    #[serde(default)]
    pub compact_running: bool,
    #[serde(default)]
    pub disk_size: i64,
    #[serde(default)]
    pub instance_start_time: String,
    #[serde(default)]
    pub disk_format_version: i32,
}

/// Shape of the `GET /_uuids?count=N` response.
#[derive(Debug, Deserialize)]
pub(crate) struct UuidsResponse {
    pub uuids: Vec<String>,
}
