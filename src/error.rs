//! Error taxonomy for the client façade.
//!
//! The façade recovers from nothing locally: [`CouchError::NotFound`] is the
//! one condition callers (and [`create_database_if_missing`]) catch
//! explicitly; everything else carries its cause up to the caller.
//!
//! [`create_database_if_missing`]: crate::context::DatabaseContext::create_database_if_missing

use std::fmt;

#[derive(Debug)]
pub enum CouchError {
    /// A required argument was empty, or a confirmation phrase did not
    /// match. Raised before any network call is made.
    InvalidArgument(String),
    /// The server reported that the requested database or document does
    /// not exist (HTTP 404).
    NotFound(String),
    /// A packaged resource could not be opened for reading.
    ResourceNotFound(String),
    /// Archive or filesystem failure while resolving packaged resources.
    Resource(String),
    /// A sibling client could not be constructed through the factory.
    CloneConstruction(String),
    /// Non-success response from the server other than 404.
    Server { status: u16, body: String },
    Transport(reqwest::Error),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for CouchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CouchError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            CouchError::NotFound(what) => write!(f, "not found: {}", what),
            CouchError::ResourceNotFound(path) => write!(f, "resource not found: {}", path),
            CouchError::Resource(msg) => write!(f, "resource provider failure: {}", msg),
            CouchError::CloneConstruction(msg) => {
                write!(f, "unable to construct client: {}", msg)
            }
            CouchError::Server { status, body } => write!(f, "server error {}: {}", status, body),
            CouchError::Transport(e) => write!(f, "transport error: {}", e),
            CouchError::Io(e) => write!(f, "io error: {}", e),
            CouchError::Json(e) => write!(f, "json error: {}", e),
        }
    }
}

impl std::error::Error for CouchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CouchError::Transport(e) => Some(e),
            CouchError::Io(e) => Some(e),
            CouchError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CouchError {
    fn from(e: reqwest::Error) -> Self {
        CouchError::Transport(e)
    }
}

impl From<std::io::Error> for CouchError {
    fn from(e: std::io::Error) -> Self {
        CouchError::Io(e)
    }
}

impl From<serde_json::Error> for CouchError {
    fn from(e: serde_json::Error) -> Self {
        CouchError::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, CouchError>;
