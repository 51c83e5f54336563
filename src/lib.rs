//! # Couch Harness
//!
//! A client-side toolkit for CouchDB database administration.
//!
//! Couch Harness wraps CouchDB's HTTP administration surface behind a typed
//! façade — idempotent database lifecycle operations, server introspection,
//! UUID allocation — and resolves packaged design documents whether they
//! ship as loose files or inside a zip archive.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐   ┌──────────────────┐   ┌───────────┐
//! │ CouchClient │──▶│ DatabaseContext   │──▶│  CouchDB   │
//! └─────────────┘   │  admin façade    │   │ REST API  │
//!                   └────────┬─────────┘   └───────────┘
//!                            │
//!                   ┌────────▼─────────┐
//!                   │ ResourceProvider │
//!                   │  dir / archive   │
//!                   └──────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use couch_harness::client::CouchClient;
//! use couch_harness::config::DatabaseProperties;
//!
//! # fn main() -> Result<(), couch_harness::error::CouchError> {
//! let props = DatabaseProperties::new("localhost", 5984, "orders")
//!     .with_create_db_if_not_exist(true);
//! let client = CouchClient::new(props)?;
//!
//! let info = client.context().info()?;
//! println!("{} holds {} docs", info.db_name, info.doc_count);
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Connection properties and TOML loading |
//! | [`client`] | Concrete client handle and sibling factory |
//! | [`context`] | Database administration façade |
//! | [`transport`] | Blocking HTTP collaborator |
//! | [`resources`] | Dual-mode packaged resource resolution |
//! | [`design`] | Design-document assembly from packaged resources |
//! | [`models`] | Read-only response snapshots |
//! | [`error`] | Error taxonomy |

pub mod client;
pub mod config;
pub mod context;
pub mod design;
pub mod error;
pub mod models;
pub mod resources;
pub mod transport;
pub mod util;
