//! Database administration façade.
//!
//! [`DatabaseContext`] performs idempotent lifecycle operations against one
//! database: create-if-missing, guarded delete, info, compact, commit,
//! UUID allocation, and spawning sibling clients for other databases. Every
//! operation is a single synchronous request/response; no state is retained
//! beyond the properties bundle and the swappable resource provider.
//!
//! All collaborators are injected at construction: the transport (shared),
//! the resource provider (owned, replaceable), and the [`ClientFactory`]
//! used to build siblings.

use std::sync::Arc;

use tracing::info;

use crate::client::{ClientFactory, CouchClient};
use crate::config::DatabaseProperties;
use crate::error::{CouchError, Result};
use crate::models::{DatabaseInfo, UuidsResponse};
use crate::resources::ResourceProvider;
use crate::transport::HttpTransport;
use crate::util::{assert_not_empty, get_as_string};

/// The exact phrase [`DatabaseContext::delete_database`] requires before it
/// touches the network.
pub const DELETE_CONFIRMATION: &str = "delete database";

pub struct DatabaseContext {
    transport: Arc<dyn HttpTransport>,
    props: DatabaseProperties,
    resources: Box<dyn ResourceProvider>,
    factory: ClientFactory,
}

impl DatabaseContext {
    /// Build the context and run its construction-time lifecycle step:
    /// create the database when `create_db_if_not_exist` is set, otherwise
    /// issue a [`server_version`](Self::server_version) warm-up call.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        props: DatabaseProperties,
        resources: Box<dyn ResourceProvider>,
        factory: ClientFactory,
    ) -> Result<Self> {
        let context = Self {
            transport,
            props,
            resources,
            factory,
        };
        if context.props.create_db_if_not_exist {
            let db_name = context.props.db_name.clone();
            context.create_database_if_missing(&db_name)?;
        } else {
            context.server_version()?;
        }
        Ok(context)
    }

    /// Delete a database. Destructive, so `confirm` must equal
    /// [`DELETE_CONFIRMATION`] exactly; anything else fails with
    /// [`CouchError::InvalidArgument`] before any network call.
    pub fn delete_database(&self, db_name: &str, confirm: &str) -> Result<()> {
        assert_not_empty(db_name, "db_name")?;
        if confirm != DELETE_CONFIRMATION {
            return Err(CouchError::InvalidArgument(
                "invalid confirmation phrase".to_string(),
            ));
        }
        self.transport.delete(db_name)?;
        Ok(())
    }

    /// Create a database unless it already exists.
    ///
    /// Probes with a `GET`; only a [`CouchError::NotFound`] probe result
    /// triggers the `PUT`. Calling this twice creates the database once.
    /// Two concurrent callers can both observe "missing" and both issue the
    /// `PUT`; the server's idempotent create absorbs that race, so no local
    /// locking is added.
    pub fn create_database_if_missing(&self, db_name: &str) -> Result<()> {
        assert_not_empty(db_name, "db_name")?;
        match self.transport.get(db_name) {
            Ok(_) => Ok(()),
            Err(CouchError::NotFound(_)) => {
                self.transport.put(db_name, "")?;
                info!("created database '{}'", db_name);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// All databases on the server, in server order.
    pub fn list_databases(&self) -> Result<Vec<String>> {
        let body = self.transport.get("_all_dbs")?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Spawn a client bound to another database, copying this context's
    /// connection properties with the name and create flag overridden.
    ///
    /// Construction goes through the injected [`ClientFactory`]; any
    /// factory failure is wrapped as [`CouchError::CloneConstruction`].
    pub fn clone_for_database(
        &self,
        db_name: &str,
        create_db_if_not_exist: bool,
    ) -> Result<CouchClient> {
        assert_not_empty(db_name, "db_name")?;
        let props = self.props.with_database(db_name, create_db_if_not_exist);
        (self.factory)(props).map_err(|e| {
            CouchError::CloneConstruction(format!("database '{}': {}", db_name, e))
        })
    }

    /// Database statistics from `GET /{db}`.
    pub fn info(&self) -> Result<DatabaseInfo> {
        let body = self.transport.get(&self.props.db_name)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Server version from the root endpoint, `None` if the field is absent.
    pub fn server_version(&self) -> Result<Option<String>> {
        let body = self.transport.get("")?;
        let json: serde_json::Value = serde_json::from_str(&body)?;
        Ok(get_as_string(&json, "version"))
    }

    /// Trigger a database compaction run. The response is discarded.
    pub fn compact(&self) -> Result<()> {
        self.transport
            .post(&format!("{}/_compact", self.props.db_name), "")?;
        Ok(())
    }

    /// Ask the database to commit recent changes to disk.
    pub fn ensure_full_commit(&self) -> Result<()> {
        self.transport
            .post(&format!("{}/_ensure_full_commit", self.props.db_name), "")?;
        Ok(())
    }

    /// Request `count` server-allocated UUIDs, in response order.
    pub fn generate_uuids(&self, count: usize) -> Result<Vec<String>> {
        let body = self.transport.get(&format!("_uuids?count={}", count))?;
        let response: UuidsResponse = serde_json::from_str(&body)?;
        Ok(response.uuids)
    }

    pub fn properties(&self) -> &DatabaseProperties {
        &self.props
    }

    pub fn resource_provider(&self) -> &dyn ResourceProvider {
        self.resources.as_ref()
    }

    /// Swap the provider used to resolve packaged design documents.
    pub fn set_resource_provider(&mut self, resources: Box<dyn ResourceProvider>) {
        self.resources = resources;
    }
}
