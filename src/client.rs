//! Concrete client handle and the sibling-construction factory.

use std::sync::Arc;

use crate::config::DatabaseProperties;
use crate::context::DatabaseContext;
use crate::error::Result;
use crate::resources::BundledResourceProvider;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Builds a client for a properties bundle.
///
/// This is how [`DatabaseContext::clone_for_database`] spawns siblings:
/// whoever constructs the context decides what a sibling client is, instead
/// of the context inspecting runtime types. Tests inject stub factories.
pub type ClientFactory = Arc<dyn Fn(DatabaseProperties) -> Result<CouchClient> + Send + Sync>;

/// A client bound to one database.
///
/// Thin handle over a [`DatabaseContext`]; constructing one performs the
/// context's lifecycle step (create-if-configured, else a warm-up call).
/// There is no explicit teardown — dropping the client releases the
/// transport when the last holder goes away.
pub struct CouchClient {
    context: DatabaseContext,
}

impl std::fmt::Debug for CouchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CouchClient")
            .field("properties", self.context.properties())
            .finish_non_exhaustive()
    }
}

impl CouchClient {
    /// Connect to the database described by `props` over a blocking
    /// reqwest transport.
    ///
    /// The default resource provider is anchored at the process working
    /// directory; override it with
    /// [`DatabaseContext::set_resource_provider`].
    pub fn new(props: DatabaseProperties) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&props)?);
        Self::with_transport(props, transport)
    }

    /// Connect over a caller-supplied transport.
    ///
    /// The transport is shared, not owned; its lifetime is controlled by
    /// the caller. Siblings spawned from this client build their own
    /// transport via [`CouchClient::new`].
    pub fn with_transport(
        props: DatabaseProperties,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self> {
        let resources = Box::new(BundledResourceProvider::new("."));
        let factory: ClientFactory = Arc::new(CouchClient::new);
        let context = DatabaseContext::new(transport, props, resources, factory)?;
        Ok(Self { context })
    }

    pub fn context(&self) -> &DatabaseContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut DatabaseContext {
        &mut self.context
    }

    pub fn properties(&self) -> &DatabaseProperties {
        self.context.properties()
    }
}
