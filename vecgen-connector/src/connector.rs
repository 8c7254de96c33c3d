//! Connector surface: instances, the factory that mints them, and the
//! registry the engine looks them up in.

use std::sync::{Arc, RwLock};

use rustc_hash::FxHashMap;
use vecgen_result::{Error, Result};

use crate::data_source::TpchDataSource;
use crate::handle::{TpchColumnHandle, TpchTableHandle};
use crate::resolve::TpchProjection;

/// Factory name this connector registers under.
pub const TPCH_CONNECTOR_NAME: &str = "tpch";

/// One registered connector instance, identified by the id table handles
/// refer back to.
pub trait Connector: Send + Sync {
    fn connector_id(&self) -> &str;

    /// Builds a data source for one scan: resolves the projection against
    /// the handle's table and returns a source ready to accept splits.
    fn create_data_source(
        &self,
        handle: &TpchTableHandle,
        assignments: &[(String, TpchColumnHandle)],
    ) -> Result<TpchDataSource>;
}

pub struct TpchConnector {
    connector_id: String,
}

impl TpchConnector {
    pub fn new(connector_id: impl Into<String>) -> Self {
        Self {
            connector_id: connector_id.into(),
        }
    }
}

impl Connector for TpchConnector {
    fn connector_id(&self) -> &str {
        &self.connector_id
    }

    fn create_data_source(
        &self,
        handle: &TpchTableHandle,
        assignments: &[(String, TpchColumnHandle)],
    ) -> Result<TpchDataSource> {
        if handle.connector_id() != self.connector_id {
            return Err(Error::invalid_argument(format!(
                "table handle for connector '{}' given to connector '{}'",
                handle.connector_id(),
                self.connector_id,
            )));
        }
        let projection = TpchProjection::resolve(handle.table(), assignments)?;
        tracing::debug!(
            connector_id = %self.connector_id,
            table = handle.table().name(),
            scale_factor = handle.scale_factor(),
            columns = projection.width(),
            "created data source"
        );
        Ok(TpchDataSource::new(handle.clone(), projection))
    }
}

#[derive(Default)]
pub struct TpchConnectorFactory;

impl TpchConnectorFactory {
    pub fn connector_name(&self) -> &'static str {
        TPCH_CONNECTOR_NAME
    }

    pub fn new_connector(&self, connector_id: impl Into<String>) -> Arc<dyn Connector> {
        Arc::new(TpchConnector::new(connector_id))
    }
}

/// Maps connector ids to live connector instances.
///
/// The registry is plain state with no process-global instance, so embedders
/// and tests each own their own.
#[derive(Default)]
pub struct ConnectorRegistry {
    connectors: RwLock<FxHashMap<String, Arc<dyn Connector>>>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a connector under its id; a second registration with the
    /// same id is rejected.
    pub fn register(&self, connector: Arc<dyn Connector>) -> Result<()> {
        let mut connectors = self
            .connectors
            .write()
            .map_err(|_| Error::internal("connector registry lock poisoned"))?;
        let id = connector.connector_id().to_string();
        if connectors.contains_key(&id) {
            return Err(Error::invalid_argument(format!(
                "a connector with id '{id}' is already registered"
            )));
        }
        tracing::info!(connector_id = %id, "registered connector");
        connectors.insert(id, connector);
        Ok(())
    }

    /// Removes a connector; returns whether one was registered under `id`.
    pub fn unregister(&self, connector_id: &str) -> Result<bool> {
        let mut connectors = self
            .connectors
            .write()
            .map_err(|_| Error::internal("connector registry lock poisoned"))?;
        Ok(connectors.remove(connector_id).is_some())
    }

    pub fn get(&self, connector_id: &str) -> Result<Arc<dyn Connector>> {
        let connectors = self
            .connectors
            .read()
            .map_err(|_| Error::internal("connector registry lock poisoned"))?;
        connectors.get(connector_id).cloned().ok_or_else(|| {
            Error::not_found(format!("no connector registered with id '{connector_id}'"))
        })
    }
}
