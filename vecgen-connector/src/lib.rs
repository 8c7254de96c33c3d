//! A zero-storage benchmark data connector.
//!
//! Scans are described by a [`TpchTableHandle`] (table plus scale factor)
//! and a set of output-column assignments; [`plan_splits`] cuts the table's
//! row space into independent windows, and a [`TpchDataSource`] regenerates
//! each window's rows on demand as Arrow record batches. Because every row
//! is a pure function of its index, any worker can produce any split with
//! no shared state or data files behind it.

mod connector;
mod data_source;
mod encode;
mod handle;
mod resolve;
mod split;

pub use connector::{
    Connector, ConnectorRegistry, TpchConnector, TpchConnectorFactory, TPCH_CONNECTOR_NAME,
};
pub use data_source::TpchDataSource;
pub use handle::{TpchColumnHandle, TpchTableHandle};
pub use resolve::TpchProjection;
pub use split::{plan_splits, TpchSplit};
