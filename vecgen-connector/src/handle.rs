//! Plan-side handles describing what a scan reads.

use vecgen_result::{Error, Result};
use vecgen_tpch::Table;

/// Identifies one generated table at one scale factor within a connector
/// instance. Handles are created at plan time and travel to workers inside
/// splits, so they carry everything a data source needs to start producing.
#[derive(Debug, Clone, PartialEq)]
pub struct TpchTableHandle {
    connector_id: String,
    table: Table,
    scale_factor: f64,
}

impl TpchTableHandle {
    pub const DEFAULT_SCALE_FACTOR: f64 = 1.0;

    /// Handle at the default scale factor of 1.
    pub fn for_table(connector_id: impl Into<String>, table: Table) -> Self {
        Self {
            connector_id: connector_id.into(),
            table,
            scale_factor: Self::DEFAULT_SCALE_FACTOR,
        }
    }

    pub fn new(connector_id: impl Into<String>, table: Table, scale_factor: f64) -> Result<Self> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(Error::invalid_argument(format!(
                "scale factor must be a positive finite number, got {scale_factor}"
            )));
        }
        Ok(Self {
            connector_id: connector_id.into(),
            table,
            scale_factor,
        })
    }

    /// Resolves a table by name, rejecting names the catalog does not know.
    pub fn for_table_name(
        connector_id: impl Into<String>,
        table_name: &str,
        scale_factor: f64,
    ) -> Result<Self> {
        let table = Table::from_name(table_name).ok_or_else(|| {
            Error::catalog(format!("table '{table_name}' does not exist"))
        })?;
        Self::new(connector_id, table, scale_factor)
    }

    pub fn connector_id(&self) -> &str {
        &self.connector_id
    }

    pub fn table(&self) -> Table {
        self.table
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Total rows of the table behind this handle.
    pub fn row_count(&self) -> u64 {
        self.table.row_count(self.scale_factor)
    }
}

/// Names one column of a generated table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TpchColumnHandle {
    name: String,
}

impl TpchColumnHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_scale_factors() {
        for sf in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(TpchTableHandle::new("tpch", Table::Nation, sf).is_err());
        }
        assert!(TpchTableHandle::new("tpch", Table::Nation, 0.01).is_ok());
    }

    #[test]
    fn resolves_tables_by_name() {
        let handle = TpchTableHandle::for_table_name("tpch", "orders", 1.0).expect("handle");
        assert_eq!(handle.table(), Table::Orders);
        assert_eq!(handle.row_count(), 1_500_000);

        let err = TpchTableHandle::for_table_name("tpch", "orderz", 1.0).unwrap_err();
        assert!(matches!(err, vecgen_result::Error::CatalogError(_)));
    }

    #[test]
    fn defaults_to_unit_scale() {
        let handle = TpchTableHandle::for_table("tpch", Table::Supplier);
        assert_eq!(handle.scale_factor(), 1.0);
        assert_eq!(handle.row_count(), 10_000);
    }
}
