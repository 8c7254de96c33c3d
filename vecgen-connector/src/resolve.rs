//! Resolution of requested output columns against a table's schema.

use std::sync::Arc;

use arrow::datatypes::{Field, Schema, SchemaRef};
use vecgen_result::{Error, Result};
use vecgen_tpch::Table;

use crate::handle::TpchColumnHandle;

/// A resolved projection: the scan's output schema plus, per output column,
/// the index of the physical column that feeds it.
///
/// Output names are free: the same physical column may appear under several
/// aliases, and an empty projection is legal for scans that only count rows.
#[derive(Debug, Clone)]
pub struct TpchProjection {
    output_schema: SchemaRef,
    physical_indices: Vec<usize>,
}

impl TpchProjection {
    /// Resolves `(output name, column handle)` pairs against `table`,
    /// failing fast on the first name the table does not have.
    pub fn resolve(table: Table, assignments: &[(String, TpchColumnHandle)]) -> Result<Self> {
        let table_schema = table.schema();

        let mut fields = Vec::with_capacity(assignments.len());
        let mut physical_indices = Vec::with_capacity(assignments.len());
        for (output_name, column) in assignments {
            let index = table_schema.index_of(column.name()).map_err(|_| {
                Error::catalog(format!(
                    "column '{}' does not exist in table '{}'",
                    column.name(),
                    table.name()
                ))
            })?;
            let field = table_schema.field(index);
            fields.push(Field::new(output_name, field.data_type().clone(), false));
            physical_indices.push(index);
        }

        Ok(Self {
            output_schema: Arc::new(Schema::new(fields)),
            physical_indices,
        })
    }

    pub fn output_schema(&self) -> &SchemaRef {
        &self.output_schema
    }

    pub fn physical_indices(&self) -> &[usize] {
        &self.physical_indices
    }

    pub fn width(&self) -> usize {
        self.physical_indices.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;

    fn assign(pairs: &[(&str, &str)]) -> Vec<(String, TpchColumnHandle)> {
        pairs
            .iter()
            .map(|(out, col)| (out.to_string(), TpchColumnHandle::new(*col)))
            .collect()
    }

    #[test]
    fn resolves_in_request_order() {
        let projection = TpchProjection::resolve(
            Table::Nation,
            &assign(&[("name", "n_name"), ("key", "n_nationkey")]),
        )
        .expect("projection");

        assert_eq!(projection.width(), 2);
        assert_eq!(projection.physical_indices(), &[1, 0]);
        let schema = projection.output_schema();
        assert_eq!(schema.field(0).name(), "name");
        assert_eq!(*schema.field(0).data_type(), DataType::Utf8);
        assert_eq!(schema.field(1).name(), "key");
        assert_eq!(*schema.field(1).data_type(), DataType::Int64);
    }

    #[test]
    fn aliases_may_repeat_a_physical_column() {
        let projection = TpchProjection::resolve(
            Table::Nation,
            &assign(&[("a", "n_name"), ("b", "n_name"), ("c", "n_regionkey")]),
        )
        .expect("projection");
        assert_eq!(projection.physical_indices(), &[1, 1, 2]);
    }

    #[test]
    fn unknown_column_fails_fast() {
        let err = TpchProjection::resolve(
            Table::Nation,
            &assign(&[("ok", "n_name"), ("bad", "does_not_exist")]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::CatalogError(_)));
        assert!(err.to_string().contains("does_not_exist"));
        assert!(err.to_string().contains("nation"));
    }

    #[test]
    fn empty_projection_is_legal() {
        let projection = TpchProjection::resolve(Table::Orders, &[]).expect("projection");
        assert_eq!(projection.width(), 0);
        assert_eq!(projection.output_schema().fields().len(), 0);
    }
}
