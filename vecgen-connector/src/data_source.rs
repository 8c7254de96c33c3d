//! The pull-based data source that materializes split windows into record
//! batches.

use arrow::array::{ArrayRef, RecordBatch, RecordBatchOptions};
use vecgen_result::{Error, Result};
use vecgen_tpch::generators::{
    CustomerGenerator, LineItemGenerator, NationGenerator, OrderGenerator, PartGenerator,
    PartSuppGenerator, RegionGenerator, SupplierGenerator,
};
use vecgen_tpch::Table;

use crate::encode;
use crate::handle::TpchTableHandle;
use crate::resolve::TpchProjection;
use crate::split::TpchSplit;

/// A live generator positioned inside one split's window.
enum RowStream {
    Nation(NationGenerator),
    Region(RegionGenerator),
    Part(PartGenerator),
    Supplier(SupplierGenerator),
    PartSupp(PartSuppGenerator),
    Customer(CustomerGenerator),
    Orders(OrderGenerator),
    LineItem(LineItemGenerator),
}

impl RowStream {
    fn for_split(split: &TpchSplit) -> RowStream {
        let start = split.start_row();
        let count = split.end_row() - split.start_row();
        let sf = split.scale_factor();
        match split.table() {
            Table::Nation => RowStream::Nation(NationGenerator::new(start, count)),
            Table::Region => RowStream::Region(RegionGenerator::new(start, count)),
            Table::Part => RowStream::Part(PartGenerator::new(start, count)),
            Table::Supplier => RowStream::Supplier(SupplierGenerator::new(start, count)),
            Table::PartSupp => RowStream::PartSupp(PartSuppGenerator::new(sf, start, count)),
            Table::Customer => RowStream::Customer(CustomerGenerator::new(start, count)),
            Table::Orders => RowStream::Orders(OrderGenerator::new(sf, start, count)),
            Table::LineItem => RowStream::LineItem(LineItemGenerator::new(sf, start, count)),
        }
    }

    /// Pulls up to `max_rows` rows and materializes the projected columns.
    /// Returns `None` once the window is exhausted.
    fn next_columns(
        &mut self,
        max_rows: usize,
        projection: &TpchProjection,
    ) -> Result<Option<(usize, Vec<ArrayRef>)>> {
        fn materialize<R>(
            rows: Vec<R>,
            projection: &TpchProjection,
            column: impl Fn(&[R], usize) -> Result<ArrayRef>,
        ) -> Result<Option<(usize, Vec<ArrayRef>)>> {
            if rows.is_empty() {
                return Ok(None);
            }
            let arrays = projection
                .physical_indices()
                .iter()
                .map(|&index| column(&rows, index))
                .collect::<Result<Vec<_>>>()?;
            Ok(Some((rows.len(), arrays)))
        }

        match self {
            RowStream::Nation(gen) => {
                materialize(gen.by_ref().take(max_rows).collect(), projection, encode::nation_column)
            }
            RowStream::Region(gen) => {
                materialize(gen.by_ref().take(max_rows).collect(), projection, encode::region_column)
            }
            RowStream::Part(gen) => {
                materialize(gen.by_ref().take(max_rows).collect(), projection, encode::part_column)
            }
            RowStream::Supplier(gen) => materialize(
                gen.by_ref().take(max_rows).collect(),
                projection,
                encode::supplier_column,
            ),
            RowStream::PartSupp(gen) => materialize(
                gen.by_ref().take(max_rows).collect(),
                projection,
                encode::partsupp_column,
            ),
            RowStream::Customer(gen) => materialize(
                gen.by_ref().take(max_rows).collect(),
                projection,
                encode::customer_column,
            ),
            RowStream::Orders(gen) => {
                materialize(gen.by_ref().take(max_rows).collect(), projection, encode::orders_column)
            }
            RowStream::LineItem(gen) => materialize(
                gen.by_ref().take(max_rows).collect(),
                projection,
                encode::lineitem_column,
            ),
        }
    }
}

enum State {
    Unbound,
    Bound(RowStream),
    Exhausted,
}

/// Produces the batches of one scan, one bound split at a time.
///
/// The protocol is: bind a split with [`add_split`](Self::add_split), pull
/// batches with [`next`](Self::next) until it returns `Ok(None)`, then bind
/// the next split. Binding while a split is still draining, or pulling with
/// no split bound, is a protocol violation and fails.
pub struct TpchDataSource {
    handle: TpchTableHandle,
    projection: TpchProjection,
    state: State,
    completed_rows: u64,
    completed_bytes: u64,
}

impl TpchDataSource {
    pub(crate) fn new(handle: TpchTableHandle, projection: TpchProjection) -> Self {
        Self {
            handle,
            projection,
            state: State::Unbound,
            completed_rows: 0,
            completed_bytes: 0,
        }
    }

    pub fn add_split(&mut self, split: TpchSplit) -> Result<()> {
        if matches!(self.state, State::Bound(_)) {
            return Err(Error::internal(
                "a split is already bound; drain it before adding another",
            ));
        }
        if split.table() != self.handle.table() || split.scale_factor() != self.handle.scale_factor()
        {
            return Err(Error::internal(format!(
                "split for table '{}' at scale {} does not match data source for table '{}' at scale {}",
                split.table().name(),
                split.scale_factor(),
                self.handle.table().name(),
                self.handle.scale_factor(),
            )));
        }

        tracing::debug!(
            table = split.table().name(),
            start_row = split.start_row(),
            end_row = split.end_row(),
            "binding split"
        );
        self.state = State::Bound(RowStream::for_split(&split));
        Ok(())
    }

    /// Pulls the next batch of at most `max_batch_size` rows, or `Ok(None)`
    /// when the bound split is drained.
    pub fn next(&mut self, max_batch_size: usize) -> Result<Option<RecordBatch>> {
        if max_batch_size == 0 {
            return Err(Error::invalid_argument("max_batch_size must be at least 1"));
        }

        let stream = match &mut self.state {
            State::Unbound => {
                return Err(Error::internal("no split bound to this data source"));
            }
            State::Exhausted => {
                return Err(Error::internal(
                    "split already drained; bind another split before pulling",
                ));
            }
            State::Bound(stream) => stream,
        };

        let Some((row_count, arrays)) = stream.next_columns(max_batch_size, &self.projection)?
        else {
            self.state = State::Exhausted;
            return Ok(None);
        };

        // Zero-column batches still carry their row count, which is what a
        // bare count(1) scan reads.
        let options = RecordBatchOptions::new().with_row_count(Some(row_count));
        let batch = RecordBatch::try_new_with_options(
            self.projection.output_schema().clone(),
            arrays,
            &options,
        )?;

        self.completed_rows += row_count as u64;
        self.completed_bytes += batch.get_array_memory_size() as u64;
        tracing::trace!(rows = row_count, "emitted batch");
        Ok(Some(batch))
    }

    /// Rows emitted over the life of this data source, across all splits.
    pub fn completed_rows(&self) -> u64 {
        self.completed_rows
    }

    /// In-memory bytes of all emitted batches.
    pub fn completed_bytes(&self) -> u64 {
        self.completed_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::TpchColumnHandle;
    use crate::split::plan_splits;

    fn data_source(table: &str, sf: f64, columns: &[&str]) -> (TpchDataSource, Vec<TpchSplit>) {
        let handle = TpchTableHandle::for_table_name("tpch", table, sf).expect("handle");
        let assignments: Vec<_> = columns
            .iter()
            .map(|c| (c.to_string(), TpchColumnHandle::new(*c)))
            .collect();
        let projection =
            TpchProjection::resolve(handle.table(), &assignments).expect("projection");
        let splits = plan_splits(&handle, 1);
        (TpchDataSource::new(handle, projection), splits)
    }

    #[test]
    fn pulling_before_binding_fails() {
        let (mut source, _) = data_source("nation", 1.0, &["n_name"]);
        assert!(source.next(1024).is_err());
    }

    #[test]
    fn binding_twice_fails() {
        let (mut source, splits) = data_source("nation", 1.0, &["n_name"]);
        source.add_split(splits[0].clone()).expect("bind");
        assert!(source.add_split(splits[0].clone()).is_err());
    }

    #[test]
    fn drained_source_rejects_pulls_until_rearmed() {
        let (mut source, splits) = data_source("nation", 1.0, &["n_name"]);
        source.add_split(splits[0].clone()).expect("bind");
        while source.next(10).expect("batch").is_some() {}
        assert!(source.next(10).is_err());

        // Re-arming with a fresh split works.
        source.add_split(splits[0].clone()).expect("rebind");
        let batch = source.next(100).expect("batch").expect("rows");
        assert_eq!(batch.num_rows(), 25);
    }

    #[test]
    fn batches_respect_max_batch_size() {
        let (mut source, splits) = data_source("nation", 1.0, &["n_nationkey"]);
        source.add_split(splits[0].clone()).expect("bind");
        let mut sizes = Vec::new();
        while let Some(batch) = source.next(10).expect("batch") {
            sizes.push(batch.num_rows());
        }
        assert_eq!(sizes, vec![10, 10, 5]);
        assert_eq!(source.completed_rows(), 25);
        assert!(source.completed_bytes() > 0);
    }

    #[test]
    fn empty_projection_batches_only_count() {
        let (mut source, splits) = data_source("nation", 1.0, &[]);
        source.add_split(splits[0].clone()).expect("bind");
        let batch = source.next(1000).expect("batch").expect("rows");
        assert_eq!(batch.num_columns(), 0);
        assert_eq!(batch.num_rows(), 25);
    }

    #[test]
    fn mismatched_split_is_rejected() {
        let (mut source, _) = data_source("nation", 1.0, &["n_name"]);
        let other = TpchTableHandle::for_table_name("tpch", "region", 1.0).expect("handle");
        let splits = plan_splits(&other, 1);
        assert!(source.add_split(splits[0].clone()).is_err());
    }

    #[test]
    fn single_row_split_yields_one_batch() {
        let (mut source, _) = data_source("region", 1.0, &["r_name"]);
        let handle = TpchTableHandle::for_table_name("tpch", "region", 1.0).expect("handle");
        let splits = plan_splits(&handle, 8);
        assert_eq!(splits.len(), 5);
        source.add_split(splits[4].clone()).expect("bind");
        let batch = source.next(100).expect("batch").expect("rows");
        assert_eq!(batch.num_rows(), 1);
        assert!(source.next(100).expect("batch").is_none());
        assert_eq!(source.completed_rows(), 1);
    }
}
