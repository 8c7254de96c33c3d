//! Split planning over the generated row space.

use vecgen_tpch::Table;

use crate::handle::TpchTableHandle;

/// A half-open window `[start_row, end_row)` of one table's base row space.
///
/// For partsupp and lineitem the window ranges over the parent table's keys
/// (parts and orders); every other table is windowed directly. Together the
/// splits of one plan partition the table exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct TpchSplit {
    table: Table,
    scale_factor: f64,
    start_row: u64,
    end_row: u64,
}

impl TpchSplit {
    pub fn table(&self) -> Table {
        self.table
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn start_row(&self) -> u64 {
        self.start_row
    }

    pub fn end_row(&self) -> u64 {
        self.end_row
    }

    pub fn row_count(&self) -> u64 {
        self.end_row - self.start_row
    }
}

/// Cuts a table handle into up to `desired_splits` contiguous windows.
///
/// Never emits an empty split: when the table has fewer rows than the
/// requested split count, fewer splits come back (one per row). Remainder
/// rows are spread one per leading split, so split sizes differ by at most
/// one. A request for zero splits is clamped to one.
pub fn plan_splits(handle: &TpchTableHandle, desired_splits: usize) -> Vec<TpchSplit> {
    let table = handle.table();
    let scale_factor = handle.scale_factor();
    let total_rows = table.base_row_count(scale_factor);

    let split_count = (desired_splits.max(1) as u64).min(total_rows);
    if split_count == 0 {
        return Vec::new();
    }
    let base = total_rows / split_count;
    let remainder = total_rows % split_count;

    tracing::debug!(
        table = table.name(),
        scale_factor,
        total_rows,
        split_count,
        "planned splits"
    );

    let mut splits = Vec::with_capacity(split_count as usize);
    let mut start_row = 0;
    for i in 0..split_count {
        let end_row = start_row + base + u64::from(i < remainder);
        splits.push(TpchSplit {
            table,
            scale_factor,
            start_row,
            end_row,
        });
        start_row = end_row;
    }
    splits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(table: &str, sf: f64) -> TpchTableHandle {
        TpchTableHandle::for_table_name("tpch", table, sf).expect("handle")
    }

    #[test]
    fn splits_partition_the_row_space() {
        for desired in [1, 3, 7, 16] {
            let splits = plan_splits(&handle("supplier", 1.0), desired);
            assert_eq!(splits.len(), desired);
            let mut next = 0;
            for split in &splits {
                assert_eq!(split.start_row(), next);
                assert!(split.row_count() > 0);
                next = split.end_row();
            }
            assert_eq!(next, 10_000);
        }
    }

    #[test]
    fn split_sizes_differ_by_at_most_one() {
        // 1500 customers at sf 0.01 into 7 splits: 2 of 215 and 5 of 214.
        let splits = plan_splits(&handle("customer", 0.01), 7);
        let sizes: Vec<u64> = splits.iter().map(|s| s.row_count()).collect();
        assert_eq!(sizes, vec![215, 215, 214, 214, 214, 214, 214]);
    }

    #[test]
    fn more_splits_than_rows_yields_fewer_splits() {
        let splits = plan_splits(&handle("region", 1.0), 8);
        assert_eq!(splits.len(), 5);
        assert!(splits.iter().all(|s| s.row_count() == 1));
    }

    #[test]
    fn zero_requested_splits_clamps_to_one() {
        let splits = plan_splits(&handle("nation", 1.0), 0);
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0].row_count(), 25);
    }

    #[test]
    fn lineitem_splits_range_over_orders() {
        let splits = plan_splits(&handle("lineitem", 1.0), 4);
        assert_eq!(splits.last().map(|s| s.end_row()), Some(1_500_000));
    }
}
