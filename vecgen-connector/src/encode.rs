//! Column materialization: turns a slice of generated rows into the Arrow
//! array of one physical column.
//!
//! Column indices follow the table schemas in `vecgen_tpch::schema`. Money
//! values are produced in cents and land directly in `Decimal128(15, 2)`;
//! quantities are whole units scaled up on the way in.

use std::sync::Arc;

use arrow::array::{ArrayRef, Date32Array, Decimal128Array, Int32Array, Int64Array, StringArray};
use vecgen_result::{Error, Result};
use vecgen_tpch::dates::to_date32;
use vecgen_tpch::generators::{
    CustomerRow, LineItemRow, NationRow, OrderRow, PartRow, PartSuppRow, RegionRow, SupplierRow,
};

fn int64(values: impl Iterator<Item = i64>) -> ArrayRef {
    Arc::new(Int64Array::from_iter_values(values))
}

fn int32(values: impl Iterator<Item = i32>) -> ArrayRef {
    Arc::new(Int32Array::from_iter_values(values))
}

fn utf8<'a>(values: impl Iterator<Item = &'a str>) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(values))
}

fn date32(values: impl Iterator<Item = i32>) -> ArrayRef {
    Arc::new(Date32Array::from_iter_values(values.map(to_date32)))
}

/// Cents into `Decimal128(15, 2)`.
fn money(values: impl Iterator<Item = i64>) -> Result<ArrayRef> {
    let array = Decimal128Array::from_iter_values(values.map(|cents| cents as i128))
        .with_precision_and_scale(15, 2)?;
    Ok(Arc::new(array))
}

fn no_such_column(table: &str, index: usize) -> Error {
    Error::internal(format!("table '{table}' has no column index {index}"))
}

pub fn nation_column(rows: &[NationRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.nation_key)),
        1 => utf8(rows.iter().map(|r| r.name)),
        2 => int64(rows.iter().map(|r| r.region_key)),
        3 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("nation", index)),
    })
}

pub fn region_column(rows: &[RegionRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.region_key)),
        1 => utf8(rows.iter().map(|r| r.name)),
        2 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("region", index)),
    })
}

pub fn part_column(rows: &[PartRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.part_key)),
        1 => utf8(rows.iter().map(|r| r.name.as_str())),
        2 => utf8(rows.iter().map(|r| r.mfgr.as_str())),
        3 => utf8(rows.iter().map(|r| r.brand.as_str())),
        4 => utf8(rows.iter().map(|r| r.part_type)),
        5 => int32(rows.iter().map(|r| r.size)),
        6 => utf8(rows.iter().map(|r| r.container)),
        7 => money(rows.iter().map(|r| r.retail_price))?,
        8 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("part", index)),
    })
}

pub fn supplier_column(rows: &[SupplierRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.supplier_key)),
        1 => utf8(rows.iter().map(|r| r.name.as_str())),
        2 => utf8(rows.iter().map(|r| r.address.as_str())),
        3 => int64(rows.iter().map(|r| r.nation_key)),
        4 => utf8(rows.iter().map(|r| r.phone.as_str())),
        5 => money(rows.iter().map(|r| r.account_balance))?,
        6 => utf8(rows.iter().map(|r| r.comment.as_str())),
        _ => return Err(no_such_column("supplier", index)),
    })
}

pub fn partsupp_column(rows: &[PartSuppRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.part_key)),
        1 => int64(rows.iter().map(|r| r.supplier_key)),
        2 => int32(rows.iter().map(|r| r.available_quantity)),
        3 => money(rows.iter().map(|r| r.supply_cost))?,
        4 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("partsupp", index)),
    })
}

pub fn customer_column(rows: &[CustomerRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.customer_key)),
        1 => utf8(rows.iter().map(|r| r.name.as_str())),
        2 => utf8(rows.iter().map(|r| r.address.as_str())),
        3 => int64(rows.iter().map(|r| r.nation_key)),
        4 => utf8(rows.iter().map(|r| r.phone.as_str())),
        5 => money(rows.iter().map(|r| r.account_balance))?,
        6 => utf8(rows.iter().map(|r| r.market_segment)),
        7 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("customer", index)),
    })
}

pub fn orders_column(rows: &[OrderRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.order_key)),
        1 => int64(rows.iter().map(|r| r.customer_key)),
        2 => utf8(rows.iter().map(|r| r.order_status)),
        3 => money(rows.iter().map(|r| r.total_price))?,
        4 => date32(rows.iter().map(|r| r.order_date)),
        5 => utf8(rows.iter().map(|r| r.order_priority)),
        6 => utf8(rows.iter().map(|r| r.clerk.as_str())),
        7 => int32(rows.iter().map(|r| r.ship_priority)),
        8 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("orders", index)),
    })
}

pub fn lineitem_column(rows: &[LineItemRow], index: usize) -> Result<ArrayRef> {
    Ok(match index {
        0 => int64(rows.iter().map(|r| r.order_key)),
        1 => int64(rows.iter().map(|r| r.part_key)),
        2 => int64(rows.iter().map(|r| r.supplier_key)),
        3 => int32(rows.iter().map(|r| r.line_number)),
        4 => money(rows.iter().map(|r| r.quantity * 100))?,
        5 => money(rows.iter().map(|r| r.extended_price))?,
        6 => money(rows.iter().map(|r| r.discount))?,
        7 => money(rows.iter().map(|r| r.tax))?,
        8 => utf8(rows.iter().map(|r| r.return_flag)),
        9 => utf8(rows.iter().map(|r| r.line_status)),
        10 => date32(rows.iter().map(|r| r.ship_date)),
        11 => date32(rows.iter().map(|r| r.commit_date)),
        12 => date32(rows.iter().map(|r| r.receipt_date)),
        13 => utf8(rows.iter().map(|r| r.ship_instructions)),
        14 => utf8(rows.iter().map(|r| r.ship_mode)),
        15 => utf8(rows.iter().map(|r| r.comment)),
        _ => return Err(no_such_column("lineitem", index)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;
    use vecgen_tpch::generators::NationGenerator;

    #[test]
    fn arrays_match_row_count_and_type() {
        let rows: Vec<_> = NationGenerator::new(0, 25).collect();
        for index in 0..4 {
            let array = nation_column(&rows, index).expect("array");
            assert_eq!(array.len(), 25);
        }
        assert!(nation_column(&rows, 4).is_err());
    }

    #[test]
    fn money_arrays_carry_cents_at_scale_two() {
        let rows: Vec<_> = vecgen_tpch::generators::PartGenerator::new(0, 10).collect();
        let array = part_column(&rows, 7).expect("array");
        let decimals = array
            .as_any()
            .downcast_ref::<Decimal128Array>()
            .expect("decimal array");
        assert_eq!(decimals.scale(), 2);
        assert_eq!(decimals.precision(), 15);
        assert_eq!(decimals.value(0), rows[0].retail_price as i128);
    }
}
