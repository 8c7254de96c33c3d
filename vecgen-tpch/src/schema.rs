//! Arrow schemas for the eight generated tables.
//!
//! Key columns are `Int64`, money columns are `Decimal128(15, 2)`, dates are
//! `Date32`, and no generated column is nullable.

use std::sync::{Arc, LazyLock};

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

const MONEY: DataType = DataType::Decimal128(15, 2);

fn key(name: &str) -> Field {
    Field::new(name, DataType::Int64, false)
}

fn utf8(name: &str) -> Field {
    Field::new(name, DataType::Utf8, false)
}

fn int(name: &str) -> Field {
    Field::new(name, DataType::Int32, false)
}

fn money(name: &str) -> Field {
    Field::new(name, MONEY, false)
}

fn date(name: &str) -> Field {
    Field::new(name, DataType::Date32, false)
}

pub static NATION_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("n_nationkey"),
        utf8("n_name"),
        key("n_regionkey"),
        utf8("n_comment"),
    ]))
});

pub static REGION_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("r_regionkey"),
        utf8("r_name"),
        utf8("r_comment"),
    ]))
});

pub static PART_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("p_partkey"),
        utf8("p_name"),
        utf8("p_mfgr"),
        utf8("p_brand"),
        utf8("p_type"),
        int("p_size"),
        utf8("p_container"),
        money("p_retailprice"),
        utf8("p_comment"),
    ]))
});

pub static SUPPLIER_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("s_suppkey"),
        utf8("s_name"),
        utf8("s_address"),
        key("s_nationkey"),
        utf8("s_phone"),
        money("s_acctbal"),
        utf8("s_comment"),
    ]))
});

pub static PARTSUPP_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("ps_partkey"),
        key("ps_suppkey"),
        int("ps_availqty"),
        money("ps_supplycost"),
        utf8("ps_comment"),
    ]))
});

pub static CUSTOMER_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("c_custkey"),
        utf8("c_name"),
        utf8("c_address"),
        key("c_nationkey"),
        utf8("c_phone"),
        money("c_acctbal"),
        utf8("c_mktsegment"),
        utf8("c_comment"),
    ]))
});

pub static ORDERS_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("o_orderkey"),
        key("o_custkey"),
        utf8("o_orderstatus"),
        money("o_totalprice"),
        date("o_orderdate"),
        utf8("o_orderpriority"),
        utf8("o_clerk"),
        int("o_shippriority"),
        utf8("o_comment"),
    ]))
});

pub static LINEITEM_SCHEMA: LazyLock<SchemaRef> = LazyLock::new(|| {
    Arc::new(Schema::new(vec![
        key("l_orderkey"),
        key("l_partkey"),
        key("l_suppkey"),
        int("l_linenumber"),
        money("l_quantity"),
        money("l_extendedprice"),
        money("l_discount"),
        money("l_tax"),
        utf8("l_returnflag"),
        utf8("l_linestatus"),
        date("l_shipdate"),
        date("l_commitdate"),
        date("l_receiptdate"),
        utf8("l_shipinstruct"),
        utf8("l_shipmode"),
        utf8("l_comment"),
    ]))
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_have_expected_widths() {
        assert_eq!(NATION_SCHEMA.fields().len(), 4);
        assert_eq!(REGION_SCHEMA.fields().len(), 3);
        assert_eq!(PART_SCHEMA.fields().len(), 9);
        assert_eq!(SUPPLIER_SCHEMA.fields().len(), 7);
        assert_eq!(PARTSUPP_SCHEMA.fields().len(), 5);
        assert_eq!(CUSTOMER_SCHEMA.fields().len(), 8);
        assert_eq!(ORDERS_SCHEMA.fields().len(), 9);
        assert_eq!(LINEITEM_SCHEMA.fields().len(), 16);
    }

    #[test]
    fn no_column_is_nullable() {
        for schema in [
            &*NATION_SCHEMA,
            &*REGION_SCHEMA,
            &*PART_SCHEMA,
            &*SUPPLIER_SCHEMA,
            &*PARTSUPP_SCHEMA,
            &*CUSTOMER_SCHEMA,
            &*ORDERS_SCHEMA,
            &*LINEITEM_SCHEMA,
        ] {
            for field in schema.fields() {
                assert!(!field.is_nullable(), "{} is nullable", field.name());
            }
        }
    }

    #[test]
    fn money_columns_use_decimal_15_2() {
        let field = ORDERS_SCHEMA.field_with_name("o_totalprice").expect("field");
        assert_eq!(*field.data_type(), DataType::Decimal128(15, 2));
    }
}
