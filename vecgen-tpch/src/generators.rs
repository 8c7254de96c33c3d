//! Row generators for the eight tables.
//!
//! Each generator is an iterator over a half-open window of the table's base
//! row space. Construction fast-forwards every column stream to the window
//! start, so generating rows `[m, n)` yields exactly the same bytes whether
//! or not rows `[0, m)` were ever produced.

use crate::dates::{is_in_past, ORDER_DATE_MAX};
use crate::distribution::{
    COLORS, CONTAINERS, MARKET_SEGMENTS, NATIONS, ORDER_PRIORITIES, PART_TYPES, REGIONS,
    RETURN_FLAGS, SHIP_INSTRUCTIONS, SHIP_MODES,
};
use crate::random::{
    AlphaNumeric, BoundedInt, BoundedLong, PhoneNumber, PickString, RandomStream, TextFragment,
    WordSequence,
};
use crate::text::TextPool;
use crate::{scaled, CUSTOMER_BASE, PART_BASE, SUPPLIER_BASE, SUPPLIERS_PER_PART};

pub(crate) const LINE_COUNT_SEED: i64 = 1434868289;

/// Key streams widen to 64 bits only at extreme scale.
fn use_wide_keys(scale_factor: f64) -> bool {
    scale_factor >= 30_000.0
}

/// Retail price of a part, in cents, as a pure function of its key.
pub fn part_price(part_key: i64) -> i64 {
    let mut price = 90_000;
    price += (part_key / 10) % 20_001;
    price += (part_key % 1_000) * 100;
    price
}

/// Maps a supplier slot `0..4` of a part onto a supplier key, spreading the
/// four suppliers of neighboring parts across the whole supplier space.
pub fn select_part_supplier(part_key: i64, supplier_number: i64, supplier_count: i64) -> i64 {
    (part_key
        + supplier_number
            * (supplier_count / SUPPLIERS_PER_PART as i64 + (part_key - 1) / supplier_count))
        % supplier_count
        + 1
}

/// Scatters sequential order indices into a sparse key space by inserting
/// two zero bits above the low three bits.
pub fn make_order_key(order_index: i64) -> i64 {
    let low_bits = order_index & 0b111;
    ((order_index >> 3) << 5) | low_bits
}

// --- nation -----------------------------------------------------------

pub struct NationRow {
    pub nation_key: i64,
    pub name: &'static str,
    pub region_key: i64,
    pub comment: &'static str,
}

pub struct NationGenerator {
    index: u64,
    remaining: u64,
    comment: TextFragment,
}

impl NationGenerator {
    const COMMENT_SEED: i64 = 606179079;
    const COMMENT_AVERAGE_LENGTH: f64 = 72.0;

    pub fn new(start: u64, count: u64) -> Self {
        let mut comment = TextFragment::new(Self::COMMENT_SEED, Self::COMMENT_AVERAGE_LENGTH);
        comment.advance_rows(start);
        Self {
            index: start,
            remaining: count,
            comment,
        }
    }
}

impl Iterator for NationGenerator {
    type Item = NationRow;

    fn next(&mut self) -> Option<NationRow> {
        if self.remaining == 0 {
            return None;
        }
        let (name, region_key) = NATIONS[self.index as usize];
        let row = NationRow {
            nation_key: self.index as i64,
            name,
            region_key,
            comment: self.comment.next_value(TextPool::shared()),
        };
        self.comment.row_finished();
        self.index += 1;
        self.remaining -= 1;
        Some(row)
    }
}

// --- region -----------------------------------------------------------

pub struct RegionRow {
    pub region_key: i64,
    pub name: &'static str,
    pub comment: &'static str,
}

pub struct RegionGenerator {
    index: u64,
    remaining: u64,
    comment: TextFragment,
}

impl RegionGenerator {
    const COMMENT_SEED: i64 = 1500869201;
    const COMMENT_AVERAGE_LENGTH: f64 = 72.0;

    pub fn new(start: u64, count: u64) -> Self {
        let mut comment = TextFragment::new(Self::COMMENT_SEED, Self::COMMENT_AVERAGE_LENGTH);
        comment.advance_rows(start);
        Self {
            index: start,
            remaining: count,
            comment,
        }
    }
}

impl Iterator for RegionGenerator {
    type Item = RegionRow;

    fn next(&mut self) -> Option<RegionRow> {
        if self.remaining == 0 {
            return None;
        }
        let row = RegionRow {
            region_key: self.index as i64,
            name: REGIONS[self.index as usize],
            comment: self.comment.next_value(TextPool::shared()),
        };
        self.comment.row_finished();
        self.index += 1;
        self.remaining -= 1;
        Some(row)
    }
}

// --- part -------------------------------------------------------------

pub struct PartRow {
    pub part_key: i64,
    pub name: String,
    pub mfgr: String,
    pub brand: String,
    pub part_type: &'static str,
    pub size: i32,
    pub container: &'static str,
    /// Cents.
    pub retail_price: i64,
    pub comment: &'static str,
}

pub struct PartGenerator {
    index: u64,
    remaining: u64,
    name: WordSequence,
    manufacturer: BoundedInt,
    brand: BoundedInt,
    part_type: PickString,
    size: BoundedInt,
    container: PickString,
    comment: TextFragment,
}

impl PartGenerator {
    const NAME_WORDS: usize = 5;

    pub fn new(start: u64, count: u64) -> Self {
        let mut gen = Self {
            index: start,
            remaining: count,
            name: WordSequence::new(709314158, Self::NAME_WORDS, &COLORS),
            manufacturer: BoundedInt::new(1, 1, 5),
            brand: BoundedInt::new(46831694, 1, 5),
            part_type: PickString::new(1841581359, &PART_TYPES),
            size: BoundedInt::new(1193163244, 1, 50),
            container: PickString::new(727633698, &CONTAINERS),
            comment: TextFragment::new(804159733, 14.0),
        };
        gen.advance(start);
        gen
    }

    fn advance(&mut self, rows: u64) {
        self.name.advance_rows(rows);
        self.manufacturer.advance_rows(rows);
        self.brand.advance_rows(rows);
        self.part_type.advance_rows(rows);
        self.size.advance_rows(rows);
        self.container.advance_rows(rows);
        self.comment.advance_rows(rows);
    }

    fn row_finished(&mut self) {
        self.name.row_finished();
        self.manufacturer.row_finished();
        self.brand.row_finished();
        self.part_type.row_finished();
        self.size.row_finished();
        self.container.row_finished();
        self.comment.row_finished();
    }
}

impl Iterator for PartGenerator {
    type Item = PartRow;

    fn next(&mut self) -> Option<PartRow> {
        if self.remaining == 0 {
            return None;
        }
        let part_key = self.index as i64 + 1;

        let manufacturer = self.manufacturer.next_value();
        let brand = manufacturer * 10 + self.brand.next_value();

        let row = PartRow {
            part_key,
            name: self.name.next_value(),
            mfgr: format!("Manufacturer#{manufacturer}"),
            brand: format!("Brand#{brand}"),
            part_type: self.part_type.next_value(),
            size: self.size.next_value(),
            container: self.container.next_value(),
            retail_price: part_price(part_key),
            comment: self.comment.next_value(TextPool::shared()),
        };

        self.row_finished();
        self.index += 1;
        self.remaining -= 1;
        Some(row)
    }
}

// --- supplier ---------------------------------------------------------

pub struct SupplierRow {
    pub supplier_key: i64,
    pub name: String,
    pub address: String,
    pub nation_key: i64,
    pub phone: String,
    /// Cents.
    pub account_balance: i64,
    pub comment: String,
}

pub struct SupplierGenerator {
    index: u64,
    remaining: u64,
    address: AlphaNumeric,
    nation: BoundedInt,
    phone: PhoneNumber,
    account_balance: BoundedInt,
    comment: TextFragment,
    bbb_select: BoundedInt,
    // Bounds of the junk and offset draws depend on the comment length, so
    // these two are raw streams.
    bbb_junk: RandomStream,
    bbb_offset: RandomStream,
    bbb_kind: BoundedInt,
}

impl SupplierGenerator {
    const BBB_BASE: &'static str = "Customer ";
    const BBB_COMPLAINT: &'static str = "Complaints";
    const BBB_RECOMMEND: &'static str = "Recommends";
    /// Length of the injected marker: base text plus one of the two kinds.
    const BBB_LENGTH: i32 = 19;
    /// Marked suppliers per `SUPPLIER_BASE` rows.
    const BBB_PER_SCALE_BASE: i32 = 10;
    const BBB_COMPLAINT_PERCENT: i32 = 50;

    pub fn new(start: u64, count: u64) -> Self {
        let mut gen = Self {
            index: start,
            remaining: count,
            address: AlphaNumeric::new(706178559, 25),
            nation: BoundedInt::new(110356601, 0, NATIONS.len() as i32 - 1),
            phone: PhoneNumber::new(884434366),
            account_balance: BoundedInt::new(962338209, -99_999, 999_999),
            comment: TextFragment::new(1341315363, 63.0),
            bbb_select: BoundedInt::new(202794285, 1, SUPPLIER_BASE as i32),
            bbb_junk: RandomStream::new(263032577, 1),
            bbb_offset: RandomStream::new(715851524, 1),
            bbb_kind: BoundedInt::new(753643799, 0, 100),
        };
        gen.advance(start);
        gen
    }

    fn advance(&mut self, rows: u64) {
        self.address.advance_rows(rows);
        self.nation.advance_rows(rows);
        self.phone.advance_rows(rows);
        self.account_balance.advance_rows(rows);
        self.comment.advance_rows(rows);
        self.bbb_select.advance_rows(rows);
        self.bbb_junk.advance_rows(rows);
        self.bbb_offset.advance_rows(rows);
        self.bbb_kind.advance_rows(rows);
    }

    fn row_finished(&mut self) {
        self.address.row_finished();
        self.nation.row_finished();
        self.phone.row_finished();
        self.account_balance.row_finished();
        self.comment.row_finished();
        self.bbb_select.row_finished();
        self.bbb_junk.row_finished();
        self.bbb_offset.row_finished();
        self.bbb_kind.row_finished();
    }

    /// Overwrites a window of the comment with a "Customer Complaints" or
    /// "Customer Recommends" marker, with random junk allowed between the
    /// two words.
    fn mark_comment(&mut self, comment: &str) -> String {
        let mut text = comment.to_string();
        let len = text.len() as i32;

        let noise = self.bbb_junk.next_int(0, len - Self::BBB_LENGTH);
        let offset = self.bbb_offset.next_int(0, len - (Self::BBB_LENGTH + noise));

        let kind = if self.bbb_kind.next_value() < Self::BBB_COMPLAINT_PERCENT {
            Self::BBB_COMPLAINT
        } else {
            Self::BBB_RECOMMEND
        };

        let base_start = offset as usize;
        let base_end = base_start + Self::BBB_BASE.len();
        text.replace_range(base_start..base_end, Self::BBB_BASE);

        let kind_start = base_end + noise as usize;
        let kind_end = kind_start + kind.len();
        text.replace_range(kind_start..kind_end, kind);

        text
    }
}

impl Iterator for SupplierGenerator {
    type Item = SupplierRow;

    fn next(&mut self) -> Option<SupplierRow> {
        if self.remaining == 0 {
            return None;
        }
        let supplier_key = self.index as i64 + 1;

        let nation_key = self.nation.next_value() as i64;
        let base_comment = self.comment.next_value(TextPool::shared());
        let comment = if self.bbb_select.next_value() <= Self::BBB_PER_SCALE_BASE {
            self.mark_comment(base_comment)
        } else {
            base_comment.to_string()
        };

        let row = SupplierRow {
            supplier_key,
            name: format!("Supplier#{supplier_key:09}"),
            address: self.address.next_value(),
            nation_key,
            phone: self.phone.next_value(nation_key),
            account_balance: self.account_balance.next_value() as i64,
            comment,
        };

        self.row_finished();
        self.index += 1;
        self.remaining -= 1;
        Some(row)
    }
}

// --- customer ---------------------------------------------------------

pub struct CustomerRow {
    pub customer_key: i64,
    pub name: String,
    pub address: String,
    pub nation_key: i64,
    pub phone: String,
    /// Cents.
    pub account_balance: i64,
    pub market_segment: &'static str,
    pub comment: &'static str,
}

pub struct CustomerGenerator {
    index: u64,
    remaining: u64,
    address: AlphaNumeric,
    nation: BoundedInt,
    phone: PhoneNumber,
    account_balance: BoundedInt,
    market_segment: PickString,
    comment: TextFragment,
}

impl CustomerGenerator {
    pub fn new(start: u64, count: u64) -> Self {
        let mut gen = Self {
            index: start,
            remaining: count,
            address: AlphaNumeric::new(881155353, 25),
            nation: BoundedInt::new(1489529863, 0, NATIONS.len() as i32 - 1),
            phone: PhoneNumber::new(1521138112),
            account_balance: BoundedInt::new(298370230, -99_999, 999_999),
            market_segment: PickString::new(1140279430, &MARKET_SEGMENTS),
            comment: TextFragment::new(1335826707, 73.0),
        };
        gen.advance(start);
        gen
    }

    fn advance(&mut self, rows: u64) {
        self.address.advance_rows(rows);
        self.nation.advance_rows(rows);
        self.phone.advance_rows(rows);
        self.account_balance.advance_rows(rows);
        self.market_segment.advance_rows(rows);
        self.comment.advance_rows(rows);
    }

    fn row_finished(&mut self) {
        self.address.row_finished();
        self.nation.row_finished();
        self.phone.row_finished();
        self.account_balance.row_finished();
        self.market_segment.row_finished();
        self.comment.row_finished();
    }
}

impl Iterator for CustomerGenerator {
    type Item = CustomerRow;

    fn next(&mut self) -> Option<CustomerRow> {
        if self.remaining == 0 {
            return None;
        }
        let customer_key = self.index as i64 + 1;
        let nation_key = self.nation.next_value() as i64;

        let row = CustomerRow {
            customer_key,
            name: format!("Customer#{customer_key:09}"),
            address: self.address.next_value(),
            nation_key,
            phone: self.phone.next_value(nation_key),
            account_balance: self.account_balance.next_value() as i64,
            market_segment: self.market_segment.next_value(),
            comment: self.comment.next_value(TextPool::shared()),
        };

        self.row_finished();
        self.index += 1;
        self.remaining -= 1;
        Some(row)
    }
}

// --- partsupp ---------------------------------------------------------

pub struct PartSuppRow {
    pub part_key: i64,
    pub supplier_key: i64,
    pub available_quantity: i32,
    /// Cents.
    pub supply_cost: i64,
    pub comment: &'static str,
}

/// Yields the four supplier rows of each part in its window.
pub struct PartSuppGenerator {
    part_index: u64,
    parts_remaining: u64,
    supplier_number: i64,
    supplier_count: i64,
    available_quantity: BoundedInt,
    supply_cost: BoundedInt,
    comment: TextFragment,
}

impl PartSuppGenerator {
    pub fn new(scale_factor: f64, start: u64, count: u64) -> Self {
        let per_part = SUPPLIERS_PER_PART as i32;
        let mut gen = Self {
            part_index: start,
            parts_remaining: count,
            supplier_number: 0,
            supplier_count: scaled(SUPPLIER_BASE, scale_factor) as i64,
            available_quantity: BoundedInt::with_seeds_per_row(1671059989, 1, 9999, per_part),
            supply_cost: BoundedInt::with_seeds_per_row(1051288424, 100, 100_000, per_part),
            comment: TextFragment::with_seeds_per_row(1961692154, 124.0, per_part),
        };
        gen.available_quantity.advance_rows(start);
        gen.supply_cost.advance_rows(start);
        gen.comment.advance_rows(start);
        gen
    }
}

impl Iterator for PartSuppGenerator {
    type Item = PartSuppRow;

    fn next(&mut self) -> Option<PartSuppRow> {
        if self.parts_remaining == 0 {
            return None;
        }
        let part_key = self.part_index as i64 + 1;

        let row = PartSuppRow {
            part_key,
            supplier_key: select_part_supplier(part_key, self.supplier_number, self.supplier_count),
            available_quantity: self.available_quantity.next_value(),
            supply_cost: self.supply_cost.next_value() as i64,
            comment: self.comment.next_value(TextPool::shared()),
        };

        self.supplier_number += 1;
        if self.supplier_number == SUPPLIERS_PER_PART as i64 {
            self.supplier_number = 0;
            self.available_quantity.row_finished();
            self.supply_cost.row_finished();
            self.comment.row_finished();
            self.part_index += 1;
            self.parts_remaining -= 1;
        }
        Some(row)
    }
}

// --- orders -----------------------------------------------------------

pub struct OrderRow {
    pub order_key: i64,
    pub customer_key: i64,
    pub order_status: &'static str,
    /// Cents.
    pub total_price: i64,
    /// Day index into the generation window.
    pub order_date: i32,
    pub order_priority: &'static str,
    pub clerk: String,
    pub ship_priority: i32,
    pub comment: &'static str,
}

/// Shared draw plumbing for the orders table and the lineitems hanging off
/// it. Orders replay the per-line draws to price and classify themselves;
/// lineitem extends the same streams with its remaining columns.
struct OrderLineStreams {
    order_date: BoundedInt,
    line_count: BoundedInt,
    quantity: BoundedInt,
    discount: BoundedInt,
    tax: BoundedInt,
    part_key: BoundedLong,
    ship_date_offset: BoundedInt,
}

impl OrderLineStreams {
    const LINES_PER_ORDER_MAX: i32 = 7;

    fn new(scale_factor: f64) -> Self {
        let max_lines = Self::LINES_PER_ORDER_MAX;
        let part_count = scaled(PART_BASE, scale_factor) as i64;
        Self {
            order_date: BoundedInt::new(1066728069, 0, ORDER_DATE_MAX),
            line_count: BoundedInt::new(LINE_COUNT_SEED, 1, max_lines),
            quantity: BoundedInt::with_seeds_per_row(209208115, 1, 50, max_lines),
            discount: BoundedInt::with_seeds_per_row(554590007, 0, 10, max_lines),
            tax: BoundedInt::with_seeds_per_row(721958466, 0, 8, max_lines),
            part_key: BoundedLong::with_seeds_per_row(
                1808217256,
                use_wide_keys(scale_factor),
                1,
                part_count,
                max_lines,
            ),
            ship_date_offset: BoundedInt::with_seeds_per_row(1769349045, 1, 121, max_lines),
        }
    }

    fn advance(&mut self, rows: u64) {
        self.order_date.advance_rows(rows);
        self.line_count.advance_rows(rows);
        self.quantity.advance_rows(rows);
        self.discount.advance_rows(rows);
        self.tax.advance_rows(rows);
        self.part_key.advance_rows(rows);
        self.ship_date_offset.advance_rows(rows);
    }

    fn row_finished(&mut self) {
        self.order_date.row_finished();
        self.line_count.row_finished();
        self.quantity.row_finished();
        self.discount.row_finished();
        self.tax.row_finished();
        self.part_key.row_finished();
        self.ship_date_offset.row_finished();
    }
}

pub struct OrderGenerator {
    index: u64,
    remaining: u64,
    max_customer_key: i64,
    streams: OrderLineStreams,
    customer_key: BoundedLong,
    order_priority: PickString,
    clerk: BoundedInt,
    comment: TextFragment,
}

impl OrderGenerator {
    /// One in three customer keys never places an order.
    const CUSTOMER_MORTALITY: i64 = 3;
    const CLERKS_PER_SCALE_BASE: i32 = 1_000;

    pub fn new(scale_factor: f64, start: u64, count: u64) -> Self {
        let max_customer_key = scaled(CUSTOMER_BASE, scale_factor) as i64;
        let max_clerk = (Self::CLERKS_PER_SCALE_BASE as f64 * scale_factor) as i32;
        let max_clerk = max_clerk.max(Self::CLERKS_PER_SCALE_BASE);

        let mut gen = Self {
            index: start,
            remaining: count,
            max_customer_key,
            streams: OrderLineStreams::new(scale_factor),
            customer_key: BoundedLong::new(
                851767375,
                use_wide_keys(scale_factor),
                1,
                max_customer_key,
            ),
            order_priority: PickString::new(591449447, &ORDER_PRIORITIES),
            clerk: BoundedInt::new(1171034773, 1, max_clerk),
            comment: TextFragment::new(276090261, 49.0),
        };
        gen.advance(start);
        gen
    }

    fn advance(&mut self, rows: u64) {
        self.streams.advance(rows);
        self.customer_key.advance_rows(rows);
        self.order_priority.advance_rows(rows);
        self.clerk.advance_rows(rows);
        self.comment.advance_rows(rows);
    }

    fn row_finished(&mut self) {
        self.streams.row_finished();
        self.customer_key.row_finished();
        self.order_priority.row_finished();
        self.clerk.row_finished();
        self.comment.row_finished();
    }

    /// Steps a raw customer draw off the one-in-three keys that place no
    /// orders, alternating direction so the result stays in range.
    fn live_customer_key(&self, mut customer_key: i64) -> i64 {
        let mut delta = 1;
        while customer_key % Self::CUSTOMER_MORTALITY == 0 {
            customer_key += delta;
            customer_key = customer_key.min(self.max_customer_key);
            delta = -delta;
        }
        customer_key
    }
}

impl Iterator for OrderGenerator {
    type Item = OrderRow;

    fn next(&mut self) -> Option<OrderRow> {
        if self.remaining == 0 {
            return None;
        }
        let order_index = self.index as i64 + 1;

        let order_date = self.streams.order_date.next_value();
        let raw_customer_key = self.customer_key.next_value();
        let customer_key = self.live_customer_key(raw_customer_key);

        // Replay this order's line draws to derive the total price and how
        // many of its lines have shipped by the fixed current date.
        let line_count = self.streams.line_count.next_value();
        let mut total_price = 0i64;
        let mut shipped = 0;
        for _ in 0..line_count {
            let quantity = self.streams.quantity.next_value() as i64;
            let discount = self.streams.discount.next_value() as i64;
            let tax = self.streams.tax.next_value() as i64;
            let part_key = self.streams.part_key.next_value();

            let extended_price = part_price(part_key) * quantity;
            let discounted = extended_price * (100 - discount);
            total_price += discounted / 100 * (100 + tax) / 100;

            let ship_date = order_date + self.streams.ship_date_offset.next_value();
            if is_in_past(ship_date) {
                shipped += 1;
            }
        }

        let order_status = if shipped == line_count {
            "F"
        } else if shipped > 0 {
            "P"
        } else {
            "O"
        };

        let clerk = self.clerk.next_value();
        let row = OrderRow {
            order_key: make_order_key(order_index),
            customer_key,
            order_status,
            total_price,
            order_date,
            order_priority: self.order_priority.next_value(),
            clerk: format!("Clerk#{clerk:09}"),
            ship_priority: 0,
            comment: self.comment.next_value(TextPool::shared()),
        };

        self.row_finished();
        self.index += 1;
        self.remaining -= 1;
        Some(row)
    }
}

// --- lineitem ---------------------------------------------------------

pub struct LineItemRow {
    pub order_key: i64,
    pub part_key: i64,
    pub supplier_key: i64,
    pub line_number: i32,
    /// Whole units.
    pub quantity: i64,
    /// Cents.
    pub extended_price: i64,
    /// Hundredths.
    pub discount: i64,
    /// Hundredths.
    pub tax: i64,
    pub return_flag: &'static str,
    pub line_status: &'static str,
    pub ship_date: i32,
    pub commit_date: i32,
    pub receipt_date: i32,
    pub ship_instructions: &'static str,
    pub ship_mode: &'static str,
    pub comment: &'static str,
}

/// Yields every line of each order in its window.
pub struct LineItemGenerator {
    order_index: u64,
    orders_remaining: u64,
    supplier_count: i64,
    streams: OrderLineStreams,
    supplier_number: BoundedInt,
    commit_date_offset: BoundedInt,
    receipt_date_offset: BoundedInt,
    return_flag: PickString,
    ship_instructions: PickString,
    ship_mode: PickString,
    comment: TextFragment,
    // Position inside the current order; `line_count == 0` means the next
    // order has not been opened yet.
    order_date: i32,
    line_count: i32,
    line_number: i32,
}

impl LineItemGenerator {
    pub fn new(scale_factor: f64, start: u64, count: u64) -> Self {
        let max_lines = OrderLineStreams::LINES_PER_ORDER_MAX;
        let mut gen = Self {
            order_index: start,
            orders_remaining: count,
            supplier_count: scaled(SUPPLIER_BASE, scale_factor) as i64,
            streams: OrderLineStreams::new(scale_factor),
            supplier_number: BoundedInt::with_seeds_per_row(2095021727, 0, 3, max_lines),
            commit_date_offset: BoundedInt::with_seeds_per_row(904914315, 30, 90, max_lines),
            receipt_date_offset: BoundedInt::with_seeds_per_row(373135028, 1, 30, max_lines),
            return_flag: PickString::with_seeds_per_row(717419739, &RETURN_FLAGS, max_lines),
            ship_instructions: PickString::with_seeds_per_row(
                1371272478,
                &SHIP_INSTRUCTIONS,
                max_lines,
            ),
            ship_mode: PickString::with_seeds_per_row(675466456, &SHIP_MODES, max_lines),
            comment: TextFragment::with_seeds_per_row(1095462486, 27.0, max_lines),
            order_date: 0,
            line_count: 0,
            line_number: 0,
        };
        gen.advance(start);
        gen
    }

    fn advance(&mut self, rows: u64) {
        self.streams.advance(rows);
        self.supplier_number.advance_rows(rows);
        self.commit_date_offset.advance_rows(rows);
        self.receipt_date_offset.advance_rows(rows);
        self.return_flag.advance_rows(rows);
        self.ship_instructions.advance_rows(rows);
        self.ship_mode.advance_rows(rows);
        self.comment.advance_rows(rows);
    }

    fn finish_order(&mut self) {
        self.streams.row_finished();
        self.supplier_number.row_finished();
        self.commit_date_offset.row_finished();
        self.receipt_date_offset.row_finished();
        self.return_flag.row_finished();
        self.ship_instructions.row_finished();
        self.ship_mode.row_finished();
        self.comment.row_finished();
    }
}

impl Iterator for LineItemGenerator {
    type Item = LineItemRow;

    fn next(&mut self) -> Option<LineItemRow> {
        if self.orders_remaining == 0 {
            return None;
        }
        if self.line_number == self.line_count {
            if self.line_count != 0 {
                self.finish_order();
                self.order_index += 1;
                self.orders_remaining -= 1;
                if self.orders_remaining == 0 {
                    return None;
                }
            }
            self.order_date = self.streams.order_date.next_value();
            self.line_count = self.streams.line_count.next_value();
            self.line_number = 0;
        }
        self.line_number += 1;

        let order_index = self.order_index as i64 + 1;
        let quantity = self.streams.quantity.next_value() as i64;
        let discount = self.streams.discount.next_value() as i64;
        let tax = self.streams.tax.next_value() as i64;
        let part_key = self.streams.part_key.next_value();
        let supplier_number = self.supplier_number.next_value() as i64;

        let ship_date = self.order_date + self.streams.ship_date_offset.next_value();
        let commit_date = self.order_date + self.commit_date_offset.next_value();
        let receipt_date = ship_date + self.receipt_date_offset.next_value();

        let return_flag = if is_in_past(receipt_date) {
            self.return_flag.next_value()
        } else {
            "N"
        };
        let line_status = if is_in_past(ship_date) { "F" } else { "O" };

        Some(LineItemRow {
            order_key: make_order_key(order_index),
            part_key,
            supplier_key: select_part_supplier(part_key, supplier_number, self.supplier_count),
            line_number: self.line_number,
            quantity,
            extended_price: part_price(part_key) * quantity,
            discount,
            tax,
            return_flag,
            line_status,
            ship_date,
            commit_date,
            receipt_date,
            ship_instructions: self.ship_instructions.next_value(),
            ship_mode: self.ship_mode.next_value(),
            comment: self.comment.next_value(TextPool::shared()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn nation_table_is_fixed() {
        let rows: Vec<_> = NationGenerator::new(0, 25).collect();
        assert_eq!(rows.len(), 25);
        assert_eq!(rows[0].name, "ALGERIA");
        assert_eq!(rows[0].region_key, 0);
        assert_eq!(rows[1].name, "ARGENTINA");
        assert_eq!(rows[1].region_key, 1);
        assert_eq!(rows[4].name, "EGYPT");
        assert_eq!(rows[4].region_key, 4);
        assert_eq!(rows[24].name, "UNITED STATES");
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.nation_key, i as i64);
            assert!(!row.comment.is_empty());
        }
    }

    #[test]
    fn region_table_is_fixed() {
        let rows: Vec<_> = RegionGenerator::new(0, 5).collect();
        let names: Vec<_> = rows.iter().map(|r| r.name).collect();
        assert_eq!(names, ["AFRICA", "AMERICA", "ASIA", "EUROPE", "MIDDLE EAST"]);
    }

    #[test]
    fn windows_reproduce_the_full_scan() {
        let full: Vec<_> = PartGenerator::new(0, 200).map(|r| (r.part_key, r.name)).collect();
        let mut windowed = Vec::new();
        for start in [0u64, 70, 140] {
            let count = (200 - start).min(70);
            windowed.extend(PartGenerator::new(start, count).map(|r| (r.part_key, r.name)));
        }
        assert_eq!(full, windowed);
    }

    #[test]
    fn part_fields_have_canonical_shapes() {
        for row in PartGenerator::new(0, 500) {
            assert_eq!(row.name.split(' ').count(), 5);
            assert!(row.mfgr.starts_with("Manufacturer#"));
            assert!(row.brand.starts_with("Brand#"));
            assert!((1..=50).contains(&row.size));
            assert_eq!(row.retail_price, part_price(row.part_key));
        }
    }

    #[test]
    fn part_price_formula() {
        assert_eq!(part_price(1), 90_000 + 0 + 100);
        assert_eq!(part_price(1000), 90_000 + 100 + 0);
        assert_eq!(part_price(200_000), 90_000 + 20_000 + 0);
    }

    #[test]
    fn supplier_names_and_balances() {
        for row in SupplierGenerator::new(0, 200) {
            assert_eq!(row.name, format!("Supplier#{:09}", row.supplier_key));
            assert!((0..25).contains(&row.nation_key));
            assert!((-99_999..=999_999).contains(&row.account_balance));
            assert_eq!(row.phone.len(), 15);
        }
    }

    #[test]
    fn some_suppliers_carry_bbb_markers() {
        // About 10 per 10_000 suppliers get a marker.
        let marked = SupplierGenerator::new(0, 10_000)
            .filter(|r| r.comment.contains("Customer "))
            .filter(|r| r.comment.contains("Complaints") || r.comment.contains("Recommends"))
            .count();
        assert!(marked >= 1, "expected at least one marked supplier");
        assert!(marked <= 40, "far too many marked suppliers: {marked}");
    }

    #[test]
    fn customer_phone_matches_nation() {
        for row in CustomerGenerator::new(0, 300) {
            let expected = format!("{:02}", 10 + row.nation_key % 90);
            assert!(row.phone.starts_with(&expected));
            assert!(MARKET_SEGMENTS.values().any(|s| s == row.market_segment));
        }
    }

    #[test]
    fn partsupp_pairs_are_unique_per_part() {
        let sf = 0.01;
        let supplier_count = 100;
        let mut seen = HashSet::new();
        for row in PartSuppGenerator::new(sf, 0, 500) {
            assert!((1..=supplier_count).contains(&row.supplier_key));
            assert!(seen.insert((row.part_key, row.supplier_key)));
            assert!((1..=9999).contains(&row.available_quantity));
            assert!((100..=100_000).contains(&row.supply_cost));
        }
        assert_eq!(seen.len(), 2000);
    }

    #[test]
    fn order_keys_are_sparse_and_increasing() {
        let keys: Vec<_> = OrderGenerator::new(0.01, 0, 100).map(|r| r.order_key).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));
        // The first eight indices keep their low bits.
        assert_eq!(keys[0], 1);
        assert_eq!(keys[7], 32);
        assert_eq!(make_order_key(8), 32);
        assert_eq!(make_order_key(9), 33);
    }

    #[test]
    fn orders_skip_dead_customers() {
        for row in OrderGenerator::new(0.01, 0, 1000) {
            assert_ne!(row.customer_key % 3, 0);
            assert!(row.customer_key >= 1);
            assert!(matches!(row.order_status, "F" | "P" | "O"));
            assert!(row.clerk.starts_with("Clerk#"));
            assert!(row.total_price > 0);
        }
    }

    #[test]
    fn lineitem_dates_are_ordered() {
        for row in LineItemGenerator::new(0.01, 0, 300) {
            assert!(row.ship_date > 0);
            assert!(row.commit_date > 0);
            assert!(row.receipt_date > row.ship_date);
            assert!(row.receipt_date - row.ship_date <= 30);
            if row.line_status == "O" {
                assert!(!is_in_past(row.ship_date));
            }
            if row.return_flag == "N" {
                assert!(!is_in_past(row.receipt_date));
            } else {
                assert!(is_in_past(row.receipt_date));
            }
        }
    }

    #[test]
    fn lineitems_agree_with_their_orders() {
        let sf = 0.001;
        let orders: Vec<_> = OrderGenerator::new(sf, 0, 200).collect();
        let lines: Vec<_> = LineItemGenerator::new(sf, 0, 200).collect();

        // Same sparse keys, same per-order totals.
        let mut line_iter = lines.iter().peekable();
        for order in &orders {
            let mut total = 0i64;
            let mut count = 0;
            while let Some(line) = line_iter.peek() {
                if line.order_key != order.order_key {
                    break;
                }
                let discounted = line.extended_price * (100 - line.discount);
                total += discounted / 100 * (100 + line.tax) / 100;
                count += 1;
                line_iter.next();
            }
            assert!((1..=7).contains(&count), "order with {count} lines");
            assert_eq!(total, order.total_price, "order {}", order.order_key);
        }
        assert!(line_iter.next().is_none());
    }

    #[test]
    fn lineitem_windows_reproduce_the_full_scan() {
        let sf = 0.001;
        let full: Vec<_> = LineItemGenerator::new(sf, 0, 120)
            .map(|r| (r.order_key, r.line_number, r.part_key, r.ship_date))
            .collect();
        let mut windowed = Vec::new();
        for start in [0u64, 40, 80] {
            windowed.extend(
                LineItemGenerator::new(sf, start, 40)
                    .map(|r| (r.order_key, r.line_number, r.part_key, r.ship_date)),
            );
        }
        assert_eq!(full, windowed);
    }
}
