//! Date handling for the generated tables.
//!
//! All generated dates fall in a fixed seven-year window starting 1992-01-01
//! and are modeled as day indices into that window. Conversion to the Arrow
//! `Date32` epoch (days since 1970-01-01) is a constant offset.

/// Number of days in the generation window 1992-01-01 ..= 1998-12-31.
pub const TOTAL_DATE_RANGE: i32 = 2557;

/// Order dates leave room for the longest ship + receipt lag so every
/// lineitem date stays inside the window.
pub const ITEM_SHIP_DAYS: i32 = 121 + 30;

/// Largest valid order-date index, inclusive.
pub const ORDER_DATE_MAX: i32 = TOTAL_DATE_RANGE - ITEM_SHIP_DAYS - 1;

/// Days from 1970-01-01 to 1992-01-01.
const EPOCH_OFFSET: i32 = 8035;

/// Day index of the benchmark's fixed "current date", 1995-06-17. Dates at
/// or before it are "in the past", which drives order status and return
/// flags.
const CURRENT_DATE_INDEX: i32 = 1263;

pub fn is_in_past(day_index: i32) -> bool {
    day_index <= CURRENT_DATE_INDEX
}

/// Converts a window day index to an Arrow `Date32` value.
pub fn to_date32(day_index: i32) -> i32 {
    day_index + EPOCH_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_map_to_expected_calendar_days() {
        // 1992-01-01 is 8035 days after the Unix epoch.
        assert_eq!(to_date32(0), 8035);
        // 1998-12-31, the last day of the window.
        assert_eq!(to_date32(TOTAL_DATE_RANGE - 1), 8035 + 2556);
    }

    #[test]
    fn current_date_splits_the_window() {
        assert!(is_in_past(0));
        assert!(is_in_past(CURRENT_DATE_INDEX));
        assert!(!is_in_past(CURRENT_DATE_INDEX + 1));
        assert!(!is_in_past(TOTAL_DATE_RANGE - 1));
    }

    #[test]
    fn order_dates_leave_room_for_shipping() {
        assert_eq!(ORDER_DATE_MAX, 2405);
        assert!(ORDER_DATE_MAX + ITEM_SHIP_DAYS < TOTAL_DATE_RANGE);
    }
}
