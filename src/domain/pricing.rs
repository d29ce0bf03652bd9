//! Pricing calendar
//!
//! Resolves the price a slot gets when provisioned from a shift. The result
//! is snapshotted onto the slot; later edits to the shift's table do not
//! propagate.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use crate::models::shift::WeekdayPrices;

/// Price for a given date, looked up by weekday (Sunday-first table)
pub fn price_for(prices: &WeekdayPrices, date: NaiveDate) -> Decimal {
    prices.0[date.weekday().num_days_from_sunday() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> WeekdayPrices {
        WeekdayPrices([
            Decimal::new(10000, 2), // Sun
            Decimal::new(5000, 2),  // Mon
            Decimal::new(5000, 2),  // Tue
            Decimal::new(5000, 2),  // Wed
            Decimal::new(6000, 2),  // Thu
            Decimal::new(8000, 2),  // Fri
            Decimal::new(10000, 2), // Sat
        ])
    }

    #[test]
    fn test_weekday_lookup() {
        // 2025-01-05 is a Sunday
        let sunday = NaiveDate::from_ymd_opt(2025, 1, 5).unwrap();
        assert_eq!(price_for(&table(), sunday), Decimal::new(10000, 2));

        let monday = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        assert_eq!(price_for(&table(), monday), Decimal::new(5000, 2));

        let friday = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(price_for(&table(), friday), Decimal::new(8000, 2));
    }
}
