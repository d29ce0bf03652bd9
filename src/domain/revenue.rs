//! Revenue aggregation
//!
//! Buckets raw revenue facts into a time series whose granularity adapts to
//! the queried range: per start time for a single day, per day (zero-filled)
//! for ranges up to a month, per month beyond that.

use chrono::{Datelike, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Ranges longer than this many days are bucketed per month
const MAX_DAILY_RANGE_DAYS: i64 = 31;

/// One raw revenue observation: a booked slot's date, start time and its
/// share of the booking's final amount
#[derive(Debug, Clone)]
pub struct RevenueFact {
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub amount: Decimal,
}

/// Granularity selected for a query range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Hourly,
    Daily,
    Monthly,
}

/// One bucket of the output series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RevenueBucket {
    /// Human label ("18:00", "Jan 2", "Jan 2025")
    pub label: String,
    /// Sortable key ("18:00", "2025-01-02", "2025-01")
    pub key: String,
    pub amount: Decimal,
}

/// Pick the bucketing granularity for an inclusive range
pub fn granularity_for(start: NaiveDate, end: NaiveDate) -> Granularity {
    let days = (end - start).num_days();
    if days == 0 {
        Granularity::Hourly
    } else if days <= MAX_DAILY_RANGE_DAYS {
        Granularity::Daily
    } else {
        Granularity::Monthly
    }
}

/// Bucket `facts` (assumed pre-filtered to `[start, end]`) into an ordered
/// series. Pure function of its inputs.
pub fn bucketize(facts: &[RevenueFact], start: NaiveDate, end: NaiveDate) -> Vec<RevenueBucket> {
    match granularity_for(start, end) {
        Granularity::Hourly => by_start_time(facts),
        Granularity::Daily => by_day(facts, start, end),
        Granularity::Monthly => by_month(facts),
    }
}

/// One bucket per distinct start time observed, ascending. No synthetic
/// zero buckets: valid start times are field-dependent, not a continuous
/// domain. Facts without a time sort first under a placeholder label.
fn by_start_time(facts: &[RevenueFact]) -> Vec<RevenueBucket> {
    let mut sums: BTreeMap<Option<NaiveTime>, Decimal> = BTreeMap::new();
    for fact in facts {
        *sums.entry(fact.start_time).or_insert(Decimal::ZERO) += fact.amount;
    }
    sums.into_iter()
        .map(|(time, amount)| {
            let label = match time {
                Some(t) => t.format("%H:%M").to_string(),
                None => "—".to_string(),
            };
            RevenueBucket { key: label.clone(), label, amount }
        })
        .collect()
}

/// One bucket per calendar date in the inclusive range, zero-filled
fn by_day(facts: &[RevenueFact], start: NaiveDate, end: NaiveDate) -> Vec<RevenueBucket> {
    let mut sums: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    let mut date = start;
    while date <= end {
        sums.insert(date, Decimal::ZERO);
        if let Some(next) = date.succ_opt() {
            date = next;
        } else {
            break;
        }
    }
    for fact in facts {
        if let Some(sum) = sums.get_mut(&fact.date) {
            *sum += fact.amount;
        }
    }
    sums.into_iter()
        .map(|(date, amount)| RevenueBucket {
            label: date.format("%b %-d").to_string(),
            key: date.format("%Y-%m-%d").to_string(),
            amount,
        })
        .collect()
}

/// One bucket per year-month with at least one fact; no zero-fill
fn by_month(facts: &[RevenueFact]) -> Vec<RevenueBucket> {
    let mut sums: BTreeMap<(i32, u32), Decimal> = BTreeMap::new();
    for fact in facts {
        *sums
            .entry((fact.date.year(), fact.date.month()))
            .or_insert(Decimal::ZERO) += fact.amount;
    }
    sums.into_iter()
        .map(|((year, month), amount)| {
            // First-of-month date only used for formatting
            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            RevenueBucket {
                label: first.format("%b %Y").to_string(),
                key: format!("{:04}-{:02}", year, month),
                amount,
            }
        })
        .collect()
}
