use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use chrono::{Local, TimeZone};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{error, warn};

use crate::models::{oldest_first, TransactionRecord};
use crate::types::day_label;

/// Bucket label for records whose `created_at` cannot be placed on a calendar.
pub const UNKNOWN_DAY_LABEL: &str = "--/--";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub total_source: Decimal,
    pub total_target: Decimal,
    /// `total_target / total_source`, or zero when nothing was converted.
    pub average_rate: Decimal
}

/// Source and target totals for one calendar day (`DD/MM`).
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBucket {
    pub label: String,
    pub source_sum: Decimal,
    pub target_sum: Decimal
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerStats {
    pub summary: Summary,
    /// Buckets in chronological order of their first record.
    pub series: Vec<DailyBucket>
}

impl LedgerStats {
    /// True when there is nothing to report; consumers show an empty state instead of a chart.
    pub fn is_empty(&self) -> bool {
        self.summary.count == 0
    }
}

/// Aggregates `records` bucketed by the local calendar day.
pub fn aggregate(records: &[TransactionRecord]) -> LedgerStats {
    aggregate_in(records, &Local)
}

/// Aggregates `records` bucketed by calendar day in `timezone`.
///
/// Bucket labels carry no year, so records from the same day and month of
/// different years land in one bucket.
pub fn aggregate_in<Tz: TimeZone>(records: &[TransactionRecord], timezone: &Tz) -> LedgerStats
where
    Tz::Offset: Display,
{
    LedgerStats {
        summary: summarize(records),
        series: daily_series(records, timezone)
    }
}

pub fn summarize(records: &[TransactionRecord]) -> Summary {
    let mut total_source = Decimal::ZERO;
    let mut total_target = Decimal::ZERO;

    for record in records {
        accumulate(&mut total_source, record, record.source_amount);
        accumulate(&mut total_target, record, record.target_amount);
    }

    let average_rate = if total_source > Decimal::ZERO {
        total_target.checked_div(total_source).unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };

    Summary {
        count: records.len(),
        total_source,
        total_target,
        average_rate
    }
}

fn daily_series<Tz: TimeZone>(records: &[TransactionRecord], timezone: &Tz) -> Vec<DailyBucket>
where
    Tz::Offset: Display,
{
    let mut series: Vec<DailyBucket> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for record in oldest_first(records) {
        let label = day_label(record.created_at, timezone).unwrap_or_else(|| {
            warn!("Record [{}] has an out of range createdAt [{}]", record.id, record.created_at);
            UNKNOWN_DAY_LABEL.to_string()
        });

        let position = *positions.entry(label.clone()).or_insert_with(|| {
            series.push(DailyBucket {
                label,
                source_sum: Decimal::ZERO,
                target_sum: Decimal::ZERO
            });
            series.len() - 1
        });

        let bucket = &mut series[position];
        accumulate(&mut bucket.source_sum, record, record.source_amount);
        accumulate(&mut bucket.target_sum, record, record.target_amount);
    }

    series
}

/// Exact decimal value of a stored amount, read from its shortest text form.
///
/// `None` when the amount lies outside the fixed-point range (about ±7.9e28).
fn amount_to_decimal(amount: f64) -> Option<Decimal> {
    Decimal::from_str(&amount.to_string())
        .ok()
        .or_else(|| Decimal::from_f64(amount))
}

// Amounts that cannot be represented are left out of every total alike, so
// bucket sums still add up to the summary.
fn accumulate(total: &mut Decimal, record: &TransactionRecord, amount: f64) {
    let Some(amount) = amount_to_decimal(amount) else {
        error!("Stats accumulation error: Record [{}] amount [{amount}] is out of range", record.id);
        return;
    };

    match total.checked_add(amount) {
        Some(sum) => *total = sum,
        None => error!("Stats accumulation error: Overflow adding [{amount}]")
    }
}
