use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeDelta, TimeZone};
use healthstats_types::{entries::SleepDayEntry, samples::SleepInterval};

use crate::monthly::{MonthGrouping, monthly_percent_change};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Hours of sleep per calendar day of `tz`, sorted by day.
///
/// Each interval counts in full towards the day it starts on, even when it
/// runs past midnight. An interval ending before it starts counts as zero.
/// Durations are summed exactly per day and converted to hours once.
pub fn compute_sleep_per_day<Tz: TimeZone>(
    intervals: &[SleepInterval],
    tz: &Tz,
) -> Vec<SleepDayEntry> {
    let mut daily: BTreeMap<NaiveDate, i64> = BTreeMap::new();

    for interval in intervals {
        let day = interval.start.with_timezone(tz).date_naive();
        let duration = interval.duration().max(TimeDelta::zero());
        *daily.entry(day).or_default() += duration.num_milliseconds();
    }

    daily
        .into_iter()
        .map(|(date, millis)| SleepDayEntry {
            date,
            duration_in_hours: millis as f64 / MILLIS_PER_HOUR,
        })
        .collect()
}

/// Month-over-month change of daily sleep hours.
pub fn sleep_percent_change(entries: &[SleepDayEntry], grouping: MonthGrouping) -> Option<f64> {
    monthly_percent_change(entries, |e| grouping.key(&e.date), |e| e.duration_in_hours)
}
