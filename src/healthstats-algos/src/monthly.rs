use std::collections::BTreeMap;

use chrono::Datelike;

use crate::helpers::time_math::mean;

/// How entry dates are folded into month buckets for month-over-month
/// comparison.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MonthGrouping {
    /// Month of year only (1-12). Januaries of different years share a bucket.
    #[default]
    MonthOnly,
    /// `(year, month)` pairs.
    YearMonth,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    pub year: Option<i32>,
    pub month: u32,
}

impl MonthGrouping {
    pub fn key<D: Datelike>(self, date: &D) -> MonthKey {
        match self {
            MonthGrouping::MonthOnly => MonthKey {
                year: None,
                month: date.month(),
            },
            MonthGrouping::YearMonth => MonthKey {
                year: Some(date.year()),
                month: date.month(),
            },
        }
    }
}

/// Percent change between the means of the two largest month buckets present.
///
/// `None` when there are fewer than two entries, fewer than two buckets, or the
/// earlier bucket averages to zero. The buckets compared are the two largest
/// keys, whether or not they are adjacent months.
pub fn monthly_percent_change<E, K, M, V>(entries: &[E], month_key: M, value: V) -> Option<f64>
where
    K: Ord,
    M: Fn(&E) -> K,
    V: Fn(&E) -> f64,
{
    if entries.len() < 2 {
        return None;
    }

    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for entry in entries {
        groups.entry(month_key(entry)).or_default().push(value(entry));
    }

    let mut newest_first = groups.into_values().rev();
    let (Some(last), Some(previous)) = (newest_first.next(), newest_first.next()) else {
        return None;
    };

    let avg_last = mean(&last);
    let avg_previous = mean(&previous);
    if avg_previous == 0.0 {
        return None;
    }

    Some((avg_last - avg_previous) / avg_previous * 100.0)
}
