use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Query window handed to the health store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The `duration` immediately preceding `end`.
    pub fn before(end: DateTime<Utc>, duration: TimeDelta) -> Self {
        Self {
            start: end - duration,
            end,
        }
    }

    /// Closed interval check. An inverted range contains nothing.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }

    /// `start <= from && to <= end`
    pub fn encloses(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
        from >= self.start && to <= self.end
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let end = start + TimeDelta::hours(1);
        let range = TimeRange::new(start, end);

        assert!(range.contains(start));
        assert!(range.contains(end));
        assert!(!range.contains(end + TimeDelta::seconds(1)));
    }

    #[test]
    fn inverted_range_is_empty() {
        let start = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let range = TimeRange::new(start, start - TimeDelta::minutes(5));

        assert!(!range.contains(start));
        assert!(!range.contains(start - TimeDelta::minutes(1)));
    }

    #[test]
    fn before_spans_duration() {
        let end = Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap();
        let range = TimeRange::before(end, TimeDelta::hours(18));
        assert_eq!(range.end - range.start, TimeDelta::hours(18));
        assert!(range.encloses(end - TimeDelta::hours(9), end));
        assert!(!range.encloses(end - TimeDelta::hours(19), end));
    }
}
