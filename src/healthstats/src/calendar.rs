use std::str::FromStr;

use chrono::{DateTime, Datelike, FixedOffset, Local, Months, NaiveTime, TimeZone, Utc};
use healthstats_algos::{MonthGrouping, bpm_percent_change, compute_sleep_per_day};
use healthstats_types::{
    entries::{SleepDayEntry, WorkoutBpmEntry},
    samples::SleepInterval,
};

use crate::HealthStatsError;

/// Reference calendar used to split instants into days and months.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CalendarZone {
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl CalendarZone {
    pub fn sleep_per_day(&self, intervals: &[SleepInterval]) -> Vec<SleepDayEntry> {
        match self {
            CalendarZone::Local => compute_sleep_per_day(intervals, &Local),
            CalendarZone::Utc => compute_sleep_per_day(intervals, &Utc),
            CalendarZone::Fixed(offset) => compute_sleep_per_day(intervals, offset),
        }
    }

    pub fn bpm_percent_change(
        &self,
        entries: &[WorkoutBpmEntry],
        grouping: MonthGrouping,
    ) -> Option<f64> {
        match self {
            CalendarZone::Local => bpm_percent_change(entries, &Local, grouping),
            CalendarZone::Utc => bpm_percent_change(entries, &Utc, grouping),
            CalendarZone::Fixed(offset) => bpm_percent_change(entries, offset, grouping),
        }
    }

    /// Midnight of the first day of the month containing `now`.
    pub fn start_of_month(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            CalendarZone::Local => start_of_month(now, &Local),
            CalendarZone::Utc => start_of_month(now, &Utc),
            CalendarZone::Fixed(offset) => start_of_month(now, offset),
        }
    }

    /// `now` moved back by whole calendar months.
    pub fn months_before(&self, now: DateTime<Utc>, months: u32) -> Option<DateTime<Utc>> {
        match self {
            CalendarZone::Local => months_before(now, &Local, months),
            CalendarZone::Utc => months_before(now, &Utc, months),
            CalendarZone::Fixed(offset) => months_before(now, offset, months),
        }
    }

    pub fn format(&self, time: DateTime<Utc>, fmt: &str) -> String {
        match self {
            CalendarZone::Local => time.with_timezone(&Local).format(fmt).to_string(),
            CalendarZone::Utc => time.format(fmt).to_string(),
            CalendarZone::Fixed(offset) => time.with_timezone(offset).format(fmt).to_string(),
        }
    }
}

fn start_of_month<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz) -> Option<DateTime<Utc>> {
    let first = now.with_timezone(tz).date_naive().with_day(1)?;
    tz.from_local_datetime(&first.and_time(NaiveTime::MIN))
        .earliest()
        .map(|d| d.with_timezone(&Utc))
}

fn months_before<Tz: TimeZone>(now: DateTime<Utc>, tz: &Tz, months: u32) -> Option<DateTime<Utc>> {
    now.with_timezone(tz)
        .checked_sub_months(Months::new(months))
        .map(|d| d.with_timezone(&Utc))
}

impl FromStr for CalendarZone {
    type Err = HealthStatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => return Ok(Self::Local),
            "utc" | "z" => return Ok(Self::Utc),
            _ => {}
        }

        DateTime::parse_from_str(&format!("2000-01-01T00:00:00{}", s.trim()), "%Y-%m-%dT%H:%M:%S%:z")
            .map(|d| Self::Fixed(*d.offset()))
            .map_err(|_| HealthStatsError::InvalidTimezone(s.to_string()))
    }
}
