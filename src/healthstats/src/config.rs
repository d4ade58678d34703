use std::time::Duration;

use healthstats_algos::MonthGrouping;
use healthstats_types::workouts::ActivityType;

use crate::{HealthStatsError, calendar::CalendarZone};

pub const DEFAULT_LOOKBACK_MONTHS: u32 = 3;

#[derive(Clone, Copy, Debug)]
pub struct DashboardConfig {
    pub zone: CalendarZone,
    pub month_grouping: MonthGrouping,
    /// How many calendar months of workouts and sleep to fetch.
    pub lookback_months: u32,
    /// Per-fetch limit. `None` waits for the store indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            zone: CalendarZone::default(),
            month_grouping: MonthGrouping::default(),
            lookback_months: DEFAULT_LOOKBACK_MONTHS,
            fetch_timeout: None,
        }
    }
}

pub fn parse_month_grouping(s: &str) -> Result<MonthGrouping, HealthStatsError> {
    match s {
        "month-only" | "month" => Ok(MonthGrouping::MonthOnly),
        "year-month" => Ok(MonthGrouping::YearMonth),
        _ => Err(HealthStatsError::InvalidMonthGrouping(s.to_string())),
    }
}

pub fn parse_activity(s: &str) -> Result<ActivityType, HealthStatsError> {
    s.parse()
        .map_err(|_| HealthStatsError::InvalidActivity(s.to_string()))
}
