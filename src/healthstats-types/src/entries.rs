//! Derived data points produced by the aggregation crate.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::workouts::WorkoutWindow;

/// Average heart rate over one workout. `date` is the workout start.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutBpmEntry {
    pub date: DateTime<Utc>,
    pub average_bpm: f64,
    pub workout: WorkoutWindow,
}

/// Total sleep attributed to one calendar day of the reference zone.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SleepDayEntry {
    pub date: NaiveDate,
    pub duration_in_hours: f64,
}

impl SleepDayEntry {
    /// Instant at which `date` begins in `tz`.
    ///
    /// Returns the earlier instant for ambiguous midnights and `None` when
    /// midnight does not exist in `tz` on that day.
    pub fn start_of_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<DateTime<Tz>> {
        tz.from_local_datetime(&self.date.and_time(NaiveTime::MIN))
            .earliest()
    }
}
