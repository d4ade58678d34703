use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HeartRateSample {
    pub timestamp: DateTime<Utc>,
    pub bpm: f64,
}

/// Raw sleep or in-bed interval, may cross midnight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl SleepInterval {
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}
