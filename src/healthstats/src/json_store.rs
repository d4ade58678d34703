use std::path::Path;

use healthstats_types::{
    TimeRange,
    samples::{HeartRateSample, SleepInterval},
    workouts::WorkoutWindow,
};
use serde::{Deserialize, Serialize};

use crate::{HealthStatsError, store::HealthStore};

pub const DEFAULT_WORKOUT_LIMIT: usize = 100;

/// Export of a health data store.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HealthSnapshot {
    #[serde(default)]
    pub workouts: Vec<WorkoutWindow>,
    #[serde(default)]
    pub heart_rate: Vec<HeartRateSample>,
    #[serde(default)]
    pub sleep: Vec<SleepInterval>,
}

/// [`HealthStore`] answering queries from an in-memory [`HealthSnapshot`],
/// usually loaded from a JSON file.
#[derive(Clone, Debug)]
pub struct JsonHealthStore {
    snapshot: HealthSnapshot,
    workout_limit: usize,
}

impl JsonHealthStore {
    pub fn new(snapshot: HealthSnapshot) -> Self {
        Self {
            snapshot,
            workout_limit: DEFAULT_WORKOUT_LIMIT,
        }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HealthStatsError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| HealthStatsError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let snapshot: HealthSnapshot = serde_json::from_str(&data)?;
        info!(
            "Loaded {} workouts, {} heart rate samples, {} sleep intervals from {}",
            snapshot.workouts.len(),
            snapshot.heart_rate.len(),
            snapshot.sleep.len(),
            path.display()
        );

        Ok(Self::new(snapshot))
    }

    pub fn with_workout_limit(mut self, limit: usize) -> Self {
        self.workout_limit = limit;
        self
    }
}

impl HealthStore for JsonHealthStore {
    async fn list_workouts(&self, range: TimeRange) -> Vec<WorkoutWindow> {
        let mut workouts = self
            .snapshot
            .workouts
            .iter()
            .filter(|w| w.start <= range.end && w.end >= range.start)
            .copied()
            .collect::<Vec<_>>();

        workouts.sort_by(|a, b| b.start.cmp(&a.start));
        workouts.truncate(self.workout_limit);
        debug!("{} workouts between {} and {}", workouts.len(), range.start, range.end);
        workouts
    }

    async fn list_heart_rate_samples(&self, window: TimeRange) -> Vec<HeartRateSample> {
        self.snapshot
            .heart_rate
            .iter()
            .filter(|s| window.contains(s.timestamp))
            .copied()
            .collect()
    }

    async fn list_sleep_intervals(&self, range: TimeRange) -> Vec<SleepInterval> {
        let mut intervals = self
            .snapshot
            .sleep
            .iter()
            .filter(|i| range.contains(i.end))
            .copied()
            .collect::<Vec<_>>();

        intervals.sort_by_key(|i| i.start);
        debug!("{} sleep intervals between {} and {}", intervals.len(), range.start, range.end);
        intervals
    }
}
