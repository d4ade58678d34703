use std::future::Future;

use healthstats_types::{
    TimeRange,
    samples::{HeartRateSample, SleepInterval},
    workouts::WorkoutWindow,
};

/// Source of raw health samples.
///
/// Implementations never surface errors: a failed or empty query yields an
/// empty collection.
pub trait HealthStore: Send + Sync {
    /// Workouts overlapping `range`, most recent first.
    fn list_workouts(&self, range: TimeRange) -> impl Future<Output = Vec<WorkoutWindow>> + Send;

    /// Heart-rate readings taken within `window`.
    fn list_heart_rate_samples(
        &self,
        window: TimeRange,
    ) -> impl Future<Output = Vec<HeartRateSample>> + Send;

    /// Sleep intervals ending within `range`, ordered by start.
    fn list_sleep_intervals(
        &self,
        range: TimeRange,
    ) -> impl Future<Output = Vec<SleepInterval>> + Send;
}
