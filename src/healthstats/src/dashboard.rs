use std::{future::Future, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use healthstats_algos::{WorkoutSummary, compute_bpm_per_batch, sleep_percent_change};
use healthstats_types::{
    TimeRange,
    entries::{SleepDayEntry, WorkoutBpmEntry},
    samples::{HeartRateSample, SleepInterval},
    workouts::{ActivityType, WorkoutWindow},
};
use uuid::Uuid;

use crate::{barrier::CompletionBarrier, config::DashboardConfig, store::HealthStore};

/// How far back sleep is looked up before a workout.
pub const SLEEP_BEFORE_WORKOUT: TimeDelta = TimeDelta::hours(18);

/// Owner of the latest fetched samples and the entries derived from them.
///
/// Every refresh replaces its outputs wholesale. Mutation only happens through
/// `&mut self`, so fetch completions are applied one at a time.
pub struct HealthDashboard<S> {
    store: S,
    config: DashboardConfig,
    workouts: Vec<WorkoutWindow>,
    heart_rate_samples: Vec<HeartRateSample>,
    bpm_per_workout: Vec<WorkoutBpmEntry>,
    sleep_intervals: Vec<SleepInterval>,
    sleep_entries: Vec<SleepDayEntry>,
    summary: WorkoutSummary,
}

impl<S: HealthStore> HealthDashboard<S> {
    pub fn new(store: S, config: DashboardConfig) -> Self {
        Self {
            store,
            config,
            workouts: Vec::new(),
            heart_rate_samples: Vec::new(),
            bpm_per_workout: Vec::new(),
            sleep_intervals: Vec::new(),
            sleep_entries: Vec::new(),
            summary: WorkoutSummary::default(),
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Newest first.
    pub fn workouts(&self) -> &[WorkoutWindow] {
        &self.workouts
    }

    /// Fetched workouts of one activity type, newest first.
    pub fn workouts_of_type(&self, activity: ActivityType) -> Vec<WorkoutWindow> {
        self.workouts
            .iter()
            .filter(|w| w.activity == activity)
            .copied()
            .collect()
    }

    /// Fetched workout with the given id.
    pub fn workout(&self, id: Uuid) -> Option<&WorkoutWindow> {
        self.workouts.iter().find(|w| w.id == id)
    }

    pub fn heart_rate_samples(&self) -> &[HeartRateSample] {
        &self.heart_rate_samples
    }

    pub fn bpm_per_workout(&self) -> &[WorkoutBpmEntry] {
        &self.bpm_per_workout
    }

    pub fn sleep_intervals(&self) -> &[SleepInterval] {
        &self.sleep_intervals
    }

    pub fn sleep_entries(&self) -> &[SleepDayEntry] {
        &self.sleep_entries
    }

    pub fn summary(&self) -> &WorkoutSummary {
        &self.summary
    }

    pub fn bpm_percent_change(&self) -> Option<f64> {
        self.config
            .zone
            .bpm_percent_change(&self.bpm_per_workout, self.config.month_grouping)
    }

    pub fn sleep_percent_change(&self) -> Option<f64> {
        sleep_percent_change(&self.sleep_entries, self.config.month_grouping)
    }

    fn lookback(&self, now: DateTime<Utc>) -> TimeRange {
        let start = self
            .config
            .zone
            .months_before(now, self.config.lookback_months)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        TimeRange::new(start, now)
    }

    pub async fn refresh_workouts(&mut self, now: DateTime<Utc>) -> &[WorkoutWindow] {
        let range = self.lookback(now);
        let mut workouts = with_timeout(self.store.list_workouts(range), self.config.fetch_timeout).await;
        workouts.sort_by(|a, b| b.start.cmp(&a.start));

        info!("Fetched {} workouts", workouts.len());
        self.workouts = workouts;
        &self.workouts
    }

    /// Fetches workouts, then heart rate for every workout concurrently, and
    /// averages once all of them have completed.
    ///
    /// Each workout is averaged over its own fetch only. The published sample
    /// pool holds every distinct reading once, ordered by timestamp.
    pub async fn refresh_bpm(&mut self, now: DateTime<Utc>) -> &[WorkoutBpmEntry] {
        self.refresh_workouts(now).await;

        let mut barrier = CompletionBarrier::new();
        for (index, workout) in self.workouts.iter().enumerate() {
            let window = TimeRange::new(workout.start, workout.end);
            let fetch = with_timeout(
                self.store.list_heart_rate_samples(window),
                self.config.fetch_timeout,
            );
            barrier.enter(async move { (index, fetch.await) });
        }
        debug!("Waiting on {} heart rate fetches", barrier.pending());

        let workouts = &self.workouts;
        let (samples, entries) = barrier
            .wait(|mut batches| {
                batches.sort_by_key(|(index, _)| *index);
                let entries = compute_bpm_per_batch(
                    batches
                        .iter()
                        .map(|(index, samples)| (&workouts[*index], samples.as_slice())),
                );

                let mut samples = batches
                    .into_iter()
                    .flat_map(|(_, samples)| samples)
                    .collect::<Vec<_>>();
                samples.sort_by(|a, b| {
                    a.timestamp
                        .cmp(&b.timestamp)
                        .then(a.bpm.total_cmp(&b.bpm))
                });
                samples.dedup();
                (samples, entries)
            })
            .await;

        info!(
            "{} of {} workouts have heart rate data ({} samples)",
            entries.len(),
            self.workouts.len(),
            samples.len()
        );
        self.heart_rate_samples = samples;
        self.bpm_per_workout = entries;
        &self.bpm_per_workout
    }

    pub async fn refresh_sleep(&mut self, now: DateTime<Utc>) -> &[SleepDayEntry] {
        let range = self.lookback(now);
        let intervals =
            with_timeout(self.store.list_sleep_intervals(range), self.config.fetch_timeout).await;

        let inverted = intervals.iter().filter(|i| i.end < i.start).count();
        if inverted > 0 {
            warn!("{} sleep intervals end before they start", inverted);
        }

        self.sleep_entries = self.config.zone.sleep_per_day(&intervals);
        self.sleep_intervals = intervals;
        info!("Sleep recorded on {} days", self.sleep_entries.len());
        &self.sleep_entries
    }

    /// Workouts since the start of the current calendar month.
    pub async fn refresh_summary(&mut self, now: DateTime<Utc>) -> &WorkoutSummary {
        let Some(start) = self.config.zone.start_of_month(now) else {
            warn!("Unable to determine the start of the month for {}", now);
            self.summary = WorkoutSummary::default();
            return &self.summary;
        };

        let workouts = with_timeout(
            self.store.list_workouts(TimeRange::new(start, now)),
            self.config.fetch_timeout,
        )
        .await;

        self.summary = WorkoutSummary::new(&workouts);
        &self.summary
    }

    /// Heart-rate readings recorded during one workout.
    pub async fn workout_heart_rates(&self, workout: &WorkoutWindow) -> Vec<HeartRateSample> {
        let window = TimeRange::new(workout.start, workout.end);
        with_timeout(self.store.list_heart_rate_samples(window), self.config.fetch_timeout).await
    }

    /// Sleep ending within the 18 hours before a workout starts.
    pub async fn sleep_before(&self, workout: &WorkoutWindow) -> Vec<SleepInterval> {
        let range = TimeRange::before(workout.start, SLEEP_BEFORE_WORKOUT);
        with_timeout(self.store.list_sleep_intervals(range), self.config.fetch_timeout).await
    }
}

/// A fetch that exceeds `limit` is treated like a failed one: empty.
async fn with_timeout<T, F>(fetch: F, limit: Option<Duration>) -> T
where
    T: Default,
    F: Future<Output = T>,
{
    let Some(limit) = limit else {
        return fetch.await;
    };

    match tokio::time::timeout(limit, fetch).await {
        Ok(result) => result,
        Err(_) => {
            warn!("Health store query timed out after {:?}", limit);
            T::default()
        }
    }
}
