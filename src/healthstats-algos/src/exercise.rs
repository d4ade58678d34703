use std::fmt::Display;

use chrono::TimeDelta;
use healthstats_types::workouts::WorkoutWindow;

use crate::helpers::{format_hm::FormatHMS, time_math::mean_deltas};

/// Count, active time and distance of a set of workouts.
#[derive(Debug, Default, PartialEq)]
pub struct WorkoutSummary {
    pub count: u64,
    pub total_duration: TimeDelta,
    pub mean_duration: TimeDelta,
    /// Workouts without a recorded distance add nothing.
    pub total_distance_km: f64,
}

impl WorkoutSummary {
    pub fn new(workouts: &[WorkoutWindow]) -> Self {
        if workouts.is_empty() {
            return Self::default();
        }

        let count = workouts.len().try_into().unwrap_or(u64::MAX);
        // inverted windows contribute no time
        let durations = workouts
            .iter()
            .map(|w| w.duration().max(TimeDelta::zero()))
            .collect::<Vec<_>>();

        let total_distance_km = workouts.iter().filter_map(|w| w.distance_km).sum::<f64>();

        Self {
            count,
            total_distance_km,
            mean_duration: mean_deltas(&durations),
            total_duration: durations.into_iter().sum(),
        }
    }
}

impl Display for WorkoutSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "Workouts: {}\nTotal time: {}\nMean duration: {}\nDistance: {:.2} km",
            self.count,
            self.total_duration.format_hms(),
            self.mean_duration.format_min_sec(),
            self.total_distance_km
        ))
    }
}
