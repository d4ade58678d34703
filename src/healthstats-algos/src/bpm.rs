use chrono::TimeZone;
use healthstats_types::{
    entries::WorkoutBpmEntry, samples::HeartRateSample, workouts::WorkoutWindow,
};

use crate::{
    helpers::time_math::mean,
    monthly::{MonthGrouping, monthly_percent_change},
};

/// Average heart rate per workout, sorted by workout start.
///
/// A sample belongs to a workout when its timestamp lies within the closed
/// `[start, end]` window. Workouts without samples are skipped. Workouts
/// starting at the same instant keep their input order.
pub fn compute_bpm_per_workout(
    workouts: &[WorkoutWindow],
    samples: &[HeartRateSample],
) -> Vec<WorkoutBpmEntry> {
    compute_bpm_per_batch(workouts.iter().map(|w| (w, samples)))
}

/// Like [`compute_bpm_per_workout`], but each workout is only matched against
/// the samples fetched for it, so a reading shared by overlapping workouts is
/// counted once per workout.
pub fn compute_bpm_per_batch<'a, I>(batches: I) -> Vec<WorkoutBpmEntry>
where
    I: IntoIterator<Item = (&'a WorkoutWindow, &'a [HeartRateSample])>,
{
    let mut entries = batches
        .into_iter()
        .filter_map(|(workout, samples)| {
            let bpm = samples
                .iter()
                .filter(|s| workout.contains(s.timestamp))
                .map(|s| s.bpm)
                .collect::<Vec<_>>();

            if bpm.is_empty() {
                return None;
            }

            Some(WorkoutBpmEntry {
                date: workout.start,
                average_bpm: mean(&bpm),
                workout: *workout,
            })
        })
        .collect::<Vec<_>>();

    entries.sort_by_key(|e| e.date);
    entries
}

/// Month-over-month change of average BPM, with months read in `tz`.
pub fn bpm_percent_change<Tz: TimeZone>(
    entries: &[WorkoutBpmEntry],
    tz: &Tz,
    grouping: MonthGrouping,
) -> Option<f64> {
    monthly_percent_change(
        entries,
        |e| grouping.key(&e.date.with_timezone(tz)),
        |e| e.average_bpm,
    )
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, TimeDelta, Utc};
    use healthstats_types::workouts::ActivityType;
    use rand::{Rng, seq::SliceRandom};

    use super::*;

    fn at(month: u32, day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, hour, 0, 0).unwrap()
    }

    fn workout(start: DateTime<Utc>, minutes: i64) -> WorkoutWindow {
        WorkoutWindow::new(start, start + TimeDelta::minutes(minutes), ActivityType::Running)
    }

    fn sample(timestamp: DateTime<Utc>, bpm: f64) -> HeartRateSample {
        HeartRateSample { timestamp, bpm }
    }

    #[test]
    fn averages_samples_inside_window() {
        let t0 = at(5, 1, 7);
        let w = workout(t0, 30);
        let samples = [
            sample(t0 + TimeDelta::minutes(5), 100.0),
            sample(t0 + TimeDelta::minutes(20), 120.0),
            sample(t0 + TimeDelta::minutes(45), 180.0),
        ];

        let entries = compute_bpm_per_workout(&[w], &samples);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].average_bpm, 110.0);
        assert_eq!(entries[0].date, t0);
        assert_eq!(entries[0].workout.id, w.id);
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let t0 = at(5, 1, 7);
        let w = workout(t0, 30);
        let samples = [sample(t0, 90.0), sample(w.end, 130.0)];

        let entries = compute_bpm_per_workout(&[w], &samples);
        assert_eq!(entries[0].average_bpm, 110.0);
    }

    #[test]
    fn workout_without_samples_is_skipped() {
        let a = workout(at(5, 1, 7), 30);
        let b = workout(at(5, 2, 7), 30);
        let samples = [sample(at(5, 2, 7) + TimeDelta::minutes(1), 140.0)];

        let entries = compute_bpm_per_workout(&[a, b], &samples);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].workout.id, b.id);
    }

    #[test]
    fn inverted_window_matches_nothing() {
        let t0 = at(5, 1, 7);
        let w = WorkoutWindow::new(t0, t0 - TimeDelta::minutes(30), ActivityType::Cycling);
        let samples = [sample(t0 - TimeDelta::minutes(10), 150.0), sample(t0, 150.0)];

        assert!(compute_bpm_per_workout(&[w], &samples).is_empty());
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(compute_bpm_per_workout(&[], &[]).is_empty());
        assert!(compute_bpm_per_workout(&[workout(at(5, 1, 7), 30)], &[]).is_empty());
    }

    #[test]
    fn equal_start_keeps_input_order() {
        let t0 = at(5, 1, 7);
        let first = workout(t0, 30);
        let second = workout(t0, 60);
        let samples = [sample(t0 + TimeDelta::minutes(10), 120.0)];

        let entries = compute_bpm_per_workout(&[first, second], &samples);
        assert_eq!(entries[0].workout.id, first.id);
        assert_eq!(entries[1].workout.id, second.id);

        let entries = compute_bpm_per_workout(&[second, first], &samples);
        assert_eq!(entries[0].workout.id, second.id);
        assert_eq!(entries[1].workout.id, first.id);
    }

    #[test]
    fn shuffled_input_is_sorted_and_repeatable() {
        let mut rng = rand::rng();
        let mut workouts = (0..40)
            .map(|i| workout(at(1, 1, 0) + TimeDelta::hours(i * 7), 45))
            .collect::<Vec<_>>();
        workouts.shuffle(&mut rng);

        let samples = workouts
            .iter()
            .flat_map(|w| {
                (0..5)
                    .map(|m| sample(w.start + TimeDelta::minutes(m * 10), rng.random_range(60.0..190.0)))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let entries = compute_bpm_per_workout(&workouts, &samples);
        assert_eq!(entries.len(), workouts.len());
        assert!(entries.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(entries, compute_bpm_per_workout(&workouts, &samples));
    }

    #[test]
    fn batches_only_see_their_own_samples() {
        let a = workout(at(5, 1, 7), 60);
        let b = workout(at(5, 1, 7) + TimeDelta::minutes(30), 60);
        let shared = sample(at(5, 1, 7) + TimeDelta::minutes(45), 100.0);
        let a_samples = [sample(at(5, 1, 7) + TimeDelta::minutes(10), 200.0), shared];
        let b_samples = [shared];

        let entries = compute_bpm_per_batch([(&b, &b_samples[..]), (&a, &a_samples[..])]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].workout.id, a.id);
        assert_eq!(entries[0].average_bpm, 150.0);
        assert_eq!(entries[1].average_bpm, 100.0);
    }

    #[test]
    fn batch_samples_outside_window_are_ignored() {
        let a = workout(at(5, 1, 7), 30);
        let samples = [sample(at(5, 1, 7) + TimeDelta::minutes(10), 120.0), sample(at(5, 1, 9), 60.0)];

        let entries = compute_bpm_per_batch([(&a, &samples[..])]);
        assert_eq!(entries[0].average_bpm, 120.0);
    }

    #[test]
    fn percent_change_between_months() {
        let march = workout(at(3, 10, 7), 30);
        let april = workout(at(4, 10, 7), 30);
        let samples = [
            sample(march.start + TimeDelta::minutes(1), 100.0),
            sample(april.start + TimeDelta::minutes(1), 110.0),
        ];

        let entries = compute_bpm_per_workout(&[april, march], &samples);
        let pct = bpm_percent_change(&entries, &Utc, MonthGrouping::MonthOnly).unwrap();
        assert!((pct - 10.0).abs() < 1e-9, "got {}", pct);
    }

    #[test]
    fn percent_change_reads_month_in_zone() {
        use chrono::FixedOffset;

        // 2025-03-31 23:30 UTC is already April at +02:00
        let late_march = workout(Utc.with_ymd_and_hms(2025, 3, 31, 23, 30, 0).unwrap(), 20);
        let april = workout(at(4, 10, 7), 30);
        let samples = [
            sample(late_march.start + TimeDelta::minutes(1), 100.0),
            sample(april.start + TimeDelta::minutes(1), 110.0),
        ];
        let entries = compute_bpm_per_workout(&[late_march, april], &samples);

        assert!(bpm_percent_change(&entries, &Utc, MonthGrouping::MonthOnly).is_some());
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(bpm_percent_change(&entries, &tz, MonthGrouping::MonthOnly), None);
    }
}
