use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal workout shape the aggregation needs: a closed `[start, end]`
/// window plus an opaque id to attach results back to the workout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorkoutWindow {
    pub id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub activity: ActivityType,
    #[serde(default)]
    pub distance_km: Option<f64>,
    #[serde(default)]
    pub energy_kcal: Option<f64>,
}

impl WorkoutWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, activity: ActivityType) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            activity,
            distance_km: None,
            energy_kcal: None,
        }
    }

    pub fn with_distance_km(mut self, distance_km: f64) -> Self {
        self.distance_km = Some(distance_km);
        self
    }

    pub fn with_energy_kcal(mut self, energy_kcal: f64) -> Self {
        self.energy_kcal = Some(energy_kcal);
        self
    }

    /// Closed interval membership. `end < start` matches nothing.
    pub fn contains(&self, time: DateTime<Utc>) -> bool {
        time >= self.start && time <= self.end
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityType {
    #[serde(rename = "Running")]
    Running,
    #[serde(rename = "Cycling")]
    Cycling,
    #[serde(rename = "Walking")]
    Walking,
    #[serde(rename = "Swimming")]
    Swimming,
    #[serde(rename = "Strength Training")]
    StrengthTraining,
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ActivityType::Running => "Running",
            ActivityType::Cycling => "Cycling",
            ActivityType::Walking => "Walking",
            ActivityType::Swimming => "Swimming",
            ActivityType::StrengthTraining => "Strength Training",
            ActivityType::Other => "Other",
        };

        write!(f, "{}", s)
    }
}

impl FromStr for ActivityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Running" => Ok(ActivityType::Running),
            "Cycling" => Ok(ActivityType::Cycling),
            "Walking" => Ok(ActivityType::Walking),
            "Swimming" => Ok(ActivityType::Swimming),
            "Strength Training" => Ok(ActivityType::StrengthTraining),
            "Other" => Ok(ActivityType::Other),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn activity_type_round_trips_through_display() {
        for activity in [
            ActivityType::Running,
            ActivityType::Cycling,
            ActivityType::Walking,
            ActivityType::Swimming,
            ActivityType::StrengthTraining,
            ActivityType::Other,
        ] {
            assert_eq!(activity.to_string().parse::<ActivityType>(), Ok(activity));
        }
        assert!("Curling".parse::<ActivityType>().is_err());
    }

    #[test]
    fn workout_deserializes_without_activity() {
        let json = r#"{
            "id": "6f0c1f5e-8a7b-4a8c-9a55-0d2b6c1c9f10",
            "start": "2025-04-02T07:00:00Z",
            "end": "2025-04-02T07:45:00Z"
        }"#;

        let workout: WorkoutWindow = serde_json::from_str(json).unwrap();
        assert_eq!(workout.activity, ActivityType::Other);
        assert_eq!(workout.distance_km, None);
        assert_eq!(workout.energy_kcal, None);
        assert_eq!(workout.duration(), TimeDelta::minutes(45));
    }

    #[test]
    fn workout_deserializes_distance_and_energy() {
        let json = r#"{
            "id": "6f0c1f5e-8a7b-4a8c-9a55-0d2b6c1c9f10",
            "start": "2025-04-02T07:00:00Z",
            "end": "2025-04-02T07:45:00Z",
            "activity": "Cycling",
            "distance_km": 21.4,
            "energy_kcal": 512.0
        }"#;

        let workout: WorkoutWindow = serde_json::from_str(json).unwrap();
        assert_eq!(workout.activity, ActivityType::Cycling);
        assert_eq!(workout.distance_km, Some(21.4));
        assert_eq!(workout.energy_kcal, Some(512.0));
    }

    #[test]
    fn inverted_window_contains_nothing() {
        let start = Utc.with_ymd_and_hms(2025, 4, 2, 7, 0, 0).unwrap();
        let workout = WorkoutWindow::new(start, start - TimeDelta::minutes(1), ActivityType::Running);
        assert!(!workout.contains(start));
        assert!(!workout.contains(start - TimeDelta::seconds(30)));
    }
}
