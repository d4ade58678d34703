#[macro_use]
extern crate log;

use std::{path::PathBuf, time::Duration};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use healthstats::{
    HealthDashboard, JsonHealthStore,
    algo::{
        MonthGrouping,
        helpers::{format_hm::FormatHMS, time_math::round_float},
    },
    calendar::CalendarZone,
    config::{DEFAULT_LOOKBACK_MONTHS, DashboardConfig, parse_activity, parse_month_grouping},
    json_store::DEFAULT_WORKOUT_LIMIT,
    store::HealthStore,
    types::workouts::{ActivityType, WorkoutWindow},
};
use uuid::Uuid;

#[derive(Parser)]
pub struct HealthStatsCli {
    /// JSON export with `workouts`, `heart_rate` and `sleep` arrays
    #[arg(env, long)]
    pub data_file: PathBuf,
    /// `local`, `utc` or a fixed offset such as `+02:00`
    #[arg(env, long, default_value = "local")]
    pub timezone: CalendarZone,
    /// `month-only` or `year-month`
    #[arg(env, long, default_value = "month-only", value_parser = parse_month_grouping)]
    pub month_grouping: MonthGrouping,
    #[arg(env, long, default_value_t = DEFAULT_LOOKBACK_MONTHS)]
    pub lookback_months: u32,
    #[arg(env, long, default_value_t = DEFAULT_WORKOUT_LIMIT)]
    pub workout_limit: usize,
    #[arg(env, long)]
    pub fetch_timeout_secs: Option<u64>,
    #[clap(subcommand)]
    pub subcommand: HealthStatsCommand,
}

#[derive(Subcommand)]
pub enum HealthStatsCommand {
    ///
    /// Print average heart rate per workout and its month-over-month change
    ///
    BpmStats,
    ///
    /// Print sleep hours per day and their month-over-month change
    ///
    SleepStats,
    ///
    /// List workouts of the lookback period, newest first
    ///
    Workouts {
        #[arg(long, value_parser = parse_activity)]
        activity: Option<ActivityType>,
    },
    ///
    /// Print workout count, active time and distance for the current month
    ///
    WorkoutStats,
    ///
    /// Print heart rate readings recorded during a workout
    ///
    HeartRates {
        #[arg(long)]
        workout: Uuid,
    },
    ///
    /// Print sleep recorded in the 18 hours before a workout
    ///
    SleepBefore {
        #[arg(long)]
        workout: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = HealthStatsCli::parse();
    let store = JsonHealthStore::open(&cli.data_file)?.with_workout_limit(cli.workout_limit);
    let config = DashboardConfig {
        zone: cli.timezone,
        month_grouping: cli.month_grouping,
        lookback_months: cli.lookback_months,
        fetch_timeout: cli.fetch_timeout_secs.map(Duration::from_secs),
    };
    let zone = config.zone;
    let mut dashboard = HealthDashboard::new(store, config);
    let now = Utc::now();

    match cli.subcommand {
        HealthStatsCommand::BpmStats => {
            dashboard.refresh_bpm(now).await;
            for entry in dashboard.bpm_per_workout() {
                println!(
                    "{}  {:<18} {:>6.1} bpm",
                    zone.format(entry.date, "%Y-%m-%d %H:%M"),
                    entry.workout.activity.to_string(),
                    entry.average_bpm
                );
            }
            println!("\nMonth over month: {}", format_change(dashboard.bpm_percent_change()));
            Ok(())
        }
        HealthStatsCommand::SleepStats => {
            dashboard.refresh_sleep(now).await;
            for entry in dashboard.sleep_entries() {
                println!("{}  {:>5.2} h", entry.date, round_float(entry.duration_in_hours));
            }
            println!("\nMonth over month: {}", format_change(dashboard.sleep_percent_change()));
            Ok(())
        }
        HealthStatsCommand::Workouts { activity } => {
            dashboard.refresh_workouts(now).await;
            let workouts = match activity {
                Some(activity) => dashboard.workouts_of_type(activity),
                None => dashboard.workouts().to_vec(),
            };

            for workout in workouts {
                println!(
                    "{}  {:<18} {:>14} {:>10} {:>9}",
                    zone.format(workout.start, "%Y-%m-%d %H:%M"),
                    workout.activity.to_string(),
                    workout.duration().format_min_sec(),
                    format_distance(workout.distance_km),
                    format_energy(workout.energy_kcal)
                );
            }
            Ok(())
        }
        HealthStatsCommand::WorkoutStats => {
            let summary = dashboard.refresh_summary(now).await;
            println!("This month: \n{}", summary);
            Ok(())
        }
        HealthStatsCommand::HeartRates { workout } => {
            let workout = find_workout(&mut dashboard, workout, now).await?;

            println!(
                "{} {} ({})",
                workout.activity,
                zone.format(workout.start, "%Y-%m-%d %H:%M"),
                workout.duration().format_min_sec()
            );
            for sample in dashboard.workout_heart_rates(&workout).await {
                println!("{}  {:>5.1}", zone.format(sample.timestamp, "%H:%M:%S"), sample.bpm);
            }
            Ok(())
        }
        HealthStatsCommand::SleepBefore { workout } => {
            let workout = find_workout(&mut dashboard, workout, now).await?;

            let intervals = dashboard.sleep_before(&workout).await;
            if intervals.is_empty() {
                warn!("No sleep recorded before workout {}", workout.id);
            }
            for interval in intervals {
                println!(
                    "{} -> {}  {}",
                    zone.format(interval.start, "%Y-%m-%d %H:%M"),
                    zone.format(interval.end, "%Y-%m-%d %H:%M"),
                    interval.duration().format_hms()
                );
            }
            Ok(())
        }
    }
}

async fn find_workout<S: HealthStore>(
    dashboard: &mut HealthDashboard<S>,
    id: Uuid,
    now: DateTime<Utc>,
) -> anyhow::Result<WorkoutWindow> {
    dashboard.refresh_workouts(now).await;
    dashboard
        .workout(id)
        .copied()
        .ok_or(anyhow!("Workout `{}` not found", id))
}

fn format_distance(distance_km: Option<f64>) -> String {
    format!("{:.2} km", distance_km.unwrap_or_default())
}

fn format_energy(energy_kcal: Option<f64>) -> String {
    match energy_kcal {
        Some(kcal) => format!("{:.0} kcal", kcal),
        None => "-".to_string(),
    }
}

fn format_change(change: Option<f64>) -> String {
    match change {
        Some(pct) => format!("{:+.1}%", round_float(pct)),
        None => "not enough data".to_string(),
    }
}
