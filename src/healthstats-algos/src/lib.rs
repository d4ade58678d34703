pub(crate) mod bpm;
pub use bpm::{bpm_percent_change, compute_bpm_per_batch, compute_bpm_per_workout};

pub(crate) mod sleep;
pub use sleep::{compute_sleep_per_day, sleep_percent_change};

pub(crate) mod monthly;
pub use monthly::{MonthGrouping, MonthKey, monthly_percent_change};

pub(crate) mod exercise;
pub use exercise::WorkoutSummary;

pub mod helpers;
