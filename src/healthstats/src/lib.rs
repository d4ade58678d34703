#[macro_use]
extern crate log;

pub use healthstats_algos as algo;
pub use healthstats_types as types;

mod error;
pub use error::HealthStatsError;

pub mod barrier;
pub mod calendar;
pub mod config;

mod dashboard;
pub use dashboard::{HealthDashboard, SLEEP_BEFORE_WORKOUT};

pub mod json_store;
pub use json_store::JsonHealthStore;

pub mod store;
pub use store::HealthStore;
