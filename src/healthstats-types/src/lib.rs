pub mod entries;
pub mod samples;
pub mod workouts;

mod range;
pub use range::TimeRange;
