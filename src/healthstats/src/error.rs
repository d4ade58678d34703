use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HealthStatsError {
    #[error("unable to read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid health snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid timezone `{0}`, expected `local`, `utc` or an offset like `+02:00`")]
    InvalidTimezone(String),
    #[error("invalid month grouping `{0}`, expected `month-only` or `year-month`")]
    InvalidMonthGrouping(String),
    #[error("unknown activity `{0}`")]
    InvalidActivity(String),
}
