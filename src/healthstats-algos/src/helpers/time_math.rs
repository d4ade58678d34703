use chrono::TimeDelta;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0_f64
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn mean_deltas(durations: &[TimeDelta]) -> TimeDelta {
    if durations.is_empty() {
        TimeDelta::default()
    } else {
        durations.iter().sum::<TimeDelta>() / durations.len() as i32
    }
}

pub fn round_float(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
