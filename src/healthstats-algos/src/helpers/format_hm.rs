use chrono::TimeDelta;

/// Clock-style rendering of durations. Negative durations render as zero.
pub trait FormatHMS {
    /// `HH:MM:SS`, hours are not wrapped at 24.
    fn format_hms(&self) -> String;

    /// `"{minutes} min {seconds} s"`
    fn format_min_sec(&self) -> String;
}

impl FormatHMS for TimeDelta {
    fn format_hms(&self) -> String {
        let total = self.num_seconds().max(0);
        let h = total / 3600;
        let m = (total % 3600) / 60;
        let s = total % 60;
        format!("{:02}:{:02}:{:02}", h, m, s)
    }

    fn format_min_sec(&self) -> String {
        let total = self.num_seconds().max(0);
        format!("{} min {} s", total / 60, total % 60)
    }
}
