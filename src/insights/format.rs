/// Format a 0-1 rate as a whole percentage ("83%").
pub fn percent(rate: f64) -> String {
    if !rate.is_finite() {
        return "0%".to_string();
    }
    format!("{:.0}%", rate * 100.0)
}

/// `part / whole` as a percentage in 0-100; zero when `whole` is zero.
pub fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 * 100.0 / whole as f64
}

/// Backend breakdown keys use snake_case; show them with spaces.
pub fn humanize_key(key: &str) -> String {
    key.replace('_', " ")
}

pub fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}
