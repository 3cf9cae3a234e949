// src/utils/format.rs

// Round to 8 significant digits, snapping values near zero to 0
pub fn round_nice(n: f64) -> f64 {
    if n.abs() < 1e-6 {
        return 0.0;
    }
    format!("{:.7e}", n).parse().unwrap_or(n)
}

// Format a number of seconds as MM:SS
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

// Truncate a string if it's too long
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
