use std::fmt::Display;
use std::time::Duration;

/// Builds a lightweight "emoji | message" line used across the terminal output.
pub fn pretty_message(emoji: impl Display, message: impl Display) -> String {
    format!("{} | {}", emoji, message)
}

/// Formats a session clock as `mm:ss.t`. Minutes keep growing past 59.
pub fn format_elapsed(elapsed: Duration) -> String {
    let tenths = elapsed.as_millis() / 100;
    let seconds = tenths / 10;
    format!("{:02}:{:02}.{}", seconds / 60, seconds % 60, tenths % 10)
}

/// Pluralizes simple English nouns: `1 move`, `2 moves`.
pub fn count(amount: u64, noun: &str) -> String {
    if amount == 1 {
        format!("{amount} {noun}")
    } else {
        format!("{amount} {noun}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_truncated_to_tenths() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00.0");
        assert_eq!(format_elapsed(Duration::from_millis(7_349)), "00:07.3");
        assert_eq!(format_elapsed(Duration::from_millis(61_000)), "01:01.0");
        assert_eq!(format_elapsed(Duration::from_secs(3_725)), "62:05.0");
    }

    #[test]
    fn counts() {
        assert_eq!(count(1, "move"), "1 move");
        assert_eq!(count(0, "pair"), "0 pairs");
        assert_eq!(count(12, "move"), "12 moves");
    }

    #[test]
    fn pretty_message_joins_with_a_bar() {
        assert_eq!(pretty_message("🔔", "hi"), "🔔 | hi");
    }
}
