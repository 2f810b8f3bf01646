use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// How often overdue tasks are re-checked, in seconds
pub const OVERDUE_CHECK_SECS: u64 = 5;

/// How long toasts and confetti stay on screen, in seconds
pub const FEEDBACK_VISIBLE_SECS: u64 = 3;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Get the overdue polling interval
pub fn overdue_interval() -> Duration {
    Duration::from_secs(OVERDUE_CHECK_SECS)
}

/// Get the toast/confetti lifetime
pub fn feedback_duration() -> Duration {
    Duration::from_secs(FEEDBACK_VISIBLE_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_overdue_interval_is_longer_than_tick() {
        assert_eq!(overdue_interval(), Duration::from_secs(5));
        assert!(overdue_interval() > tick_duration());
    }
}
