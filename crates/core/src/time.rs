use chrono::{DateTime, Duration, Utc};

/// A simple clock abstraction for deterministic time in services and tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    Default,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default
    }

    /// Returns a clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// If this is a fixed clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Whole milliseconds elapsed since `since`, clamped at zero.
    #[must_use]
    pub fn millis_since(&self, since: DateTime<Utc>) -> u64 {
        let elapsed = self.now().signed_duration_since(since).num_milliseconds();
        u64::try_from(elapsed).unwrap_or(0)
    }

    /// Whole seconds elapsed since `since`, clamped at zero.
    #[must_use]
    pub fn secs_since(&self, since: DateTime<Utc>) -> u64 {
        self.millis_since(since) / 1000
    }
}

/// Formats elapsed seconds as zero-padded `mm:ss`.
///
/// Minutes are not wrapped into hours: 6000 seconds is `100:00`.
#[must_use]
pub fn format_elapsed(seconds: u64) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_elapsed(125), "02:05");
        assert_eq!(format_elapsed(59), "00:59");
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(6000), "100:00");
    }

    #[test]
    fn fixed_clock_measures_elapsed_time() {
        let start = fixed_now();
        let mut clock = Clock::fixed(start);
        clock.advance(Duration::milliseconds(2_500));
        assert_eq!(clock.millis_since(start), 2_500);
        assert_eq!(clock.secs_since(start), 2);
    }

    #[test]
    fn elapsed_is_clamped_for_future_start() {
        let clock = fixed_clock();
        let later = fixed_now() + Duration::seconds(10);
        assert_eq!(clock.millis_since(later), 0);
    }
}
