use lingua_core::format_elapsed;

/// Label for the running session timer.
#[must_use]
pub fn format_timer(seconds: u64) -> String {
    format!("Time: {}", format_elapsed(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_minutes_and_seconds() {
        assert_eq!(format_timer(0), "Time: 00:00");
        assert_eq!(format_timer(125), "Time: 02:05");
    }
}
