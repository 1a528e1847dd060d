//! Human-readable formatting for durations and asset sizes.

use chrono::Duration;

/// Format a duration as the largest applicable units, e.g. `"1d 2h 3m 4s"`,
/// `"2h 3m 4s"`, `"3m 4s"` or `"4s 500ms"`.
pub fn format_time_span(span: Duration) -> String {
    let days = span.num_days();
    let total_secs = span.num_seconds();
    let secs_of_day = total_secs - days * 86_400;
    let hours = secs_of_day / 3600;
    let minutes = secs_of_day % 3600 / 60;
    let seconds = secs_of_day % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {seconds}s")
    } else if total_secs >= 3600 {
        format!("{hours}h {minutes}m {seconds}s")
    } else if total_secs >= 60 {
        format!("{minutes}m {seconds}s")
    } else {
        let millis = span.num_milliseconds() - total_secs * 1000;
        format!("{seconds}s {millis}ms")
    }
}

/// Format an asset size as a unit-scaled string with two decimals.
///
/// The input is in megabytes, the unit the API reports task sizes in.
pub fn format_size(megabytes: f64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut value = megabytes;
    let mut unit = 2;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.2} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_span_subminute() {
        assert_eq!(format_time_span(Duration::milliseconds(500)), "0s 500ms");
        assert_eq!(format_time_span(Duration::milliseconds(4500)), "4s 500ms");
    }

    #[test]
    fn test_time_span_minutes() {
        assert_eq!(format_time_span(Duration::seconds(90)), "1m 30s");
    }

    #[test]
    fn test_time_span_hours() {
        assert_eq!(format_time_span(Duration::seconds(3661)), "1h 1m 1s");
    }

    #[test]
    fn test_time_span_days() {
        let span = Duration::days(2) + Duration::hours(3) + Duration::minutes(4) + Duration::seconds(5);
        assert_eq!(format_time_span(span), "2d 3h 4m 5s");
    }

    #[test]
    fn test_size_stays_in_megabytes() {
        assert_eq!(format_size(0.5), "0.50 MB");
        assert_eq!(format_size(512.0), "512.00 MB");
    }

    #[test]
    fn test_size_scales_up() {
        assert_eq!(format_size(2048.0), "2.00 GB");
        assert_eq!(format_size(3_000_000.0), "2.86 TB");
    }
}
