use std::time::Duration;

use once_cell::sync::Lazy;
use regex::Regex;

static LAP_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:(\d+):)?(\d+):)?(\d+)(?:\.(\d{1,3}))?$").expect("lap time pattern is valid")
});

pub struct TimeHelpers {}

impl TimeHelpers {
    /// # parse a timing string
    /// accepts `ss.mmm`, `m:ss.mmm` and `h:mm:ss.mmm`.
    ///
    /// ## Returns
    /// * `Option<Duration>` - `None` when the string is not a time (gaps like `+1 Lap`, empty strings)
    pub fn parse_lap_time(time: &str) -> Option<Duration> {
        let captures = LAP_TIME.captures(time.trim())?;

        // a capture that is present but does not fit makes the whole time invalid
        let number = |index: usize| -> Option<Option<u64>> {
            match captures.get(index) {
                Some(m) => m.as_str().parse::<u64>().ok().map(Some),
                None => Some(None),
            }
        };

        let hours = number(1)?.unwrap_or(0);
        let minutes = number(2)?.unwrap_or(0);
        let seconds = number(3)??;
        let millis = match captures.get(4) {
            Some(fraction) => {
                let digits = fraction.as_str();
                let value = digits.parse::<u64>().ok()?;
                value * 10_u64.pow(3 - digits.len() as u32)
            }
            None => 0,
        };

        let total_seconds = hours
            .checked_mul(60)?
            .checked_add(minutes)?
            .checked_mul(60)?
            .checked_add(seconds)?;
        let total_millis = total_seconds.checked_mul(1000)?.checked_add(millis)?;

        Some(Duration::from_millis(total_millis))
    }

    /// # format a duration as a timing string
    /// `m:ss.mmm`, or `h:mm:ss.mmm` from an hour onwards.
    pub fn format_lap_time(duration: Duration) -> String {
        let total_millis = duration.as_millis();
        let millis = total_millis % 1000;
        let total_seconds = total_millis / 1000;
        let seconds = total_seconds % 60;
        let minutes = (total_seconds / 60) % 60;
        let hours = total_seconds / 3600;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
        } else {
            format!("{}:{:02}.{:03}", minutes, seconds, millis)
        }
    }

    pub fn format_optional(duration: Option<Duration>) -> Option<String> {
        duration.map(TimeHelpers::format_lap_time)
    }

    /// durations reported as float seconds, negative and non finite values are dropped
    pub fn from_seconds(seconds: Option<f64>) -> Option<Duration> {
        seconds
            .filter(|s| s.is_finite() && *s >= 0.0)
            .map(Duration::from_secs_f64)
    }
}
