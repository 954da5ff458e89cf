//! Julian Date helpers.
//!
//! Timestamps throughout the locator are Julian Dates (days, `f64`) in
//! whatever uniform time scale the oracle expects; durations are days.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Julian Date of J2000.0 (2000-Jan-01 12:00).
pub const J2000_JD: f64 = 2_451_545.0;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Convert a duration in seconds to days.
pub fn seconds_to_days(seconds: f64) -> f64 {
    seconds / SECONDS_PER_DAY
}

/// Convert a duration in hours to days.
pub fn hours_to_days(hours: f64) -> f64 {
    hours / 24.0
}

/// Julian centuries since J2000.0.
pub fn jd_to_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / 36_525.0
}

/// Gregorian calendar date (fractional day) to Julian Date.
///
/// Meeus, "Astronomical Algorithms", Ch. 7. Valid for Gregorian dates.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = (f64::from(y) / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();
    (365.25 * (f64::from(y) + 4716.0)).floor() + (30.6001 * f64::from(m + 1)).floor() + day + b
        - 1524.5
}

/// Julian Date to Gregorian `(year, month, fractional day)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();

    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// Calendar date and time of day, used at the CLI boundary and in tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalendarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub fn to_jd(&self) -> f64 {
        let day_frac = f64::from(self.day)
            + f64::from(self.hour) / 24.0
            + f64::from(self.minute) / 1440.0
            + self.second / SECONDS_PER_DAY;
        calendar_to_jd(self.year, self.month, day_frac)
    }

    /// Nearest calendar instant, rounded to the millisecond.
    pub fn from_jd(jd: f64) -> Self {
        const MS_PER_DAY: f64 = SECONDS_PER_DAY * 1000.0;
        // Round on the whole instant so a carry past midnight moves the date.
        let total_ms = ((jd + 0.5) * MS_PER_DAY).round();
        let midnight_ms = (total_ms / MS_PER_DAY).floor() * MS_PER_DAY;
        let (year, month, day_frac) = jd_to_calendar(midnight_ms / MS_PER_DAY - 0.5);
        let day = day_frac.round();
        let ms = (total_ms - midnight_ms) as u64;
        let hour = (ms / 3_600_000) as u32;
        let minute = ((ms / 60_000) % 60) as u32;
        let second = (ms % 60_000) as f64 / 1000.0;
        Self::new(year, month, day as u32, hour, minute, second)
    }
}

impl Display for CalendarDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:06.3}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

impl FromStr for CalendarDate {
    type Err = String;

    /// Parse `YYYY-MM-DDThh:mm:ssZ`, `YYYY-MM-DDThh:mm:ss` or `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_end_matches('Z');
        let (date, time) = match s.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (s, None),
        };
        let date_parts: Vec<&str> = date.split('-').collect();
        let (year, month, day) = match date_parts.as_slice() {
            [y, m, d] => (
                y.parse::<i32>().map_err(|e| format!("year: {e}"))?,
                m.parse::<u32>().map_err(|e| format!("month: {e}"))?,
                d.parse::<u32>().map_err(|e| format!("day: {e}"))?,
            ),
            _ => return Err(format!("expected YYYY-MM-DDThh:mm:ssZ, got {s}")),
        };
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(format!("date out of range: {s}"));
        }
        let (hour, minute, second) = match time {
            None => (0, 0, 0.0),
            Some(t) => {
                let parts: Vec<&str> = t.split(':').collect();
                match parts.as_slice() {
                    [h, m, sec] => (
                        h.parse::<u32>().map_err(|e| format!("hour: {e}"))?,
                        m.parse::<u32>().map_err(|e| format!("minute: {e}"))?,
                        sec.parse::<f64>().map_err(|e| format!("second: {e}"))?,
                    ),
                    _ => return Err(format!("invalid time of day: {t}")),
                }
            }
        };
        if hour > 23 || minute > 59 || !(0.0..61.0).contains(&second) {
            return Err(format!("time out of range: {s}"));
        }
        Ok(Self::new(year, month, day, hour, minute, second))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_calendar() {
        assert!((calendar_to_jd(2000, 1, 1.5) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn meeus_example_7a() {
        // Sputnik launch, 1957 Oct 4.81
        assert!((calendar_to_jd(1957, 10, 4.81) - 2_436_116.31).abs() < 1e-6);
    }

    #[test]
    fn jd_calendar_roundtrip() {
        let jd = calendar_to_jd(2024, 3, 20.125);
        let (y, m, d) = jd_to_calendar(jd);
        assert_eq!((y, m), (2024, 3));
        assert!((d - 20.125).abs() < 1e-8);
    }

    #[test]
    fn parse_and_display() {
        let date: CalendarDate = "2024-04-01T22:14:00Z".parse().expect("should parse");
        assert_eq!(date, CalendarDate::new(2024, 4, 1, 22, 14, 0.0));
        assert_eq!(date.to_string(), "2024-04-01T22:14:00.000Z");
        let back = CalendarDate::from_jd(date.to_jd());
        assert_eq!(back.to_string(), date.to_string());
    }

    #[test]
    fn rounding_carries_past_midnight() {
        let just_before = calendar_to_jd(2024, 3, 31.0) + 1.0 - 0.000_4 / SECONDS_PER_DAY;
        assert_eq!(
            CalendarDate::from_jd(just_before).to_string(),
            "2024-04-01T00:00:00.000Z"
        );
        let year_end = calendar_to_jd(2023, 12, 32.0) - 0.000_3 / SECONDS_PER_DAY;
        assert_eq!(
            CalendarDate::from_jd(year_end).to_string(),
            "2024-01-01T00:00:00.000Z"
        );
        let late = calendar_to_jd(2024, 3, 31.0) + 1.0 - 0.002 / SECONDS_PER_DAY;
        assert_eq!(
            CalendarDate::from_jd(late).to_string(),
            "2024-03-31T23:59:59.998Z"
        );
    }

    #[test]
    fn parse_date_only() {
        let date: CalendarDate = "2010-06-15".parse().expect("should parse");
        assert_eq!(date.hour, 0);
        assert!((date.to_jd() - calendar_to_jd(2010, 6, 15.0)).abs() < 1e-12);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("2024/04/01".parse::<CalendarDate>().is_err());
        assert!("2024-13-01T00:00:00Z".parse::<CalendarDate>().is_err());
        assert!("2024-01-01T25:00:00Z".parse::<CalendarDate>().is_err());
        assert!("2024-01-01T10:00".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn durations() {
        assert!((seconds_to_days(86_400.0) - 1.0).abs() < 1e-15);
        assert!((hours_to_days(6.0) - 0.25).abs() < 1e-15);
    }
}
