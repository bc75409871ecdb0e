//! Feed time codes and hour buckets.
//!
//! Both feeds encode times as fixed-width `YYMMDDHHMM` strings in the
//! station's local time. No timezone conversion happens anywhere: the
//! codes, the hour buckets and "now" all share that implicit zone.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// Length of a feed time code.
const TIME_CODE_LEN: usize = 10;

/// Parse a `YYMMDDHHMM` time code.
///
/// Returns `None` unless the code is exactly ten ASCII digits that name a
/// real calendar date and time of day. The century is always `20`.
///
/// # Examples
///
/// ```
/// use timetable_board::domain::{format_display, parse_time_code};
///
/// let t = parse_time_code("2412061532").unwrap();
/// assert_eq!(format_display(t), "2024-12-06 15:32");
///
/// assert!(parse_time_code("241206153").is_none());
/// assert!(parse_time_code("24120615ab").is_none());
/// ```
pub fn parse_time_code(code: &str) -> Option<NaiveDateTime> {
    let bytes = code.as_bytes();
    if bytes.len() != TIME_CODE_LEN {
        return None;
    }

    let year = parse_two_digits(&bytes[0..2])?;
    let month = parse_two_digits(&bytes[2..4])?;
    let day = parse_two_digits(&bytes[4..6])?;
    let hour = parse_two_digits(&bytes[6..8])?;
    let minute = parse_two_digits(&bytes[8..10])?;

    let date = NaiveDate::from_ymd_opt(2000 + year as i32, month, day)?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

/// Render an instant as `YYYY-MM-DD HH:MM`.
pub fn format_display(instant: NaiveDateTime) -> String {
    instant.format("%Y-%m-%d %H:%M").to_string()
}

/// Render an instant back into a `YYMMDDHHMM` time code.
pub fn format_time_code(instant: NaiveDateTime) -> String {
    instant.format("%y%m%d%H%M").to_string()
}

/// Parse two ASCII digit bytes into a u32.
fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// A time as it appeared in a feed, with its parsed and display forms.
///
/// The raw code is kept verbatim so that an unparsable code is still
/// visible downstream; `instant` and `display` are then `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stamp {
    raw: String,
    instant: Option<NaiveDateTime>,
    display: Option<String>,
}

impl Stamp {
    /// Build a stamp from a raw time code.
    pub fn from_code(raw: &str) -> Self {
        let instant = parse_time_code(raw);
        Self {
            raw: raw.to_string(),
            instant,
            display: instant.map(format_display),
        }
    }

    /// Build a stamp from an instant.
    pub fn from_instant(instant: NaiveDateTime) -> Self {
        Self {
            raw: format_time_code(instant),
            instant: Some(instant),
            display: Some(format_display(instant)),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn instant(&self) -> Option<NaiveDateTime> {
        self.instant
    }

    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Display form, or the raw code when it did not parse.
    pub fn display_text(&self) -> String {
        self.display().unwrap_or(&self.raw).to_string()
    }
}

/// One hour of the planned timetable at a station.
///
/// The plan feed is partitioned into these buckets, addressed by a
/// `YYMMDD` date code and an `HH` hour code.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourBucket {
    date: NaiveDate,
    hour: u32,
}

impl HourBucket {
    /// The bucket containing `now`.
    pub fn containing(now: NaiveDateTime) -> Self {
        Self {
            date: now.date(),
            hour: now.hour(),
        }
    }

    /// The following bucket, rolling over to the next date after hour 23.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_board::domain::HourBucket;
    /// use chrono::NaiveDate;
    ///
    /// let late = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap().and_hms_opt(23, 40, 0).unwrap();
    /// let next = HourBucket::containing(late).next();
    /// assert_eq!(next.date_code(), "250101");
    /// assert_eq!(next.hour_code(), "00");
    /// ```
    pub fn next(&self) -> Self {
        let start = self.date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(self.hour));
        Self::containing(start + Duration::hours(1))
    }

    /// The buckets a board starting at `now` needs: the current one and the next.
    pub fn current_and_next(now: NaiveDateTime) -> [Self; 2] {
        let current = Self::containing(now);
        [current, current.next()]
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// Date in the plan feed's `YYMMDD` form.
    pub fn date_code(&self) -> String {
        self.date.format("%y%m%d").to_string()
    }

    /// Hour in the plan feed's zero-padded `HH` form.
    pub fn hour_code(&self) -> String {
        format!("{:02}", self.hour)
    }
}

impl fmt::Debug for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HourBucket({} {:02})", self.date, self.hour)
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.date_code(), self.hour_code())
    }
}
