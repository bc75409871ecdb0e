//! Rolling time window for board admission.

use chrono::{Duration, NaiveDateTime, Timelike};

/// A closed interval `[start, end]` of local times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Create a window; `end` before `start` yields an empty window.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The window starting at `now` (truncated to the minute) and lasting
    /// `minutes`.
    ///
    /// Feed time codes have minute resolution, so a train planned for the
    /// current minute stays on the board until that minute is over. An end
    /// past the representable range saturates.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_board::reconcile::TimeWindow;
    /// use chrono::NaiveDate;
    ///
    /// let now = NaiveDate::from_ymd_opt(2024, 12, 6).unwrap().and_hms_opt(15, 32, 41).unwrap();
    /// let window = TimeWindow::starting_at(now, 30);
    ///
    /// assert_eq!(window.start().to_string(), "2024-12-06 15:32:00");
    /// assert_eq!(window.end().to_string(), "2024-12-06 16:02:00");
    /// ```
    pub fn starting_at(now: NaiveDateTime, minutes: i64) -> Self {
        let start = now
            .with_second(0)
            .and_then(|t| t.with_nanosecond(0))
            .unwrap_or(now);
        let end = Duration::try_minutes(minutes)
            .and_then(|length| start.checked_add_signed(length))
            .unwrap_or(if minutes < 0 {
                NaiveDateTime::MIN
            } else {
                NaiveDateTime::MAX
            });
        Self { start, end }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether `instant` lies within the window, bounds included.
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}
