//! Departure board records.
//!
//! A `DepartureRecord` is created once per admitted plan stop event. Its
//! plan-side fields never change afterwards. Real-time facts arrive as
//! [`ChangePatch`]es, which only ever add information: a patch field that
//! is absent leaves the record untouched, so an actual time or platform,
//! once known, is never reset.

use super::identity::TripIdentity;
use super::time::Stamp;

/// Event status code for a cancelled stop event.
pub const STATUS_CANCELLED: &str = "c";

/// Raw change codes observed while merging, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeTrace {
    /// Changed arrival time code, if the change carried one.
    pub arrival: Option<String>,
    /// Changed departure time code, if the change carried one.
    pub departure: Option<String>,
}

/// Real-time facts for one trip, taken from a change-feed stop event.
///
/// Every field is either a present, non-empty value or `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangePatch {
    pub arrival_time: Option<String>,
    pub departure_time: Option<String>,
    pub arrival_platform: Option<String>,
    pub departure_platform: Option<String>,
    pub arrival_status: Option<String>,
    pub departure_status: Option<String>,
    pub delay_source: Option<String>,
}

/// One row of the departure board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartureRecord {
    /// Join key against the change feed.
    pub identity: TripIdentity,
    /// Line code, already in display form (see [`display_line`](super::display_line)).
    pub line: Option<String>,
    /// Train category, e.g. "ICE".
    pub train_type: Option<String>,
    pub train_number: Option<String>,
    /// Final station of the planned route.
    pub destination: Option<String>,

    pub planned_departure: Option<Stamp>,
    pub planned_arrival: Option<Stamp>,
    pub planned_platform: Option<String>,
    pub planned_status: Option<String>,

    pub actual_departure: Option<Stamp>,
    pub actual_arrival: Option<Stamp>,
    pub actual_departure_platform: Option<String>,
    pub actual_arrival_platform: Option<String>,
    pub actual_departure_status: Option<String>,
    pub actual_arrival_status: Option<String>,

    /// Source of the latest delay information seen for this trip.
    pub delay_source: Option<String>,
    /// Actual minus planned departure, in whole minutes (floored).
    pub delay_minutes: Option<i64>,

    /// Change codes observed during merge, in merge order.
    pub trail: Vec<ChangeTrace>,
}

impl DepartureRecord {
    /// Create a record with no real-time information.
    pub fn planned(identity: TripIdentity) -> Self {
        Self {
            identity,
            line: None,
            train_type: None,
            train_number: None,
            destination: None,
            planned_departure: None,
            planned_arrival: None,
            planned_platform: None,
            planned_status: None,
            actual_departure: None,
            actual_arrival: None,
            actual_departure_platform: None,
            actual_arrival_platform: None,
            actual_departure_status: None,
            actual_arrival_status: None,
            delay_source: None,
            delay_minutes: None,
            trail: Vec::new(),
        }
    }

    /// Return a copy of this record with a change patch overlaid.
    ///
    /// Each actual field is replaced only when the patch carries a value
    /// for it. The delay is then recomputed from the resulting planned and
    /// actual departure instants.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetable_board::domain::{ChangePatch, DepartureRecord, Stamp, TripIdentity};
    ///
    /// let mut record = DepartureRecord::planned(TripIdentity::new("S", "123", "A", "B"));
    /// record.planned_departure = Some(Stamp::from_code("2412061532"));
    ///
    /// let patch = ChangePatch {
    ///     departure_time: Some("2412061547".into()),
    ///     ..ChangePatch::default()
    /// };
    /// let merged = record.with_patch(&patch);
    ///
    /// assert_eq!(merged.delay_minutes, Some(15));
    /// assert_eq!(merged.actual_departure.unwrap().display(), Some("2024-12-06 15:47"));
    /// ```
    pub fn with_patch(mut self, patch: &ChangePatch) -> Self {
        self.trail.push(ChangeTrace {
            arrival: patch.arrival_time.clone(),
            departure: patch.departure_time.clone(),
        });

        if let Some(code) = &patch.departure_time {
            self.actual_departure = Some(Stamp::from_code(code));
        }
        if let Some(code) = &patch.arrival_time {
            self.actual_arrival = Some(Stamp::from_code(code));
        }

        overwrite(&mut self.actual_departure_platform, &patch.departure_platform);
        overwrite(&mut self.actual_arrival_platform, &patch.arrival_platform);
        overwrite(&mut self.actual_departure_status, &patch.departure_status);
        overwrite(&mut self.actual_arrival_status, &patch.arrival_status);
        overwrite(&mut self.delay_source, &patch.delay_source);

        self.delay_minutes = self.computed_delay();
        self
    }

    /// Delay in minutes from the current planned and actual departures.
    fn computed_delay(&self) -> Option<i64> {
        let planned = self.planned_departure.as_ref()?.instant()?;
        let actual = self.actual_departure.as_ref()?.instant()?;
        Some(
            actual
                .signed_duration_since(planned)
                .num_seconds()
                .div_euclid(60),
        )
    }

    /// Planned departure as displayed, or `""` when unknown.
    pub fn planned_departure_display(&self) -> &str {
        self.planned_departure
            .as_ref()
            .and_then(Stamp::display)
            .unwrap_or("")
    }

    /// The departure time to show: actual if known, else planned.
    pub fn effective_departure(&self) -> Option<&Stamp> {
        self.actual_departure
            .as_ref()
            .or(self.planned_departure.as_ref())
    }

    /// Real-time platform, departure side first.
    pub fn actual_platform(&self) -> Option<&str> {
        self.actual_departure_platform
            .as_deref()
            .or(self.actual_arrival_platform.as_deref())
    }

    /// The platform to show: actual if known, else planned.
    pub fn effective_platform(&self) -> Option<&str> {
        self.actual_platform().or(self.planned_platform.as_deref())
    }

    /// The current event status: actual if known, else planned.
    pub fn effective_status(&self) -> Option<&str> {
        self.actual_departure_status
            .as_deref()
            .or(self.planned_status.as_deref())
    }

    pub fn is_cancelled(&self) -> bool {
        self.effective_status() == Some(STATUS_CANCELLED)
    }

    /// Whether a real-time platform differs from the planned one.
    pub fn platform_changed(&self) -> bool {
        match (self.actual_platform(), self.planned_platform.as_deref()) {
            (Some(actual), Some(planned)) => actual != planned,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

fn overwrite(field: &mut Option<String>, value: &Option<String>) {
    if let Some(v) = value {
        *field = Some(v.clone());
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;

    proptest! {
        /// The delay equals the offset applied to the planned departure.
        #[test]
        fn delay_matches_offset(offset in -180i64..=720, hour in 0u32..24, minute in 0u32..60) {
            let planned = NaiveDate::from_ymd_opt(2024, 12, 6)
                .unwrap()
                .and_hms_opt(hour, minute, 0)
                .unwrap();
            let actual = planned + Duration::minutes(offset);

            let mut r = DepartureRecord::planned(TripIdentity::new("S", "1", "A", "B"));
            r.planned_departure = Some(Stamp::from_instant(planned));
            let r = r.with_patch(&ChangePatch {
                departure_time: Some(Stamp::from_instant(actual).raw().to_string()),
                ..ChangePatch::default()
            });

            prop_assert_eq!(r.delay_minutes, Some(offset));
        }

        /// No sequence of patches clears an actual field once it is set.
        #[test]
        fn actuals_never_revert(
            platforms in proptest::collection::vec(proptest::option::of("[0-9]{1,2}"), 1..8)
        ) {
            let mut r = DepartureRecord::planned(TripIdentity::new("S", "1", "A", "B"));
            let mut expected: Option<String> = None;

            for platform in platforms {
                if platform.is_some() {
                    expected = platform.clone();
                }
                r = r.with_patch(&ChangePatch {
                    departure_platform: platform,
                    ..ChangePatch::default()
                });
                prop_assert_eq!(&r.actual_departure_platform, &expected);
            }
        }
    }
}
