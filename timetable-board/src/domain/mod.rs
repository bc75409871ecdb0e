//! Domain types for the departure board.
//!
//! These types represent timetable data after it has been read out of the
//! feed documents. Parsing is lenient where the feeds are loose (absent
//! sub-records, odd time codes) and strict where identity matters.

mod identity;
mod line;
mod record;
mod station;
mod time;

pub use identity::{IdPart, TripIdentity};
pub use line::display_line;
pub use record::{ChangePatch, ChangeTrace, DepartureRecord, STATUS_CANCELLED};
pub use station::{InvalidStationId, StationId};
pub use time::{HourBucket, Stamp, format_display, format_time_code, parse_time_code};
