//! Plan ingestion: planned-schedule documents to candidate board records.

use tracing::debug;

use crate::document::HierNode;
use crate::domain::{DepartureRecord, Stamp, TripIdentity, display_line};

use super::window::TimeWindow;

/// Tag of a stop event within a timetable document.
pub(crate) const STOP_EVENT: &str = "s";
/// Tag of the departure sub-record of a stop event.
pub(crate) const DEPARTURE: &str = "dp";
/// Tag of the arrival sub-record of a stop event.
pub(crate) const ARRIVAL: &str = "ar";

/// Separator between stations in a planned route.
const PATH_SEPARATOR: char = '|';

/// Build board records from a planned-schedule document.
///
/// One record is produced per stop event whose planned departure lies
/// inside `window`. Stop events with no parsable planned departure (for
/// example, trains terminating here) are dropped.
pub fn ingest_plan(doc: &HierNode, window: &TimeWindow) -> Vec<DepartureRecord> {
    let stops = doc.children(STOP_EVENT);

    let records: Vec<DepartureRecord> = stops
        .iter()
        .filter_map(|stop| {
            let record = record_from_stop(stop);
            let departure = record.planned_departure.as_ref()?.instant()?;
            window.contains(departure).then_some(record)
        })
        .collect();

    debug!(
        stops = stops.len(),
        admitted = records.len(),
        dropped = stops.len() - records.len(),
        "Ingested plan document"
    );

    records
}

/// Read one plan stop event into a record, without window filtering.
fn record_from_stop(stop: &HierNode) -> DepartureRecord {
    let departure = stop.child(DEPARTURE);
    let arrival = stop.child(ARRIVAL);
    let label = stop.child("tl");

    // Trains that only arrive here have no departure sub-record.
    let event = departure.or(arrival);
    let event_attr = |name: &str| event.and_then(|e| e.attr_present(name));

    let mut record = DepartureRecord::planned(TripIdentity::from_stop(stop));

    record.line = event_attr("l").map(display_line);
    record.destination = event_attr("ppth").and_then(final_station);
    record.planned_platform = event_attr("pp").map(str::to_string);
    record.planned_status = event_attr("ps").map(str::to_string);
    record.train_type = label.and_then(|tl| tl.attr_present("c")).map(str::to_string);
    record.train_number = label.and_then(|tl| tl.attr_present("n")).map(str::to_string);

    record.planned_departure = departure
        .and_then(|d| d.attr_present("pt"))
        .map(Stamp::from_code);
    record.planned_arrival = arrival
        .and_then(|a| a.attr_present("pt"))
        .map(Stamp::from_code);

    record
}

/// Last station of a `|`-separated route.
fn final_station(path: &str) -> Option<String> {
    path.rsplit(PATH_SEPARATOR)
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
