//! Change merging: overlay real-time facts onto planned records.

use tracing::{debug, warn};

use crate::document::HierNode;
use crate::domain::{ChangePatch, DepartureRecord, TripIdentity};

use super::plan::{ARRIVAL, DEPARTURE, STOP_EVENT};

/// Merge a change-feed document into planned records.
///
/// Every change stop event is matched against the records by
/// [`TripIdentity`]; each matching record is replaced by a patched copy.
/// Change events matching no record are dropped: the change feed never
/// creates records. Change events are applied in document order, so for
/// fields the feed repeats, the last non-empty value wins.
pub fn apply_changes(records: Vec<DepartureRecord>, change_doc: &HierNode) -> Vec<DepartureRecord> {
    change_doc
        .children(STOP_EVENT)
        .iter()
        .fold(records, |records, stop| {
            let identity = TripIdentity::from_stop(stop);
            let patch = patch_from_stop(stop);
            apply_patch(records, &identity, &patch)
        })
}

/// Apply one patch to every record with the given identity.
fn apply_patch(
    records: Vec<DepartureRecord>,
    identity: &TripIdentity,
    patch: &ChangePatch,
) -> Vec<DepartureRecord> {
    let mut matches = 0usize;

    let records = records
        .into_iter()
        .map(|record| {
            if &record.identity == identity {
                matches += 1;
                record.with_patch(patch)
            } else {
                record
            }
        })
        .collect();

    match matches {
        0 => debug!(trip = %identity, "Change matches no planned departure, dropping"),
        1 => {}
        n => warn!(
            trip = %identity,
            matches = n,
            "Change matches several planned departures, applying to all"
        ),
    }

    records
}

/// Read the real-time facts of one change stop event.
pub fn patch_from_stop(stop: &HierNode) -> ChangePatch {
    let departure = stop.child(DEPARTURE);
    let arrival = stop.child(ARRIVAL);

    let present = |event: Option<&HierNode>, name: &str| {
        event
            .and_then(|e| e.attr_present(name))
            .map(str::to_string)
    };

    ChangePatch {
        arrival_time: present(arrival, "ct"),
        departure_time: present(departure, "ct"),
        arrival_platform: present(arrival, "cp"),
        departure_platform: present(departure, "cp"),
        arrival_status: present(arrival, "cs"),
        departure_status: present(departure, "cs"),
        delay_source: present(departure, "ds").or_else(|| present(arrival, "ds")),
    }
}
