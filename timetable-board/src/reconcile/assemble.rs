//! Board assembly.

use crate::domain::DepartureRecord;

/// Order merged records into the final board.
///
/// Records are sorted by their planned departure display string
/// (`YYYY-MM-DD HH:MM` sorts chronologically); a record without one sorts
/// first. The sort is stable and nothing is deduplicated: two plan stop
/// events with the same identity stay two rows.
pub fn assemble(mut records: Vec<DepartureRecord>) -> Vec<DepartureRecord> {
    records.sort_by(|a, b| {
        a.planned_departure_display()
            .cmp(b.planned_departure_display())
    });
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Stamp, TripIdentity};

    fn record(number: &str, departure: Option<&str>) -> DepartureRecord {
        let mut r = DepartureRecord::planned(TripIdentity::new("S", number, "A", "B"));
        r.planned_departure = departure.map(Stamp::from_code);
        r
    }

    fn numbers(records: &[DepartureRecord]) -> Vec<&str> {
        records
            .iter()
            .map(|r| r.identity.train_number.as_str().unwrap_or(""))
            .collect()
    }

    #[test]
    fn sorted_by_planned_departure() {
        let board = assemble(vec![
            record("810", Some("2412060810")),
            record("755", Some("2412060755")),
            record("800", Some("2412060800")),
        ]);

        let times: Vec<_> = board.iter().map(|r| r.planned_departure_display()).collect();
        assert_eq!(
            times,
            vec!["2024-12-06 07:55", "2024-12-06 08:00", "2024-12-06 08:10"]
        );
    }

    #[test]
    fn across_midnight_sorts_chronologically() {
        let board = assemble(vec![
            record("b", Some("2412070005")),
            record("a", Some("2412062355")),
        ]);
        assert_eq!(numbers(&board), vec!["a", "b"]);
    }

    #[test]
    fn unset_departure_sorts_first() {
        let board = assemble(vec![
            record("timed", Some("2412060800")),
            record("unset", None),
            record("garbage", Some("xx")),
        ]);
        assert_eq!(numbers(&board), vec!["unset", "garbage", "timed"]);
    }

    #[test]
    fn equal_times_keep_input_order() {
        let board = assemble(vec![
            record("first", Some("2412060800")),
            record("second", Some("2412060800")),
            record("early", Some("2412060700")),
        ]);
        assert_eq!(numbers(&board), vec!["early", "first", "second"]);
    }

    #[test]
    fn duplicates_survive() {
        let board = assemble(vec![
            record("1", Some("2412060800")),
            record("1", Some("2412060800")),
        ]);
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn empty_board() {
        assert!(assemble(Vec::new()).is_empty());
    }
}
