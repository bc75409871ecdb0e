//! Unit tests for the board pipeline.

use super::*;
use crate::reconcile::FixedClock;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, day)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

fn config(window_minutes: i64) -> BoardConfig {
    BoardConfig::new(StationId::parse("8000105").unwrap()).with_window_minutes(window_minutes)
}

/// Mock fetcher for testing.
#[derive(Default)]
struct MockFetcher {
    plans: HashMap<String, String>,
    changes: Option<String>,
    failing_plan: Option<String>,
    requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    fn with_plan(mut self, bucket: &str, xml: &str) -> Self {
        self.plans.insert(bucket.to_string(), xml.to_string());
        self
    }

    fn with_changes(mut self, xml: &str) -> Self {
        self.changes = Some(xml.to_string());
        self
    }

    fn failing_plan(mut self, bucket: &str) -> Self {
        self.failing_plan = Some(bucket.to_string());
        self
    }

    fn requested(&self) -> Vec<String> {
        let mut requested = self.requested.lock().unwrap().clone();
        requested.sort();
        requested
    }
}

fn parse(xml: &str) -> Result<TreeNode, FeedError> {
    TreeNode::parse_xml(xml).map_err(|e| FeedError::Xml {
        message: e.to_string(),
        body: None,
    })
}

impl FeedFetcher for MockFetcher {
    async fn fetch_plan(
        &self,
        _station: &StationId,
        bucket: HourBucket,
    ) -> Result<TreeNode, FeedError> {
        let key = bucket.to_string();
        self.requested.lock().unwrap().push(key.clone());

        if self.failing_plan.as_deref() == Some(key.as_str()) {
            return Err(FeedError::Api {
                status: 500,
                message: "boom".into(),
            });
        }

        match self.plans.get(&key) {
            Some(xml) => parse(xml),
            None => Ok(TreeNode::new("timetable")),
        }
    }

    async fn fetch_changes(&self, _station: &StationId) -> Result<TreeNode, FeedError> {
        match &self.changes {
            Some(xml) => parse(xml),
            None => Err(FeedError::RateLimited),
        }
    }
}

fn stop(id: &str, number: &str, departure: &str) -> String {
    format!(
        r#"<s id="{id}"><tl c="S" n="{number}" f="A" o="B"/><dp pt="{departure}" l="1" pp="3" ppth="Hanau|Offenbach|Frankfurt Süd"/></s>"#
    )
}

#[tokio::test]
async fn delay_computed_end_to_end() {
    let fetcher = MockFetcher::default()
        .with_plan(
            "241206/15",
            &format!("<timetable>{}</timetable>", stop("1", "123", "2412061532")),
        )
        .with_changes(
            r#"<timetable><s id="1"><tl c="S" n="123" f="A" o="B"/><dp ct="2412061538" cp="4"/></s></timetable>"#,
        );

    let board = build_board(&fetcher, &config(60), &FixedClock(at(6, 15, 30)))
        .await
        .unwrap();

    assert_eq!(board.departures.len(), 1);
    let r = &board.departures[0];
    assert_eq!(r.delay_minutes, Some(6));
    assert_eq!(r.line.as_deref(), Some("S1"));
    assert_eq!(r.destination.as_deref(), Some("Frankfurt Süd"));
    assert_eq!(r.planned_departure_display(), "2024-12-06 15:32");
    assert_eq!(
        r.actual_departure.as_ref().and_then(|s| s.display()),
        Some("2024-12-06 15:38")
    );
    assert_eq!(r.planned_platform.as_deref(), Some("3"));
    assert_eq!(r.actual_departure_platform.as_deref(), Some("4"));
}

#[tokio::test]
async fn both_hour_buckets_requested() {
    let fetcher = MockFetcher::default().with_changes("<timetable/>");

    build_board(&fetcher, &config(60), &FixedClock(at(6, 15, 30)))
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec!["241206/15", "241206/16"]);
}

#[tokio::test]
async fn next_bucket_rolls_over_midnight() {
    let fetcher = MockFetcher::default().with_changes("<timetable/>");

    build_board(&fetcher, &config(60), &FixedClock(at(31, 23, 40)))
        .await
        .unwrap();

    assert_eq!(fetcher.requested(), vec!["241231/23", "250101/00"]);
}

#[tokio::test]
async fn window_spans_both_buckets() {
    let fetcher = MockFetcher::default()
        .with_plan(
            "241206/15",
            &format!(
                "<timetable>{}{}</timetable>",
                stop("a", "1", "2412061529"),
                stop("b", "2", "2412061550"),
            ),
        )
        .with_plan(
            "241206/16",
            &format!(
                "<timetable>{}{}</timetable>",
                stop("c", "3", "2412061610"),
                stop("d", "4", "2412061631"),
            ),
        )
        .with_changes("<timetable/>");

    let board = build_board(&fetcher, &config(60), &FixedClock(at(6, 15, 30)))
        .await
        .unwrap();

    let numbers: Vec<_> = board
        .departures
        .iter()
        .map(|r| r.train_number.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(numbers, vec!["2", "3"]);
}

#[tokio::test]
async fn change_without_plan_entry_never_appears() {
    let fetcher = MockFetcher::default()
        .with_plan(
            "241206/15",
            &format!("<timetable>{}</timetable>", stop("1", "123", "2412061540")),
        )
        .with_changes(
            r#"<timetable><s id="9"><tl c="RE" n="999" f="X" o="Y"/><dp ct="2412061545"/></s></timetable>"#,
        );

    let board = build_board(&fetcher, &config(60), &FixedClock(at(6, 15, 30)))
        .await
        .unwrap();

    assert_eq!(board.departures.len(), 1);
    assert!(board.departures[0].actual_departure.is_none());
    assert!(board.departures[0].delay_minutes.is_none());
}

#[tokio::test]
async fn board_records_reference_time() {
    let fetcher = MockFetcher::default().with_changes("<timetable/>");

    let clock = FixedClock(at(6, 15, 30) + chrono::Duration::seconds(17));

    let board = build_board(&fetcher, &config(45), &clock).await.unwrap();

    assert_eq!(board.station.as_str(), "8000105");
    assert_eq!(board.generated_at, at(6, 15, 30));
    assert_eq!(board.window.end(), at(6, 16, 15));
    assert!(board.departures.is_empty());
}

#[tokio::test]
async fn oversized_window_stays_within_fetched_hours() {
    let fetcher = MockFetcher::default()
        .with_plan(
            "241206/16",
            &format!("<timetable>{}</timetable>", stop("a", "1", "2412061640")),
        )
        .with_plan(
            "241206/17",
            &format!("<timetable>{}</timetable>", stop("b", "2", "2412061705")),
        )
        .with_changes("<timetable/>");

    for minutes in [90, i64::MAX] {
        let board = build_board(&fetcher, &config(minutes), &FixedClock(at(6, 15, 45)))
            .await
            .unwrap();

        assert_eq!(board.window.end(), at(6, 16, 45));
        let numbers: Vec<_> = board
            .departures
            .iter()
            .map(|r| r.train_number.as_deref().unwrap_or(""))
            .collect();
        assert_eq!(numbers, vec!["1"]);
    }
}

#[tokio::test]
async fn plan_failure_names_bucket() {
    let fetcher = MockFetcher::default()
        .with_changes("<timetable/>")
        .failing_plan("241206/16");

    let err = build_board(&fetcher, &config(60), &FixedClock(at(6, 15, 30)))
        .await
        .unwrap_err();

    match &err {
        BoardError::Fetch {
            feed,
            bucket,
            source,
        } => {
            assert_eq!(*feed, FeedKind::Plan);
            assert_eq!(bucket.map(|b| b.to_string()).as_deref(), Some("241206/16"));
            assert!(matches!(source, FeedError::Api { status: 500, .. }));
        }
    }
    assert_eq!(
        err.to_string(),
        "failed to fetch plan feed for 241206/16: API error 500: boom"
    );
}

#[tokio::test]
async fn change_failure_aborts_run() {
    let fetcher = MockFetcher::default().with_plan(
        "241206/15",
        &format!("<timetable>{}</timetable>", stop("1", "123", "2412061540")),
    );

    let err = build_board(&fetcher, &config(60), &FixedClock(at(6, 15, 30)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        BoardError::Fetch {
            feed: FeedKind::Changes,
            bucket: None,
            ..
        }
    ));
    assert_eq!(
        err.to_string(),
        "failed to fetch change feed: rate limited by timetables API"
    );
}

#[test]
fn reconcile_orders_across_documents() {
    let window = TimeWindow::new(at(6, 7, 0), at(6, 9, 0));
    let first = TreeNode::parse_xml(&format!(
        "<timetable>{}{}</timetable>",
        stop("a", "810", "2412060810"),
        stop("b", "755", "2412060755"),
    ))
    .unwrap();
    let second =
        TreeNode::parse_xml(&format!("<timetable>{}</timetable>", stop("c", "800", "2412060800")))
            .unwrap();

    let board = reconcile(&[first, second], &TreeNode::new("timetable"), &window);

    let times: Vec<_> = board.iter().map(|r| r.planned_departure_display()).collect();
    assert_eq!(
        times,
        vec!["2024-12-06 07:55", "2024-12-06 08:00", "2024-12-06 08:10"]
    );
}

#[test]
fn feed_kind_display() {
    assert_eq!(FeedKind::Plan.to_string(), "plan");
    assert_eq!(FeedKind::Changes.to_string(), "change");
}
