//! Station departure board from the DB timetables feeds.
//!
//! Combines the hourly planned schedule with the real-time change feed
//! into one delay-annotated departure board for a single station.

pub mod cache;
pub mod config;
pub mod document;
pub mod domain;
pub mod reconcile;
pub mod timetables;
pub mod web;
