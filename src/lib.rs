//! Compiles spreadsheets of organizational indicators into standardized reporting forms.
//!
//! Rows are ingested by [`workflows::spreadsheet`], turned into typed field definitions by
//! [`workflows::indicators`], and scored against the responses a presentation layer collects.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
