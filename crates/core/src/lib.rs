//! # Scan Core
//!
//! Core logic for the body scanner.
//!
//! This crate contains pure data operations over a single in-memory scan:
//! - Fixture loading with a one-shot schema diagnostic
//! - The pain-area store (upsert keyed by body location, click reducer)
//! - Rule-based report generation
//! - Presentation data: severity bars, list rows and the click highlight
//!
//! **No UI concerns**: drawing the body diagram and dispatching clicks belong to the front end,
//! which owns a [`ScanSession`] and feeds it events in arrival order.

pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod model;
pub mod report;
pub mod schema;
pub mod session;
pub mod store;
pub mod validation;
pub mod view;

pub use config::CoreConfig;
pub use error::{ScanError, ScanResult};
pub use fixture::FixtureSource;
pub use model::{PainArea, ScanData, ScanResults, UserProfile};
pub use report::{generate_report, generate_report_in, ReportLocale, SeverityBand};
pub use session::ScanSession;
pub use store::{handle_location_click, upsert_pain_area, upsert_pain_area_with_type, ClickOutcome};

// Re-export validated primitives from the scan-types crate.
pub use scan_types::{LocationId, Severity, TypesError};
