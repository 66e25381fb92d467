//! Domain-level scan data types.
//!
//! These are the validated, in-memory forms of the fixture. The JSON wire shape
//! lives in [`crate::fixture`]; anything held in a [`ScanData`] has already passed
//! the identifier, severity and uniqueness checks.

use scan_types::{LocationId, Severity};

use crate::constants::DEFAULT_PAIN_TYPE;

/// Who the scan belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    /// Age in whole years, always greater than zero.
    pub age: u32,
}

/// Fixed measurements taken by the scanner.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanResults {
    /// Beats per minute.
    pub heart_rate: i64,
    /// Free text such as `120/80`.
    pub blood_pressure: String,
    /// Body fat percentage.
    pub body_fat: f64,
}

/// A reported pain at one body location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PainArea {
    /// Category tag, `muscle_pain` unless stated otherwise.
    pub pain_type: String,
    pub location: LocationId,
    pub severity: Severity,
}

impl PainArea {
    /// Creates a pain area with the default category tag.
    pub fn new(location: LocationId, severity: Severity) -> Self {
        Self {
            pain_type: DEFAULT_PAIN_TYPE.to_string(),
            location,
            severity,
        }
    }
}

/// Complete scan state: profile, fixed results and the pain-area collection.
///
/// `pain_areas` keeps insertion order and never holds two entries with the same
/// location. Only [`crate::store`] produces modified copies.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanData {
    pub user_profile: UserProfile,
    pub scan_results: ScanResults,
    pub(crate) pain_areas: Vec<PainArea>,
}

impl ScanData {
    /// Creates scan data with an empty pain-area collection.
    pub fn new(user_profile: UserProfile, scan_results: ScanResults) -> Self {
        Self {
            user_profile,
            scan_results,
            pain_areas: Vec::new(),
        }
    }

    /// Pain areas in the order they were first reported.
    pub fn pain_areas(&self) -> &[PainArea] {
        &self.pain_areas
    }

    /// Looks up the pain area recorded for `location`, if any.
    pub fn pain_area(&self, location: &str) -> Option<&PainArea> {
        self.pain_areas
            .iter()
            .find(|area| area.location.as_str() == location)
    }
}
