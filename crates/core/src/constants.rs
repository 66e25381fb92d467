//! Constants used throughout the scan core crate.
//!
//! This module contains the fixture paths, the severity band thresholds and the
//! interaction defaults so that every consumer agrees on the same values.

use std::time::Duration;

/// Fixture path, relative to the working directory or any ancestor of the crate.
pub const DEFAULT_FIXTURE_PATH: &str = "data/scan_data.json";

/// Fixture compiled into the crate, used when no fixture file can be located.
pub const EMBEDDED_FIXTURE: &str = include_str!("../../../data/scan_data.json");

/// Category tag given to pain areas created from a diagram click.
pub const DEFAULT_PAIN_TYPE: &str = "muscle_pain";

/// Severities strictly above this value are reported as severe.
pub const SEVERE_THRESHOLD: u8 = 7;

/// Severities strictly above this value (and not severe) are reported as moderate.
pub const MODERATE_THRESHOLD: u8 = 4;

/// Location substrings that mark an identifier as arm- or hand-related.
pub const LIMB_LOCATION_MARKERS: [&str; 2] = ["arm", "hand"];

/// How long a clicked location stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_secs(1);

/// Width of a severity bar track, in percent, per severity point.
pub const BAR_PERCENT_PER_POINT: u8 = 10;
