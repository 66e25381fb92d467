//! Input validation utilities.
//!
//! This module contains the checks applied to raw interaction and fixture input
//! before it reaches the scan state store.

use crate::constants::LIMB_LOCATION_MARKERS;
use crate::{ScanError, ScanResult};
use scan_types::Severity;

/// Returns true when a location identifier names an arm or hand sub-part.
///
/// This is a plain substring match, so `upper_arm_left`, `forearm` and
/// `hand_right` all qualify while `torso` does not.
pub fn is_arm_or_hand(location: &str) -> bool {
    LIMB_LOCATION_MARKERS
        .iter()
        .any(|marker| location.contains(marker))
}

/// Validates a pain category tag such as `muscle_pain`.
///
/// Tags are free-form but must be non-empty and bounded, and are restricted to a
/// conservative ASCII set so they render safely in reports and diagrams.
///
/// # Errors
///
/// Returns a `ScanError::InvalidInput` if the tag is invalid.
pub fn validate_pain_type(tag: &str) -> ScanResult<()> {
    const MAX_TAG_LEN: usize = 64;

    if tag.trim().is_empty() {
        return Err(ScanError::InvalidInput("pain type cannot be empty".into()));
    }

    if tag.len() > MAX_TAG_LEN {
        return Err(ScanError::InvalidInput(format!(
            "pain type exceeds maximum length of {} characters",
            MAX_TAG_LEN
        )));
    }

    let ok = tag
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(ScanError::InvalidInput(
            "pain type contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    Ok(())
}

/// Parses a textual click event: `location=severity` or `location severity`.
///
/// The location is returned unvalidated because unrecognised locations are a
/// normal, silently ignored input for the click reducer.
///
/// # Errors
///
/// Returns `ScanError::InvalidInput` if the text has no separator or no
/// location, and `ScanError::Types` if the severity is not an integer in `1..=10`.
pub fn parse_click_event(text: &str) -> ScanResult<(String, Severity)> {
    let text = text.trim();
    let (location, severity) = text
        .split_once('=')
        .or_else(|| text.split_once(char::is_whitespace))
        .ok_or_else(|| {
            ScanError::InvalidInput(format!(
                "expected 'location=severity' or 'location severity', got {text:?}"
            ))
        })?;

    let location = location.trim();
    if location.is_empty() {
        return Err(ScanError::InvalidInput(format!(
            "click event {text:?} has no location"
        )));
    }

    let severity: Severity = severity.parse()?;
    Ok((location.to_string(), severity))
}
