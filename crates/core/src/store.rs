//! Scan state store.
//!
//! The store is a set of pure functions over [`ScanData`] values: every update
//! returns a new value and leaves its input untouched. Callers own the current
//! state and replace it with whatever the reducer hands back.

use crate::model::{PainArea, ScanData};
use crate::validation::{is_arm_or_hand, validate_pain_type};
use crate::ScanResult;
use scan_types::{LocationId, Severity};

/// Result of feeding a "body-location clicked" event to [`handle_location_click`].
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The location was accepted; carries the updated scan data.
    Updated(ScanData),
    /// The location is not an arm or hand sub-part; nothing changed.
    Ignored,
}

/// Records `severity` for `location`, tagging the entry `muscle_pain`.
///
/// If the collection already holds an entry for `location`, that entry is
/// replaced in place; otherwise a new entry is appended.
pub fn upsert_pain_area(current: &ScanData, location: LocationId, severity: Severity) -> ScanData {
    upsert(current, PainArea::new(location, severity))
}

/// Same as [`upsert_pain_area`] with an explicit category tag.
///
/// # Errors
///
/// Returns a `ScanError::InvalidInput` if `pain_type` is not a valid tag.
pub fn upsert_pain_area_with_type(
    current: &ScanData,
    location: LocationId,
    severity: Severity,
    pain_type: &str,
) -> ScanResult<ScanData> {
    validate_pain_type(pain_type)?;
    Ok(upsert(
        current,
        PainArea {
            pain_type: pain_type.to_string(),
            location,
            severity,
        },
    ))
}

/// Applies a click on `location` with the user-supplied `severity`.
///
/// Only arm and hand identifiers are consumed. Anything else, including an
/// empty or malformed identifier, is ignored without touching the state.
pub fn handle_location_click(current: &ScanData, location: &str, severity: Severity) -> ClickOutcome {
    if !is_arm_or_hand(location) {
        tracing::debug!("ignoring click on non arm/hand location {:?}", location);
        return ClickOutcome::Ignored;
    }

    match LocationId::new(location) {
        Ok(location) => ClickOutcome::Updated(upsert_pain_area(current, location, severity)),
        Err(e) => {
            tracing::debug!("ignoring click on invalid location {:?}: {}", location, e);
            ClickOutcome::Ignored
        }
    }
}

fn upsert(current: &ScanData, area: PainArea) -> ScanData {
    let mut next = current.clone();

    match next
        .pain_areas
        .iter_mut()
        .find(|existing| existing.location == area.location)
    {
        Some(existing) => {
            tracing::debug!(
                "updating pain area {} severity {} -> {}",
                area.location,
                existing.severity,
                area.severity
            );
            *existing = area;
        }
        None => {
            tracing::debug!(
                "adding pain area {} severity {}",
                area.location,
                area.severity
            );
            next.pain_areas.push(area);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_PAIN_TYPE;
    use crate::model::{ScanResults, UserProfile};
    use proptest::prelude::*;
    use std::collections::{HashMap, HashSet};

    fn empty_scan() -> ScanData {
        ScanData::new(
            UserProfile {
                name: "Sara".into(),
                age: 32,
            },
            ScanResults {
                heart_rate: 72,
                blood_pressure: "120/80".into(),
                body_fat: 22.5,
            },
        )
    }

    fn loc(id: &str) -> LocationId {
        LocationId::new(id).expect("valid location")
    }

    fn sev(value: i64) -> Severity {
        Severity::new(value).expect("valid severity")
    }

    #[test]
    fn test_upsert_appends_new_location() {
        let data = upsert_pain_area(&empty_scan(), loc("hand_left"), sev(9));
        assert_eq!(
            data.pain_areas(),
            &[PainArea {
                pain_type: DEFAULT_PAIN_TYPE.into(),
                location: loc("hand_left"),
                severity: sev(9),
            }]
        );
    }

    #[test]
    fn test_upsert_replaces_existing_location_last_write_wins() {
        let first = upsert_pain_area(&empty_scan(), loc("hand_left"), sev(3));
        let second = upsert_pain_area(&first, loc("hand_left"), sev(8));
        assert_eq!(second.pain_areas().len(), 1);
        assert_eq!(second.pain_areas()[0].severity, sev(8));
    }

    #[test]
    fn test_upsert_does_not_mutate_input() {
        let original = upsert_pain_area(&empty_scan(), loc("hand_left"), sev(3));
        let snapshot = original.clone();
        let _ = upsert_pain_area(&original, loc("hand_left"), sev(10));
        let _ = upsert_pain_area(&original, loc("hand_right"), sev(1));
        assert_eq!(original, snapshot);
    }

    #[test]
    fn test_upsert_keeps_position_of_updated_entry() {
        let mut data = empty_scan();
        for (id, s) in [("upper_arm_left", 2), ("hand_left", 5), ("hand_right", 7)] {
            data = upsert_pain_area(&data, loc(id), sev(s));
        }
        let data = upsert_pain_area(&data, loc("hand_left"), sev(9));
        let order: Vec<_> = data
            .pain_areas()
            .iter()
            .map(|a| (a.location.as_str(), a.severity.get()))
            .collect();
        assert_eq!(
            order,
            vec![("upper_arm_left", 2), ("hand_left", 9), ("hand_right", 7)]
        );
    }

    #[test]
    fn test_upsert_overwrites_type_with_default() {
        let tagged =
            upsert_pain_area_with_type(&empty_scan(), loc("hand_left"), sev(4), "joint_pain")
                .expect("valid tag");
        assert_eq!(tagged.pain_areas()[0].pain_type, "joint_pain");

        let clicked = upsert_pain_area(&tagged, loc("hand_left"), sev(6));
        assert_eq!(clicked.pain_areas()[0].pain_type, DEFAULT_PAIN_TYPE);
    }

    #[test]
    fn test_upsert_with_type_rejects_invalid_tag() {
        let err = upsert_pain_area_with_type(&empty_scan(), loc("hand_left"), sev(4), "")
            .expect_err("should reject empty tag");
        assert!(matches!(err, crate::ScanError::InvalidInput(_)));
    }

    #[test]
    fn test_click_on_torso_is_ignored() {
        let outcome = handle_location_click(&empty_scan(), "torso", sev(5));
        assert_eq!(outcome, ClickOutcome::Ignored);
    }

    #[test]
    fn test_click_on_malformed_location_is_ignored() {
        assert_eq!(
            handle_location_click(&empty_scan(), "", sev(5)),
            ClickOutcome::Ignored
        );
        assert_eq!(
            handle_location_click(&empty_scan(), "left arm", sev(5)),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn test_click_on_hand_updates_state() {
        let outcome = handle_location_click(&empty_scan(), "hand_left", sev(9));
        let ClickOutcome::Updated(data) = outcome else {
            panic!("expected hand click to be accepted");
        };
        assert_eq!(data.pain_area("hand_left").map(|a| a.severity), Some(sev(9)));
    }

    fn arb_location() -> impl Strategy<Value = LocationId> {
        prop::sample::select(vec![
            "upper_arm_left",
            "upper_arm_right",
            "lower_arm_left",
            "lower_arm_right",
            "hand_left",
            "hand_right",
        ])
        .prop_map(loc)
    }

    fn arb_severity() -> impl Strategy<Value = Severity> {
        (1i64..=10).prop_map(sev)
    }

    proptest! {
        #[test]
        fn test_upsert_is_idempotent(
            seed in prop::collection::vec((arb_location(), arb_severity()), 0..8),
            location in arb_location(),
            severity in arb_severity(),
        ) {
            let mut data = empty_scan();
            for (l, s) in seed {
                data = upsert_pain_area(&data, l, s);
            }
            let once = upsert_pain_area(&data, location.clone(), severity);
            let twice = upsert_pain_area(&once, location, severity);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn test_upsert_preserves_location_uniqueness(
            updates in prop::collection::vec((arb_location(), arb_severity()), 0..32),
        ) {
            let mut data = empty_scan();
            for (l, s) in &updates {
                data = upsert_pain_area(&data, l.clone(), *s);
            }
            let unique: HashSet<_> = data.pain_areas().iter().map(|a| &a.location).collect();
            prop_assert_eq!(unique.len(), data.pain_areas().len());

            let distinct: HashSet<_> = updates.iter().map(|(l, _)| l).collect();
            prop_assert_eq!(distinct.len(), data.pain_areas().len());

            let last_write: HashMap<_, _> = updates.iter().cloned().collect();
            for (l, s) in last_write {
                prop_assert_eq!(data.pain_area(l.as_str()).map(|a| a.severity), Some(s));
            }
        }
    }
}
