//! Fixture shape diagnostics and JSON Schema export.
//!
//! [`check`] walks a raw JSON document and reports every place where it departs
//! from the expected fixture shape. It is a diagnostic: the loader logs the
//! violations and carries on, leaving the strict decision to the typed parse in
//! [`crate::fixture`].

use serde_json::{Map, Value};

use crate::fixture::ScanDataWire;
use crate::{ScanError, ScanResult};

/// One departure from the expected fixture shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON path of the offending value, `<root>` for the document itself.
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Checks a parsed JSON document against the fixture shape.
///
/// Returns an empty vector when the document conforms.
pub fn check(value: &Value) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();

    let Some(root) = expect_object(value, "<root>", &mut violations) else {
        return violations;
    };

    reject_unknown_keys(
        root,
        "",
        &["userProfile", "scanResults", "painAreas"],
        &mut violations,
    );

    match root.get("userProfile") {
        Some(profile) => check_user_profile(profile, &mut violations),
        None => violations.push(SchemaViolation::new("userProfile", "required")),
    }

    match root.get("scanResults") {
        Some(results) => check_scan_results(results, &mut violations),
        None => violations.push(SchemaViolation::new("scanResults", "required")),
    }

    if let Some(areas) = root.get("painAreas") {
        check_pain_areas(areas, &mut violations);
    }

    violations
}

/// Parses `json_text` and checks it against the fixture shape.
///
/// # Errors
///
/// Returns [`ScanError::Deserialization`] if the text is not JSON at all.
pub fn check_str(json_text: &str) -> ScanResult<Vec<SchemaViolation>> {
    let value: Value = serde_json::from_str(json_text).map_err(ScanError::Deserialization)?;
    Ok(check(&value))
}

/// JSON Schema describing the fixture document.
///
/// # Errors
///
/// Returns [`ScanError::Serialization`] if the generated schema cannot be
/// converted to a JSON value.
pub fn scan_data_schema() -> ScanResult<Value> {
    let schema = schemars::schema_for!(ScanDataWire);
    serde_json::to_value(&schema).map_err(ScanError::Serialization)
}

fn check_user_profile(value: &Value, violations: &mut Vec<SchemaViolation>) {
    let Some(profile) = expect_object(value, "userProfile", violations) else {
        return;
    };
    reject_unknown_keys(profile, "userProfile.", &["name", "age"], violations);

    match profile.get("name") {
        Some(Value::String(_)) => {}
        Some(_) => violations.push(SchemaViolation::new("userProfile.name", "expected a string")),
        None => violations.push(SchemaViolation::new("userProfile.name", "required")),
    }

    match profile.get("age") {
        Some(age) => match age.as_i64() {
            Some(n) if n > 0 => {}
            Some(_) => violations.push(SchemaViolation::new(
                "userProfile.age",
                "must be greater than zero",
            )),
            None => violations.push(SchemaViolation::new(
                "userProfile.age",
                "expected an integer",
            )),
        },
        None => violations.push(SchemaViolation::new("userProfile.age", "required")),
    }
}

fn check_scan_results(value: &Value, violations: &mut Vec<SchemaViolation>) {
    let Some(results) = expect_object(value, "scanResults", violations) else {
        return;
    };
    reject_unknown_keys(
        results,
        "scanResults.",
        &["heartRate", "bloodPressure", "bodyFat"],
        violations,
    );

    match results.get("heartRate") {
        Some(v) if v.is_i64() || v.is_u64() => {}
        Some(_) => violations.push(SchemaViolation::new(
            "scanResults.heartRate",
            "expected an integer",
        )),
        None => violations.push(SchemaViolation::new("scanResults.heartRate", "required")),
    }

    match results.get("bloodPressure") {
        Some(Value::String(_)) => {}
        Some(_) => violations.push(SchemaViolation::new(
            "scanResults.bloodPressure",
            "expected a string",
        )),
        None => violations.push(SchemaViolation::new(
            "scanResults.bloodPressure",
            "required",
        )),
    }

    match results.get("bodyFat") {
        Some(Value::Number(_)) => {}
        Some(_) => violations.push(SchemaViolation::new(
            "scanResults.bodyFat",
            "expected a number",
        )),
        None => violations.push(SchemaViolation::new("scanResults.bodyFat", "required")),
    }
}

fn check_pain_areas(value: &Value, violations: &mut Vec<SchemaViolation>) {
    let Some(areas) = value.as_array() else {
        violations.push(SchemaViolation::new("painAreas", "expected an array"));
        return;
    };

    let mut seen: Vec<(&str, usize)> = Vec::new();

    for (index, area) in areas.iter().enumerate() {
        let path = format!("painAreas[{index}]");
        let Some(area) = expect_object(area, &path, violations) else {
            continue;
        };
        reject_unknown_keys(
            area,
            &format!("{path}."),
            &["type", "location", "severity"],
            violations,
        );

        match area.get("type") {
            None | Some(Value::String(_)) => {}
            Some(_) => violations.push(SchemaViolation::new(
                format!("{path}.type"),
                "expected a string",
            )),
        }

        match area.get("location") {
            Some(Value::String(location)) if location.trim().is_empty() => violations.push(
                SchemaViolation::new(format!("{path}.location"), "cannot be empty"),
            ),
            Some(Value::String(location)) => {
                if let Some((_, first)) = seen.iter().find(|(prev, _)| *prev == location.as_str()) {
                    violations.push(SchemaViolation::new(
                        format!("{path}.location"),
                        format!("duplicates painAreas[{first}].location {location:?}"),
                    ));
                } else {
                    seen.push((location.as_str(), index));
                }
            }
            Some(_) => violations.push(SchemaViolation::new(
                format!("{path}.location"),
                "expected a string",
            )),
            None => violations.push(SchemaViolation::new(
                format!("{path}.location"),
                "required",
            )),
        }

        match area.get("severity") {
            Some(severity) => match severity.as_i64() {
                Some(1..=10) => {}
                Some(_) => violations.push(SchemaViolation::new(
                    format!("{path}.severity"),
                    "must be between 1 and 10",
                )),
                None => violations.push(SchemaViolation::new(
                    format!("{path}.severity"),
                    "expected an integer",
                )),
            },
            None => violations.push(SchemaViolation::new(
                format!("{path}.severity"),
                "required",
            )),
        }
    }
}

fn expect_object<'a>(
    value: &'a Value,
    path: &str,
    violations: &mut Vec<SchemaViolation>,
) -> Option<&'a Map<String, Value>> {
    let object = value.as_object();
    if object.is_none() {
        violations.push(SchemaViolation::new(path, "expected an object"));
    }
    object
}

fn reject_unknown_keys(
    object: &Map<String, Value>,
    prefix: &str,
    allowed: &[&str],
    violations: &mut Vec<SchemaViolation>,
) {
    for key in object.keys() {
        if !allowed.contains(&key.as_str()) {
            violations.push(SchemaViolation::new(
                format!("{prefix}{key}"),
                "unknown field",
            ));
        }
    }
}
