//! Scan fixture wire model, loading and rendering.
//!
//! Responsibilities:
//! - Define the JSON wire model for the fixture document; unknown keys are
//!   left to the diagnostic and otherwise ignored
//! - Run the schema diagnostic once at load time and log what it finds
//! - Translate the wire model into validated [`ScanData`], rejecting pain areas
//!   without a location, out-of-range severities and location collisions
//! - Render [`ScanData`] back into the same wire shape

use crate::constants::{DEFAULT_PAIN_TYPE, EMBEDDED_FIXTURE};
use crate::model::{PainArea, ScanData, ScanResults, UserProfile};
use crate::validation::validate_pain_type;
use crate::{schema, ScanError, ScanResult};
use scan_types::{LocationId, Severity};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Where a fixture document comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FixtureSource {
    /// A JSON file on disk.
    File(PathBuf),
    /// The fixture compiled into the crate.
    Embedded,
}

impl std::fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureSource::File(path) => write!(f, "{}", path.display()),
            FixtureSource::Embedded => write!(f, "<embedded>"),
        }
    }
}

/// Loads scan data from `source`.
///
/// # Errors
///
/// Returns [`ScanError::FileRead`] if a fixture file cannot be read, and any
/// error produced by [`parse`].
pub fn load(source: &FixtureSource) -> ScanResult<ScanData> {
    tracing::info!("loading scan fixture from {}", source);
    parse(&read_text(source)?)
}

/// Reads and parses a fixture file.
pub fn load_from_path(path: &Path) -> ScanResult<ScanData> {
    load(&FixtureSource::File(path.to_path_buf()))
}

/// Returns the raw JSON text of a fixture without parsing it.
///
/// # Errors
///
/// Returns [`ScanError::FileRead`] if a fixture file cannot be read.
pub fn read_text(source: &FixtureSource) -> ScanResult<Cow<'static, str>> {
    match source {
        FixtureSource::File(path) => std::fs::read_to_string(path)
            .map(Cow::Owned)
            .map_err(|source| ScanError::FileRead {
                path: path.clone(),
                source,
            }),
        FixtureSource::Embedded => Ok(Cow::Borrowed(EMBEDDED_FIXTURE)),
    }
}

/// Parses a fixture document from JSON text.
///
/// The schema diagnostic runs first and each violation is logged as a warning.
/// The typed parse then uses `serde_path_to_error` to surface the path (for
/// example `painAreas.0.severity`) of the first field that does not match.
///
/// # Errors
///
/// Returns [`ScanError`] if:
/// - the text is not JSON,
/// - any known field has an unexpected type,
/// - the profile age is zero,
/// - a pain area is missing its location, has an invalid location or category
///   tag, or has a severity outside `1..=10`,
/// - two pain areas share a location.
pub fn parse(json_text: &str) -> ScanResult<ScanData> {
    let value: serde_json::Value =
        serde_json::from_str(json_text).map_err(ScanError::Deserialization)?;

    let violations = schema::check(&value);
    if !violations.is_empty() {
        tracing::warn!(
            "scan fixture failed schema validation ({} issue(s))",
            violations.len()
        );
        for violation in &violations {
            tracing::warn!("  {}", violation);
        }
    }

    let wire = match serde_path_to_error::deserialize::<_, ScanDataWire>(value) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = err.path().to_string();
            let source = err.into_inner();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            return Err(ScanError::Translation {
                path,
                message: source.to_string(),
            });
        }
    };

    wire_to_domain(wire)
}

/// Renders scan data as pretty-printed JSON in fixture shape.
///
/// # Errors
///
/// Returns [`ScanError::Serialization`] if serialisation fails.
pub fn render(data: &ScanData) -> ScanResult<String> {
    let wire = domain_to_wire(data);
    serde_json::to_string_pretty(&wire).map_err(ScanError::Serialization)
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of the fixture document.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScanDataWire {
    pub user_profile: UserProfileWire,
    pub scan_results: ScanResultsWire,
    #[serde(default)]
    pub pain_areas: Vec<PainAreaWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, schemars::JsonSchema)]
pub(crate) struct UserProfileWire {
    pub name: String,
    pub age: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScanResultsWire {
    pub heart_rate: i64,
    pub blood_pressure: String,
    pub body_fat: f64,
}

/// Wire representation of a pain area.
///
/// `location` is optional on the wire so that a missing location is reported
/// with its index rather than as a generic missing-field error.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, schemars::JsonSchema)]
pub(crate) struct PainAreaWire {
    #[serde(rename = "type", default = "default_pain_type")]
    pub pain_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(required)]
    pub location: Option<String>,
    pub severity: i64,
}

fn default_pain_type() -> String {
    DEFAULT_PAIN_TYPE.to_string()
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: ScanDataWire) -> ScanResult<ScanData> {
    if wire.user_profile.age == 0 {
        return Err(ScanError::InvalidInput(
            "userProfile.age must be greater than zero".into(),
        ));
    }

    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut pain_areas = Vec::with_capacity(wire.pain_areas.len());

    for (index, area) in wire.pain_areas.into_iter().enumerate() {
        let raw_location = area
            .location
            .ok_or(ScanError::MissingLocation { index })?;
        let location =
            LocationId::new(&raw_location).map_err(|source| ScanError::InvalidField {
                path: format!("painAreas[{index}].location"),
                source,
            })?;
        let severity = Severity::new(area.severity).map_err(|source| ScanError::InvalidField {
            path: format!("painAreas[{index}].severity"),
            source,
        })?;
        validate_pain_type(&area.pain_type)?;

        if let Some(&first) = first_seen.get(location.as_str()) {
            return Err(ScanError::DuplicateLocation {
                location: raw_location,
                first,
                second: index,
            });
        }
        first_seen.insert(raw_location, index);

        pain_areas.push(PainArea {
            pain_type: area.pain_type,
            location,
            severity,
        });
    }

    Ok(ScanData {
        user_profile: UserProfile {
            name: wire.user_profile.name,
            age: wire.user_profile.age,
        },
        scan_results: ScanResults {
            heart_rate: wire.scan_results.heart_rate,
            blood_pressure: wire.scan_results.blood_pressure,
            body_fat: wire.scan_results.body_fat,
        },
        pain_areas,
    })
}

fn domain_to_wire(data: &ScanData) -> ScanDataWire {
    ScanDataWire {
        user_profile: UserProfileWire {
            name: data.user_profile.name.clone(),
            age: data.user_profile.age,
        },
        scan_results: ScanResultsWire {
            heart_rate: data.scan_results.heart_rate,
            blood_pressure: data.scan_results.blood_pressure.clone(),
            body_fat: data.scan_results.body_fat,
        },
        pain_areas: data
            .pain_areas
            .iter()
            .map(|area| PainAreaWire {
                pain_type: area.pain_type.clone(),
                location: Some(area.location.to_string()),
                severity: i64::from(area.severity.get()),
            })
            .collect(),
    }
}
