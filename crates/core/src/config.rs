//! Core runtime configuration.
//!
//! This module defines configuration that is resolved once at process startup and then passed
//! into the session. Environment variables are read by the binary, never by the core, so tests
//! and embedders can construct a `CoreConfig` directly.

use crate::constants::{DEFAULT_FIXTURE_PATH, HIGHLIGHT_DURATION};
use crate::fixture::FixtureSource;
use crate::report::ReportLocale;
use crate::{ScanError, ScanResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    fixture_source: FixtureSource,
    report_locale: ReportLocale,
    highlight_duration: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        fixture_source: FixtureSource,
        report_locale: ReportLocale,
        highlight_duration: Duration,
    ) -> ScanResult<Self> {
        if highlight_duration.is_zero() {
            return Err(ScanError::InvalidInput(
                "highlight_duration cannot be zero".into(),
            ));
        }

        Ok(Self {
            fixture_source,
            report_locale,
            highlight_duration,
        })
    }

    pub fn fixture_source(&self) -> &FixtureSource {
        &self.fixture_source
    }

    pub fn report_locale(&self) -> ReportLocale {
        self.report_locale
    }

    pub fn highlight_duration(&self) -> Duration {
        self.highlight_duration
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            fixture_source: FixtureSource::Embedded,
            report_locale: ReportLocale::default(),
            highlight_duration: HIGHLIGHT_DURATION,
        }
    }
}

/// Resolve the fixture source without reading environment variables.
///
/// If `override_path` is provided, it must be an existing file. Otherwise this looks for
/// `data/scan_data.json` relative to the current working directory, then walks up from
/// `CARGO_MANIFEST_DIR`, and finally falls back to the fixture embedded in the crate.
pub fn resolve_fixture_source(override_path: Option<PathBuf>) -> ScanResult<FixtureSource> {
    if let Some(path) = override_path {
        if path.is_file() {
            return Ok(FixtureSource::File(path));
        }
        return Err(ScanError::InvalidInput(format!(
            "fixture override {} is not a readable file",
            path.display()
        )));
    }

    let cwd_relative = PathBuf::from(DEFAULT_FIXTURE_PATH);
    if cwd_relative.is_file() {
        return Ok(FixtureSource::File(cwd_relative));
    }

    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    for ancestor in manifest_dir.ancestors() {
        let candidate = ancestor.join(DEFAULT_FIXTURE_PATH);
        if candidate.is_file() {
            return Ok(FixtureSource::File(candidate));
        }
    }

    tracing::debug!("no fixture file found, using embedded fixture");
    Ok(FixtureSource::Embedded)
}

/// Parse the report locale from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the English templates.
pub fn report_locale_from_env_value(value: Option<String>) -> ScanResult<ReportLocale> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());
    let parsed = value.map(|v| v.parse::<ReportLocale>()).transpose()?;

    Ok(parsed.unwrap_or_default())
}
