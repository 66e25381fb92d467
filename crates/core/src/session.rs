//! Interactive scan session.
//!
//! A [`ScanSession`] owns the current [`ScanData`], the report generated from it
//! and the transient highlight of the last accepted location. Events are applied
//! one at a time in arrival order through [`ScanSession::click`]; time is passed
//! in explicitly so the highlight expiry is deterministic.

use crate::config::CoreConfig;
use crate::model::ScanData;
use crate::report::{generate_report_in, ReportLocale};
use crate::store::{handle_location_click, ClickOutcome};
use crate::view::{pain_area_rows, PainAreaRow};
use scan_types::{LocationId, Severity};
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Highlight {
    location: LocationId,
    armed_at: Instant,
}

/// Current scan state plus its derived report.
#[derive(Clone, Debug)]
pub struct ScanSession {
    data: ScanData,
    locale: ReportLocale,
    report: String,
    report_revision: u64,
    highlight: Option<Highlight>,
    highlight_duration: Duration,
}

impl ScanSession {
    /// Starts a session from freshly loaded scan data.
    pub fn new(data: ScanData, cfg: &CoreConfig) -> Self {
        let report = generate_report_in(&data, cfg.report_locale());
        Self {
            data,
            locale: cfg.report_locale(),
            report,
            report_revision: 0,
            highlight: None,
            highlight_duration: cfg.highlight_duration(),
        }
    }

    /// Applies a "body-location clicked" event.
    ///
    /// Returns `true` if the click was accepted. Accepted clicks update the pain
    /// areas, highlight `location` from `now` and regenerate the report. Ignored
    /// clicks change nothing, including the current highlight.
    pub fn click(&mut self, location: &str, severity: Severity, now: Instant) -> bool {
        match handle_location_click(&self.data, location, severity) {
            ClickOutcome::Updated(data) => {
                self.data = data;
                if let Ok(location) = LocationId::new(location) {
                    self.highlight = Some(Highlight {
                        location,
                        armed_at: now,
                    });
                }
                self.regenerate_report();
                true
            }
            ClickOutcome::Ignored => false,
        }
    }

    /// The location highlighted at `now`, if its highlight has not expired.
    pub fn highlighted(&self, now: Instant) -> Option<&LocationId> {
        self.highlight
            .as_ref()
            .filter(|h| now.saturating_duration_since(h.armed_at) < self.highlight_duration)
            .map(|h| &h.location)
    }

    /// Returns true if `location` is highlighted at `now`.
    pub fn is_highlighted(&self, location: &str, now: Instant) -> bool {
        self.highlighted(now)
            .is_some_and(|highlighted| highlighted.as_str() == location)
    }

    pub fn data(&self) -> &ScanData {
        &self.data
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    /// Number of times the report has been regenerated since the session began.
    pub fn report_revision(&self) -> u64 {
        self.report_revision
    }

    pub fn rows(&self) -> Vec<PainAreaRow> {
        pain_area_rows(&self.data)
    }

    fn regenerate_report(&mut self) {
        self.report = generate_report_in(&self.data, self.locale);
        self.report_revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::HIGHLIGHT_DURATION;
    use crate::fixture::{self, FixtureSource};

    fn session() -> ScanSession {
        let data = fixture::load(&FixtureSource::Embedded).expect("embedded fixture");
        ScanSession::new(data, &CoreConfig::default())
    }

    fn sev(value: i64) -> Severity {
        Severity::new(value).expect("valid severity")
    }

    #[test]
    fn test_new_session_reports_no_pain() {
        let session = session();
        assert!(session.report().contains("No pain areas detected."));
        assert_eq!(session.report_revision(), 0);
        assert!(session.rows().is_empty());
    }

    #[test]
    fn test_click_on_hand_updates_report_and_rows() {
        let mut session = session();
        let now = Instant::now();
        assert!(session.click("hand_left", sev(9), now));

        assert_eq!(session.report_revision(), 1);
        assert!(session.report().contains("- hand_left: severe (9/10)."));
        assert!(session.report().contains("Recommendation:"));
        assert_eq!(session.rows()[0].width_percent, 90);
    }

    #[test]
    fn test_click_on_torso_changes_nothing() {
        let mut session = session();
        let before = session.data().clone();
        let report = session.report().to_string();

        assert!(!session.click("torso", sev(6), Instant::now()));
        assert_eq!(session.data(), &before);
        assert_eq!(session.report(), report);
        assert_eq!(session.report_revision(), 0);
    }

    #[test]
    fn test_repeated_clicks_keep_one_entry() {
        let mut session = session();
        let now = Instant::now();
        session.click("hand_left", sev(3), now);
        session.click("hand_left", sev(8), now);

        let areas = session.data().pain_areas();
        assert_eq!(areas.len(), 1);
        assert_eq!(areas[0].severity, sev(8));
        assert_eq!(session.report_revision(), 2);
    }

    #[test]
    fn test_highlight_expires_after_duration() {
        let mut session = session();
        let armed = Instant::now();
        session.click("upper_arm_left", sev(4), armed);

        assert!(session.is_highlighted("upper_arm_left", armed));
        assert!(session.is_highlighted(
            "upper_arm_left",
            armed + HIGHLIGHT_DURATION - Duration::from_millis(1)
        ));
        assert!(!session.is_highlighted("upper_arm_left", armed + HIGHLIGHT_DURATION));
        assert_eq!(session.highlighted(armed + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_ignored_click_keeps_current_highlight() {
        let mut session = session();
        let armed = Instant::now();
        session.click("hand_right", sev(2), armed);
        session.click("torso", sev(2), armed + Duration::from_millis(100));

        assert!(session.is_highlighted("hand_right", armed + Duration::from_millis(200)));
    }

    #[test]
    fn test_new_click_moves_highlight() {
        let mut session = session();
        let armed = Instant::now();
        session.click("hand_right", sev(2), armed);
        let later = armed + Duration::from_millis(600);
        session.click("hand_left", sev(7), later);

        assert!(!session.is_highlighted("hand_right", later));
        assert!(session.is_highlighted("hand_left", armed + Duration::from_millis(1200)));
    }
}
