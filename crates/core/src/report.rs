//! Rule-based health report generation.
//!
//! The report is a pure function of its [`ScanData`] input: a greeting, a vitals
//! line, one line per pain area classified into a [`SeverityBand`] (plus a
//! stretching recommendation for arm and hand locations) and a closing piece of
//! general advice. Two fixed template tables are available, English and Persian.

use crate::constants::{MODERATE_THRESHOLD, SEVERE_THRESHOLD};
use crate::model::{PainArea, ScanData};
use crate::validation::is_arm_or_hand;
use crate::ScanError;
use scan_types::Severity;

/// Language of the report templates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportLocale {
    #[default]
    English,
    Persian,
}

impl std::str::FromStr for ReportLocale {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(ReportLocale::English),
            "fa" | "persian" | "farsi" => Ok(ReportLocale::Persian),
            other => Err(ScanError::InvalidInput(format!(
                "unsupported report locale {other:?} (expected 'en' or 'fa')"
            ))),
        }
    }
}

/// Coarse classification of a severity score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SeverityBand {
    Mild,
    Moderate,
    Severe,
}

impl SeverityBand {
    /// Severe above 7, moderate above 4, mild otherwise.
    pub fn from_severity(severity: Severity) -> Self {
        let score = severity.get();
        if score > SEVERE_THRESHOLD {
            SeverityBand::Severe
        } else if score > MODERATE_THRESHOLD {
            SeverityBand::Moderate
        } else {
            SeverityBand::Mild
        }
    }

    /// Report wording for this band.
    pub fn label(self, locale: ReportLocale) -> &'static str {
        match (locale, self) {
            (ReportLocale::English, SeverityBand::Severe) => "severe",
            (ReportLocale::English, SeverityBand::Moderate) => "moderate",
            (ReportLocale::English, SeverityBand::Mild) => "mild",
            (ReportLocale::Persian, SeverityBand::Severe) => "شدید",
            (ReportLocale::Persian, SeverityBand::Moderate) => "متوسط",
            (ReportLocale::Persian, SeverityBand::Mild) => "خفیف",
        }
    }
}

/// Generates the report with the English templates.
pub fn generate_report(data: &ScanData) -> String {
    generate_report_in(data, ReportLocale::English)
}

/// Generates the report with the templates for `locale`.
///
/// Lines are newline-terminated except the closing general advice.
pub fn generate_report_in(data: &ScanData, locale: ReportLocale) -> String {
    let profile = &data.user_profile;
    let results = &data.scan_results;

    let mut report = match locale {
        ReportLocale::English => format!(
            "Hello {}, age {} years.\n\
             Scan results: heart rate {}, blood pressure {}, body fat {}%.\n",
            profile.name, profile.age, results.heart_rate, results.blood_pressure, results.body_fat
        ),
        ReportLocale::Persian => format!(
            "سلام {}، سن {} سال.\n\
             نتایج اسکن: ضربان قلب {}، فشار خون {}، چربی بدن {}%.\n",
            profile.name, profile.age, results.heart_rate, results.blood_pressure, results.body_fat
        ),
    };

    if data.pain_areas().is_empty() {
        report.push_str(match locale {
            ReportLocale::English => "No pain areas detected.\n",
            ReportLocale::Persian => "هیچ نقطه دردی شناسایی نشده.\n",
        });
    } else {
        report.push_str(match locale {
            ReportLocale::English => "Detected pain areas:\n",
            ReportLocale::Persian => "نقاط درد شناسایی شده:\n",
        });
        for area in data.pain_areas() {
            push_pain_area(&mut report, area, locale);
        }
    }

    report.push_str(match locale {
        ReportLocale::English => "General advice: balanced diet and regular exercise.",
        ReportLocale::Persian => "توصیه کلی: رژیم متعادل و ورزش منظم.",
    });

    report
}

fn push_pain_area(report: &mut String, area: &PainArea, locale: ReportLocale) {
    let band = SeverityBand::from_severity(area.severity).label(locale);
    report.push_str(&format!(
        "- {}: {} ({}/10).\n",
        area.location, band, area.severity
    ));

    if is_arm_or_hand(area.location.as_str()) {
        report.push_str(&match locale {
            ReportLocale::English => format!(
                "  Recommendation: daily stretching exercises for {}, and see a doctor if it persists.\n",
                area.location
            ),
            ReportLocale::Persian => format!(
                "  توصیه: تمرینات کششی روزانه برای {}، و مشاوره پزشک اگر ادامه داشت.\n",
                area.location
            ),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ScanResults, UserProfile};
    use crate::store::upsert_pain_area;
    use proptest::prelude::*;
    use scan_types::LocationId;

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

    fn with_areas(areas: &[(&str, i64)]) -> ScanData {
        areas.iter().fold(empty_scan(), |data, (location, severity)| {
            upsert_pain_area(
                &data,
                LocationId::new(location).expect("valid location"),
                Severity::new(*severity).expect("valid severity"),
            )
        })
    }

    #[test]
    fn test_band_boundaries() {
        let band = |s| SeverityBand::from_severity(Severity::new(s).expect("valid"));
        assert_eq!(band(1), SeverityBand::Mild);
        assert_eq!(band(4), SeverityBand::Mild);
        assert_eq!(band(5), SeverityBand::Moderate);
        assert_eq!(band(7), SeverityBand::Moderate);
        assert_eq!(band(8), SeverityBand::Severe);
        assert_eq!(band(10), SeverityBand::Severe);
    }

    #[test]
    fn test_report_without_pain_areas() {
        let report = generate_report(&empty_scan());
        assert_eq!(
            report,
            "Hello Sara, age 32 years.\n\
             Scan results: heart rate 72, blood pressure 120/80, body fat 22.5%.\n\
             No pain areas detected.\n\
             General advice: balanced diet and regular exercise."
        );
        assert!(!report.contains("Detected pain areas"));
    }

    #[test]
    fn test_report_with_severe_hand_pain() {
        let report = generate_report(&with_areas(&[("hand_left", 9)]));
        assert!(report.contains("Detected pain areas:\n- hand_left: severe (9/10).\n"));
        assert!(report.contains(
            "  Recommendation: daily stretching exercises for hand_left, and see a doctor if it persists.\n"
        ));
        assert!(!report.contains("No pain areas detected"));
        assert!(report.ends_with("General advice: balanced diet and regular exercise."));
    }

    #[test]
    fn test_report_lists_areas_in_collection_order() {
        let report = generate_report(&with_areas(&[
            ("upper_arm_right", 4),
            ("hand_left", 7),
            ("upper_arm_right", 6),
        ]));
        let right = report.find("- upper_arm_right: moderate (6/10).").expect("right arm line");
        let hand = report.find("- hand_left: moderate (7/10).").expect("hand line");
        assert!(right < hand);
        assert_eq!(report.matches("Recommendation:").count(), 2);
    }

    #[test]
    fn test_report_skips_recommendation_for_other_locations() {
        let mut data = empty_scan();
        data.pain_areas.push(PainArea::new(
            LocationId::new("lower_back").expect("valid"),
            Severity::new(3).expect("valid"),
        ));
        let report = generate_report(&data);
        assert!(report.contains("- lower_back: mild (3/10).\n"));
        assert!(!report.contains("Recommendation:"));
    }

    #[test]
    fn test_body_fat_formatting_drops_trailing_zero() {
        let mut data = empty_scan();
        data.scan_results.body_fat = 18.0;
        assert!(generate_report(&data).contains("body fat 18%."));
    }

    #[test]
    fn test_persian_report() {
        let report = generate_report_in(&with_areas(&[("hand_left", 5)]), ReportLocale::Persian);
        assert!(report.starts_with("سلام Sara، سن 32 سال.\n"));
        assert!(report.contains("- hand_left: متوسط (5/10).\n"));
        assert!(report.contains("توصیه: تمرینات کششی روزانه برای hand_left"));
        assert!(report.ends_with("توصیه کلی: رژیم متعادل و ورزش منظم."));
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("en".parse::<ReportLocale>().expect("en"), ReportLocale::English);
        assert_eq!(" FA ".parse::<ReportLocale>().expect("fa"), ReportLocale::Persian);
        assert!("de".parse::<ReportLocale>().is_err());
    }

    proptest! {
        #[test]
        fn test_band_matches_thresholds(score in 1i64..=10) {
            let band = SeverityBand::from_severity(Severity::new(score).expect("valid"));
            let expected = if score > 7 {
                SeverityBand::Severe
            } else if score > 4 {
                SeverityBand::Moderate
            } else {
                SeverityBand::Mild
            };
            prop_assert_eq!(band, expected);
        }

        #[test]
        fn test_report_is_deterministic(
            areas in prop::collection::vec(
                (prop::sample::select(vec!["hand_left", "hand_right", "upper_arm_left"]), 1i64..=10),
                0..6,
            ),
        ) {
            let data = with_areas(&areas);
            prop_assert_eq!(generate_report(&data), generate_report(&data.clone()));
        }
    }
}
