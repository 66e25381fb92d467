//! Presentation data for the pain-area list.
//!
//! Each pain area renders as a row with a proportional severity bar. The width
//! is `severity * 10` percent of the track, which keeps it within `10..=100` for
//! every valid severity.

use crate::constants::BAR_PERCENT_PER_POINT;
use crate::model::ScanData;
use scan_types::Severity;

/// One line of the pain-area list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PainAreaRow {
    pub location: String,
    pub pain_type: String,
    pub severity: u8,
    /// Fill width of the severity bar, in percent of the track.
    pub width_percent: u8,
}

/// Fill width of a severity bar in percent.
pub fn bar_width_percent(severity: Severity) -> u8 {
    (severity.get() * BAR_PERCENT_PER_POINT).clamp(BAR_PERCENT_PER_POINT, 100)
}

/// Rows for every pain area, in collection order.
pub fn pain_area_rows(data: &ScanData) -> Vec<PainAreaRow> {
    data.pain_areas()
        .iter()
        .map(|area| PainAreaRow {
            location: area.location.to_string(),
            pain_type: area.pain_type.clone(),
            severity: area.severity.get(),
            width_percent: bar_width_percent(area.severity),
        })
        .collect()
}

/// Draws a text bar `track_len` cells wide, filled to `width_percent`.
///
/// Partial cells round to the nearest whole cell.
pub fn render_bar(width_percent: u8, track_len: usize) -> String {
    let percent = usize::from(width_percent.min(100));
    let filled = (percent * track_len + 50) / 100;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        ".".repeat(track_len - filled)
    )
}
