//! Plain-text and JSON rendering of scan results.

use crate::scan::{MinuteSnapshot, ScanReport};
use crate::tracker::ReportedInterval;

const CLOCK: &str = "%H:%M";

/// `09:15–09:21  Moon Conjunction Sun`
pub fn format_interval(interval: &ReportedInterval) -> String {
    format!(
        "{}–{}  Moon {} {}",
        interval.start.format(CLOCK),
        interval.end.format(CLOCK),
        interval.aspect,
        interval.body
    )
}

/// Header line followed by one line per interval.
pub fn render_text(report: &ScanReport) -> String {
    let mut out = format!(
        "Moon aspects for {} ({}–{}, orb {}°)\n",
        report.date.format("%d-%m-%Y"),
        report.window_start.format(CLOCK),
        report.window_end.format(CLOCK),
        report.orb
    );
    if report.intervals.is_empty() {
        out.push_str("No aspects within orb.\n");
        return out;
    }
    for interval in &report.intervals {
        out.push_str(&format_interval(interval));
        out.push('\n');
    }
    out
}

/// One line per hit, e.g. `09:15 — Moon Conjunction 0 Sun`.
pub fn render_minutes(snapshots: &[MinuteSnapshot]) -> String {
    let mut out = String::new();
    for snapshot in snapshots {
        for hit in &snapshot.hits {
            out.push_str(&format!(
                "{} — Moon {} {}\n",
                snapshot.local.format(CLOCK),
                hit.aspect.label(),
                hit.body
            ));
        }
    }
    out
}

pub fn render_json(report: &ScanReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
