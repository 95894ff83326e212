use anyhow::Context;
use chrono::NaiveDate;

/// Accepts `DD-MM-YYYY` (the usual input) or ISO `YYYY-MM-DD`.
pub(crate) fn parse_scan_date(text: &str) -> anyhow::Result<NaiveDate> {
    let text = text.trim();
    NaiveDate::parse_from_str(text, "%d-%m-%Y")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y-%m-%d"))
        .with_context(|| format!("Invalid date {text:?}, expected DD-MM-YYYY"))
}
