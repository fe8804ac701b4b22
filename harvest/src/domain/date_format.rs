use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

const ISO_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");
const DISPLAY_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[day]/[month]/[year]");

/// Formats a sheet date cell as `DD/MM/YYYY`.
///
/// Empty cells stay empty and anything that is not a recognisable date is
/// returned unchanged.
pub fn format_display_date(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }

    match parse_cell_date(value.trim()) {
        Some(date) => date
            .format(DISPLAY_DATE)
            .unwrap_or_else(|_| value.to_string()),
        None => value.to_string(),
    }
}

/// Reads a `YYYY-MM-DD` date or an RFC 3339 timestamp. Timestamps are moved
/// to the local offset before taking the calendar date.
pub fn parse_cell_date(value: &str) -> Option<Date> {
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Some(to_local_time(dt).date());
    }
    Date::parse(value, ISO_DATE).ok()
}

/// Parses the form's date input.
pub fn parse_input_date(value: &str) -> Option<Date> {
    Date::parse(value.trim(), ISO_DATE).ok()
}

/// `YYYY-MM-DD`, the format the sheet receives.
pub fn iso_date_text(date: Date) -> String {
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}
