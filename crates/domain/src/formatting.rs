//! Polish display formatting shared by documents, exports and notifications.

use chrono::{DateTime, NaiveDate, Utc};

/// Date format used across documents and exports (`dd.MM.yyyy`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Timestamp format used for note entries and exports (`dd.MM.yyyy HH:mm`).
pub const DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Formats a date as `dd.MM.yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Formats a timestamp as `dd.MM.yyyy HH:mm`.
pub fn format_datetime(at: DateTime<Utc>) -> String {
    at.format(DATETIME_FORMAT).to_string()
}

/// Formats a date range as `dd.MM.yyyy - dd.MM.yyyy`.
pub fn format_date_range(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} - {}", format_date(start), format_date(end))
}

/// Renders a PLN amount the way the portal displays prices.
///
/// Whole amounts drop the fractional part (`1000` not `1000.00`),
/// fractional amounts keep their natural representation (`149.5`).
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{}", amount as i64)
    } else {
        format!("{}", amount)
    }
}
