//! Formatting utilities for timestamps and nullable display fields.
//!
//! Response types never expose SQL `NULL` for display strings; the helpers here
//! apply the sentinel values in one place.

use chrono::{DateTime, Utc};

/// Placeholder shown when an employer has no company name on record.
pub const UNKNOWN_COMPANY: &str = "Unknown company";

/// Formats a UTC datetime to RFC3339 format.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use jobboard_api::utils::format_timestamp;
///
/// let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
///     .unwrap()
///     .with_timezone(&Utc);
/// assert_eq!(format_timestamp(&dt), "2024-01-15T10:30:00+00:00");
/// ```
#[inline]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Formats an optional UTC datetime to RFC3339 format.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, Utc};
/// use jobboard_api::utils::format_timestamp_opt;
///
/// let dt = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
///     .unwrap()
///     .with_timezone(&Utc);
/// assert_eq!(format_timestamp_opt(Some(&dt)), Some("2024-01-15T10:30:00+00:00".to_string()));
/// assert_eq!(format_timestamp_opt(None), None);
/// ```
#[inline]
pub fn format_timestamp_opt(dt: Option<&DateTime<Utc>>) -> Option<String> {
    dt.map(format_timestamp)
}

/// Returns the value, or an empty string when it is missing.
///
/// ```
/// use jobboard_api::utils::or_empty;
///
/// assert_eq!(or_empty(Some("Seoul".to_string())), "Seoul");
/// assert_eq!(or_empty(None), "");
/// ```
#[inline]
pub fn or_empty(value: Option<String>) -> String {
    value.unwrap_or_default()
}

/// Returns the company name, or [`UNKNOWN_COMPANY`] when it is missing or blank.
pub fn company_or_unknown(value: Option<String>) -> String {
    value
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_COMPANY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_sentinel() {
        assert_eq!(company_or_unknown(None), UNKNOWN_COMPANY);
        assert_eq!(company_or_unknown(Some("  ".to_string())), UNKNOWN_COMPANY);
        assert_eq!(company_or_unknown(Some("Acme".to_string())), "Acme");
    }
}
