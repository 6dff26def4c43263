//! Effective dates of the standards the lint corpus draws on.
//!
//! All dates are midnight UTC on the day the requirement came into force.

use chrono::{DateTime, NaiveDate, Utc};

/// RFC 2459 publication (first IETF X.509 profile)
pub fn rfc2459_date() -> DateTime<Utc> {
    ymd(1999, 1, 1)
}

/// RFC 5280 publication
pub fn rfc5280_date() -> DateTime<Utc> {
    ymd(2008, 5, 1)
}

/// CA/Browser Forum Baseline Requirements 1.0 effective date
pub fn cabf_br_effective_date() -> DateTime<Utc> {
    ymd(2012, 7, 1)
}

/// Ballot SC12: underscores in dNSNames are no longer permitted
pub fn underscore_sunset_date() -> DateTime<Utc> {
    ymd(2019, 4, 1)
}

/// Ballot SC31: TLS subscriber certificates limited to 398 days
pub fn sc31_398_day_date() -> DateTime<Utc> {
    ymd(2020, 9, 1)
}

/// Midnight UTC on the given day. Callers pass literal, valid dates; an
/// invalid one collapses to the earliest representable instant.
pub fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
