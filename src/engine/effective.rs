//! Effective-date scoping.
//!
//! A lint encodes a requirement that was in force over a span of issuance
//! dates. Certificates issued outside that span are not judged by it, no
//! matter what the lint's own applicability predicate says.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Half-open window `[start, end)` of issuance dates. A missing bound is
/// unbounded on that side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EffectiveWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl EffectiveWindow {
    /// In force for every certificate.
    pub const ALWAYS: EffectiveWindow = EffectiveWindow { start: None, end: None };

    /// In force from `start` onwards.
    pub fn starting(start: DateTime<Utc>) -> Self {
        EffectiveWindow {
            start: Some(start),
            end: None,
        }
    }

    /// In force for certificates issued before `end`.
    pub fn until(end: DateTime<Utc>) -> Self {
        EffectiveWindow {
            start: None,
            end: Some(end),
        }
    }

    /// In force from `start` up to, not including, `end`.
    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        EffectiveWindow {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        let after_start = self.start.map_or(true, |start| date >= start);
        let before_end = self.end.map_or(true, |end| date < end);
        after_start && before_end
    }

    /// A closed window whose end is not after its start matches nothing.
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if end <= start)
    }
}

impl fmt::Display for EffectiveWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let day = |d: &DateTime<Utc>| d.format("%Y-%m-%d").to_string();
        match (&self.start, &self.end) {
            (None, None) => write!(f, "always"),
            (Some(start), None) => write!(f, "[{}, ...)", day(start)),
            (None, Some(end)) => write!(f, "[..., {})", day(end)),
            (Some(start), Some(end)) => write!(f, "[{}, {})", day(start), day(end)),
        }
    }
}

/// Whether a lint with `window` applies to a certificate issued at
/// `certificate_date` (its notBefore).
pub fn is_in_scope(window: &EffectiveWindow, certificate_date: DateTime<Utc>) -> bool {
    window.contains(certificate_date)
}
