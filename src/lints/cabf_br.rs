//! CA/Browser Forum Baseline Requirements lints.
//!
//! Requirements for publicly-trusted TLS subscriber certificates. Most of
//! them only apply to end-entity certificates carrying DNS names.

use crate::certificate::Certificate;
use crate::data::dates;
use crate::engine::effective::EffectiveWindow;
use crate::engine::lint::{ConfigurationError, Lint, LintDescriptor};
use crate::engine::registry::{LintRegistry, RegistryError};
use crate::lints::util::{dns_labels, is_ip_literal, second_level_label, third_level_labels};
use crate::{LintResult, LintSource, Severity};
use chrono::Duration;

const MAX_LABEL_LENGTH: usize = 63;
const MAX_SUBSCRIBER_VALIDITY_DAYS: i64 = 398;

/// Register all Baseline Requirements lints
pub fn register(registry: &mut LintRegistry) -> Result<(), RegistryError> {
    registry.register(
        LintDescriptor {
            name: "e_dnsname_underscore_in_sld".to_string(),
            description: "DNSName MUST NOT contain underscore characters in the second-level domain"
                .to_string(),
            citation: "BRs: 7.1.4.2".to_string(),
            source: LintSource::CabfBaselineRequirements,
            effective: EffectiveWindow::starting(dates::cabf_br_effective_date()),
            severity: Severity::Error,
        },
        DnsNameUnderscoreInSld,
    )?;

    registry.register(
        LintDescriptor {
            name: "w_dnsname_underscore_in_trd".to_string(),
            description: "DNSName SHOULD NOT contain underscore characters in third-level or lower labels"
                .to_string(),
            citation: "BRs: 7.1.4.2".to_string(),
            source: LintSource::CabfBaselineRequirements,
            effective: EffectiveWindow::between(
                dates::cabf_br_effective_date(),
                dates::underscore_sunset_date(),
            ),
            severity: Severity::Warn,
        },
        DnsNameUnderscoreInTrd {
            severity: Severity::Warn,
        },
    )?;

    registry.register(
        LintDescriptor {
            name: "e_dnsname_underscore_in_trd".to_string(),
            description: "DNSName MUST NOT contain underscore characters after Ballot SC12's sunset"
                .to_string(),
            citation: "BRs: 7.1.4.2 (Ballot SC12)".to_string(),
            source: LintSource::CabfBaselineRequirements,
            effective: EffectiveWindow::starting(dates::underscore_sunset_date()),
            severity: Severity::Error,
        },
        DnsNameUnderscoreInTrd {
            severity: Severity::Error,
        },
    )?;

    registry.register(
        LintDescriptor {
            name: "e_dnsname_label_too_long".to_string(),
            description: "DNSName labels MUST be at most 63 characters long".to_string(),
            citation: "BRs: 7.1.4.2, RFC 1035".to_string(),
            source: LintSource::CabfBaselineRequirements,
            effective: EffectiveWindow::starting(dates::cabf_br_effective_date()),
            severity: Severity::Error,
        },
        DnsNameLabelTooLong,
    )?;

    registry.register(
        LintDescriptor {
            name: "e_dnsname_bad_character_in_label".to_string(),
            description: "DNSName labels MUST consist of letters, digits, hyphens and underscores"
                .to_string(),
            citation: "BRs: 7.1.4.2, RFC 5280: 4.2.1.6".to_string(),
            source: LintSource::CabfBaselineRequirements,
            effective: EffectiveWindow::starting(dates::cabf_br_effective_date()),
            severity: Severity::Error,
        },
        DnsNameBadCharacterInLabel::default(),
    )?;

    registry.register(
        LintDescriptor {
            name: "e_tls_server_cert_valid_time_longer_than_398_days".to_string(),
            description: "TLS subscriber certificates MUST have a validity period of at most 398 days"
                .to_string(),
            citation: "BRs: 6.3.2 (Ballot SC31)".to_string(),
            source: LintSource::CabfBaselineRequirements,
            effective: EffectiveWindow::starting(dates::sc31_398_day_date()),
            severity: Severity::Error,
        },
        ServerCertValidityTooLong,
    )?;

    Ok(())
}

/// DNS names a lint should inspect: SAN entries and common names, minus
/// IP literals.
fn lintable_dns_names(cert: &Certificate) -> Vec<&str> {
    cert.all_dns_names()
        .into_iter()
        .filter(|name| !is_ip_literal(name))
        .collect()
}

fn applies_to_subscriber_dns_names(cert: &Certificate) -> bool {
    cert.is_subscriber_cert() && cert.has_dns_names()
}

pub struct DnsNameUnderscoreInSld;

impl Lint for DnsNameUnderscoreInSld {
    fn check_applies(&self, cert: &Certificate) -> bool {
        applies_to_subscriber_dns_names(cert)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let offending: Vec<&str> = lintable_dns_names(cert)
            .into_iter()
            .filter(|name| second_level_label(name).is_some_and(|sld| sld.contains('_')))
            .collect();

        if offending.is_empty() {
            LintResult::pass()
        } else {
            LintResult::error(format!(
                "underscore in second-level domain: {}",
                offending.join(", ")
            ))
        }
    }
}

/// Underscores below the second level were tolerated until Ballot SC12's
/// sunset date, then prohibited. The same check runs as a warning before and
/// an error after.
pub struct DnsNameUnderscoreInTrd {
    severity: Severity,
}

impl Lint for DnsNameUnderscoreInTrd {
    fn check_applies(&self, cert: &Certificate) -> bool {
        applies_to_subscriber_dns_names(cert)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let offending: Vec<&str> = lintable_dns_names(cert)
            .into_iter()
            .filter(|name| third_level_labels(name).iter().any(|l| l.contains('_')))
            .collect();

        if offending.is_empty() {
            LintResult::pass()
        } else {
            LintResult::violation(
                self.severity,
                format!("underscore in third-level domain: {}", offending.join(", ")),
            )
        }
    }
}

pub struct DnsNameLabelTooLong;

impl Lint for DnsNameLabelTooLong {
    fn check_applies(&self, cert: &Certificate) -> bool {
        applies_to_subscriber_dns_names(cert)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let offending: Vec<&str> = lintable_dns_names(cert)
            .into_iter()
            .filter(|name| dns_labels(name).iter().any(|l| l.len() > MAX_LABEL_LENGTH))
            .collect();

        if offending.is_empty() {
            LintResult::pass()
        } else {
            LintResult::error(format!(
                "label longer than {} characters: {}",
                MAX_LABEL_LENGTH,
                offending.join(", ")
            ))
        }
    }
}

/// Checks label characters against a lookup table built in `initialize`.
#[derive(Default)]
pub struct DnsNameBadCharacterInLabel {
    allowed: Option<[bool; 128]>,
}

impl DnsNameBadCharacterInLabel {
    fn label_is_valid(table: &[bool; 128], label: &str) -> bool {
        label
            .bytes()
            .all(|b| table.get(usize::from(b)).copied().unwrap_or(false))
    }
}

impl Lint for DnsNameBadCharacterInLabel {
    fn initialize(&mut self) -> Result<(), ConfigurationError> {
        let mut table = [false; 128];
        for b in (b'a'..=b'z').chain(b'A'..=b'Z').chain(b'0'..=b'9') {
            table[usize::from(b)] = true;
        }
        // Underscores have their own lints
        table[usize::from(b'-')] = true;
        table[usize::from(b'_')] = true;
        self.allowed = Some(table);
        Ok(())
    }

    fn check_applies(&self, cert: &Certificate) -> bool {
        applies_to_subscriber_dns_names(cert)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let Some(table) = &self.allowed else {
            return LintResult::fatal("character table was not initialized");
        };

        let offending: Vec<&str> = lintable_dns_names(cert)
            .into_iter()
            .filter(|name| {
                dns_labels(name)
                    .iter()
                    .enumerate()
                    .filter(|(i, label)| !(*i == 0 && **label == "*"))
                    .any(|(_, label)| !Self::label_is_valid(table, label))
            })
            .collect();

        if offending.is_empty() {
            LintResult::pass()
        } else {
            LintResult::error(format!("invalid character in label: {}", offending.join(", ")))
        }
    }
}

pub struct ServerCertValidityTooLong;

impl Lint for ServerCertValidityTooLong {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.is_subscriber_cert() && cert.is_server_auth()
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        // notAfter is inclusive, so a certificate covers one more second
        let validity = cert.validity_period() + Duration::seconds(1);
        if validity > Duration::days(MAX_SUBSCRIBER_VALIDITY_DAYS) {
            LintResult::error(format!(
                "validity period of {} days exceeds {} days",
                validity.num_days(),
                MAX_SUBSCRIBER_VALIDITY_DAYS
            ))
        } else {
            LintResult::pass()
        }
    }
}
