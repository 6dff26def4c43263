//! RFC 5280 profile lints.
//!
//! Structural requirements of the Internet X.509 certificate profile. These
//! apply to every certificate regardless of who issued it.

use crate::certificate::{oid, Certificate};
use crate::data::dates;
use crate::engine::effective::EffectiveWindow;
use crate::engine::lint::{Lint, LintDescriptor};
use crate::engine::registry::{LintRegistry, RegistryError};
use crate::{LintResult, LintSource, Severity};

/// Register all RFC 5280 lints
pub fn register(registry: &mut LintRegistry) -> Result<(), RegistryError> {
    registry.register(
        LintDescriptor {
            name: "e_cert_contains_unique_identifier".to_string(),
            description: "CAs MUST NOT generate certificates with unique identifiers".to_string(),
            citation: "RFC 5280: 4.1.2.8".to_string(),
            source: LintSource::Rfc5280,
            effective: EffectiveWindow::starting(dates::rfc5280_date()),
            severity: Severity::Error,
        },
        CertContainsUniqueIdentifier,
    )?;

    registry.register(
        LintDescriptor {
            name: "e_cert_unique_identifier_version_not_2_or_3".to_string(),
            description: "Unique identifiers MUST only appear if the version is 2 or 3".to_string(),
            citation: "RFC 5280: 4.1.2.8".to_string(),
            source: LintSource::Rfc5280,
            effective: EffectiveWindow::starting(dates::rfc5280_date()),
            severity: Severity::Error,
        },
        UniqueIdentifierVersion,
    )?;

    registry.register(
        LintDescriptor {
            name: "e_validity_time_not_positive".to_string(),
            description: "The notAfter date MUST NOT precede the notBefore date".to_string(),
            citation: "RFC 5280: 4.1.2.5".to_string(),
            source: LintSource::Rfc5280,
            effective: EffectiveWindow::starting(dates::rfc2459_date()),
            severity: Severity::Error,
        },
        ValidityTimeNotPositive,
    )?;

    registry.register(
        LintDescriptor {
            name: "e_ext_duplicate_extension".to_string(),
            description: "A certificate MUST NOT include more than one instance of an extension"
                .to_string(),
            citation: "RFC 5280: 4.2".to_string(),
            source: LintSource::Rfc5280,
            effective: EffectiveWindow::starting(dates::rfc5280_date()),
            severity: Severity::Error,
        },
        DuplicateExtension,
    )?;

    registry.register(
        LintDescriptor {
            name: "w_ext_key_usage_not_critical".to_string(),
            description: "Conforming CAs SHOULD mark the keyUsage extension as critical"
                .to_string(),
            citation: "RFC 5280: 4.2.1.3".to_string(),
            source: LintSource::Rfc5280,
            effective: EffectiveWindow::starting(dates::rfc5280_date()),
            severity: Severity::Warn,
        },
        KeyUsageNotCritical,
    )?;

    registry.register(
        LintDescriptor {
            name: "e_basic_constraints_not_critical".to_string(),
            description: "CA certificates MUST mark the basicConstraints extension as critical"
                .to_string(),
            citation: "RFC 5280: 4.2.1.9".to_string(),
            source: LintSource::Rfc5280,
            effective: EffectiveWindow::starting(dates::rfc5280_date()),
            severity: Severity::Error,
        },
        BasicConstraintsNotCritical,
    )?;

    Ok(())
}

/// Subject and issuer unique identifiers must be absent.
pub struct CertContainsUniqueIdentifier;

impl Lint for CertContainsUniqueIdentifier {
    fn check_applies(&self, _cert: &Certificate) -> bool {
        true
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        match (cert.has_issuer_unique_id(), cert.has_subject_unique_id()) {
            (false, false) => LintResult::pass(),
            (true, false) => LintResult::error("issuerUniqueID is present"),
            (false, true) => LintResult::error("subjectUniqueID is present"),
            (true, true) => LintResult::error("issuerUniqueID and subjectUniqueID are present"),
        }
    }
}

/// Unique identifiers only exist from version 2 onwards.
pub struct UniqueIdentifierVersion;

impl Lint for UniqueIdentifierVersion {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.has_issuer_unique_id() || cert.has_subject_unique_id()
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        if cert.version == 2 || cert.version == 3 {
            LintResult::pass()
        } else {
            LintResult::error(format!(
                "unique identifier present in a version {} certificate",
                cert.version
            ))
        }
    }
}

pub struct ValidityTimeNotPositive;

impl Lint for ValidityTimeNotPositive {
    fn check_applies(&self, _cert: &Certificate) -> bool {
        true
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        if cert.not_after < cert.not_before {
            LintResult::error(format!(
                "notAfter {} precedes notBefore {}",
                cert.not_after.to_rfc3339(),
                cert.not_before.to_rfc3339()
            ))
        } else {
            LintResult::pass()
        }
    }
}

/// Extensions are only defined for version 3 certificates.
pub struct DuplicateExtension;

impl Lint for DuplicateExtension {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.version == 3
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let duplicates = cert.duplicate_extension_oids();
        if duplicates.is_empty() {
            LintResult::pass()
        } else {
            LintResult::error(format!("duplicate extensions: {}", duplicates.join(", ")))
        }
    }
}

pub struct KeyUsageNotCritical;

impl Lint for KeyUsageNotCritical {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.has_extension(oid::KEY_USAGE)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        match cert.extension(oid::KEY_USAGE) {
            Some(ext) if ext.critical => LintResult::pass(),
            Some(_) => LintResult::warn("keyUsage extension is not marked critical"),
            None => LintResult::fatal("keyUsage extension disappeared after applicability check"),
        }
    }
}

pub struct BasicConstraintsNotCritical;

impl Lint for BasicConstraintsNotCritical {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.is_ca() && cert.has_extension(oid::BASIC_CONSTRAINTS)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        match cert.extension(oid::BASIC_CONSTRAINTS) {
            Some(ext) if ext.critical => LintResult::pass(),
            Some(_) => LintResult::error("basicConstraints extension is not marked critical"),
            None => LintResult::fatal(
                "basicConstraints extension disappeared after applicability check",
            ),
        }
    }
}
