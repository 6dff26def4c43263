//! Parsed certificate model consumed by lints.
//!
//! `Certificate` is the only view of a certificate the engine and the lints
//! ever see. It is built once by `parser` (or by hand in tests) and then
//! shared immutably across every lint of a run.

pub mod oid;
pub mod parser;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::HashSet;

pub use parser::{parse_cert, parse_der, parse_pem, parse_pem_bundle, ParseError};

/// A fully parsed X.509 certificate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Certificate {
    /// Certificate version (1, 2, or 3)
    pub version: u32,
    /// Serial number as colon-separated uppercase hex
    pub serial: String,
    /// Issuer distinguished name, one line
    pub issuer: String,
    /// Subject distinguished name, one line
    pub subject: String,
    /// Values of every subject commonName attribute
    pub subject_common_names: Vec<String>,
    pub not_before: DateTime<Utc>,
    pub not_after: DateTime<Utc>,
    /// Raw issuerUniqueID bits, if the field is present
    pub issuer_unique_id: Option<Vec<u8>>,
    /// Raw subjectUniqueID bits, if the field is present
    pub subject_unique_id: Option<Vec<u8>>,
    /// Extensions in encoded order
    pub extensions: Vec<Extension>,
    /// dNSName entries of the subjectAltName extension
    pub dns_names: Vec<String>,
    pub basic_constraints: Option<BasicConstraints>,
    /// Extended key usage purposes as dotted OIDs
    pub ext_key_usage: Vec<String>,
}

/// A certificate extension in raw form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Extension {
    /// OID as a dotted-decimal string
    pub oid: String,
    pub critical: bool,
    /// DER contents of the extnValue OCTET STRING
    #[serde(skip)]
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BasicConstraints {
    pub ca: bool,
    pub path_len: Option<u32>,
}

impl Certificate {
    pub fn has_issuer_unique_id(&self) -> bool {
        self.issuer_unique_id.is_some()
    }

    pub fn has_subject_unique_id(&self) -> bool {
        self.subject_unique_id.is_some()
    }

    /// First extension with the given OID.
    pub fn extension(&self, oid: &str) -> Option<&Extension> {
        self.extensions.iter().find(|e| e.oid == oid)
    }

    pub fn has_extension(&self, oid: &str) -> bool {
        self.extension(oid).is_some()
    }

    /// OIDs that appear more than once, in first-seen order.
    pub fn duplicate_extension_oids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut duplicates = Vec::new();
        for ext in &self.extensions {
            if !seen.insert(ext.oid.as_str()) && reported.insert(ext.oid.as_str()) {
                duplicates.push(ext.oid.as_str());
            }
        }
        duplicates
    }

    /// Length of the validity period (notAfter minus notBefore).
    pub fn validity_period(&self) -> Duration {
        self.not_after - self.not_before
    }

    /// True when basicConstraints asserts cA.
    pub fn is_ca(&self) -> bool {
        self.basic_constraints.map(|bc| bc.ca).unwrap_or(false)
    }

    /// Issuer and subject names are identical.
    pub fn is_self_issued(&self) -> bool {
        !self.subject.is_empty() && self.issuer == self.subject
    }

    /// End-entity certificate: not a CA and not self-issued.
    pub fn is_subscriber_cert(&self) -> bool {
        !self.is_ca() && !self.is_self_issued()
    }

    /// Usable for TLS server authentication. A certificate without an
    /// extendedKeyUsage extension is unrestricted.
    pub fn is_server_auth(&self) -> bool {
        self.ext_key_usage.is_empty()
            || self
                .ext_key_usage
                .iter()
                .any(|eku| eku == oid::EKU_SERVER_AUTH || eku == oid::EKU_ANY)
    }

    /// SAN dNSNames followed by subject commonNames not already listed.
    pub fn all_dns_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.dns_names.iter().map(String::as_str).collect();
        for cn in &self.subject_common_names {
            if !names.iter().any(|n| n.eq_ignore_ascii_case(cn)) {
                names.push(cn.as_str());
            }
        }
        names
    }

    pub fn has_dns_names(&self) -> bool {
        !self.dns_names.is_empty() || !self.subject_common_names.is_empty()
    }
}
