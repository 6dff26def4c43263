//! PEM/DER input adapter.
//!
//! Decodes certificates with `x509-parser` and flattens them into the
//! `Certificate` model. The engine never calls into this module; it only
//! receives the finished `Certificate`.

use super::{oid, BasicConstraints, Certificate, Extension};
use chrono::{DateTime, TimeZone, Utc};
use x509_parser::extensions::ExtendedKeyUsage;
use x509_parser::pem::Pem;
use x509_parser::prelude::*;

/// Errors produced while decoding a certificate.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("invalid PEM: {0}")]
    Pem(String),

    #[error("invalid DER: {0}")]
    Der(String),

    #[error("unsupported X.509 version {0} (expected v1, v2, or v3)")]
    UnsupportedVersion(u32),

    #[error("validity timestamp {0} is out of range")]
    Time(i64),

    #[error("no CERTIFICATE block found")]
    NoCertificates,
}

const PEM_MARKER: &[u8] = b"-----BEGIN ";

/// Parse a certificate from PEM or DER (auto-detected).
pub fn parse_cert(input: &[u8]) -> Result<Certificate, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    if find_pem_start(input).is_some() {
        parse_pem(input)
    } else {
        parse_der(input)
    }
}

/// Parse the first PEM certificate block in `input`.
///
/// Any text before the block (for example an `openssl x509 -text` dump) is
/// ignored.
pub fn parse_pem(input: &[u8]) -> Result<Certificate, ParseError> {
    let start = find_pem_start(input).ok_or(ParseError::NoCertificates)?;
    let block = input.get(start..).unwrap_or(input);

    let (_, pem) =
        x509_parser::pem::parse_x509_pem(block).map_err(|e| ParseError::Pem(e.to_string()))?;

    if !is_certificate_label(&pem.label) {
        return Err(ParseError::Pem(format!("expected CERTIFICATE, got {}", pem.label)));
    }

    parse_der(&pem.contents)
}

/// Parse every CERTIFICATE block in a PEM bundle, in file order.
pub fn parse_pem_bundle(input: &[u8]) -> Result<Vec<Certificate>, ParseError> {
    let mut certs = Vec::new();
    for pem in Pem::iter_from_buffer(input) {
        let pem = pem.map_err(|e| ParseError::Pem(e.to_string()))?;
        if is_certificate_label(&pem.label) {
            certs.push(parse_der(&pem.contents)?);
        }
    }

    if certs.is_empty() {
        return Err(ParseError::NoCertificates);
    }
    Ok(certs)
}

/// Parse a certificate from DER.
pub fn parse_der(input: &[u8]) -> Result<Certificate, ParseError> {
    if input.is_empty() {
        return Err(ParseError::Empty);
    }
    let (_, x509) =
        X509Certificate::from_der(input).map_err(|e| ParseError::Der(e.to_string()))?;
    build_certificate(&x509)
}

fn find_pem_start(input: &[u8]) -> Option<usize> {
    input
        .windows(PEM_MARKER.len())
        .position(|w| w == PEM_MARKER)
}

fn is_certificate_label(label: &str) -> bool {
    matches!(label, "CERTIFICATE" | "TRUSTED CERTIFICATE" | "X509 CERTIFICATE")
}

fn build_certificate(x509: &X509Certificate) -> Result<Certificate, ParseError> {
    let tbs = &x509.tbs_certificate;

    let raw_version = tbs.version.0;
    if raw_version > 2 {
        return Err(ParseError::UnsupportedVersion(raw_version + 1));
    }

    let subject_common_names = tbs
        .subject
        .iter_common_name()
        .filter_map(|attr| attr.as_str().ok())
        .map(str::to_string)
        .collect();

    let mut cert = Certificate {
        version: raw_version + 1,
        serial: format_serial(tbs.raw_serial()),
        issuer: tbs.issuer.to_string(),
        subject: tbs.subject.to_string(),
        subject_common_names,
        not_before: to_utc(&tbs.validity.not_before)?,
        not_after: to_utc(&tbs.validity.not_after)?,
        issuer_unique_id: tbs.issuer_uid.as_ref().map(|uid| uid.0.data.to_vec()),
        subject_unique_id: tbs.subject_uid.as_ref().map(|uid| uid.0.data.to_vec()),
        ..Default::default()
    };

    for ext in tbs.extensions() {
        cert.extensions.push(Extension {
            oid: ext.oid.to_id_string(),
            critical: ext.critical,
            value: ext.value.to_vec(),
        });

        match ext.parsed_extension() {
            ParsedExtension::SubjectAlternativeName(san) => {
                for name in &san.general_names {
                    if let GeneralName::DNSName(dns) = name {
                        cert.dns_names.push(dns.to_string());
                    }
                }
            }
            ParsedExtension::BasicConstraints(bc) => {
                cert.basic_constraints = Some(BasicConstraints {
                    ca: bc.ca,
                    path_len: bc.path_len_constraint,
                });
            }
            ParsedExtension::ExtendedKeyUsage(eku) => {
                cert.ext_key_usage = eku_oids(eku);
            }
            _ => {}
        }
    }

    Ok(cert)
}

fn to_utc(time: &ASN1Time) -> Result<DateTime<Utc>, ParseError> {
    let ts = time.timestamp();
    Utc.timestamp_opt(ts, 0).single().ok_or(ParseError::Time(ts))
}

/// Colon-separated uppercase hex, leading zero bytes stripped (at least one
/// byte kept).
fn format_serial(raw: &[u8]) -> String {
    let stripped = match raw.iter().position(|&b| b != 0) {
        Some(pos) => raw.get(pos..).unwrap_or(raw),
        None => raw.get(raw.len().saturating_sub(1)..).unwrap_or(raw),
    };
    stripped
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

fn eku_oids(eku: &ExtendedKeyUsage) -> Vec<String> {
    let known = [
        (eku.any, oid::EKU_ANY),
        (eku.server_auth, oid::EKU_SERVER_AUTH),
        (eku.client_auth, oid::EKU_CLIENT_AUTH),
        (eku.code_signing, oid::EKU_CODE_SIGNING),
        (eku.email_protection, oid::EKU_EMAIL_PROTECTION),
        (eku.time_stamping, oid::EKU_TIME_STAMPING),
        (eku.ocsp_signing, oid::EKU_OCSP_SIGNING),
    ];

    let mut oids: Vec<String> = known
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, oid)| oid.to_string())
        .collect();
    oids.extend(eku.other.iter().map(|o| o.to_id_string()));
    oids
}
