//! Minimal X.509 DER walk.
//!
//! The receive state machine needs exactly one thing from a certificate:
//! the SubjectPublicKeyInfo of the leaf, handed to the crypto provider for
//! key-exchange and signature operations. Path validation, name checking
//! and everything else X.509 live outside this crate.
//!
//! ```text
//! Certificate ::= SEQUENCE {
//!     tbsCertificate       TBSCertificate,
//!     signatureAlgorithm   AlgorithmIdentifier,
//!     signatureValue       BIT STRING
//! }
//!
//! TBSCertificate ::= SEQUENCE {
//!     version         [0] EXPLICIT Version DEFAULT v1,
//!     serialNumber         INTEGER,
//!     signature            AlgorithmIdentifier,
//!     issuer               Name,
//!     validity             Validity,
//!     subject              Name,
//!     subjectPublicKeyInfo SubjectPublicKeyInfo,
//!     ...
//! }
//! ```

use crate::error::{Error, Result};

const TAG_SEQUENCE: u8 = 0x30;
const TAG_CONTEXT_0: u8 = 0xA0;

/// Extract the DER-encoded SubjectPublicKeyInfo from a certificate.
pub fn certificate_public_key(der: &[u8]) -> Result<Vec<u8>> {
    // Certificate SEQUENCE
    let (cert_body, _) = expect_tlv(der, TAG_SEQUENCE, "Certificate")?;

    // tbsCertificate SEQUENCE
    let (tbs_body, _) = expect_tlv(cert_body, TAG_SEQUENCE, "TBSCertificate")?;

    let mut cursor = tbs_body;

    // [0] EXPLICIT version, present only for v2/v3 certificates.
    if cursor.first() == Some(&TAG_CONTEXT_0) {
        cursor = skip_tlv(cursor, "version")?;
    }

    cursor = skip_tlv(cursor, "serialNumber")?;
    cursor = skip_tlv(cursor, "signature")?;
    cursor = skip_tlv(cursor, "issuer")?;
    cursor = skip_tlv(cursor, "validity")?;
    cursor = skip_tlv(cursor, "subject")?;

    // subjectPublicKeyInfo, returned with its own tag and length so the
    // result is a self-contained SPKI DER value.
    let (_, spki_total) = expect_tlv(cursor, TAG_SEQUENCE, "subjectPublicKeyInfo")?;
    Ok(cursor[..spki_total].to_vec())
}

/// Parse one TLV with the expected tag, returning (content, total length).
fn expect_tlv<'a>(data: &'a [u8], tag: u8, what: &str) -> Result<(&'a [u8], usize)> {
    if data.is_empty() {
        return Err(Error::InvalidMessage(format!("Truncated DER: {}", what)));
    }
    if data[0] != tag {
        return Err(Error::InvalidMessage(format!(
            "Unexpected DER tag for {}: {:#04x}",
            what, data[0]
        )));
    }

    let (length, header) = parse_length(&data[1..], what)?;
    let total = 1 + header + length;
    if data.len() < total {
        return Err(Error::InvalidMessage(format!("Truncated DER: {}", what)));
    }

    Ok((&data[1 + header..total], total))
}

/// Skip one TLV of any tag, returning the remainder.
fn skip_tlv<'a>(data: &'a [u8], what: &str) -> Result<&'a [u8]> {
    if data.is_empty() {
        return Err(Error::InvalidMessage(format!("Truncated DER: {}", what)));
    }
    let (length, header) = parse_length(&data[1..], what)?;
    let total = 1 + header + length;
    if data.len() < total {
        return Err(Error::InvalidMessage(format!("Truncated DER: {}", what)));
    }
    Ok(&data[total..])
}

/// Parse a DER length field, returning (length, bytes consumed).
fn parse_length(data: &[u8], what: &str) -> Result<(usize, usize)> {
    let first = *data
        .first()
        .ok_or_else(|| Error::InvalidMessage(format!("Truncated DER length: {}", what)))?;

    if first & 0x80 == 0 {
        return Ok((first as usize, 1));
    }

    let count = (first & 0x7F) as usize;
    if count == 0 || count > 4 {
        return Err(Error::InvalidMessage(format!(
            "Invalid DER length encoding: {}",
            what
        )));
    }
    if data.len() < 1 + count {
        return Err(Error::InvalidMessage(format!(
            "Truncated DER length: {}",
            what
        )));
    }

    let mut length = 0usize;
    for &b in &data[1..1 + count] {
        length = (length << 8) | b as usize;
    }
    Ok((length, 1 + count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn der(tag: u8, content: &[u8]) -> Vec<u8> {
        let mut out = vec![tag];
        let len = content.len();
        if len < 0x80 {
            out.push(len as u8);
        } else if len <= 0xFF {
            out.push(0x81);
            out.push(len as u8);
        } else {
            out.push(0x82);
            out.extend_from_slice(&(len as u16).to_be_bytes());
        }
        out.extend_from_slice(content);
        out
    }

    fn synthetic_certificate(spki: &[u8], with_version: bool) -> Vec<u8> {
        let mut tbs = Vec::new();
        if with_version {
            tbs.extend_from_slice(&der(TAG_CONTEXT_0, &der(0x02, &[2]))); // [0] { INTEGER 2 }
        }
        tbs.extend_from_slice(&der(0x02, &[1])); // serialNumber
        tbs.extend_from_slice(&der(TAG_SEQUENCE, &[])); // signature
        tbs.extend_from_slice(&der(TAG_SEQUENCE, &[])); // issuer
        tbs.extend_from_slice(&der(TAG_SEQUENCE, &[])); // validity
        tbs.extend_from_slice(&der(TAG_SEQUENCE, &[])); // subject
        tbs.extend_from_slice(spki);

        let mut cert_body = der(TAG_SEQUENCE, &tbs);
        cert_body.extend_from_slice(&der(TAG_SEQUENCE, &[])); // signatureAlgorithm
        cert_body.extend_from_slice(&der(0x03, &[0, 0xAA])); // signatureValue
        der(TAG_SEQUENCE, &cert_body)
    }

    #[test]
    fn test_extract_spki_v3() {
        let spki = der(
            TAG_SEQUENCE,
            &[&der(TAG_SEQUENCE, &[])[..], &der(0x03, &[0, 1, 2, 3])[..]].concat(),
        );
        let cert = synthetic_certificate(&spki, true);
        assert_eq!(certificate_public_key(&cert).unwrap(), spki);
    }

    #[test]
    fn test_extract_spki_v1_no_version_tag() {
        let spki = der(
            TAG_SEQUENCE,
            &[&der(TAG_SEQUENCE, &[])[..], &der(0x03, &[0, 9])[..]].concat(),
        );
        let cert = synthetic_certificate(&spki, false);
        assert_eq!(certificate_public_key(&cert).unwrap(), spki);
    }

    #[test]
    fn test_reject_garbage() {
        assert!(certificate_public_key(&[]).is_err());
        assert!(certificate_public_key(&[0x02, 0x01, 0x00]).is_err());
        assert!(certificate_public_key(&[0x30, 0x05, 0x01]).is_err());
    }

    #[test]
    fn test_long_form_length() {
        // SPKI with > 127 bytes of content forces long-form lengths.
        let key_bits = vec![0x55u8; 200];
        let spki = der(
            TAG_SEQUENCE,
            &[&der(TAG_SEQUENCE, &[])[..], &der(0x03, &key_bits)[..]].concat(),
        );
        let cert = synthetic_certificate(&spki, true);
        assert_eq!(certificate_public_key(&cert).unwrap(), spki);
    }
}
