//! Minimal DER helpers for public key material
//!
//! ring verifies RSA signatures against a PKCS#1 `RSAPublicKey` and ECDSA
//! signatures against an uncompressed SEC1 point. Callers frequently hold a
//! `SubjectPublicKeyInfo` instead, or raw JWK-style components, so this module
//! converts between those shapes without pulling in a full ASN.1 stack.

use crate::error::{Error, Result};
use crate::keys::EcdsaCurve;

const TAG_INTEGER: u8 = 0x02;
const TAG_BIT_STRING: u8 = 0x03;
const TAG_SEQUENCE: u8 = 0x30;

fn der_len(len: usize) -> Vec<u8> {
    if len < 0x80 {
        vec![len as u8]
    } else {
        let mut tmp = Vec::new();
        let mut n = len;
        while n > 0 {
            tmp.push((n & 0xFF) as u8);
            n >>= 8;
        }
        tmp.reverse();
        let mut v = Vec::with_capacity(1 + tmp.len());
        v.push(0x80 | (tmp.len() as u8));
        v.extend_from_slice(&tmp);
        v
    }
}

fn der_integer(bytes: &[u8]) -> Vec<u8> {
    let trimmed = strip_leading_zeros(bytes);
    // Ensure positive INTEGER: if MSB set, prepend 0x00
    let needs_pad = trimmed.first().is_some_and(|b| b & 0x80 != 0);
    let mut body = Vec::with_capacity(trimmed.len() + 1);
    if needs_pad || trimmed.is_empty() {
        body.push(0x00);
    }
    body.extend_from_slice(trimmed);

    let mut out = Vec::with_capacity(2 + body.len());
    out.push(TAG_INTEGER);
    out.extend_from_slice(&der_len(body.len()));
    out.extend_from_slice(&body);
    out
}

fn der_sequence(children: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + children.len());
    out.push(TAG_SEQUENCE);
    out.extend_from_slice(&der_len(children.len()));
    out.extend_from_slice(children);
    out
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

fn invalid(msg: &str) -> Error {
    Error::InvalidKey(format!("DER: {msg}"))
}

/// Read one TLV element, returning `(tag, value, remaining)`
fn read_tlv(input: &[u8]) -> Result<(u8, &[u8], &[u8])> {
    let (&tag, rest) = input.split_first().ok_or_else(|| invalid("truncated tag"))?;
    let (&first, rest) = rest.split_first().ok_or_else(|| invalid("truncated length"))?;

    let (len, rest) = if first < 0x80 {
        (first as usize, rest)
    } else {
        let count = (first & 0x7f) as usize;
        if count == 0 || count > 4 || rest.len() < count {
            return Err(invalid("unsupported length encoding"));
        }
        let len = rest[..count]
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | b as usize);
        (len, &rest[count..])
    };

    if rest.len() < len {
        return Err(invalid("length exceeds input"));
    }
    Ok((tag, &rest[..len], &rest[len..]))
}

/// Unwrap the BIT STRING payload of a `SubjectPublicKeyInfo`, if `der` is one
fn spki_subject_public_key(der: &[u8]) -> Result<Option<&[u8]>> {
    let (tag, body, trailing) = read_tlv(der)?;
    if tag != TAG_SEQUENCE || !trailing.is_empty() {
        return Err(invalid("expected a single SEQUENCE"));
    }

    let (first_tag, _, after_alg) = read_tlv(body)?;
    if first_tag != TAG_SEQUENCE {
        return Ok(None);
    }

    let (bits_tag, bits, _) = read_tlv(after_alg)?;
    match bits.split_first() {
        Some((0, key)) if bits_tag == TAG_BIT_STRING => Ok(Some(key)),
        _ => Err(invalid("malformed subjectPublicKey BIT STRING")),
    }
}

/// Parsed RSA public key: PKCS#1 DER plus modulus size
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RsaPublicParts {
    pub pkcs1_der: Vec<u8>,
    pub modulus_bits: usize,
}

/// Accept PKCS#1 `RSAPublicKey` or `SubjectPublicKeyInfo` DER
pub(crate) fn rsa_public_key(der: &[u8]) -> Result<RsaPublicParts> {
    let pkcs1 = spki_subject_public_key(der)?.unwrap_or(der);

    let (tag, body, trailing) = read_tlv(pkcs1)?;
    if tag != TAG_SEQUENCE || !trailing.is_empty() {
        return Err(invalid("RSAPublicKey must be a SEQUENCE"));
    }
    let (n_tag, n, rest) = read_tlv(body)?;
    let (e_tag, e, rest) = read_tlv(rest)?;
    if n_tag != TAG_INTEGER || e_tag != TAG_INTEGER || !rest.is_empty() {
        return Err(invalid("RSAPublicKey must hold two INTEGERs"));
    }
    if strip_leading_zeros(e).is_empty() {
        return Err(invalid("RSA exponent is zero"));
    }

    Ok(RsaPublicParts {
        pkcs1_der: pkcs1.to_vec(),
        modulus_bits: integer_bits(n),
    })
}

/// Build PKCS#1 `RSAPublicKey` DER from big-endian modulus and exponent
pub(crate) fn rsa_public_key_from_components(n: &[u8], e: &[u8]) -> Result<Vec<u8>> {
    if strip_leading_zeros(n).is_empty() || strip_leading_zeros(e).is_empty() {
        return Err(invalid("RSA key missing n or e"));
    }

    let mut children = der_integer(n);
    children.extend_from_slice(&der_integer(e));
    Ok(der_sequence(&children))
}

/// Accept an uncompressed SEC1 point or an EC `SubjectPublicKeyInfo`
pub(crate) fn ec_public_point(der_or_point: &[u8]) -> Result<Vec<u8>> {
    if der_or_point.first() == Some(&0x04) {
        return Ok(der_or_point.to_vec());
    }
    spki_subject_public_key(der_or_point)?
        .map(<[u8]>::to_vec)
        .ok_or_else(|| invalid("expected an EC SubjectPublicKeyInfo"))
}

/// Build an uncompressed SEC1 point (`04 || x || y`) from affine coordinates
pub(crate) fn ec_point_from_coordinates(x: &[u8], y: &[u8], curve: EcdsaCurve) -> Result<Vec<u8>> {
    let expected_len = curve.coordinate_len();
    let x = strip_leading_zeros(x);
    let y = strip_leading_zeros(y);
    if x.is_empty() || y.is_empty() || x.len() > expected_len || y.len() > expected_len {
        return Err(Error::InvalidKey(format!(
            "ECDSA coordinates have wrong length for curve {curve:?}"
        )));
    }

    let mut point = vec![0u8; 1 + 2 * expected_len];
    point[0] = 0x04;
    point[1 + expected_len - x.len()..1 + expected_len].copy_from_slice(x);
    point[1 + 2 * expected_len - y.len()..].copy_from_slice(y);
    Ok(point)
}

fn integer_bits(value: &[u8]) -> usize {
    let value = strip_leading_zeros(value);
    match value.first() {
        Some(first) => (value.len() - 1) * 8 + (8 - first.leading_zeros() as usize),
        None => 0,
    }
}
