//! Compact serialization: `B64URL(header).B64URL(payload).B64URL(signature)`
//!
//! Decoding borrows the signing input straight from the token string, so the
//! signature is always checked against the exact bytes that were received.

use crate::error::{Malformed, Result, Segment};
use crate::token::Header;
use crate::utils::base64url::{decode_segment, encode_bytes};

use serde::Serialize;
use serde_json::{Map, Value};

/// A token split into its decoded parts
#[derive(Debug, Clone)]
pub struct RawToken<'a> {
    pub header: Header,
    pub payload: Vec<u8>,
    /// `segment0.segment1` exactly as it appears in the input
    pub signing_input: &'a str,
    /// Third segment, still base64url encoded
    pub signature_segment: &'a str,
}

impl RawToken<'_> {
    /// Decode the signature segment
    ///
    /// [`Parser::parse`](crate::Parser::parse) reports a failure here as
    /// `SignatureInvalid`.
    pub fn signature(&self) -> Result<Vec<u8>> {
        decode_segment(self.signature_segment, Segment::Signature)
    }
}

/// Split and decode a compact token
///
/// The claims payload is decoded from base64url but not parsed; that happens
/// only after the signature has been verified. The signature segment is left
/// encoded, see [`RawToken::signature`].
pub fn decode(token: &str) -> Result<RawToken<'_>> {
    let dots: Vec<usize> = token.match_indices('.').map(|(i, _)| i).collect();
    let &[first, second] = dots.as_slice() else {
        return Err(Malformed::SegmentCount(dots.len() + 1).into());
    };

    let header_segment = &token[..first];
    let payload_segment = &token[first + 1..second];
    let signature_segment = &token[second + 1..];

    let header = decode_header(&decode_segment(header_segment, Segment::Header)?)?;
    let payload = decode_segment(payload_segment, Segment::Payload)?;

    Ok(RawToken {
        header,
        payload,
        signing_input: &token[..second],
        signature_segment,
    })
}

fn json_error(segment: Segment, reason: impl ToString) -> Malformed {
    Malformed::Json {
        segment,
        reason: reason.to_string(),
    }
}

/// Parse a header, requiring a JSON object with a non-empty string `alg`
pub fn decode_header(bytes: &[u8]) -> Result<Header> {
    let members: Map<String, Value> =
        serde_json::from_slice(bytes).map_err(|e| json_error(Segment::Header, e))?;

    match members.get("alg") {
        None => return Err(Malformed::MissingAlgorithm.into()),
        Some(Value::String(alg)) if alg.is_empty() => {
            return Err(Malformed::MissingAlgorithm.into())
        }
        Some(Value::String(_)) => {}
        Some(_) => return Err(json_error(Segment::Header, "'alg' must be a string").into()),
    }

    serde_json::from_value(Value::Object(members))
        .map_err(|e| json_error(Segment::Header, e).into())
}

/// Base64url-encode raw bytes as one segment
pub fn encode_segment(bytes: impl AsRef<[u8]>) -> String {
    encode_bytes(bytes)
}

/// Serialize `value` as JSON and encode it as one segment
pub fn encode_json_segment<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    serde_json::to_vec(value).map(encode_segment)
}

/// Join a signing input and a signature into a compact token
pub fn assemble(signing_input: &str, signature: &[u8]) -> String {
    let signature = encode_segment(signature);
    let mut token = String::with_capacity(signing_input.len() + 1 + signature.len());
    token.push_str(signing_input);
    token.push('.');
    token.push_str(&signature);
    token
}
